/// What the user asked for at the confirm prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Confirm,
    Cancel,
    /// Re-answer the field at this 0-based index.
    Revise(usize),
    Invalid,
}

impl Choice {
    /// Normalize raw confirm-prompt input against a session of `field_count` fields.
    pub fn parse(input: &str, field_count: usize) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("y") {
            return Choice::Confirm;
        }
        if trimmed.eq_ignore_ascii_case("n") {
            return Choice::Cancel;
        }

        match trimmed.parse::<usize>() {
            Ok(n) if (1..=field_count).contains(&n) => Choice::Revise(n - 1),
            _ => Choice::Invalid,
        }
    }
}

/// Question shown at the confirm prompt.
pub fn question(label: &str, field_count: usize) -> String {
    match field_count {
        0 => format!("{} [Y/n]: ", label),
        1 => format!("{} [Y/n/1]: ", label),
        n => format!("{} [Y/n/1-{}]: ", label, n),
    }
}
