//! Text layout for a session.
//!
//! Each field occupies three lines: `"{n}. {prompt}"`, the indented response
//! (or placeholder), and a blank separator. Only the response text of the
//! current field is highlighted.

use serde::Serialize;

use crate::defaults::DisplaySettings;
use crate::field::{FieldState, ResponseValue};

/// A highlighted byte range on one line of a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Full text content of one redraw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

impl Frame {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The highlighted text, if any.
    pub fn highlighted(&self) -> Option<&str> {
        let hl = self.highlight?;
        self.lines.get(hl.line)?.get(hl.start..hl.end)
    }
}

pub fn frame<V: ResponseValue>(fields: &[FieldState<V>], settings: &DisplaySettings) -> Frame {
    let mut lines = Vec::with_capacity(fields.len() * 3);
    let mut highlight = None;

    for (index, field) in fields.iter().enumerate() {
        lines.push(format!("{}. {}", index + 1, field.prompt()));

        let value = field
            .display_text()
            .unwrap_or_else(|| settings.placeholder.clone());
        let response_line = format!("{}{}", settings.indent, value);

        if field.is_current {
            highlight = Some(Highlight {
                line: lines.len(),
                start: settings.indent.len(),
                end: response_line.len(),
            });
        }

        lines.push(response_line);
        lines.push(String::new());
    }

    Frame { lines, highlight }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;
    use serde_json::{json, Value};

    fn state(prompt: &str, default: Option<Value>) -> FieldState<Value> {
        let spec = FieldSpec::new(prompt, |_: &str, _: Option<&Value>| Ok(Value::Null));
        let spec = match default {
            Some(value) => spec.with_default(value),
            None => spec,
        };
        FieldState::from_spec(spec)
    }

    #[test]
    fn lays_out_prompt_response_and_separator() {
        let fields = vec![state("Name", Some(json!("Ada"))), state("Age", None)];
        let frame = frame(&fields, &DisplaySettings::default());

        assert_eq!(
            frame.lines,
            vec!["1. Name", "    Ada", "", "2. Age", "    __", ""]
        );
        assert_eq!(frame.highlight, None);
    }

    #[test]
    fn highlights_only_the_current_response() {
        let mut fields = vec![state("Name", Some(json!("Ada"))), state("Age", None)];
        fields[1].is_current = true;
        let frame = frame(&fields, &DisplaySettings::default());

        assert_eq!(
            frame.highlight,
            Some(Highlight {
                line: 4,
                start: 4,
                end: 6
            })
        );
        assert_eq!(frame.highlighted(), Some("__"));
    }

    #[test]
    fn non_string_without_formatter_shows_placeholder() {
        let fields = vec![state("Count", Some(json!(3)))];
        let frame = frame(&fields, &DisplaySettings::default());

        assert_eq!(frame.lines[1], "    __");
    }

    #[test]
    fn non_string_uses_formatter_when_present() {
        let spec = FieldSpec::new("Count", |_: &str, _: Option<&Value>| Ok(Value::Null))
            .with_display(|v| format!("#{}", v))
            .with_default(json!(3));
        let fields = vec![FieldState::from_spec(spec)];
        let frame = frame(&fields, &DisplaySettings::default());

        assert_eq!(frame.lines[1], "    #3");
    }

    #[test]
    fn honors_configured_placeholder_and_indent() {
        let settings = DisplaySettings {
            placeholder: "(none)".to_string(),
            indent: "> ".to_string(),
            ..DisplaySettings::default()
        };
        let frame = frame(&[state("Name", None)], &settings);

        assert_eq!(frame.lines[1], "> (none)");
    }

    #[test]
    fn empty_session_renders_nothing() {
        let frame = frame::<Value>(&[], &DisplaySettings::default());

        assert!(frame.lines.is_empty());
        assert_eq!(frame.text(), "");
    }
}
