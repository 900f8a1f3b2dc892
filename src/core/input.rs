//! Line-oriented user input.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::error::{Error, Result};

/// Source of single lines of user input.
pub trait LineInput {
    /// Show `message` and read one line, without the trailing newline.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    fn read_line(&mut self, message: &str) -> Result<Option<String>>;

    /// Tell the user something about their last answer.
    fn report(&mut self, message: &str);
}

/// One input shared between the field readers and the confirm prompt.
pub type SharedInput = Rc<RefCell<dyn LineInput>>;

pub fn shared<T: LineInput + 'static>(input: T) -> SharedInput {
    Rc::new(RefCell::new(input))
}

impl<T: LineInput + ?Sized> LineInput for Rc<RefCell<T>> {
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        self.borrow_mut().read_line(message)
    }

    fn report(&mut self, message: &str) {
        self.borrow_mut().report(message)
    }
}

/// Prompts on stderr and reads from stdin.
#[derive(Debug, Default)]
pub struct StdinInput;

impl LineInput for StdinInput {
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        eprint!("{}", message);
        io::stderr().flush().ok();

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;

        if read == 0 {
            return Ok(None);
        }

        Ok(Some(trim_newline(line)))
    }

    fn report(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

fn trim_newline(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// Replays a fixed list of answers.
///
/// Used for `--answers` files and tests. Every prompt shown and every report
/// made is recorded.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub reports: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            reports: Vec::new(),
        }
    }

    /// One answer per line of `content`.
    pub fn from_lines(content: &str) -> Self {
        Self::new(content.lines())
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl LineInput for ScriptedInput {
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        self.prompts.push(message.to_string());
        Ok(self.answers.pop_front())
    }

    fn report(&mut self, message: &str) {
        self.reports.push(message.to_string());
    }
}
