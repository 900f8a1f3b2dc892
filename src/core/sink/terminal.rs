use std::io::{self, Stderr, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use crate::defaults::{DisplaySettings, HighlightStyle};
use crate::error::{Error, Result};
use crate::render::Frame;

use super::RenderSink;

/// Redraws the whole session on stderr, optionally inside the alternate
/// screen so the form does not pollute scrollback.
pub struct TerminalSink<W: Write = Stderr> {
    out: W,
    attribute: Option<Attribute>,
    alternate_screen: bool,
    open: bool,
}

impl TerminalSink {
    pub fn open(settings: &DisplaySettings) -> Result<Self> {
        Self::with_writer(io::stderr(), settings)
    }
}

impl<W: Write> TerminalSink<W> {
    /// Draw into `out` instead of stderr.
    pub fn with_writer(mut out: W, settings: &DisplaySettings) -> Result<Self> {
        if settings.alternate_screen {
            execute!(out, EnterAlternateScreen).map_err(|e| {
                Error::render_failed(e.to_string(), Some("enter alternate screen".to_string()))
            })?;
        }

        Ok(Self {
            out,
            attribute: attribute_for(settings.highlight),
            alternate_screen: settings.alternate_screen,
            open: true,
        })
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;

        for (index, line) in frame.lines.iter().enumerate() {
            match frame.highlight.filter(|hl| hl.line == index) {
                Some(hl) => match (
                    line.get(..hl.start),
                    line.get(hl.start..hl.end),
                    line.get(hl.end..),
                ) {
                    (Some(before), Some(marked), Some(after)) => {
                        queue!(self.out, Print(before))?;
                        self.print_marked(marked)?;
                        queue!(self.out, Print(after))?;
                    }
                    _ => queue!(self.out, Print(line))?,
                },
                None => queue!(self.out, Print(line))?,
            }
            queue!(self.out, Print("\n"))?;
        }

        self.out.flush()
    }

    fn print_marked(&mut self, text: &str) -> io::Result<()> {
        match self.attribute {
            Some(attribute) => queue!(
                self.out,
                SetAttribute(attribute),
                Print(text),
                SetAttribute(Attribute::Reset)
            ),
            None => queue!(self.out, Print(text)),
        }
    }
}

fn attribute_for(style: HighlightStyle) -> Option<Attribute> {
    match style {
        HighlightStyle::Reverse => Some(Attribute::Reverse),
        HighlightStyle::Bold => Some(Attribute::Bold),
        HighlightStyle::Underline => Some(Attribute::Underlined),
        HighlightStyle::None => None,
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.draw(frame)
            .map_err(|e| Error::render_failed(e.to_string(), Some("draw frame".to_string())))
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;

        if self.alternate_screen {
            execute!(self.out, LeaveAlternateScreen).map_err(|e| {
                Error::render_failed(e.to_string(), Some("leave alternate screen".to_string()))
            })?;
        }
        Ok(())
    }
}
