//! The multi-field prompt flow.
//!
//! ```text
//! specs ─▶ Session ─▶ render ─▶ ask each unanswered field ─▶ confirm prompt
//!                                                              │  ▲
//!                                          field number ───────┘  │
//!                                          (clear, ask, loop) ────┘
//! ```
//!
//! Every ask renders twice: once with the field highlighted while its read
//! strategy runs, once after the new response is stored.

use crate::choice::{self, Choice};
use crate::defaults::DisplaySettings;
use crate::error::{Error, Result};
use crate::field::{FieldSpec, ResponseValue};
use crate::input::LineInput;
use crate::session::Session;
use crate::sink::{RenderSink, SinkGuard};

/// Collect one response per spec, let the user revise any of them, and
/// return the responses in spec order once confirmed.
///
/// Returns `Ok(None)` if the user cancels at the confirm prompt. A failing
/// read strategy aborts the flow with its error. The sink is closed on every
/// path out of this function.
pub fn read_multi<V: ResponseValue>(
    specs: Vec<FieldSpec<V>>,
    settings: &DisplaySettings,
    sink: &mut dyn RenderSink,
    choices: &mut dyn LineInput,
) -> Result<Option<Vec<V>>> {
    let mut guard = SinkGuard::new(sink);
    let result = run(
        Session::new(specs, settings.clone()),
        &mut guard,
        choices,
    );
    let closed = guard.finish();

    let outcome = result?;
    closed?;
    Ok(outcome)
}

fn run<V: ResponseValue>(
    session: Session<V>,
    sink: &mut SinkGuard<'_>,
    choices: &mut dyn LineInput,
) -> Result<Option<Vec<V>>> {
    let mut flow = Flow { session, sink };
    flow.draw()?;
    flow.collect_unanswered()?;
    flow.confirm_or_change(choices)
}

struct Flow<'s, 'g, V> {
    session: Session<V>,
    sink: &'s mut SinkGuard<'g>,
}

impl<V: ResponseValue> Flow<'_, '_, V> {
    fn draw(&mut self) -> Result<()> {
        let frame = self.session.render();
        self.sink.show(&frame)
    }

    fn collect_unanswered(&mut self) -> Result<()> {
        for index in self.session.unanswered() {
            self.ask(index)?;
        }
        Ok(())
    }

    fn ask(&mut self, index: usize) -> Result<()> {
        self.session.set_current(index, true)?;
        self.draw()?;

        let read = self.session.snapshot(index)?.read();
        self.session.set_current(index, false)?;
        let value = read?;

        self.session.set_response(index, Some(value))?;
        self.draw()
    }

    fn confirm_or_change(&mut self, choices: &mut dyn LineInput) -> Result<Option<Vec<V>>> {
        let count = self.session.len();
        let question = choice::question(&self.session.settings().confirm_label, count);

        loop {
            let input = choices
                .read_line(&question)?
                .ok_or_else(|| Error::prompt_cancelled(question.trim_end()))?;

            match Choice::parse(&input, count) {
                Choice::Confirm => return self.session.responses().map(Some),
                Choice::Cancel => return Ok(None),
                Choice::Revise(index) => {
                    self.session.set_response(index, None)?;
                    self.ask(index)?;
                }
                Choice::Invalid => {}
            }
        }
    }
}
