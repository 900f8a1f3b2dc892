//! Where rendered frames go.

mod buffer;
mod terminal;

pub use buffer::BufferSink;
pub use terminal::TerminalSink;

use crate::error::Result;
use crate::render::Frame;

/// Display surface for a prompt session.
pub trait RenderSink {
    /// Replace everything shown with `frame` and bring it into view.
    fn show(&mut self, frame: &Frame) -> Result<()>;

    /// Release the surface. Called once when the session ends.
    fn close(&mut self) -> Result<()>;
}

/// Closes the wrapped sink exactly once: explicitly via [`SinkGuard::finish`]
/// or, on early return and unwinding, when dropped.
pub struct SinkGuard<'a> {
    sink: &'a mut dyn RenderSink,
    closed: bool,
}

impl<'a> SinkGuard<'a> {
    pub fn new(sink: &'a mut dyn RenderSink) -> Self {
        Self {
            sink,
            closed: false,
        }
    }

    pub fn show(&mut self, frame: &Frame) -> Result<()> {
        self.sink.show(frame)
    }

    pub fn finish(mut self) -> Result<()> {
        self.closed = true;
        self.sink.close()
    }
}

impl Drop for SinkGuard<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(err) = self.sink.close() {
            log_status!("prompt", "Failed to close display: {}", err);
        }
    }
}
