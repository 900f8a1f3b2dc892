use crate::error::Result;
use crate::render::Frame;

use super::RenderSink;

/// In-memory scratch buffer. Keeps every frame it was shown.
#[derive(Debug, Default)]
pub struct BufferSink {
    frames: Vec<Frame>,
    close_count: usize,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn is_closed(&self) -> bool {
        self.close_count > 0
    }

    pub fn close_count(&self) -> usize {
        self.close_count
    }
}

impl RenderSink for BufferSink {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.close_count += 1;
        Ok(())
    }
}
