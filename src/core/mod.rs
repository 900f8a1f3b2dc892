// Public modules
pub mod choice;
pub mod engine;
pub mod error;
pub mod field;
pub mod flow;
pub mod form;
pub mod input;
pub mod render;
pub mod session;
pub mod sink;
pub mod tty;

// Internal modules - not part of public API
pub(crate) mod paths;

// Public modules for CLI access
pub mod defaults;

// Re-export common types for convenience
pub use engine::PromptEngine;
pub use error::{Error, ErrorCode, Result};
pub use field::{FieldSpec, FieldState, ReadStrategy, ResponseValue};
pub use flow::read_multi;
pub use form::FormSpec;
pub use input::{LineInput, ScriptedInput, SharedInput, StdinInput};
pub use render::Frame;
pub use session::Session;
pub use sink::{BufferSink, RenderSink, TerminalSink};
