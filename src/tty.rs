//! Terminal I/O utilities for CLI.

pub use multiprompt::tty::require_tty_for_interactive;
