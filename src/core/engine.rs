use crate::defaults::{self, DisplaySettings};
use crate::error::{Error, Result};
use crate::field::{FieldSpec, ResponseValue};
use crate::flow;
use crate::input::LineInput;
use crate::sink::RenderSink;
use crate::tty;

/// Entry point for prompt flows.
/// Handles TTY detection and falls back to defaults when nobody can answer.
pub struct PromptEngine {
    interactive: bool,
    settings: DisplaySettings,
}

impl PromptEngine {
    /// Create engine with automatic TTY detection and settings from multiprompt.json.
    pub fn new() -> Self {
        Self {
            interactive: tty::require_tty_for_interactive(),
            settings: defaults::load_settings(),
        }
    }

    /// Create engine with explicit interactive mode and built-in settings.
    pub fn with_interactive(interactive: bool) -> Self {
        Self {
            interactive,
            settings: DisplaySettings::default(),
        }
    }

    /// Force non-interactive mode (useful for --yes flags).
    pub fn non_interactive() -> Self {
        Self::with_interactive(false)
    }

    pub fn with_settings(mut self, settings: DisplaySettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Run a multi-field prompt flow.
    ///
    /// Non-interactive engines never prompt: every field must carry a default,
    /// and the defaults are returned as if confirmed.
    pub fn read_multi<V: ResponseValue>(
        &self,
        specs: Vec<FieldSpec<V>>,
        sink: &mut dyn RenderSink,
        input: &mut dyn LineInput,
    ) -> Result<Option<Vec<V>>> {
        if self.interactive {
            return flow::read_multi(specs, &self.settings, sink, input);
        }

        let result = defaults_only(specs);
        let closed = sink.close();
        let values = result?;
        closed?;
        Ok(Some(values))
    }
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn defaults_only<V>(specs: Vec<FieldSpec<V>>) -> Result<Vec<V>> {
    let missing: Vec<String> = specs
        .iter()
        .filter(|spec| !spec.has_default())
        .map(|spec| spec.prompt().to_string())
        .collect();

    if !missing.is_empty() {
        return Err(Error::prompt_not_interactive(missing));
    }

    Ok(specs.into_iter().filter_map(|spec| spec.default).collect())
}
