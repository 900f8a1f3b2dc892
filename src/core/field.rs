//! Per-field configuration and state.
//!
//! A [`FieldSpec`] is what callers hand in; a [`FieldState`] is the session's
//! view of one field. The static half of a field (prompt and strategies) is
//! shared behind an `Rc` so snapshots are cheap to clone.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;

/// Produces a new response for a field, given its prompt and current value.
///
/// Implementations may block on user input. Returning an error aborts the
/// whole prompt flow.
pub trait ReadStrategy<V> {
    fn read(&self, prompt: &str, current: Option<&V>) -> Result<V>;
}

impl<V, F> ReadStrategy<V> for F
where
    F: Fn(&str, Option<&V>) -> Result<V>,
{
    fn read(&self, prompt: &str, current: Option<&V>) -> Result<V> {
        self(prompt, current)
    }
}

pub type DisplayFn<V> = Box<dyn Fn(&V) -> String>;

/// Values a field can hold.
///
/// `as_text` returns the value verbatim when it is already text, which takes
/// precedence over any display strategy.
pub trait ResponseValue: Clone {
    fn as_text(&self) -> Option<&str> {
        None
    }
}

impl ResponseValue for String {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ResponseValue for serde_json::Value {
    fn as_text(&self) -> Option<&str> {
        self.as_str()
    }
}

impl ResponseValue for i64 {}
impl ResponseValue for u64 {}
impl ResponseValue for f64 {}
impl ResponseValue for bool {}

/// Caller-supplied description of one field.
pub struct FieldSpec<V> {
    pub(crate) prompt: String,
    pub(crate) read: Box<dyn ReadStrategy<V>>,
    pub(crate) display: Option<DisplayFn<V>>,
    pub(crate) default: Option<V>,
}

impl<V: 'static> FieldSpec<V> {
    pub fn new<F>(prompt: impl Into<String>, read: F) -> Self
    where
        F: Fn(&str, Option<&V>) -> Result<V> + 'static,
    {
        Self::with_reader(prompt, read)
    }

    /// Build a spec around a named read strategy type.
    pub fn with_reader(prompt: impl Into<String>, reader: impl ReadStrategy<V> + 'static) -> Self {
        Self {
            prompt: prompt.into(),
            read: Box::new(reader),
            display: None,
            default: None,
        }
    }

    pub fn with_display<F>(mut self, display: F) -> Self
    where
        F: Fn(&V) -> String + 'static,
    {
        self.display = Some(Box::new(display));
        self
    }

    /// Seed the field. Any value counts, including empty or zero-like ones.
    pub fn with_default(mut self, value: V) -> Self {
        self.default = Some(value);
        self
    }
}

impl<V> FieldSpec<V> {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn default_value(&self) -> Option<&V> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl<V> fmt::Debug for FieldSpec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("prompt", &self.prompt)
            .field("display", &self.display.is_some())
            .field("default", &self.default.is_some())
            .finish()
    }
}

struct FieldConfig<V> {
    prompt: String,
    read: Box<dyn ReadStrategy<V>>,
    display: Option<DisplayFn<V>>,
}

/// Session-local snapshot of one field.
pub struct FieldState<V> {
    config: Rc<FieldConfig<V>>,
    pub response: Option<V>,
    pub is_current: bool,
}

impl<V> FieldState<V> {
    pub(crate) fn from_spec(spec: FieldSpec<V>) -> Self {
        Self {
            config: Rc::new(FieldConfig {
                prompt: spec.prompt,
                read: spec.read,
                display: spec.display,
            }),
            response: spec.default,
            is_current: false,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }

    pub fn is_answered(&self) -> bool {
        self.response.is_some()
    }

    /// Run this field's read strategy against its current response.
    pub fn read(&self) -> Result<V> {
        self.config
            .read
            .read(&self.config.prompt, self.response.as_ref())
    }

    /// Text for the response line, or `None` when the placeholder applies.
    pub fn display_text(&self) -> Option<String>
    where
        V: ResponseValue,
    {
        let response = self.response.as_ref()?;
        if let Some(text) = response.as_text() {
            return Some(text.to_string());
        }
        self.config.display.as_ref().map(|display| display(response))
    }
}

impl<V: Clone> Clone for FieldState<V> {
    fn clone(&self) -> Self {
        Self {
            config: Rc::clone(&self.config),
            response: self.response.clone(),
            is_current: self.is_current,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for FieldState<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("prompt", &self.config.prompt)
            .field("response", &self.response)
            .field("is_current", &self.is_current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed(value: &'static str) -> FieldSpec<String> {
        FieldSpec::new("Name", move |_: &str, _: Option<&String>| Ok(value.to_string()))
    }

    #[test]
    fn empty_string_default_counts_as_answered() {
        let state = FieldState::from_spec(fixed("x").with_default(String::new()));

        assert!(state.is_answered());
        assert_eq!(state.display_text().as_deref(), Some(""));
    }

    #[test]
    fn string_values_bypass_display_strategy() {
        let spec = fixed("x")
            .with_display(|_| "formatted".to_string())
            .with_default("raw".to_string());
        let state = FieldState::from_spec(spec);

        assert_eq!(state.display_text().as_deref(), Some("raw"));
    }

    #[test]
    fn non_string_values_use_display_strategy() {
        let spec = FieldSpec::new("Age", |_: &str, _: Option<&i64>| Ok(1))
            .with_display(|v| format!("{} years", v))
            .with_default(37);
        let state = FieldState::from_spec(spec);

        assert_eq!(state.display_text().as_deref(), Some("37 years"));
    }

    #[test]
    fn non_string_without_display_strategy_has_no_text() {
        let spec = FieldSpec::new("Flag", |_: &str, _: Option<&serde_json::Value>| Ok(json!(true)))
            .with_default(json!(false));
        let state = FieldState::from_spec(spec);

        assert!(state.is_answered());
        assert_eq!(state.display_text(), None);
    }

    #[test]
    fn read_passes_prompt_and_current_response() {
        let spec = FieldSpec::new("Name", |prompt: &str, current: Option<&String>| {
            Ok(format!("{}={}", prompt, current.cloned().unwrap_or_default()))
        })
        .with_default("Ada".to_string());
        let state = FieldState::from_spec(spec);

        assert_eq!(state.read().unwrap(), "Name=Ada");
    }

    #[test]
    fn clones_share_configuration() {
        let state = FieldState::from_spec(fixed("x"));
        let mut copy = state.clone();
        copy.response = Some("changed".to_string());

        assert_eq!(copy.prompt(), "Name");
        assert!(state.response.is_none());
        assert!(Rc::ptr_eq(&state.config, &copy.config));
    }
}
