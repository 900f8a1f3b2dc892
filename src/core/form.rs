//! JSON-described forms.
//!
//! A form lists its fields in prompt order. Each field's kind decides how raw
//! input is parsed:
//!
//! ```json
//! {
//!   "title": "New user",
//!   "fields": [
//!     { "prompt": "Name", "key": "name" },
//!     { "prompt": "Age", "kind": "integer", "default": 37 },
//!     { "prompt": "Role", "kind": "choice", "options": ["admin", "member"] }
//!   ]
//! }
//! ```

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::field::{FieldSpec, ReadStrategy};
use crate::input::{LineInput, SharedInput};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub prompt: String,

    /// Name of the field in keyed output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub kind: FieldKind,

    /// Presence-sensitive: `"default": null` is a supplied default.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,

    /// Allowed answers for `choice` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Regex a `text` answer must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Integer,
    Decimal,
    Boolean,
    Choice,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Boolean => "boolean",
            FieldKind::Choice => "choice",
        }
    }
}

impl FormSpec {
    pub fn from_json(raw: &str) -> Result<Self> {
        let form: FormSpec = serde_json::from_str(raw).map_err(|e| {
            Error::validation_invalid_json(
                e,
                Some("parse form".to_string()),
                Some(raw.chars().take(200).collect::<String>()),
            )
        })?;
        form.validate()?;
        Ok(form)
    }

    /// Reject forms whose fields could never be answered or addressed.
    pub fn validate(&self) -> Result<()> {
        let mut keys = HashSet::new();

        for (index, field) in self.fields.iter().enumerate() {
            let at = |name: &str| format!("fields[{}].{}", index, name);

            if field.prompt.trim().is_empty() {
                return Err(Error::validation_invalid_argument(
                    at("prompt"),
                    "Prompt must not be empty",
                    None,
                ));
            }

            if let Some(key) = &field.key {
                if !keys.insert(key.as_str()) {
                    return Err(Error::validation_invalid_argument(
                        at("key"),
                        "Duplicate field key",
                        Some(key.clone()),
                    ));
                }
            }

            if field.kind == FieldKind::Choice && field.options.is_empty() {
                return Err(Error::validation_invalid_argument(
                    at("options"),
                    "Choice fields need at least one option",
                    None,
                ));
            }

            if let Some(pattern) = &field.pattern {
                Regex::new(pattern).map_err(|e| {
                    Error::validation_invalid_argument(
                        at("pattern"),
                        format!("Invalid regex: {}", e),
                        Some(pattern.clone()),
                    )
                })?;
            }
        }

        Ok(())
    }

    /// Build prompt specs whose readers pull answers from `input`.
    pub fn field_specs(&self, input: &SharedInput) -> Result<Vec<FieldSpec<Value>>> {
        self.fields
            .iter()
            .map(|field| -> Result<FieldSpec<Value>> {
                let reader = KindReader::new(field, input.clone())?;
                let spec =
                    FieldSpec::with_reader(field.prompt.clone(), reader).with_display(display);
                Ok(match &field.default {
                    Some(value) => spec.with_default(value.clone()),
                    None => spec,
                })
            })
            .collect()
    }

    /// Responses keyed by field key, for fields that have one.
    pub fn keyed(&self, responses: &[Value]) -> Map<String, Value> {
        self.fields
            .iter()
            .zip(responses)
            .filter_map(|(field, value)| field.key.clone().map(|key| (key, value.clone())))
            .collect()
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Number(n) => n.to_string(),
        _ => value.to_string(),
    }
}

/// Reads and parses one answer for a field, re-prompting until the input
/// parses or runs out.
///
/// `read_multi` only reads fields without a response, so there `current` is
/// always `None`. The `[current]` suffix and keep-on-empty behavior apply when
/// the reader is called directly with an existing value.
pub struct KindReader {
    kind: FieldKind,
    options: Vec<String>,
    pattern: Option<Regex>,
    input: SharedInput,
}

impl KindReader {
    pub fn new(field: &FieldDef, input: SharedInput) -> Result<Self> {
        let pattern = field
            .pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| {
                Error::validation_invalid_argument("pattern", e.to_string(), None)
            })?;

        Ok(Self {
            kind: field.kind,
            options: field.options.clone(),
            pattern,
            input,
        })
    }

    fn message(&self, prompt: &str, current: Option<&Value>) -> String {
        let mut message = prompt.to_string();
        match self.kind {
            FieldKind::Boolean => message.push_str(" [y/n]"),
            FieldKind::Choice => {
                let listed: Vec<String> = self
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| format!("{}) {}", i + 1, option))
                    .collect();
                message.push_str(&format!(" ({})", listed.join(", ")));
            }
            _ => {}
        }
        if let Some(value) = current {
            message.push_str(&format!(" [{}]", display(value).trim_matches('"')));
        }
        message.push_str(": ");
        message
    }

    /// Parse one raw answer into a value of this field's kind.
    pub fn parse(&self, raw: &str) -> std::result::Result<Value, String> {
        let trimmed = raw.trim();
        match self.kind {
            FieldKind::Text => {
                if let Some(pattern) = &self.pattern {
                    if !pattern.is_match(raw) {
                        return Err(format!("Value must match {}", pattern.as_str()));
                    }
                }
                Ok(Value::String(raw.to_string()))
            }
            FieldKind::Integer => trimmed
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| "Enter a whole number (e.g., 42)".to_string()),
            FieldKind::Decimal => trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| "Enter a numeric value".to_string()),
            FieldKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "y" | "yes" | "true" | "1" => Ok(Value::Bool(true)),
                "n" | "no" | "false" | "0" => Ok(Value::Bool(false)),
                _ => Err("Answer y or n".to_string()),
            },
            FieldKind::Choice => {
                let by_number = trimmed
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| self.options.get(i));
                let by_name = self
                    .options
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(trimmed));

                by_number
                    .or(by_name)
                    .map(|option| Value::String(option.clone()))
                    .ok_or_else(|| format!("Value must be one of: {}", self.options.join(", ")))
            }
        }
    }
}

impl ReadStrategy<Value> for KindReader {
    fn read(&self, prompt: &str, current: Option<&Value>) -> Result<Value> {
        let message = self.message(prompt, current);
        let mut input = self.input.clone();

        loop {
            let raw = input
                .read_line(&message)?
                .ok_or_else(|| Error::prompt_cancelled(prompt))?;

            if raw.trim().is_empty() {
                if let Some(value) = current {
                    return Ok(value.clone());
                }
            }

            match self.parse(&raw) {
                Ok(value) => return Ok(value),
                Err(problem) => input.report(&problem),
            }
        }
    }
}
