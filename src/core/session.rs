//! Ordered field state for one prompt flow.
//!
//! Fields are never mutated in place: every write takes a snapshot of the
//! slot, changes the copy, and replaces the slot at the same index. The
//! number and order of slots is fixed when the session is created.

use crate::defaults::DisplaySettings;
use crate::error::{Error, Result};
use crate::field::{FieldSpec, FieldState, ResponseValue};
use crate::render::{self, Frame};

pub struct Session<V> {
    fields: Vec<FieldState<V>>,
    settings: DisplaySettings,
}

impl<V: Clone> Session<V> {
    pub fn new(specs: Vec<FieldSpec<V>>, settings: DisplaySettings) -> Self {
        Self {
            fields: specs.into_iter().map(FieldState::from_spec).collect(),
            settings,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldState<V>] {
        &self.fields
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Index of the field being edited, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.fields.iter().position(|field| field.is_current)
    }

    /// Indices of fields without a response, in order.
    pub fn unanswered(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| !field.is_answered())
            .map(|(index, _)| index)
            .collect()
    }

    /// Copy of the field at `index`.
    pub fn snapshot(&self, index: usize) -> Result<FieldState<V>> {
        self.fields
            .get(index)
            .cloned()
            .ok_or_else(|| self.out_of_range(index))
    }

    fn replace(&mut self, index: usize, field: FieldState<V>) -> Result<()> {
        let slot = self
            .fields
            .get_mut(index)
            .ok_or_else(|| Error::internal_unexpected(format!("No field at index {}", index)))?;
        *slot = field;
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::internal_unexpected(format!(
            "Field index {} out of range for session of {} fields",
            index,
            self.fields.len()
        ))
    }

    /// Set the edit-focus flag of one field. Other fields are untouched.
    pub fn set_current(&mut self, index: usize, flag: bool) -> Result<()> {
        let mut field = self.snapshot(index)?;
        field.is_current = flag;
        self.replace(index, field)
    }

    /// Replace one field's response. `None` marks it unanswered.
    pub fn set_response(&mut self, index: usize, value: Option<V>) -> Result<()> {
        let mut field = self.snapshot(index)?;
        field.response = value;
        self.replace(index, field)
    }

    /// Every field's response in order.
    ///
    /// Fails if a field is still unanswered, which the prompt flow rules out
    /// before confirmation.
    pub fn responses(&self) -> Result<Vec<V>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                field.response.clone().ok_or_else(|| {
                    Error::internal_unexpected(format!(
                        "Field {} ('{}') has no response",
                        index + 1,
                        field.prompt()
                    ))
                })
            })
            .collect()
    }
}

impl<V: ResponseValue> Session<V> {
    pub fn render(&self) -> Frame {
        render::frame(&self.fields, &self.settings)
    }
}
