use chrono::{DateTime, Utc};
use formwright_core::{AppError, AppResult, FormId};
use serde::{Deserialize, Serialize};

use crate::field::{FieldId, FormField};

/// Title given to freshly created documents.
pub const UNTITLED_FORM_TITLE: &str = "Untitled Form";

/// The complete editable form: metadata, ordered fields and step layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<FormId>,
    title: String,
    description: String,
    fields: Vec<FormField>,
    steps: u32,
    is_multi_step: bool,
    created_at: DateTime<Utc>,
    is_published: bool,
}

/// Document-level attribute update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDocumentPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl FormDocument {
    /// Creates an empty single-step document.
    #[must_use]
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: UNTITLED_FORM_TITLE.to_owned(),
            description: String::new(),
            fields: Vec::new(),
            steps: 1,
            is_multi_step: false,
            created_at,
            is_published: false,
        }
    }

    /// Returns identifier, absent until the first save or publish.
    #[must_use]
    pub fn id(&self) -> Option<FormId> {
        self.id
    }

    /// Returns title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Returns step count.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Returns whether the form is split into steps.
    #[must_use]
    pub fn is_multi_step(&self) -> bool {
        self.is_multi_step
    }

    /// Returns creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the form was published.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.is_published
    }

    /// Looks up a field by id.
    #[must_use]
    pub fn field(&self, field_id: &FieldId) -> Option<&FormField> {
        self.fields.iter().find(|field| field.id() == field_id)
    }

    /// Returns the display position of a field.
    #[must_use]
    pub fn field_index(&self, field_id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|field| field.id() == field_id)
    }

    /// Returns fields placed on one step, in display order.
    pub fn fields_in_step(&self, step: u32) -> impl Iterator<Item = &FormField> {
        self.fields
            .iter()
            .filter(move |field| field.step() == Some(step))
    }

    /// Checks the step layout and field shapes.
    pub fn check_integrity(&self) -> AppResult<()> {
        if self.steps == 0 {
            return Err(AppError::Validation(
                "form must have at least one step".to_owned(),
            ));
        }

        if !self.is_multi_step && self.steps != 1 {
            return Err(AppError::Validation(format!(
                "single-step form cannot declare {} steps",
                self.steps
            )));
        }

        for field in &self.fields {
            field.check_shape()?;
            match (self.is_multi_step, field.step()) {
                (true, None) => {
                    return Err(AppError::Validation(format!(
                        "field '{}' has no step in a multi-step form",
                        field.id()
                    )));
                }
                (true, Some(step)) if step > self.steps => {
                    return Err(AppError::Validation(format!(
                        "field '{}' is on step {step} but the form has {} steps",
                        field.id(),
                        self.steps
                    )));
                }
                (false, Some(_)) => {
                    return Err(AppError::Validation(format!(
                        "field '{}' carries a step in a single-step form",
                        field.id()
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    pub(crate) fn require_step(&self, step: u32) -> AppResult<()> {
        if step == 0 || step > self.steps {
            return Err(AppError::Validation(format!(
                "step {step} is out of range 1..={}",
                self.steps
            )));
        }

        Ok(())
    }

    pub(crate) fn require_field_mut(&mut self, field_id: &FieldId) -> AppResult<&mut FormField> {
        self.fields
            .iter_mut()
            .find(|field| field.id() == field_id)
            .ok_or_else(|| AppError::NotFound(format!("field '{field_id}' does not exist")))
    }

    pub(crate) fn apply_patch(&mut self, patch: FormDocumentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Vec<FormField> {
        &mut self.fields
    }

    pub(crate) fn replace_layout(
        &mut self,
        title: String,
        description: String,
        fields: Vec<FormField>,
        steps: u32,
    ) {
        self.title = title;
        self.description = description;
        self.fields = fields;
        self.steps = steps.max(1);
        self.is_multi_step = self.steps > 1;
        if self.is_multi_step {
            self.place_unstepped_fields(1);
        } else {
            self.clear_field_steps();
        }
    }

    pub(crate) fn set_step_layout(&mut self, steps: u32, is_multi_step: bool) {
        self.steps = steps.max(1);
        self.is_multi_step = is_multi_step;
    }

    pub(crate) fn place_unstepped_fields(&mut self, step: u32) {
        for field in self.fields.iter_mut().filter(|field| field.step().is_none()) {
            field.set_step(Some(step));
        }
    }

    pub(crate) fn clear_field_steps(&mut self) {
        for field in &mut self.fields {
            field.set_step(None);
        }
    }

    pub(crate) fn ensure_id(&mut self) -> FormId {
        *self.id.get_or_insert_with(FormId::new)
    }

    pub(crate) fn mark_published(&mut self) {
        self.is_published = true;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{FormDocument, UNTITLED_FORM_TITLE};
    use crate::field::{FieldType, FormField, FormFieldInput};

    fn text_field(id: &str, step: Option<u32>) -> FormField {
        FormField::new(FormFieldInput {
            step,
            ..FormFieldInput::new(id, FieldType::Text, id)
        })
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn new_document_is_untitled_single_step() {
        let document = FormDocument::new(Utc::now());

        assert!(document.id().is_none());
        assert_eq!(document.title(), UNTITLED_FORM_TITLE);
        assert_eq!(document.steps(), 1);
        assert!(!document.is_multi_step());
        assert!(!document.is_published());
        assert!(document.check_integrity().is_ok());
    }

    #[test]
    fn replace_layout_derives_multi_step_from_step_count() {
        let mut document = FormDocument::new(Utc::now());
        document.replace_layout(
            "Survey".to_owned(),
            String::new(),
            vec![text_field("a", Some(2)), text_field("b", None)],
            2,
        );

        assert!(document.is_multi_step());
        assert_eq!(document.fields()[1].step(), Some(1));
        assert!(document.check_integrity().is_ok());

        let fields = document.fields().to_vec();
        document.replace_layout("Flat".to_owned(), String::new(), fields, 1);
        assert!(!document.is_multi_step());
        assert!(document.fields().iter().all(|field| field.step().is_none()));
    }

    #[test]
    fn integrity_rejects_stepped_field_in_single_step_form() {
        let mut document = FormDocument::new(Utc::now());
        document.fields_mut().push(text_field("a", Some(1)));

        assert!(document.check_integrity().is_err());
    }

    #[test]
    fn integrity_rejects_field_beyond_last_step() {
        let mut document = FormDocument::new(Utc::now());
        document.set_step_layout(2, true);
        document.fields_mut().push(text_field("a", Some(3)));

        assert!(document.check_integrity().is_err());
    }

    #[test]
    fn ensure_id_is_stable() {
        let mut document = FormDocument::new(Utc::now());
        let first = document.ensure_id();
        let second = document.ensure_id();

        assert_eq!(first, second);
        assert_eq!(document.id(), Some(first));
    }
}
