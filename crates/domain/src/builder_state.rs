//! The form builder aggregate: the document under edit, the editor viewport and
//! the template and saved-form libraries.
//!
//! Every command either applies completely or returns an error and leaves the
//! state untouched.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use formwright_core::{AppError, AppResult, FormId, TemplateId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{FormDocument, FormDocumentPatch};
use crate::field::{FieldId, FieldPatch, FieldType, FormField};
use crate::layout::{close_step_gap, move_item};
use crate::template::FormTemplate;

mod fields;
mod library;
mod steps;


/// Complete editor state, persisted as one blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormBuilderState {
    current_form: FormDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_field_id: Option<FieldId>,
    #[serde(default = "first_step")]
    current_step: u32,
    #[serde(default)]
    templates: Vec<FormTemplate>,
    #[serde(default)]
    saved_forms: Vec<FormDocument>,
}

fn first_step() -> u32 {
    1
}

impl FormBuilderState {
    /// Creates a state holding an empty document and empty libraries.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            current_form: FormDocument::new(now),
            selected_field_id: None,
            current_step: 1,
            templates: Vec::new(),
            saved_forms: Vec::new(),
        }
    }

    /// Returns the document under edit.
    #[must_use]
    pub fn current_form(&self) -> &FormDocument {
        &self.current_form
    }

    /// Returns the selected field id.
    #[must_use]
    pub fn selected_field_id(&self) -> Option<&FieldId> {
        self.selected_field_id.as_ref()
    }

    /// Returns the selected field.
    #[must_use]
    pub fn selected_field(&self) -> Option<&FormField> {
        self.selected_field_id
            .as_ref()
            .and_then(|field_id| self.current_form.field(field_id))
    }

    /// Returns the step shown in the editor.
    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Returns the template library.
    #[must_use]
    pub fn templates(&self) -> &[FormTemplate] {
        &self.templates
    }

    /// Returns saved forms in save order.
    #[must_use]
    pub fn saved_forms(&self) -> &[FormDocument] {
        &self.saved_forms
    }

    /// Looks up a template by id.
    #[must_use]
    pub fn find_template(&self, template_id: TemplateId) -> Option<&FormTemplate> {
        self.templates
            .iter()
            .find(|template| template.id() == template_id)
    }

    /// Looks up a saved form by id.
    #[must_use]
    pub fn find_saved_form(&self, form_id: FormId) -> Option<&FormDocument> {
        self.saved_forms
            .iter()
            .find(|form| form.id() == Some(form_id))
    }

    /// Returns the fields the canvas shows: the current step's fields for
    /// multi-step forms, every field otherwise.
    #[must_use]
    pub fn visible_fields(&self) -> Vec<&FormField> {
        if self.current_form.is_multi_step() {
            self.current_form
                .fields_in_step(self.current_step)
                .collect()
        } else {
            self.current_form.fields().iter().collect()
        }
    }

    /// Checks every invariant of a state, typically one rehydrated from storage.
    pub fn check_integrity(&self) -> AppResult<()> {
        self.current_form.check_integrity()?;
        ensure_unique_field_ids(self.current_form.fields())?;
        self.current_form.require_step(self.current_step)?;

        if let Some(field_id) = &self.selected_field_id {
            if self.current_form.field(field_id).is_none() {
                return Err(AppError::Validation(format!(
                    "selected field '{field_id}' does not exist"
                )));
            }
        }

        let mut template_ids = HashSet::new();
        for template in &self.templates {
            if !template_ids.insert(template.id()) {
                return Err(AppError::Validation(format!(
                    "duplicate template '{}'",
                    template.id()
                )));
            }
            template.check_integrity()?;
            ensure_unique_field_ids(template.fields())?;
        }

        let mut form_ids = HashSet::new();
        for form in &self.saved_forms {
            let form_id = form.id().ok_or_else(|| {
                AppError::Validation("saved form is missing its id".to_owned())
            })?;
            if !form_ids.insert(form_id) {
                return Err(AppError::Validation(format!(
                    "duplicate saved form '{form_id}'"
                )));
            }
            form.check_integrity()?;
            ensure_unique_field_ids(form.fields())?;
        }

        Ok(())
    }

    /// Clears a dangling selection and clamps the current step into range.
    fn reconcile_viewport(&mut self) {
        if self
            .selected_field_id
            .as_ref()
            .is_some_and(|field_id| self.current_form.field(field_id).is_none())
        {
            self.selected_field_id = None;
        }

        self.current_step = self.current_step.clamp(1, self.current_form.steps());
    }
}

fn ensure_unique_field_ids(fields: &[FormField]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.id()) {
            return Err(AppError::Validation(format!(
                "duplicate field id '{}'",
                field.id()
            )));
        }
    }

    Ok(())
}
