use formwright_core::{AppError, AppResult, TemplateId};
use serde::{Deserialize, Serialize};

use crate::field::FormField;

/// Reusable seed of fields and steps, decoupled from any saved form identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTemplate {
    id: TemplateId,
    name: String,
    description: String,
    fields: Vec<FormField>,
    steps: u32,
}

impl FormTemplate {
    /// Creates a template from a snapshot of fields and steps.
    #[must_use]
    pub fn new(
        id: TemplateId,
        name: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<FormField>,
        steps: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            fields,
            steps: steps.max(1),
        }
    }

    /// Returns template identifier.
    #[must_use]
    pub fn id(&self) -> TemplateId {
        self.id
    }

    /// Returns template name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns template description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns template fields.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Returns template step count.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Checks step count and field placement against the template's layout.
    ///
    /// A template with more than one step places every field on a step in
    /// range; a single-step template may carry step 1 or no step.
    pub fn check_integrity(&self) -> AppResult<()> {
        if self.steps == 0 {
            return Err(AppError::Validation(format!(
                "template '{}' must have at least one step",
                self.id
            )));
        }

        for field in &self.fields {
            field.check_shape()?;
            match field.step() {
                None if self.steps > 1 => {
                    return Err(AppError::Validation(format!(
                        "template '{}' field '{}' has no step",
                        self.id,
                        field.id()
                    )));
                }
                Some(step) if step > self.steps => {
                    return Err(AppError::Validation(format!(
                        "template '{}' field '{}' is on step {step} but the template has {} steps",
                        self.id,
                        field.id(),
                        self.steps
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    pub(crate) fn overwrite(
        &mut self,
        name: String,
        description: String,
        fields: Vec<FormField>,
        steps: u32,
    ) {
        self.name = name;
        self.description = description;
        self.fields = fields;
        self.steps = steps.max(1);
    }
}
