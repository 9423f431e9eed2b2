use std::fmt::{Display, Formatter};
use std::str::FromStr;

use formwright_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Supported form input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// Single choice from a drop-down list.
    Dropdown,
    /// Multiple choice checkbox group.
    Checkbox,
    /// Single choice radio group.
    Radio,
    /// Date picker.
    Date,
    /// Numeric input.
    Number,
    /// Email address input.
    Email,
    /// Telephone number input.
    Phone,
}

impl FieldType {
    /// Every field type in palette order.
    pub const ALL: [Self; 9] = [
        Self::Text,
        Self::Textarea,
        Self::Dropdown,
        Self::Checkbox,
        Self::Radio,
        Self::Date,
        Self::Number,
        Self::Email,
        Self::Phone,
    ];

    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Dropdown => "dropdown",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Date => "date",
            Self::Number => "number",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Returns the label shown in the field palette.
    #[must_use]
    pub fn palette_label(&self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::Textarea => "Textarea",
            Self::Dropdown => "Dropdown",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio",
            Self::Date => "Date",
            Self::Number => "Number",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }

    /// Returns whether the type renders a choice list and therefore carries options.
    #[must_use]
    pub fn requires_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Checkbox | Self::Radio)
    }

    /// Returns the placeholder given to fields created from the palette.
    #[must_use]
    pub fn default_placeholder(&self) -> &'static str {
        match self {
            Self::Textarea => "Enter your message...",
            _ => "Enter value...",
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown field type '{value}'")))
    }
}

/// Caller-supplied identifier of a field inside one form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(NonEmptyString);

impl FieldId {
    /// Creates a validated field identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for FieldId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Validation rules attached to a field.
///
/// Rules are stored as authored. Bounds order and pattern syntax are reported by
/// the publish check, not enforced on edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    /// Minimum accepted value length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    /// Maximum accepted value length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Regular expression source the value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message shown when the pattern does not match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_message: Option<String>,
}

impl FieldValidation {
    /// Returns whether no rule is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.pattern_message.is_none()
    }

    fn apply(&mut self, patch: FieldValidationPatch) {
        if let Some(min_length) = patch.min_length {
            self.min_length = min_length;
        }
        if let Some(max_length) = patch.max_length {
            self.max_length = max_length;
        }
        if let Some(pattern) = patch.pattern {
            self.pattern = pattern.and_then(non_blank);
        }
        if let Some(pattern_message) = patch.pattern_message {
            self.pattern_message = pattern_message.and_then(non_blank);
        }
    }
}

/// Key-by-key update of [`FieldValidation`].
///
/// For every attribute `None` keeps the stored value, `Some(None)` clears it and
/// `Some(Some(value))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidationPatch {
    /// Minimum length update.
    pub min_length: Option<Option<u32>>,
    /// Maximum length update.
    pub max_length: Option<Option<u32>>,
    /// Pattern source update.
    pub pattern: Option<Option<String>>,
    /// Pattern message update.
    pub pattern_message: Option<Option<String>>,
}

/// Input payload for creating a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldInput {
    /// Unique field identifier.
    pub id: String,
    /// Input kind.
    pub field_type: FieldType,
    /// Visible label.
    pub label: String,
    /// Optional placeholder text.
    pub placeholder: Option<String>,
    /// Whether a value is mandatory.
    pub required: bool,
    /// Optional help text rendered under the label.
    pub help_text: Option<String>,
    /// Choice list, required for choice types and rejected otherwise.
    pub options: Option<Vec<String>>,
    /// Optional validation rules.
    pub validation: Option<FieldValidation>,
    /// Step placement for multi-step forms.
    pub step: Option<u32>,
}

impl FormFieldInput {
    /// Creates a minimal input with the given identity, type and label.
    #[must_use]
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            help_text: None,
            options: None,
            validation: None,
            step: None,
        }
    }
}

/// Attribute update for an existing field.
///
/// The field type is fixed at creation. Clearable attributes use `Option<Option<T>>`:
/// `None` keeps the stored value, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    /// New label.
    pub label: Option<String>,
    /// Placeholder update.
    pub placeholder: Option<Option<String>>,
    /// New required flag.
    pub required: Option<bool>,
    /// Help text update.
    pub help_text: Option<Option<String>>,
    /// Replacement choice list.
    pub options: Option<Vec<String>>,
    /// Validation rules merged key by key.
    pub validation: Option<FieldValidationPatch>,
    /// New step placement.
    pub step: Option<u32>,
}

/// One input element definition within a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    id: FieldId,
    field_type: FieldType,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validation: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    step: Option<u32>,
}

impl FormField {
    /// Creates a validated field.
    pub fn new(input: FormFieldInput) -> AppResult<Self> {
        let field = Self {
            id: FieldId::new(input.id)?,
            field_type: input.field_type,
            label: input.label,
            placeholder: input.placeholder.and_then(non_blank),
            required: input.required,
            help_text: input.help_text.and_then(non_blank),
            options: input.options,
            validation: input.validation.filter(|rules| !rules.is_empty()),
            step: input.step,
        };
        field.check_shape()?;

        Ok(field)
    }

    /// Creates the default field the palette inserts for a type.
    ///
    /// `ordinal` is the 1-based count of fields of this type after insertion.
    pub fn from_palette(
        id: impl Into<String>,
        field_type: FieldType,
        ordinal: usize,
        step: Option<u32>,
    ) -> AppResult<Self> {
        Self::new(FormFieldInput {
            label: format!("{} {ordinal}", field_type.palette_label()),
            placeholder: Some(field_type.default_placeholder().to_owned()),
            options: field_type
                .requires_options()
                .then(|| vec!["Option 1".to_owned(), "Option 2".to_owned()]),
            step,
            ..FormFieldInput::new(id, field_type, "")
        })
    }

    /// Returns field identifier.
    #[must_use]
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    /// Returns field type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns visible label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns placeholder text.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns whether a value is mandatory.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns help text.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    /// Returns the choice list for choice types.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    /// Returns validation rules.
    #[must_use]
    pub fn validation(&self) -> Option<&FieldValidation> {
        self.validation.as_ref()
    }

    /// Returns step placement.
    #[must_use]
    pub fn step(&self) -> Option<u32> {
        self.step
    }

    pub(crate) fn set_step(&mut self, step: Option<u32>) {
        self.step = step;
    }

    /// Applies a patch, leaving the field untouched when the result is malformed.
    pub(crate) fn apply_patch(&mut self, patch: FieldPatch) -> AppResult<()> {
        let mut next = self.clone();
        if let Some(label) = patch.label {
            next.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            next.placeholder = placeholder.and_then(non_blank);
        }
        if let Some(required) = patch.required {
            next.required = required;
        }
        if let Some(help_text) = patch.help_text {
            next.help_text = help_text.and_then(non_blank);
        }
        if let Some(options) = patch.options {
            next.options = Some(options);
        }
        if let Some(validation_patch) = patch.validation {
            let mut validation = next.validation.take().unwrap_or_default();
            validation.apply(validation_patch);
            next.validation = (!validation.is_empty()).then_some(validation);
        }
        if let Some(step) = patch.step {
            next.step = Some(step);
        }

        next.check_shape()?;
        *self = next;
        Ok(())
    }

    pub(crate) fn add_option(&mut self, text: &str) -> AppResult<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "option text must not be empty".to_owned(),
            ));
        }

        self.options_mut()?.push(trimmed.to_owned());
        Ok(())
    }

    pub(crate) fn update_option(&mut self, index: usize, text: impl Into<String>) -> AppResult<()> {
        let field_id = self.id.to_string();
        let options = self.options_mut()?;
        let slot = options.get_mut(index).ok_or_else(|| {
            AppError::Validation(format!(
                "option index {index} is out of range for field '{field_id}'"
            ))
        })?;
        *slot = text.into();
        Ok(())
    }

    pub(crate) fn remove_option(&mut self, index: usize) -> AppResult<String> {
        let field_id = self.id.to_string();
        let options = self.options_mut()?;
        if index >= options.len() {
            return Err(AppError::Validation(format!(
                "option index {index} is out of range for field '{field_id}'"
            )));
        }

        Ok(options.remove(index))
    }

    fn options_mut(&mut self) -> AppResult<&mut Vec<String>> {
        let field_type = self.field_type;
        let field_id = self.id.to_string();
        self.options.as_mut().ok_or_else(|| {
            AppError::Validation(format!(
                "field '{field_id}' of type '{field_type}' has no options"
            ))
        })
    }

    /// Checks the invariants a field holds regardless of its owning form.
    pub(crate) fn check_shape(&self) -> AppResult<()> {
        match (self.field_type.requires_options(), self.options.is_some()) {
            (true, false) => {
                return Err(AppError::Validation(format!(
                    "field '{}' of type '{}' requires options",
                    self.id, self.field_type
                )));
            }
            (false, true) => {
                return Err(AppError::Validation(format!(
                    "field '{}' of type '{}' does not accept options",
                    self.id, self.field_type
                )));
            }
            _ => {}
        }

        if self.step == Some(0) {
            return Err(AppError::Validation(format!(
                "field '{}' step must be greater than zero",
                self.id
            )));
        }

        Ok(())
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
