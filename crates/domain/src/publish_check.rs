use std::collections::HashSet;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::document::FormDocument;
use crate::field::{FieldId, FormField};

/// Category of a publish readiness issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishIssueKind {
    /// Form title is blank.
    MissingTitle,
    /// Form has no fields.
    NoFields,
    /// Field label is blank.
    BlankLabel,
    /// Two fields share an id.
    DuplicateFieldId,
    /// Choice field has no options to select.
    MissingOptions,
    /// Choice field has an option with blank text.
    BlankOption,
    /// Minimum length exceeds maximum length.
    InvertedLengthBounds,
    /// Validation pattern does not compile.
    InvalidPattern,
    /// Field step does not match the form's step layout.
    StepPlacement,
    /// Step of a multi-step form has no fields.
    EmptyStep,
}

/// One problem that would make the published form unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishIssue {
    /// Issue category.
    pub kind: PublishIssueKind,
    /// Offending field, when the issue is field scoped.
    pub field_id: Option<FieldId>,
    /// Offending step, when the issue is step scoped.
    pub step: Option<u32>,
    /// Human readable description.
    pub message: String,
}

impl PublishIssue {
    fn form(kind: PublishIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field_id: None,
            step: None,
            message: message.into(),
        }
    }

    fn field(kind: PublishIssueKind, field: &FormField, message: impl Into<String>) -> Self {
        Self {
            kind,
            field_id: Some(field.id().clone()),
            step: field.step(),
            message: message.into(),
        }
    }
}

impl FormDocument {
    /// Lists everything that would make this form unusable once published.
    ///
    /// The check is advisory; publishing does not require an empty report.
    #[must_use]
    pub fn publish_issues(&self) -> Vec<PublishIssue> {
        let mut issues = Vec::new();

        if self.title().trim().is_empty() {
            issues.push(PublishIssue::form(
                PublishIssueKind::MissingTitle,
                "form title must not be empty",
            ));
        }

        if self.fields().is_empty() {
            issues.push(PublishIssue::form(
                PublishIssueKind::NoFields,
                "form must contain at least one field",
            ));
        }

        let mut seen_ids = HashSet::new();
        for field in self.fields() {
            if !seen_ids.insert(field.id()) {
                issues.push(PublishIssue::field(
                    PublishIssueKind::DuplicateFieldId,
                    field,
                    format!("field id '{}' is used more than once", field.id()),
                ));
            }
            check_field(self, field, &mut issues);
        }

        if self.is_multi_step() {
            for step in 1..=self.steps() {
                if self.fields_in_step(step).next().is_none() {
                    issues.push(PublishIssue {
                        kind: PublishIssueKind::EmptyStep,
                        field_id: None,
                        step: Some(step),
                        message: format!("step {step} has no fields"),
                    });
                }
            }
        }

        issues
    }
}

fn check_field(document: &FormDocument, field: &FormField, issues: &mut Vec<PublishIssue>) {
    if field.label().trim().is_empty() {
        issues.push(PublishIssue::field(
            PublishIssueKind::BlankLabel,
            field,
            format!("field '{}' has no label", field.id()),
        ));
    }

    if field.field_type().requires_options() {
        let options = field.options().unwrap_or_default();
        if options.is_empty() {
            issues.push(PublishIssue::field(
                PublishIssueKind::MissingOptions,
                field,
                format!("field '{}' has no options to choose from", field.id()),
            ));
        }
        if options.iter().any(|option| option.trim().is_empty()) {
            issues.push(PublishIssue::field(
                PublishIssueKind::BlankOption,
                field,
                format!("field '{}' has an option without text", field.id()),
            ));
        }
    }

    if let Some(validation) = field.validation() {
        if let (Some(min_length), Some(max_length)) = (validation.min_length, validation.max_length)
        {
            if min_length > max_length {
                issues.push(PublishIssue::field(
                    PublishIssueKind::InvertedLengthBounds,
                    field,
                    format!(
                        "field '{}' min length {min_length} exceeds max length {max_length}",
                        field.id()
                    ),
                ));
            }
        }

        if let Some(pattern) = validation.pattern.as_deref() {
            if let Err(error) = Regex::new(pattern) {
                issues.push(PublishIssue::field(
                    PublishIssueKind::InvalidPattern,
                    field,
                    format!("field '{}' pattern does not compile: {error}", field.id()),
                ));
            }
        }
    }

    let placement_error = match (document.is_multi_step(), field.step()) {
        (true, None) => Some("has no step".to_owned()),
        (true, Some(step)) if step == 0 || step > document.steps() => Some(format!(
            "is on step {step} outside 1..={}",
            document.steps()
        )),
        (false, Some(step)) => Some(format!("is on step {step} of a single-step form")),
        _ => None,
    };
    if let Some(detail) = placement_error {
        issues.push(PublishIssue::field(
            PublishIssueKind::StepPlacement,
            field,
            format!("field '{}' {detail}", field.id()),
        ));
    }
}
