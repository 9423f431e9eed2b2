//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod builder_state;
mod document;
mod field;
mod layout;
mod publish_check;
mod template;

pub use builder_state::FormBuilderState;
pub use document::{FormDocument, FormDocumentPatch, UNTITLED_FORM_TITLE};
pub use field::{
    FieldId, FieldPatch, FieldType, FieldValidation, FieldValidationPatch, FormField,
    FormFieldInput,
};
pub use layout::{close_step_gap, move_item};
pub use publish_check::{PublishIssue, PublishIssueKind};
pub use template::FormTemplate;
