use formwright_domain::FormBuilderState;

/// Command that produced a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreCommand {
    /// Title or description changed.
    SetCurrentForm,
    /// Field appended.
    AddField,
    /// Field removed.
    RemoveField,
    /// Field moved in display order.
    ReorderFields,
    /// Field attributes patched.
    UpdateField,
    /// Choice option appended.
    AddOption,
    /// Choice option text replaced.
    UpdateOption,
    /// Choice option removed.
    RemoveOption,
    /// Selection changed.
    SetSelectedField,
    /// Editor step changed.
    SetCurrentStep,
    /// Step appended.
    AddStep,
    /// Step removed.
    RemoveStep,
    /// Field placed on another step.
    MoveFieldToStep,
    /// Multi-step layout toggled.
    SetMultiStep,
    /// Template content loaded into the current form.
    LoadTemplate,
    /// Template created from the current form.
    CreateTemplate,
    /// Template overwritten from the current form.
    UpdateTemplate,
    /// Current form saved.
    SaveForm,
    /// Saved form loaded.
    LoadForm,
    /// Current form published.
    PublishForm,
    /// Empty form started.
    CreateNewForm,
    /// Whole state discarded.
    Reset,
}

impl StoreCommand {
    /// Returns a stable name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetCurrentForm => "set_current_form",
            Self::AddField => "add_field",
            Self::RemoveField => "remove_field",
            Self::ReorderFields => "reorder_fields",
            Self::UpdateField => "update_field",
            Self::AddOption => "add_option",
            Self::UpdateOption => "update_option",
            Self::RemoveOption => "remove_option",
            Self::SetSelectedField => "set_selected_field",
            Self::SetCurrentStep => "set_current_step",
            Self::AddStep => "add_step",
            Self::RemoveStep => "remove_step",
            Self::MoveFieldToStep => "move_field_to_step",
            Self::SetMultiStep => "set_multi_step",
            Self::LoadTemplate => "load_template",
            Self::CreateTemplate => "create_template",
            Self::UpdateTemplate => "update_template",
            Self::SaveForm => "save_form",
            Self::LoadForm => "load_form",
            Self::PublishForm => "publish_form",
            Self::CreateNewForm => "create_new_form",
            Self::Reset => "reset",
        }
    }
}

/// Presentation-side listener called after every successful command.
pub trait FormBuilderObserver: Send + Sync {
    /// Receives the command and the state it produced.
    fn state_changed(&self, command: StoreCommand, state: &FormBuilderState);
}
