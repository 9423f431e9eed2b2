use super::*;

impl FormDocumentStore {
    /// Shows another step in the editor.
    pub async fn set_current_step(&mut self, step: u32) -> AppResult<()> {
        self.apply(StoreCommand::SetCurrentStep, |state| {
            state.set_current_step(step)
        })
        .await
    }

    /// Advances to the next step, staying on the last one.
    pub async fn next_step(&mut self) -> AppResult<u32> {
        self.apply(StoreCommand::SetCurrentStep, |state| Ok(state.next_step()))
            .await
    }

    /// Goes back one step, staying on the first one.
    pub async fn previous_step(&mut self) -> AppResult<u32> {
        self.apply(StoreCommand::SetCurrentStep, |state| {
            Ok(state.previous_step())
        })
        .await
    }

    /// Appends a step and returns the new step count.
    pub async fn add_step(&mut self) -> AppResult<u32> {
        self.apply(StoreCommand::AddStep, FormBuilderState::add_step)
            .await
    }

    /// Removes a step with its fields and returns the removed fields.
    pub async fn remove_step(&mut self, step: u32) -> AppResult<Vec<FormField>> {
        self.apply(StoreCommand::RemoveStep, |state| state.remove_step(step))
            .await
    }

    /// Places a field on another step.
    pub async fn move_field_to_step(&mut self, field_id: &FieldId, step: u32) -> AppResult<()> {
        self.apply(StoreCommand::MoveFieldToStep, |state| {
            state.move_field_to_step(field_id, step)
        })
        .await
    }

    /// Switches the form between single-step and multi-step layout.
    pub async fn set_multi_step(&mut self, enabled: bool) -> AppResult<()> {
        self.apply(StoreCommand::SetMultiStep, |state| {
            state.set_multi_step(enabled);
            Ok(())
        })
        .await
    }
}
