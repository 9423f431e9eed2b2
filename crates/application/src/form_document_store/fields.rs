use super::*;

impl FormDocumentStore {
    /// Merges title and description changes into the current form.
    pub async fn set_current_form(&mut self, patch: FormDocumentPatch) -> AppResult<()> {
        self.apply(StoreCommand::SetCurrentForm, |state| {
            state.set_current_form(patch);
            Ok(())
        })
        .await
    }

    /// Appends a fully described field.
    pub async fn add_field(&mut self, input: FormFieldInput) -> AppResult<FieldId> {
        let field = FormField::new(input)?;
        self.apply(StoreCommand::AddField, |state| state.add_field(field))
            .await
    }

    /// Appends a palette field with default label, placeholder and options.
    pub async fn add_field_of_type(&mut self, field_type: FieldType) -> AppResult<FieldId> {
        self.apply(StoreCommand::AddField, |state| {
            state.add_field_of_type(field_type)
        })
        .await
    }

    /// Removes a field, clearing the selection if it pointed at it.
    pub async fn remove_field(&mut self, field_id: &FieldId) -> AppResult<FormField> {
        self.apply(StoreCommand::RemoveField, |state| state.remove_field(field_id))
            .await
    }

    /// Moves the field at `from_index` to `to_index`.
    pub async fn reorder_fields(&mut self, from_index: usize, to_index: usize) -> AppResult<()> {
        self.apply(StoreCommand::ReorderFields, |state| {
            state.reorder_fields(from_index, to_index)
        })
        .await
    }

    /// Patches field attributes.
    pub async fn update_field(&mut self, field_id: &FieldId, patch: FieldPatch) -> AppResult<()> {
        self.apply(StoreCommand::UpdateField, |state| {
            state.update_field(field_id, patch)
        })
        .await
    }

    /// Appends an option to a choice field.
    pub async fn add_option(&mut self, field_id: &FieldId, text: &str) -> AppResult<()> {
        self.apply(StoreCommand::AddOption, |state| state.add_option(field_id, text))
            .await
    }

    /// Replaces an option's text.
    pub async fn update_option(
        &mut self,
        field_id: &FieldId,
        index: usize,
        text: impl Into<String>,
    ) -> AppResult<()> {
        let text = text.into();
        self.apply(StoreCommand::UpdateOption, |state| {
            state.update_option(field_id, index, text)
        })
        .await
    }

    /// Removes an option and returns its text.
    pub async fn remove_option(&mut self, field_id: &FieldId, index: usize) -> AppResult<String> {
        self.apply(StoreCommand::RemoveOption, |state| {
            state.remove_option(field_id, index)
        })
        .await
    }

    /// Selects a field, or clears the selection with `None`.
    pub async fn set_selected_field(&mut self, field_id: Option<FieldId>) -> AppResult<()> {
        self.apply(StoreCommand::SetSelectedField, |state| {
            state.set_selected_field(field_id)
        })
        .await
    }
}
