use super::*;

impl FormBuilderState {
    /// Merges title and description changes into the current form.
    pub fn set_current_form(&mut self, patch: FormDocumentPatch) {
        self.current_form.apply_patch(patch);
    }

    /// Appends a field to the end of the current form.
    ///
    /// On a multi-step form a field without a step lands on the current step; an
    /// explicit step must exist. On a single-step form only step 1 is accepted and
    /// the field is stored unstepped.
    pub fn add_field(&mut self, mut field: FormField) -> AppResult<FieldId> {
        if self.current_form.field(field.id()).is_some() {
            return Err(AppError::Conflict(format!(
                "field '{}' already exists in the form",
                field.id()
            )));
        }

        let step = if self.current_form.is_multi_step() {
            let step = field.step().unwrap_or(self.current_step);
            self.current_form.require_step(step)?;
            Some(step)
        } else {
            if field.step().is_some_and(|step| step != 1) {
                return Err(AppError::Validation(format!(
                    "field '{}' cannot be placed on a step of a single-step form",
                    field.id()
                )));
            }
            None
        };
        field.set_step(step);

        let field_id = field.id().clone();
        self.current_form.fields_mut().push(field);
        Ok(field_id)
    }

    /// Appends the palette default for a field type and returns its id.
    pub fn add_field_of_type(&mut self, field_type: FieldType) -> AppResult<FieldId> {
        let ordinal = self
            .current_form
            .fields()
            .iter()
            .filter(|field| field.field_type() == field_type)
            .count()
            + 1;
        let step = self
            .current_form
            .is_multi_step()
            .then_some(self.current_step);
        let field_id = format!("{}_{}", field_type.as_str(), Uuid::new_v4().simple());

        self.add_field(FormField::from_palette(
            field_id, field_type, ordinal, step,
        )?)
    }

    /// Removes a field, clearing the selection when it pointed at it.
    pub fn remove_field(&mut self, field_id: &FieldId) -> AppResult<FormField> {
        let index = self
            .current_form
            .field_index(field_id)
            .ok_or_else(|| AppError::NotFound(format!("field '{field_id}' does not exist")))?;

        let removed = self.current_form.fields_mut().remove(index);
        if self.selected_field_id.as_ref() == Some(field_id) {
            self.selected_field_id = None;
        }

        Ok(removed)
    }

    /// Moves the field at `from_index` to `to_index` in display order.
    pub fn reorder_fields(&mut self, from_index: usize, to_index: usize) -> AppResult<()> {
        move_item(self.current_form.fields_mut(), from_index, to_index)
    }

    /// Applies an attribute patch to one field.
    pub fn update_field(&mut self, field_id: &FieldId, patch: FieldPatch) -> AppResult<()> {
        if let Some(step) = patch.step {
            self.require_multi_step()?;
            self.current_form.require_step(step)?;
        }

        self.current_form
            .require_field_mut(field_id)?
            .apply_patch(patch)
    }

    /// Appends a trimmed option to a choice field.
    pub fn add_option(&mut self, field_id: &FieldId, text: &str) -> AppResult<()> {
        self.current_form.require_field_mut(field_id)?.add_option(text)
    }

    /// Replaces the option text at `index`.
    pub fn update_option(
        &mut self,
        field_id: &FieldId,
        index: usize,
        text: impl Into<String>,
    ) -> AppResult<()> {
        self.current_form
            .require_field_mut(field_id)?
            .update_option(index, text)
    }

    /// Removes the option at `index` and returns its text.
    pub fn remove_option(&mut self, field_id: &FieldId, index: usize) -> AppResult<String> {
        self.current_form
            .require_field_mut(field_id)?
            .remove_option(index)
    }

    /// Selects a field of the current form, or clears the selection.
    pub fn set_selected_field(&mut self, field_id: Option<FieldId>) -> AppResult<()> {
        if let Some(field_id) = &field_id {
            if self.current_form.field(field_id).is_none() {
                return Err(AppError::NotFound(format!(
                    "field '{field_id}' does not exist"
                )));
            }
        }

        self.selected_field_id = field_id;
        Ok(())
    }
}
