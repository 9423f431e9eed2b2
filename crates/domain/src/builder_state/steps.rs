use super::*;

impl FormBuilderState {
    /// Points the editor at another step.
    pub fn set_current_step(&mut self, step: u32) -> AppResult<()> {
        self.current_form.require_step(step)?;
        self.current_step = step;
        Ok(())
    }

    /// Advances the editor one step, stopping at the last step.
    pub fn next_step(&mut self) -> u32 {
        self.current_step = (self.current_step + 1).min(self.current_form.steps());
        self.current_step
    }

    /// Moves the editor back one step, stopping at the first step.
    pub fn previous_step(&mut self) -> u32 {
        self.current_step = self.current_step.saturating_sub(1).max(1);
        self.current_step
    }

    /// Appends a step and switches the form to multi-step.
    ///
    /// Fields keep their steps; when the form was single-step its fields are
    /// placed on step 1. Returns the new step count.
    pub fn add_step(&mut self) -> AppResult<u32> {
        let was_multi_step = self.current_form.is_multi_step();
        let steps = self
            .current_form
            .steps()
            .checked_add(1)
            .ok_or_else(|| AppError::Validation("form cannot hold more steps".to_owned()))?;
        self.current_form.set_step_layout(steps, true);
        if !was_multi_step {
            self.current_form.place_unstepped_fields(1);
        }

        Ok(steps)
    }

    /// Removes one step, deleting its fields and shifting later steps down.
    ///
    /// The form stays multi-step only while more than one step remains after the
    /// removal. Returns the deleted fields.
    pub fn remove_step(&mut self, step: u32) -> AppResult<Vec<FormField>> {
        self.current_form.require_step(step)?;
        let steps = self.current_form.steps();
        if steps == 1 {
            return Err(AppError::Validation(
                "cannot remove the only step of a form".to_owned(),
            ));
        }

        let removed = close_step_gap(self.current_form.fields_mut(), step);
        let remaining_steps = steps - 1;
        let is_multi_step = remaining_steps > 1;
        self.current_form
            .set_step_layout(remaining_steps, is_multi_step);
        if !is_multi_step {
            self.current_form.clear_field_steps();
        }

        self.reconcile_viewport();
        Ok(removed)
    }

    /// Places a field on another step of a multi-step form.
    pub fn move_field_to_step(&mut self, field_id: &FieldId, step: u32) -> AppResult<()> {
        self.require_multi_step()?;
        self.current_form.require_step(step)?;
        self.current_form
            .require_field_mut(field_id)?
            .set_step(Some(step));
        Ok(())
    }

    /// Switches multi-step layout on or off.
    ///
    /// Enabling places unstepped fields on step 1. Disabling keeps every field,
    /// drops their steps and collapses the form to a single step.
    pub fn set_multi_step(&mut self, enabled: bool) {
        if enabled {
            let steps = self.current_form.steps();
            self.current_form.set_step_layout(steps, true);
            self.current_form.place_unstepped_fields(1);
        } else {
            self.current_form.set_step_layout(1, false);
            self.current_form.clear_field_steps();
            self.current_step = 1;
        }
    }

    pub(super) fn require_multi_step(&self) -> AppResult<()> {
        if !self.current_form.is_multi_step() {
            return Err(AppError::Validation(
                "form is not multi-step".to_owned(),
            ));
        }

        Ok(())
    }
}
