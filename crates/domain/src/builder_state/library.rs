use super::*;

impl FormBuilderState {
    /// Replaces the current form's content with a template, keeping the form id.
    pub fn load_template(&mut self, template_id: TemplateId) -> AppResult<()> {
        let template = self
            .find_template(template_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("template '{template_id}' does not exist")))?;

        self.current_form.replace_layout(
            template.name().to_owned(),
            template.description().to_owned(),
            template.fields().to_vec(),
            template.steps(),
        );
        self.reconcile_viewport();
        Ok(())
    }

    /// Snapshots the current form's fields and steps into a new template.
    pub fn create_template(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> TemplateId {
        let template = FormTemplate::new(
            TemplateId::new(),
            name,
            description,
            self.current_form.fields().to_vec(),
            self.current_form.steps(),
        );
        let template_id = template.id();
        self.templates.push(template);
        template_id
    }

    /// Overwrites an existing template with the current form's fields and steps.
    pub fn update_template(
        &mut self,
        template_id: TemplateId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<()> {
        let fields = self.current_form.fields().to_vec();
        let steps = self.current_form.steps();
        let template = self
            .templates
            .iter_mut()
            .find(|template| template.id() == template_id)
            .ok_or_else(|| AppError::NotFound(format!("template '{template_id}' does not exist")))?;

        template.overwrite(name.into(), description.into(), fields, steps);
        Ok(())
    }

    /// Assigns an id if needed and upserts the current form into the saved forms.
    pub fn save_form(&mut self) -> FormId {
        let form_id = self.current_form.ensure_id();
        self.upsert_saved_form(form_id);
        form_id
    }

    /// Replaces the current form with a saved one and returns it.
    ///
    /// Unsaved edits on the previous current form are discarded.
    pub fn load_form(&mut self, form_id: FormId) -> AppResult<FormDocument> {
        let form = self
            .find_saved_form(form_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("saved form '{form_id}' does not exist")))?;

        self.current_form = form.clone();
        self.reconcile_viewport();
        Ok(form)
    }

    /// Marks the current form published and upserts it into the saved forms.
    ///
    /// Returns the id under which the form can be shared.
    pub fn publish_form(&mut self) -> FormId {
        let form_id = self.current_form.ensure_id();
        self.current_form.mark_published();
        self.upsert_saved_form(form_id);
        form_id
    }

    /// Starts an empty document; the libraries are kept.
    pub fn create_new_form(&mut self, now: DateTime<Utc>) {
        self.current_form = FormDocument::new(now);
        self.selected_field_id = None;
        self.current_step = 1;
    }

    fn upsert_saved_form(&mut self, form_id: FormId) {
        let snapshot = self.current_form.clone();
        match self
            .saved_forms
            .iter_mut()
            .find(|form| form.id() == Some(form_id))
        {
            Some(existing) => *existing = snapshot,
            None => self.saved_forms.push(snapshot),
        }
    }
}
