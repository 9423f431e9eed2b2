use super::*;

impl FormDocumentStore {
    /// Replaces the current form's content with a template.
    pub async fn load_template(&mut self, template_id: TemplateId) -> AppResult<()> {
        self.apply(StoreCommand::LoadTemplate, |state| {
            state.load_template(template_id)
        })
        .await
    }

    /// Saves the current form's layout as a new template.
    pub async fn create_template(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<TemplateId> {
        let name = name.into();
        let description = description.into();
        let template_id = self
            .apply(StoreCommand::CreateTemplate, |state| {
                Ok(state.create_template(name, description))
            })
            .await?;

        info!(template_id = %template_id, "form template created");
        Ok(template_id)
    }

    /// Overwrites a template with the current form's layout.
    pub async fn update_template(
        &mut self,
        template_id: TemplateId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<()> {
        let name = name.into();
        let description = description.into();
        self.apply(StoreCommand::UpdateTemplate, |state| {
            state.update_template(template_id, name, description)
        })
        .await
    }

    /// Saves the current form into the saved-form library.
    pub async fn save_form(&mut self) -> AppResult<FormId> {
        let form_id = self
            .apply(StoreCommand::SaveForm, |state| Ok(state.save_form()))
            .await?;

        info!(form_id = %form_id, "form saved");
        Ok(form_id)
    }

    /// Makes a saved form current and returns it.
    pub async fn load_form(&mut self, form_id: FormId) -> AppResult<FormDocument> {
        self.apply(StoreCommand::LoadForm, |state| state.load_form(form_id))
            .await
    }

    /// Marks the current form published and saves it.
    pub async fn publish_form(&mut self) -> AppResult<FormId> {
        let issue_count = self.publish_check().len();
        let form_id = self
            .apply(StoreCommand::PublishForm, |state| Ok(state.publish_form()))
            .await?;

        info!(form_id = %form_id, issue_count, "form published");
        Ok(form_id)
    }

    /// Starts a new empty form, keeping both libraries.
    pub async fn create_new_form(&mut self) -> AppResult<()> {
        let now = Utc::now();
        self.apply(StoreCommand::CreateNewForm, |state| {
            state.create_new_form(now);
            Ok(())
        })
        .await
    }
}
