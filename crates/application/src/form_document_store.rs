use std::sync::Arc;

use chrono::Utc;
use formwright_core::{AppError, AppResult, FormId, TemplateId};
use formwright_domain::{
    FieldId, FieldPatch, FieldType, FormBuilderState, FormDocument, FormDocumentPatch, FormField,
    FormFieldInput, FormTemplate, PublishIssue,
};
use tracing::{debug, info, warn};

use crate::form_builder_ports::{FormBuilderObserver, KeyValueStore, StoreCommand};

mod config;
mod fields;
mod library;
mod persistence;
mod steps;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_STORAGE_KEY, FormDocumentStoreConfig};

/// Application service owning the form under edit and the template and
/// saved-form libraries.
///
/// Each command runs against a working copy of the state, persists the copy
/// through the [`KeyValueStore`] port and only then makes it current and
/// notifies observers. A failing command leaves both the in-memory and the
/// stored state untouched.
pub struct FormDocumentStore {
    state: FormBuilderState,
    storage: Arc<dyn KeyValueStore>,
    config: FormDocumentStoreConfig,
    observers: Vec<Arc<dyn FormBuilderObserver>>,
}

impl FormDocumentStore {
    /// Opens a store, rehydrating state saved under the configured key.
    pub async fn open(
        storage: Arc<dyn KeyValueStore>,
        config: FormDocumentStoreConfig,
    ) -> AppResult<Self> {
        let state = persistence::load_state(storage.as_ref(), config.storage_key()).await?;

        Ok(Self {
            state,
            storage,
            config,
            observers: Vec::new(),
        })
    }

    /// Registers an observer notified after every successful command.
    pub fn subscribe(&mut self, observer: Arc<dyn FormBuilderObserver>) {
        self.observers.push(observer);
    }

    /// Returns the full editor state.
    #[must_use]
    pub fn state(&self) -> &FormBuilderState {
        &self.state
    }

    /// Returns the document under edit.
    #[must_use]
    pub fn current_form(&self) -> &FormDocument {
        self.state.current_form()
    }

    /// Returns the selected field.
    #[must_use]
    pub fn selected_field(&self) -> Option<&FormField> {
        self.state.selected_field()
    }

    /// Returns the step shown in the editor.
    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.state.current_step()
    }

    /// Returns the fields the editor canvas shows.
    #[must_use]
    pub fn visible_fields(&self) -> Vec<&FormField> {
        self.state.visible_fields()
    }

    /// Returns fields placed on one step.
    #[must_use]
    pub fn fields_in_step(&self, step: u32) -> Vec<&FormField> {
        self.state.current_form().fields_in_step(step).collect()
    }

    /// Returns the template library.
    #[must_use]
    pub fn templates(&self) -> &[FormTemplate] {
        self.state.templates()
    }

    /// Returns saved forms.
    #[must_use]
    pub fn saved_forms(&self) -> &[FormDocument] {
        self.state.saved_forms()
    }

    /// Looks up a template by id.
    pub fn find_template(&self, template_id: TemplateId) -> AppResult<&FormTemplate> {
        self.state
            .find_template(template_id)
            .ok_or_else(|| AppError::NotFound(format!("template '{template_id}' does not exist")))
    }

    /// Lists publish readiness issues of the current form.
    #[must_use]
    pub fn publish_check(&self) -> Vec<PublishIssue> {
        self.state.current_form().publish_issues()
    }

    /// Discards the whole state, including both libraries, and deletes the stored blob.
    pub async fn reset(&mut self) -> AppResult<()> {
        self.storage.delete(self.config.storage_key()).await?;
        self.state = FormBuilderState::new(Utc::now());
        info!(
            storage_key = self.config.storage_key(),
            "form builder state reset"
        );
        self.notify(StoreCommand::Reset);
        Ok(())
    }

    async fn apply<T>(
        &mut self,
        command: StoreCommand,
        operation: impl FnOnce(&mut FormBuilderState) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut next = self.state.clone();
        let output = operation(&mut next).inspect_err(|error| {
            debug!(command = command.as_str(), error = %error, "form builder command rejected");
        })?;

        persistence::save_state(self.storage.as_ref(), self.config.storage_key(), &next).await?;
        self.state = next;
        debug!(
            command = command.as_str(),
            field_count = self.state.current_form().fields().len(),
            steps = self.state.current_form().steps(),
            "form builder command applied"
        );
        self.notify(command);

        Ok(output)
    }

    fn notify(&self, command: StoreCommand) {
        for observer in &self.observers {
            observer.state_changed(command, &self.state);
        }
    }
}
