use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use formwright_core::{AppError, AppResult};
use formwright_domain::{
    FieldId, FieldPatch, FieldType, FormBuilderState, FormDocumentPatch, FormFieldInput,
    UNTITLED_FORM_TITLE,
};
use tokio::sync::Mutex;

use crate::{FormBuilderObserver, KeyValueStore, StoreCommand};

use super::{DEFAULT_STORAGE_KEY, FormDocumentStore, FormDocumentStoreConfig};

#[derive(Default)]
struct FakeKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl FakeKeyValueStore {
    async fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
    }

    async fn stored(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FakeKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("storage is unavailable".to_owned()));
        }

        self.entries.lock().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingObserver {
    events: std::sync::Mutex<Vec<(StoreCommand, usize)>>,
}

impl RecordingObserver {
    fn commands(&self) -> Vec<StoreCommand> {
        self.events
            .lock()
            .map(|events| events.iter().map(|(command, _)| *command).collect())
            .unwrap_or_default()
    }

    fn field_counts(&self) -> Vec<usize> {
        self.events
            .lock()
            .map(|events| events.iter().map(|(_, count)| *count).collect())
            .unwrap_or_default()
    }
}

impl FormBuilderObserver for RecordingObserver {
    fn state_changed(&self, command: StoreCommand, state: &FormBuilderState) {
        if let Ok(mut events) = self.events.lock() {
            events.push((command, state.current_form().fields().len()));
        }
    }
}

async fn open_store(storage: Arc<FakeKeyValueStore>) -> FormDocumentStore {
    FormDocumentStore::open(storage, FormDocumentStoreConfig::default())
        .await
        .unwrap_or_else(|_| unreachable!())
}

fn field_id(value: &str) -> FieldId {
    FieldId::new(value).unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn open_without_stored_state_starts_empty() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let store = open_store(storage.clone()).await;

    assert_eq!(store.current_form().title(), UNTITLED_FORM_TITLE);
    assert!(store.current_form().fields().is_empty());
    assert_eq!(store.current_step(), 1);
    assert!(store.templates().is_empty());
    assert!(store.saved_forms().is_empty());
    assert!(storage.stored(DEFAULT_STORAGE_KEY).await.is_none());
}

#[tokio::test]
async fn commands_persist_state_that_reopens_identically() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage.clone()).await;

    let set = store
        .set_current_form(FormDocumentPatch {
            title: Some("Feedback".to_owned()),
            ..FormDocumentPatch::default()
        })
        .await;
    assert!(set.is_ok());
    assert!(store.add_field_of_type(FieldType::Textarea).await.is_ok());
    assert!(store.add_step().await.is_ok());
    let template_id = store
        .create_template("Feedback", "Short survey")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(store.save_form().await.is_ok());

    let reopened = open_store(storage).await;

    assert_eq!(reopened.state(), store.state());
    assert!(reopened.find_template(template_id).is_ok());
}

#[tokio::test]
async fn custom_storage_key_is_used() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = FormDocumentStore::open(
        storage.clone(),
        FormDocumentStoreConfig::new("tenant-a/builder"),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    assert!(store.add_field_of_type(FieldType::Email).await.is_ok());

    assert!(storage.stored("tenant-a/builder").await.is_some());
    assert!(storage.stored(DEFAULT_STORAGE_KEY).await.is_none());
}

#[tokio::test]
async fn unreadable_blob_is_discarded() {
    let storage = Arc::new(FakeKeyValueStore::default());
    storage.seed(DEFAULT_STORAGE_KEY, "{not json").await;

    let store = open_store(storage).await;

    assert_eq!(store.current_form().title(), UNTITLED_FORM_TITLE);
    assert!(store.current_form().fields().is_empty());
}

#[tokio::test]
async fn inconsistent_blob_is_discarded() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage.clone()).await;
    assert!(store.add_step().await.is_ok());
    assert!(store.set_current_step(2).await.is_ok());

    let blob = storage
        .stored(DEFAULT_STORAGE_KEY)
        .await
        .unwrap_or_else(|| unreachable!());
    let mut value: serde_json::Value =
        serde_json::from_str(&blob).unwrap_or_else(|_| unreachable!());
    value["current_step"] = serde_json::json!(7);
    storage.seed(DEFAULT_STORAGE_KEY, &value.to_string()).await;

    let reopened = open_store(storage).await;

    assert_eq!(reopened.current_form().steps(), 1);
    assert_eq!(reopened.current_step(), 1);
}

#[tokio::test]
async fn blob_with_misplaced_template_field_is_discarded() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage.clone()).await;
    assert!(store.add_field_of_type(FieldType::Text).await.is_ok());
    assert!(store.add_step().await.is_ok());
    assert!(store.create_template("Two steps", "").await.is_ok());

    let blob = storage
        .stored(DEFAULT_STORAGE_KEY)
        .await
        .unwrap_or_else(|| unreachable!());
    let mut value: serde_json::Value =
        serde_json::from_str(&blob).unwrap_or_else(|_| unreachable!());
    value["templates"][0]["fields"][0]["step"] = serde_json::json!(9);
    storage.seed(DEFAULT_STORAGE_KEY, &value.to_string()).await;

    let reopened = open_store(storage).await;

    assert!(reopened.templates().is_empty());
    assert!(reopened.current_form().fields().is_empty());
}

#[tokio::test]
async fn failed_persist_leaves_state_unchanged() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage.clone()).await;
    let observer = Arc::new(RecordingObserver::default());
    store.subscribe(observer.clone());
    assert!(store.add_field_of_type(FieldType::Text).await.is_ok());
    let before = store.state().clone();

    storage.fail_writes(true);
    let result = store.add_field_of_type(FieldType::Number).await;

    assert!(matches!(result, Err(AppError::Internal(_))));
    assert_eq!(store.state(), &before);
    assert_eq!(observer.commands(), vec![StoreCommand::AddField]);

    storage.fail_writes(false);
    assert!(store.add_field_of_type(FieldType::Number).await.is_ok());
    assert_eq!(store.current_form().fields().len(), 2);
}

#[tokio::test]
async fn rejected_command_is_not_persisted_or_notified() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage.clone()).await;
    let observer = Arc::new(RecordingObserver::default());
    store.subscribe(observer.clone());

    let removed = store.remove_field(&field_id("ghost")).await;
    let moved = store.reorder_fields(0, 3).await;

    assert!(matches!(removed, Err(AppError::NotFound(_))));
    assert!(matches!(moved, Err(AppError::Validation(_))));
    assert!(observer.commands().is_empty());
    assert!(storage.stored(DEFAULT_STORAGE_KEY).await.is_none());
}

#[tokio::test]
async fn observers_see_post_command_state() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage).await;
    let observer = Arc::new(RecordingObserver::default());
    store.subscribe(observer.clone());

    let first = store
        .add_field(FormFieldInput::new("name", FieldType::Text, "Name"))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(store.add_field_of_type(FieldType::Checkbox).await.is_ok());
    assert!(store.set_selected_field(Some(first.clone())).await.is_ok());
    assert!(store.remove_field(&first).await.is_ok());

    assert_eq!(
        observer.commands(),
        vec![
            StoreCommand::AddField,
            StoreCommand::AddField,
            StoreCommand::SetSelectedField,
            StoreCommand::RemoveField,
        ]
    );
    assert_eq!(observer.field_counts(), vec![1, 2, 2, 1]);
    assert!(store.selected_field().is_none());
}

#[tokio::test]
async fn field_editing_round_trip() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage).await;
    let choice = store
        .add_field_of_type(FieldType::Radio)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(store.add_option(&choice, "Option 3").await.is_ok());
    assert!(store.update_option(&choice, 0, "Yes").await.is_ok());
    let removed = store
        .remove_option(&choice, 1)
        .await
        .unwrap_or_else(|_| unreachable!());
    let patched = store
        .update_field(
            &choice,
            FieldPatch {
                label: Some("Attending?".to_owned()),
                required: Some(true),
                ..FieldPatch::default()
            },
        )
        .await;

    assert_eq!(removed, "Option 2");
    assert!(patched.is_ok());
    let field = store
        .current_form()
        .field(&choice)
        .unwrap_or_else(|| unreachable!());
    assert_eq!(field.label(), "Attending?");
    assert!(field.required());
    assert_eq!(
        field.options(),
        Some(["Yes".to_owned(), "Option 3".to_owned()].as_slice())
    );
}

#[tokio::test]
async fn step_navigation_and_removal() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage).await;
    let first = store
        .add_field_of_type(FieldType::Text)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(store.add_step().await.unwrap_or_else(|_| unreachable!()), 2);
    assert_eq!(store.add_step().await.unwrap_or_else(|_| unreachable!()), 3);

    assert_eq!(store.next_step().await.unwrap_or_else(|_| unreachable!()), 2);
    let second = store
        .add_field_of_type(FieldType::Date)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(store.visible_fields().len(), 1);
    assert!(store.move_field_to_step(&first, 3).await.is_ok());
    assert_eq!(store.fields_in_step(3).len(), 1);

    let removed = store
        .remove_step(2)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].id(), &second);
    assert_eq!(store.current_form().steps(), 2);
    assert!(store.current_form().is_multi_step());
    assert_eq!(
        store
            .current_form()
            .field(&first)
            .and_then(|field| field.step()),
        Some(2)
    );
    assert_eq!(
        store.previous_step().await.unwrap_or_else(|_| unreachable!()),
        1
    );

    assert!(store.set_multi_step(false).await.is_ok());
    assert!(!store.current_form().is_multi_step());
    assert_eq!(store.current_form().steps(), 1);
}

#[tokio::test]
async fn template_and_saved_form_library() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage).await;
    assert!(store.add_field_of_type(FieldType::Email).await.is_ok());
    let template_id = store
        .create_template("Contact", "Email only")
        .await
        .unwrap_or_else(|_| unreachable!());
    let form_id = store.save_form().await.unwrap_or_else(|_| unreachable!());

    assert!(store.create_new_form().await.is_ok());
    assert!(store.current_form().fields().is_empty());
    assert_eq!(store.templates().len(), 1);

    assert!(store.load_template(template_id).await.is_ok());
    assert_eq!(store.current_form().title(), "Contact");
    assert_eq!(store.current_form().fields().len(), 1);
    assert!(store.add_field_of_type(FieldType::Phone).await.is_ok());
    assert!(
        store
            .update_template(template_id, "Contact", "Email and phone")
            .await
            .is_ok()
    );
    let template = store
        .find_template(template_id)
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(template.description(), "Email and phone");
    assert_eq!(template.fields().len(), 2);

    let loaded = store
        .load_form(form_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(loaded.id(), Some(form_id));
    assert_eq!(store.current_form().fields().len(), 1);

    let published = store.publish_form().await.unwrap_or_else(|_| unreachable!());
    assert_eq!(published, form_id);
    assert_eq!(store.saved_forms().len(), 1);
    assert!(store.saved_forms()[0].is_published());
}

#[tokio::test]
async fn publish_check_is_advisory() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage).await;

    assert!(!store.publish_check().is_empty());
    assert!(store.publish_form().await.is_ok());
    assert!(store.current_form().is_published());
}

#[tokio::test]
async fn reset_clears_state_and_storage() {
    let storage = Arc::new(FakeKeyValueStore::default());
    let mut store = open_store(storage.clone()).await;
    let observer = Arc::new(RecordingObserver::default());
    store.subscribe(observer.clone());
    assert!(store.add_field_of_type(FieldType::Text).await.is_ok());
    assert!(store.create_template("Keep?", "").await.is_ok());

    assert!(store.reset().await.is_ok());

    assert!(store.current_form().fields().is_empty());
    assert!(store.templates().is_empty());
    assert!(storage.stored(DEFAULT_STORAGE_KEY).await.is_none());
    assert_eq!(observer.commands().last(), Some(&StoreCommand::Reset));
}
