use super::*;

/// Loads the persisted state, falling back to a fresh one when the blob is
/// missing, unreadable or breaks an invariant.
pub(super) async fn load_state(
    storage: &dyn KeyValueStore,
    storage_key: &str,
) -> AppResult<FormBuilderState> {
    let Some(blob) = storage.get(storage_key).await? else {
        debug!(storage_key, "no persisted form builder state");
        return Ok(FormBuilderState::new(Utc::now()));
    };

    let state = match serde_json::from_str::<FormBuilderState>(&blob) {
        Ok(state) => state,
        Err(error) => {
            warn!(storage_key, error = %error, "discarding unreadable form builder state");
            return Ok(FormBuilderState::new(Utc::now()));
        }
    };

    if let Err(error) = state.check_integrity() {
        warn!(storage_key, error = %error, "discarding inconsistent form builder state");
        return Ok(FormBuilderState::new(Utc::now()));
    }

    info!(
        storage_key,
        field_count = state.current_form().fields().len(),
        templates = state.templates().len(),
        saved_forms = state.saved_forms().len(),
        "form builder state rehydrated"
    );
    Ok(state)
}

pub(super) async fn save_state(
    storage: &dyn KeyValueStore,
    storage_key: &str,
    state: &FormBuilderState,
) -> AppResult<()> {
    let blob = serde_json::to_string(state).map_err(|error| {
        AppError::Internal(format!("failed to serialize form builder state: {error}"))
    })?;

    storage.set(storage_key, blob).await
}
