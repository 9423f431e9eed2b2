//! Application services and ports.

#![forbid(unsafe_code)]

mod form_builder_ports;
mod form_document_store;

pub use form_builder_ports::{FormBuilderObserver, KeyValueStore, StoreCommand};
pub use form_document_store::{DEFAULT_STORAGE_KEY, FormDocumentStore, FormDocumentStoreConfig};
