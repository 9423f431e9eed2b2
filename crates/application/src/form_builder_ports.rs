mod observer;
mod storage;

pub use observer::{FormBuilderObserver, StoreCommand};
pub use storage::KeyValueStore;
