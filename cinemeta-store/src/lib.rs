pub mod error;
pub mod jsonl;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use store::{RecordStore, StartMode, validate_keys};
