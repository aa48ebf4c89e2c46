pub mod repositories;
pub mod store;

pub use repositories::MemoryStore;
pub use store::{GameStore, StoreError};
