pub mod init;
pub mod memory;
pub mod store;
pub mod utils;

pub use memory::MemoryHoldingStore;
pub use store::{HoldingStore, SqliteHoldingStore};
