//! Database module exports.

mod memory;
mod models;
mod mongo;
mod repository;
mod store;

pub use memory::MemoryFaqStore;
pub use mongo::Database;
pub use repository::FaqRepository;
pub use store::FaqStore;
