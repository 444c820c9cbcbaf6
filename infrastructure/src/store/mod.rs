//! Document store adapters.

mod ids;
mod in_memory;

pub use ids::IdGenerator;
pub use in_memory::InMemoryDocumentStore;
