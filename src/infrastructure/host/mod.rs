//! Host adapters - The game side of the prestige economy

mod catalog;
mod in_memory;

pub use catalog::HostCatalog;
pub use in_memory::InMemoryHost;
