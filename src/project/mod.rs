//! Model repositories
//!
//! The resolution engine fetches imported models through the
//! [`ModelProvider`] trait. Two providers ship with the crate: a fixed
//! in-memory list and a scanned directory tree.

mod directory;
mod provider;

pub use directory::DirectoryModelProvider;
pub use provider::{InMemoryModelProvider, ModelProvider, ProviderError, RepositoryModel};
