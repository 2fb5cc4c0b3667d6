//! Model repositories the resolution engine fetches imports from.

use async_trait::async_trait;
use smol_str::SmolStr;
use thiserror::Error;

/// A model file known to a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryModel {
    /// Name of the model the file declares
    pub name: SmolStr,
    /// Schema language tag, e.g. `ili2_4`
    pub schema_language: SmolStr,
    /// Where the file came from; becomes the `source_uri` of its models
    pub uri: SmolStr,
    /// Full source text of the file
    pub content: String,
}

/// Failure of a repository lookup
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    #[error("invalid repository response: {0}")]
    InvalidResponse(String),
}

/// Source of models for the import closure.
///
/// Implementations return every file declaring a model called `name`,
/// restricted to `version_filter` (a schema language tag) when one is given.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn search_by_name(
        &self,
        name: &str,
        version_filter: Option<&str>,
    ) -> Result<Vec<RepositoryModel>, ProviderError>;
}

/// A fixed list of models, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModelProvider {
    models: Vec<RepositoryModel>,
}

impl InMemoryModelProvider {
    pub fn new(models: Vec<RepositoryModel>) -> Self {
        Self { models }
    }

    pub fn push(&mut self, model: RepositoryModel) {
        self.models.push(model);
    }
}

#[async_trait]
impl ModelProvider for InMemoryModelProvider {
    async fn search_by_name(
        &self,
        name: &str,
        version_filter: Option<&str>,
    ) -> Result<Vec<RepositoryModel>, ProviderError> {
        Ok(self
            .models
            .iter()
            .filter(|m| m.name == name)
            .filter(|m| version_filter.is_none_or(|v| m.schema_language == v))
            .cloned()
            .collect())
    }
}
