//! Model providers for resolution tests.

use std::sync::Mutex;

use async_trait::async_trait;
use interlis::project::{InMemoryModelProvider, ModelProvider, ProviderError, RepositoryModel};

/// A repository file declaring `name` for INTERLIS 2.4
pub fn repository_model(name: &str, content: &str) -> RepositoryModel {
    repository_model_at(name, &format!("repo://{name}.ili"), content)
}

/// A repository file with an explicit URI
pub fn repository_model_at(name: &str, uri: &str, content: &str) -> RepositoryModel {
    RepositoryModel {
        name: name.into(),
        schema_language: "ili2_4".into(),
        uri: uri.into(),
        content: content.to_string(),
    }
}

/// Wraps a provider and records every query
pub struct RecordingProvider {
    inner: InMemoryModelProvider,
    queries: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingProvider {
    pub fn new(models: Vec<RepositoryModel>) -> Self {
        Self {
            inner: InMemoryModelProvider::new(models),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queried names with their version filter, in query order
    pub fn queries(&self) -> Vec<(String, Option<String>)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for RecordingProvider {
    async fn search_by_name(
        &self,
        name: &str,
        version_filter: Option<&str>,
    ) -> Result<Vec<RepositoryModel>, ProviderError> {
        self.queries
            .lock()
            .unwrap()
            .push((name.to_string(), version_filter.map(str::to_string)));
        self.inner.search_by_name(name, version_filter).await
    }
}

/// A repository that is always down
pub struct FailingProvider;

#[async_trait]
impl ModelProvider for FailingProvider {
    async fn search_by_name(
        &self,
        _name: &str,
        _version_filter: Option<&str>,
    ) -> Result<Vec<RepositoryModel>, ProviderError> {
        Err(ProviderError::Unavailable("connection refused".to_string()))
    }
}
