//! A model repository backed by a local directory tree.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use smol_str::SmolStr;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::provider::{ModelProvider, ProviderError, RepositoryModel};
use crate::base::constants::{DEFAULT_SCHEMA_VERSION, ILI_EXTENSION, schema_language};
use crate::error::Result;
use crate::syntax::SyntaxFile;

/// Serves every `*.ili` file below a root directory.
///
/// The directory is scanned once; each file is indexed under every model it
/// declares, with the schema language taken from its header.
#[derive(Debug, Clone)]
pub struct DirectoryModelProvider {
    root: PathBuf,
    entries: Vec<RepositoryModel>,
}

impl DirectoryModelProvider {
    /// Scan `root` recursively.
    ///
    /// Only an unreadable root is an error. Entries below it that cannot be
    /// walked or read as UTF-8 text are logged and skipped.
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let mut entries = Vec::new();

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.depth() == 0 => return Err(error.into()),
                Err(error) => {
                    warn!(%error, "unreadable directory entry, skipped");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !has_ili_extension(path) {
                continue;
            }
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(error) => {
                    warn!(path = %path.display(), %error, "unreadable model file, skipped");
                    continue;
                }
            };
            let file = SyntaxFile::new(&content);
            let names = file.model_names();
            if names.is_empty() {
                warn!(path = %path.display(), "no model found, skipped");
                continue;
            }
            let version = file
                .schema_version()
                .unwrap_or_else(|| SmolStr::new(DEFAULT_SCHEMA_VERSION));
            let uri = SmolStr::new(path.display().to_string());
            for name in names {
                entries.push(RepositoryModel {
                    name,
                    schema_language: schema_language(&version).into(),
                    uri: uri.clone(),
                    content: content.clone(),
                });
            }
        }

        debug!(root = %root.display(), models = entries.len(), "scanned model directory");
        Ok(Self { root, entries })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All indexed models in path order
    pub fn entries(&self) -> &[RepositoryModel] {
        &self.entries
    }
}

fn has_ili_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ILI_EXTENSION))
}

#[async_trait]
impl ModelProvider for DirectoryModelProvider {
    async fn search_by_name(
        &self,
        name: &str,
        version_filter: Option<&str>,
    ) -> std::result::Result<Vec<RepositoryModel>, ProviderError> {
        Ok(self
            .entries
            .iter()
            .filter(|m| m.name == name)
            .filter(|m| version_filter.is_none_or(|v| m.schema_language == v))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_scan_indexes_models_by_name_and_version() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/Units.ili", "INTERLIS 2.4;\nMODEL Units = END Units.\n");
        write(dir.path(), "b/Units.ILI", "INTERLIS 2.3;\nMODEL Units = END Units.\n");
        write(
            dir.path(),
            "Pair.ili",
            "INTERLIS 2.4;\nMODEL A = END A.\nMODEL B = END B.\n",
        );
        write(dir.path(), "notes.txt", "MODEL Units");

        let provider = DirectoryModelProvider::scan(dir.path()).unwrap();
        assert_eq!(provider.entries().len(), 4);

        let units = provider.search_by_name("Units", Some("ili2_4")).await.unwrap();
        assert_eq!(units.len(), 1);
        assert!(units[0].uri.ends_with("Units.ili"));
        assert!(units[0].content.contains("MODEL Units"));

        let b = provider.search_by_name("B", None).await.unwrap();
        assert_eq!(b.len(), 1);
        assert!(b[0].content.contains("MODEL A"));
    }

    #[test]
    fn test_files_without_models_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "empty.ili", "INTERLIS 2.4;\n");
        let provider = DirectoryModelProvider::scan(dir.path()).unwrap();
        assert!(provider.entries().is_empty());
        assert_eq!(provider.root(), dir.path());
    }

    #[tokio::test]
    async fn test_unreadable_file_does_not_abort_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Latin1.ili"),
            b"INTERLIS 2.4;\nMODEL Caf\xe9 = END Caf\xe9.\n",
        )
        .unwrap();
        write(dir.path(), "Units.ili", "INTERLIS 2.4;\nMODEL Units = END Units.\n");

        let provider = DirectoryModelProvider::scan(dir.path()).unwrap();
        assert_eq!(provider.entries().len(), 1);
        let units = provider.search_by_name("Units", None).await.unwrap();
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DirectoryModelProvider::scan(dir.path().join("missing"));
        assert!(matches!(result, Err(crate::error::Error::Walk(_))));
    }
}
