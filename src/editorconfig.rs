//! Nearest `.editorconfig` lookup, shared by the formatter and the linter.
//!
//! Only flat `key = value` assignments are read. Section headers are
//! skipped, so every assignment in the file applies to every model file
//! below it. Keys are case-insensitive and later assignments win.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};

/// Name of the configuration file looked up next to model sources
pub const EDITORCONFIG: &str = ".editorconfig";

/// Assignments of the `.editorconfig` nearest to a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    path: Option<PathBuf>,
    values: IndexMap<String, String>,
}

impl EditorConfig {
    /// Read the nearest `.editorconfig` found in the directory of `path` or
    /// any parent directory. No file yields an empty configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let Some(found) = find(path) else {
            return Ok(Self::default());
        };
        debug!(config = %found.display(), "loading editorconfig");
        let text = std::fs::read_to_string(&found).map_err(|e| Error::io(&found, e))?;
        let mut config = Self::parse(&text);
        config.path = Some(found);
        Ok(config)
    }

    /// Assignments of one configuration text
    pub fn parse(text: &str) -> Self {
        let values = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with(';'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .map(|(key, value)| (key.to_ascii_lowercase(), value.to_string()))
            .collect();
        Self { path: None, values }
    }

    /// The file the assignments came from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }

    /// Assignments in file order, each key once with its last value
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// `true` or `false`, ignoring case
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Walk from the directory of `path` upwards to the first `.editorconfig`
fn find(path: &Path) -> Option<PathBuf> {
    let start = if path.is_dir() { Some(path) } else { path.parent() };
    start?
        .ancestors()
        .map(|dir| dir.join(EDITORCONFIG))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_skips_sections_and_comments() {
        let config = EditorConfig::parse(
            "root = true\n\n[*.ili]\n# indent_size = 8\n; tab_width = 3\nIndent_Style = tab\nbroken line\nempty =\n",
        );
        assert_eq!(config.get("indent_style"), Some("tab"));
        assert_eq!(config.get("root"), Some("true"));
        assert_eq!(config.get("indent_size"), None);
        assert_eq!(config.get("tab_width"), None);
        assert_eq!(config.get("empty"), None);
        assert_eq!(config.iter().count(), 2);
    }

    #[test]
    fn test_later_assignment_wins() {
        let config = EditorConfig::parse("tab_width = 2\n[*.ili]\ntab_width = 4\n");
        assert_eq!(config.get("TAB_WIDTH"), Some("4"));
    }

    #[test]
    fn test_load_finds_nearest_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(EDITORCONFIG), "tab_width = 8\n").unwrap();
        let nested = dir.path().join("models");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(EDITORCONFIG), "tab_width = 3\n").unwrap();

        let config = EditorConfig::load(&nested.join("M.ili")).unwrap();
        assert_eq!(config.get("tab_width"), Some("3"));
        assert_eq!(config.path(), Some(nested.join(EDITORCONFIG).as_path()));
    }

    #[test]
    fn test_parse_bool_ignores_case() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("unset"), None);
    }
}
