//! Formatting options

use std::path::Path;

use tracing::warn;

use crate::editorconfig::{EditorConfig, parse_bool};
use crate::error::Result;

/// Formatting options for INTERLIS code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Number of spaces per indentation level (or tab width if using tabs)
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
    /// Drop newlines after the final token
    pub trim_final_newlines: bool,
    /// End non-empty output with exactly one newline
    pub insert_final_newline: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            tab_size: 2,
            insert_spaces: true,
            trim_final_newlines: true,
            insert_final_newline: true,
        }
    }
}

impl FormatOptions {
    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }

    /// Options for the file at `path`, read from the nearest `.editorconfig`
    /// found in its directory or any parent directory.
    ///
    /// Missing configuration yields the defaults. Supported keys are
    /// `indent_style`, `indent_size`, `tab_width`, `insert_final_newline` and
    /// `trim_trailing_newlines`. Values the formatter does not understand,
    /// such as `unset`, leave the default in place.
    pub fn from_editorconfig(path: &Path) -> Result<Self> {
        let config = EditorConfig::load(path)?;
        Ok(Self::from_config(&config))
    }

    /// Options from already loaded assignments
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut options = Self::default();
        for (key, value) in config.iter() {
            if !options.apply(key, value) {
                warn!(key, value, "ignoring editorconfig value");
            }
        }
        options
    }

    /// Returns false when a known key carries a value it cannot take
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "indent_style" => match value.to_ascii_lowercase().as_str() {
                "space" => self.insert_spaces = true,
                "tab" => self.insert_spaces = false,
                _ => return false,
            },
            // `indent_size = tab` defers to tab_width
            "indent_size" if value.eq_ignore_ascii_case("tab") => self.insert_spaces = false,
            "indent_size" | "tab_width" => match value.parse::<usize>() {
                Ok(size) if size > 0 => self.tab_size = size,
                _ => return false,
            },
            "insert_final_newline" => match parse_bool(value) {
                Some(flag) => self.insert_final_newline = flag,
                None => return false,
            },
            "trim_trailing_newlines" => match parse_bool(value) {
                Some(flag) => self.trim_final_newlines = flag,
                None => return false,
            },
            _ => {}
        }
        true
    }
}
