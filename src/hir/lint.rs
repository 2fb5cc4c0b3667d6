//! Style checks over lowered model files.
//!
//! Lint rules never affect resolution. Each rule has a stable id, is on or
//! off by default, and can be toggled per directory tree through
//! `.editorconfig` with `dotnet_diagnostic.<id>.enabled = true|false`.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::definitions::Definition;
use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::environment::{AstFile, Environment};
use super::ids::FileId;
use super::types::TypeDef;
use crate::editorconfig::{EditorConfig, parse_bool};
use crate::error::Result;

/// A lint rule known to the linter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintRule {
    /// Stable id, also used as the diagnostic code
    pub id: &'static str,
    pub description: &'static str,
    pub default_enabled: bool,
}

/// `BOOLEAN` written as a type instead of the base model domain
pub const BOOLEAN_TYPE: LintRule = LintRule {
    id: "interlis.boolean-type",
    description: "Use INTERLIS.BOOLEAN instead of BOOLEAN",
    default_enabled: true,
};

/// Every rule, in reporting order
pub const RULES: &[LintRule] = &[BOOLEAN_TYPE];

const KEY_PREFIX: &str = "dotnet_diagnostic.";
const KEY_SUFFIX: &str = ".enabled";

/// Which rules are enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintConfig {
    overrides: FxHashMap<&'static str, bool>,
}

impl LintConfig {
    /// Rule switches from the `.editorconfig` nearest to `path`
    pub fn from_editorconfig(path: &Path) -> Result<Self> {
        let config = EditorConfig::load(path)?;
        Ok(Self::from_config(&config))
    }

    /// Rule switches from already loaded assignments.
    ///
    /// Unknown rule ids and values other than `true`/`false` are ignored.
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut lint = Self::default();
        for rule in RULES {
            let key = format!("{KEY_PREFIX}{}{KEY_SUFFIX}", rule.id);
            if let Some(enabled) = config.get(&key).and_then(parse_bool) {
                debug!(rule = rule.id, enabled, "lint rule configured");
                lint.overrides.insert(rule.id, enabled);
            }
        }
        lint
    }

    /// Switch one rule on or off
    pub fn with_rule(mut self, rule: LintRule, enabled: bool) -> Self {
        self.overrides.insert(rule.id, enabled);
        self
    }

    pub fn is_enabled(&self, rule: LintRule) -> bool {
        self.overrides
            .get(rule.id)
            .copied()
            .unwrap_or(rule.default_enabled)
    }
}

/// Runs the enabled rules over one file.
pub struct Linter<'a> {
    config: &'a LintConfig,
    collector: DiagnosticCollector,
}

impl<'a> Linter<'a> {
    pub fn new(config: &'a LintConfig) -> Self {
        Self {
            config,
            collector: DiagnosticCollector::new(),
        }
    }

    pub fn check_file(&mut self, file: &AstFile) {
        for definition in &file.definitions {
            if self.config.is_enabled(BOOLEAN_TYPE) {
                self.check_boolean_type(file, definition);
            }
        }
    }

    /// Domains and attributes typed with the `BOOLEAN` keyword
    fn check_boolean_type(&mut self, file: &AstFile, definition: &Definition) {
        if matches!(definition.type_def(), Some(TypeDef::Boolean)) {
            self.report(BOOLEAN_TYPE, file, definition);
        }
    }

    fn report(&mut self, rule: LintRule, file: &AstFile, definition: &Definition) {
        self.collector.add(
            Diagnostic::warning(file.uri.clone(), definition.name_span, rule.description)
                .with_code(rule.id),
        );
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.collector.finish()
    }
}

/// Lint one file.
pub fn lint_file(file: &AstFile, config: &LintConfig) -> Vec<Diagnostic> {
    let mut linter = Linter::new(config);
    linter.check_file(file);
    linter.finish()
}

/// Lint every user file of an environment. The built-in model is skipped.
pub fn lint_environment(env: &Environment, config: &LintConfig) -> Vec<Diagnostic> {
    let mut linter = Linter::new(config);
    for (id, file) in env.files() {
        if id != FileId::BUILTIN {
            linter.check_file(file);
        }
    }
    linter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::build;
    use crate::hir::diagnostics::Severity;
    use crate::parser::parse;
    use std::fs;

    const SOURCE: &str = "INTERLIS 2.4;
MODEL M =
  DOMAIN Flag = BOOLEAN;
  DOMAIN Named = INTERLIS.BOOLEAN;
  CLASS A =
    done : BOOLEAN;
    ok : INTERLIS.BOOLEAN;
    code : TEXT*10;
  END A;
END M.
";

    fn file() -> AstFile {
        build(&parse(SOURCE), Some("file:///m.ili"))
    }

    #[test]
    fn test_boolean_keyword_is_reported_at_the_name() {
        let diagnostics = lint_file(&file(), &LintConfig::default());
        assert_eq!(diagnostics.len(), 2);
        for diagnostic in &diagnostics {
            assert_eq!(diagnostic.severity, Severity::Warning);
            assert_eq!(diagnostic.code.as_deref(), Some("interlis.boolean-type"));
            assert_eq!(&*diagnostic.message, "Use INTERLIS.BOOLEAN instead of BOOLEAN");
            assert_eq!(diagnostic.uri.as_deref(), Some("file:///m.ili"));
        }
        // `Flag` and `done`, 0-based
        assert_eq!(diagnostics[0].span.start.line, 2);
        assert_eq!(diagnostics[0].span.start.column, 9);
        assert_eq!(diagnostics[1].span.start.line, 5);
        assert_eq!(diagnostics[1].span.start.column, 4);
    }

    #[test]
    fn test_disabled_rule_reports_nothing() {
        let config = LintConfig::default().with_rule(BOOLEAN_TYPE, false);
        assert!(!config.is_enabled(BOOLEAN_TYPE));
        assert!(lint_file(&file(), &config).is_empty());
    }

    #[test]
    fn test_editorconfig_switches_rule() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".editorconfig"),
            "[*.ili]\ndotnet_diagnostic.interlis.boolean-type.enabled = False\n",
        )
        .unwrap();
        let config = LintConfig::from_editorconfig(&dir.path().join("M.ili")).unwrap();
        assert!(!config.is_enabled(BOOLEAN_TYPE));
    }

    #[test]
    fn test_unknown_values_keep_the_default() {
        let config = LintConfig::from_config(&EditorConfig::parse(
            "dotnet_diagnostic.interlis.boolean-type.enabled = unset\ndotnet_diagnostic.other.enabled = false\n",
        ));
        assert_eq!(config, LintConfig::default());
        assert!(config.is_enabled(BOOLEAN_TYPE));
    }

    #[test]
    fn test_environment_lint_skips_builtin_model() {
        let mut env = Environment::new();
        env.add_source("INTERLIS 2.4;\nMODEL M = DOMAIN D = BOOLEAN; END M.\n", Some("m.ili"));
        let diagnostics = lint_environment(&env, &LintConfig::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].uri.as_deref(), Some("m.ili"));
    }
}
