//! Domain constants shared across the toolchain.

/// File extension of INTERLIS model files.
pub const ILI_EXTENSION: &str = "ili";

/// Name of the built-in model that every environment contains.
pub const BUILTIN_MODEL_NAME: &str = "INTERLIS";

/// Prefix of the schema-language tag used by model repositories ("ili2_4").
pub const SCHEMA_LANGUAGE_PREFIX: &str = "ili";

/// Schema version assumed when a file has no `INTERLIS x.y;` header.
pub const DEFAULT_SCHEMA_VERSION: &str = "2.4";

/// Maximum number of consecutive newlines the formatter keeps around comments.
pub const MAX_KEPT_NEWLINES: usize = 2;

/// Build the repository schema-language tag for a schema version.
///
/// `"2.4"` becomes `"ili2_4"`.
pub fn schema_language(version: &str) -> String {
    format!("{SCHEMA_LANGUAGE_PREFIX}{}", version.replace('.', "_"))
}
