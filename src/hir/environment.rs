//! The environment: all models known to one resolution run.
//!
//! Files are stored as independent arenas. The environment adds the
//! name→model map on top of them and answers structural questions
//! (parents, children, qualified names) across files.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;

use super::builtin::builtin_file;
use super::definitions::{DefKind, Definition};
use super::ids::{DefId, FileId, LocalDefId, LocalRefId, RefId};
use super::lower::build;
use super::reference::Reference;
use crate::parser::parse;

/// The AST model of one parsed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstFile {
    pub uri: Option<SmolStr>,
    /// `INTERLIS x.y` from the header
    pub schema_version: Option<SmolStr>,
    pub definitions: Vec<Definition>,
    pub references: Vec<Reference>,
    /// Top-level models in declaration order
    pub models: Vec<LocalDefId>,
}

impl AstFile {
    pub fn definition(&self, id: LocalDefId) -> &Definition {
        &self.definitions[id.index()]
    }

    pub fn reference(&self, id: LocalRefId) -> &Reference {
        &self.references[id.index()]
    }

    pub fn model_names(&self) -> impl Iterator<Item = &SmolStr> + '_ {
        self.models.iter().map(|id| &self.definition(*id).name)
    }
}

/// All models taking part in one resolution run.
///
/// At most one model per name; the built-in `INTERLIS` model is always
/// present and lives in the first file.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Schema version of the first user file
    version: Option<SmolStr>,
    files: Vec<AstFile>,
    models: IndexMap<SmolStr, DefId>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// An environment holding only the built-in model
    pub fn new() -> Self {
        let mut env = Self {
            version: None,
            files: Vec::new(),
            models: IndexMap::new(),
        };
        env.insert(builtin_file());
        env
    }

    /// Merge the models of a user file, keeping models already present.
    ///
    /// The first user file sets the language version of the environment.
    /// Returns `None` when every model of the file was known already; the
    /// file is then dropped.
    pub fn add_file(&mut self, file: AstFile) -> Option<FileId> {
        if !self.has_user_files() {
            self.version = file.schema_version.clone();
        }
        self.merge(file)
    }

    /// Merge a file fetched from a model repository. The environment
    /// version is left alone.
    pub(crate) fn add_imported(&mut self, file: AstFile) -> Option<FileId> {
        self.merge(file)
    }

    fn has_user_files(&self) -> bool {
        self.files.len() > 1
    }

    fn merge(&mut self, file: AstFile) -> Option<FileId> {
        if file.model_names().all(|name| self.models.contains_key(name)) {
            debug!(uri = ?file.uri, "no new models, file dropped");
            return None;
        }
        Some(self.insert(file))
    }

    /// Parse and merge source text
    pub fn add_source(&mut self, text: &str, uri: Option<&str>) -> Option<FileId> {
        self.add_file(build(&parse(text), uri))
    }

    fn insert(&mut self, file: AstFile) -> FileId {
        let id = FileId::new(self.files.len());
        for &model in &file.models {
            let name = file.definition(model).name.clone();
            // Add-if-absent: the first model of a name stays
            self.models
                .entry(name)
                .or_insert_with(|| DefId::new(id, model));
        }
        self.files.push(file);
        id
    }

    /// The language-version tag, e.g. `2.4`
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &AstFile)> + '_ {
        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| (FileId::new(index), file))
    }

    pub fn file(&self, id: FileId) -> &AstFile {
        &self.files[id.index()]
    }

    /// The file stored under `uri`
    pub fn file_by_uri(&self, uri: &str) -> Option<FileId> {
        self.files()
            .find(|(_, file)| file.uri.as_deref() == Some(uri))
            .map(|(id, _)| id)
    }

    // ------------------------------------------------------------------------
    // Models
    // ------------------------------------------------------------------------

    pub fn model(&self, name: &str) -> Option<DefId> {
        self.models.get(name).copied()
    }

    pub fn contains_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// All models in insertion order, built-in first
    pub fn models(&self) -> impl Iterator<Item = (&SmolStr, DefId)> + '_ {
        self.models.iter().map(|(name, id)| (name, *id))
    }

    /// Models that are not built in
    pub fn user_models(&self) -> impl Iterator<Item = (&SmolStr, DefId)> + '_ {
        self.models().filter(|(_, id)| !self.is_builtin(*id))
    }

    pub fn is_builtin(&self, id: DefId) -> bool {
        id.file == FileId::BUILTIN
    }

    pub fn builtin_model(&self) -> Option<DefId> {
        self.file(FileId::BUILTIN)
            .models
            .first()
            .map(|local| DefId::new(FileId::BUILTIN, *local))
    }

    // ------------------------------------------------------------------------
    // Definitions
    // ------------------------------------------------------------------------

    pub fn definition(&self, id: DefId) -> &Definition {
        self.file(id.file).definition(id.local)
    }

    pub fn kind(&self, id: DefId) -> DefKind {
        self.definition(id).kind()
    }

    pub fn parent(&self, id: DefId) -> Option<DefId> {
        self.definition(id).parent.map(|parent| id.sibling(parent))
    }

    /// The direct child named `name`
    pub fn child(&self, id: DefId, name: &str) -> Option<DefId> {
        self.definition(id)
            .content
            .get(name)
            .map(|local| id.sibling(*local))
    }

    /// Direct children in declaration order; units appear under both names
    pub fn children(&self, id: DefId) -> impl Iterator<Item = (&SmolStr, DefId)> + '_ {
        self.definition(id)
            .content
            .iter()
            .map(move |(name, local)| (name, id.sibling(*local)))
    }

    /// The model enclosing a definition (a model encloses itself)
    pub fn model_of(&self, id: DefId) -> DefId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    pub fn uri_of(&self, id: DefId) -> Option<&SmolStr> {
        self.file(id.file).uri.as_ref()
    }

    /// True when the model enclosing `id` is the one registered for its name
    pub fn is_reachable(&self, id: DefId) -> bool {
        let model = self.model_of(id);
        self.model(&self.definition(model).name) == Some(model)
    }

    /// Dotted name from the model down, e.g. `M.T.C`
    pub fn qualified_name(&self, id: DefId) -> String {
        let mut segments = vec![self.definition(id).name.as_str()];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            segments.push(self.definition(parent).name.as_str());
            current = parent;
        }
        segments.reverse();
        segments.join(".")
    }

    /// Look up a dotted path starting at the model map
    pub fn lookup_path(&self, path: &str) -> Option<DefId> {
        let mut segments = path.split('.');
        let first = self.model(segments.next()?)?;
        segments.try_fold(first, |current, segment| self.child(current, segment))
    }

    // ------------------------------------------------------------------------
    // References
    // ------------------------------------------------------------------------

    pub fn reference(&self, id: RefId) -> &Reference {
        self.file(id.file).reference(id.local)
    }

    pub(crate) fn reference_mut(&mut self, id: RefId) -> &mut Reference {
        &mut self.files[id.file.index()].references[id.local.index()]
    }

    /// References of all reachable user definitions
    pub fn references(&self) -> impl Iterator<Item = (RefId, &Reference)> + '_ {
        self.files().flat_map(move |(file_id, file)| {
            file.references
                .iter()
                .enumerate()
                .map(move |(index, reference)| {
                    (RefId::new(file_id, LocalRefId::new(index)), reference)
                })
                .filter(move |(_, reference)| {
                    file_id != FileId::BUILTIN
                        && self.is_reachable(DefId::new(file_id, reference.source))
                })
        })
    }
}
