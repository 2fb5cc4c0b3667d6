//! Name resolution: binding every reference to its definition.
//!
//! Resolution runs in two phases:
//!
//! 1. **Import closure** ([`imports`](super::imports)) fetches every model the
//!    environment imports but lacks.
//! 2. **Binding** walks the references of all reachable user models and
//!    looks up their paths. Forward references are legal since binding only
//!    starts once the environment is complete.
//!
//! The first segment of a path is searched in:
//!
//! - the enclosing scopes of the definition it occurs in, innermost first
//! - the models the enclosing model imports `UNQUALIFIED`
//! - the built-in `INTERLIS` model
//! - the top-level model map
//!
//! Later segments descend into `content`. Attributes and enumeration values
//! are only reachable through a path, never as a first segment.

use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::definitions::DefData;
use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::environment::Environment;
use super::ids::{DefId, RefId};
use super::imports::{ReportedImports, close_imports};
use super::reference::{Expected, RefState, Reference};
use crate::base::constants::schema_language;
use crate::project::ModelProvider;

/// Options of one resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Schema language tag passed to the provider instead of the one derived
    /// from the environment version, e.g. `ili2_3`
    pub version_filter_override: Option<String>,
}

/// How a resolution run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Completed,
    /// The environment is incomplete and must be discarded
    Cancelled,
}

/// Result of [`resolve_environment`]
#[derive(Debug, Clone)]
pub struct Resolution {
    pub outcome: ResolveOutcome,
    /// Ordered by file and position
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn is_cancelled(&self) -> bool {
        self.outcome == ResolveOutcome::Cancelled
    }
}

/// Complete the import closure of `env`, then bind all references.
pub async fn resolve_environment<P>(
    env: &mut Environment,
    provider: &P,
    options: &ResolveOptions,
    cancel: &CancellationToken,
) -> Resolution
where
    P: ModelProvider + ?Sized,
{
    let mut diagnostics = DiagnosticCollector::new();
    let version_filter = options
        .version_filter_override
        .clone()
        .or_else(|| env.version().map(schema_language));

    let reported = close_imports(
        env,
        provider,
        version_filter.as_deref(),
        cancel,
        &mut diagnostics,
    )
    .await;

    let outcome = match reported {
        Some(reported) if !cancel.is_cancelled() => {
            bind_references(env, &reported, &mut diagnostics);
            ResolveOutcome::Completed
        }
        _ => ResolveOutcome::Cancelled,
    };

    Resolution {
        outcome,
        diagnostics: diagnostics.finish(),
    }
}

/// Result of looking up one path
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupResult {
    Found(DefId),
    /// The path names a definition of another kind
    WrongKind(DefId),
    NotFound,
}

/// Bind all reachable references of user models
pub(super) fn bind_references(
    env: &mut Environment,
    reported: &ReportedImports,
    diagnostics: &mut DiagnosticCollector,
) {
    let resolver = Resolver::new(env);
    let bindings: Vec<(RefId, RefState)> = env
        .references()
        .map(|(id, reference)| {
            let state = match resolver.resolve(id, reference) {
                LookupResult::Found(target) => RefState::Resolved(target),
                LookupResult::WrongKind(target) => {
                    let found = env.kind(target).display();
                    diagnostics.wrong_kind(
                        uri(env, id),
                        reference.span,
                        &reference.text(),
                        reference.expected.describe(),
                        found,
                    );
                    RefState::Unresolved
                }
                LookupResult::NotFound => {
                    if !is_reported_import(reference, reported) {
                        diagnostics.unresolved_reference(
                            uri(env, id),
                            reference.span,
                            &reference.text(),
                        );
                    }
                    RefState::Unresolved
                }
            };
            (id, state)
        })
        .collect();

    let resolved = bindings
        .iter()
        .filter(|(_, state)| matches!(state, RefState::Resolved(_)))
        .count();
    debug!(
        references = bindings.len(),
        resolved,
        "bound references"
    );

    for (id, state) in bindings {
        env.reference_mut(id).state = state;
    }
}

fn uri(env: &Environment, id: RefId) -> Option<SmolStr> {
    env.file(id.file).uri.clone()
}

/// Imports of models already reported missing during the closure
fn is_reported_import(reference: &Reference, reported: &ReportedImports) -> bool {
    reference.expected == Expected::Model
        && reference.path.len() == 1
        && reported.contains(&reference.path[0])
}

/// Path lookup over a complete environment
pub struct Resolver<'a> {
    env: &'a Environment,
    builtin: Option<DefId>,
}

impl<'a> Resolver<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self {
            env,
            builtin: env.builtin_model(),
        }
    }

    /// Look up the path of a reference and check the kind of its target
    pub fn resolve(&self, id: RefId, reference: &Reference) -> LookupResult {
        let source = DefId::new(id.file, reference.source);
        let target = match (reference.expected, reference.path.as_slice()) {
            // Imports name models, never elements that happen to share the name
            (Expected::Model, [name]) => self.env.model(name),
            (Expected::Model, _) => None,
            _ => self.lookup(source, &reference.path),
        };
        let Some(target) = target else {
            return LookupResult::NotFound;
        };
        if reference.expected.accepts(self.env.kind(target)) {
            LookupResult::Found(target)
        } else {
            LookupResult::WrongKind(target)
        }
    }

    /// Look up `path` as seen from the definition `source`
    pub fn lookup(&self, source: DefId, path: &[SmolStr]) -> Option<DefId> {
        let (first, rest) = path.split_first()?;
        let start = self.lookup_first(source, first, !rest.is_empty())?;
        rest.iter()
            .try_fold(start, |current, segment| self.env.child(current, segment))
    }

    /// A qualified path prefers a model over a built-in or imported element
    /// of the same name
    fn lookup_first(&self, source: DefId, name: &str, qualified: bool) -> Option<DefId> {
        let scoped = self.lookup_in_scopes(source, name);
        if qualified {
            scoped
                .or_else(|| self.env.model(name))
                .or_else(|| self.lookup_in_unqualified_imports(source, name))
                .or_else(|| self.lookup_in_builtin(name))
        } else {
            scoped
                .or_else(|| self.lookup_in_unqualified_imports(source, name))
                .or_else(|| self.lookup_in_builtin(name))
                .or_else(|| self.env.model(name))
        }
    }

    fn lookup_in_builtin(&self, name: &str) -> Option<DefId> {
        self.builtin.and_then(|builtin| self.element(builtin, name))
    }

    /// Enclosing scopes from the parent of `source` up to its model
    fn lookup_in_scopes(&self, source: DefId, name: &str) -> Option<DefId> {
        std::iter::successors(self.env.parent(source), |scope| self.env.parent(*scope))
            .find_map(|scope| self.element(scope, name))
    }

    fn lookup_in_unqualified_imports(&self, source: DefId, name: &str) -> Option<DefId> {
        let model = self.env.model_of(source);
        let DefData::Model(data) = &self.env.definition(model).data else {
            return None;
        };
        let file = self.env.file(model.file);
        data.imports
            .iter()
            .filter(|import| import.unqualified)
            .filter_map(|import| file.reference(import.model).path.first())
            .filter_map(|imported| self.env.model(imported))
            .find_map(|imported| self.element(imported, name))
    }

    /// A child of `scope` that may start a path
    fn element(&self, scope: DefId, name: &str) -> Option<DefId> {
        self.env
            .child(scope, name)
            .filter(|child| self.env.kind(*child).is_element())
    }
}
