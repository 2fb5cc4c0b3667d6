//! Import closure: fetching every transitively imported model.
//!
//! An iterative fixed point. Each round collects the imported model names
//! the environment lacks, asks the provider for each of them once and merges
//! what it returns. The loop ends when a round discovers no new name.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::definitions::DefData;
use super::diagnostics::DiagnosticCollector;
use super::environment::Environment;
use super::lower::build;
use crate::base::Span;
use crate::parser::parse;
use crate::project::ModelProvider;

/// Where a missing model was first imported
#[derive(Debug, Clone)]
struct ImportSite {
    uri: Option<SmolStr>,
    span: Span,
}

/// Names reported during the closure, so binding can skip them
pub(super) type ReportedImports = FxHashSet<SmolStr>;

/// Fetch and merge all missing imports.
///
/// Returns `None` when `cancel` fired before a fetch; the environment is
/// then incomplete.
pub(super) async fn close_imports<P>(
    env: &mut Environment,
    provider: &P,
    version_filter: Option<&str>,
    cancel: &CancellationToken,
    diagnostics: &mut DiagnosticCollector,
) -> Option<ReportedImports>
where
    P: ModelProvider + ?Sized,
{
    let mut processed: FxHashSet<SmolStr> = FxHashSet::default();
    let mut reported = ReportedImports::default();
    let mut round = 0;

    loop {
        let mut pending: Vec<(SmolStr, ImportSite)> = missing_imports(env)
            .into_iter()
            .filter(|(name, _)| !processed.contains(name))
            .collect();
        if pending.is_empty() {
            break;
        }
        pending.sort_by(|a, b| a.0.cmp(&b.0));
        round += 1;
        trace!(round, pending = pending.len(), "import closure round");

        for (name, site) in pending {
            processed.insert(name.clone());
            if cancel.is_cancelled() {
                debug!("import closure cancelled");
                return None;
            }
            if env.contains_model(&name) {
                // Arrived with a file fetched earlier in this round
                continue;
            }

            let candidates = match provider.search_by_name(&name, version_filter).await {
                Ok(candidates) => candidates,
                Err(err) => {
                    error!(model = %name, error = %err, "model provider failed");
                    Vec::new()
                }
            };

            let Some(chosen) = candidates.first() else {
                diagnostics.model_not_found(site.uri, site.span, &name);
                reported.insert(name);
                continue;
            };
            if candidates.len() > 1 {
                let uris: Vec<SmolStr> = candidates.iter().map(|c| c.uri.clone()).collect();
                diagnostics.ambiguous_model(site.uri.clone(), site.span, &name, &uris);
            }

            let file = build(&parse(&chosen.content), Some(&chosen.uri));
            if file.schema_version.as_deref() != env.version() {
                error!(
                    model = %name,
                    uri = %chosen.uri,
                    found = ?file.schema_version,
                    expected = ?env.version(),
                    "imported model has another language version"
                );
                diagnostics.version_mismatch(
                    site.uri,
                    site.span,
                    &name,
                    file.schema_version.as_deref(),
                    env.version(),
                );
                reported.insert(name);
                continue;
            }

            debug!(model = %name, uri = %chosen.uri, "merged imported model");
            env.add_imported(file);
        }
    }

    Some(reported)
}

/// First segments of all imports naming a model the environment lacks,
/// each with the location of its first occurrence
fn missing_imports(env: &Environment) -> IndexMap<SmolStr, ImportSite> {
    let mut missing = IndexMap::new();
    for (_, model) in env.models() {
        let DefData::Model(data) = &env.definition(model).data else {
            continue;
        };
        let file = env.file(model.file);
        for import in &data.imports {
            let reference = file.reference(import.model);
            let Some(name) = reference.path.first() else {
                continue;
            };
            if env.contains_model(name) {
                continue;
            }
            missing.entry(name.clone()).or_insert_with(|| ImportSite {
                uri: file.uri.clone(),
                span: reference.span,
            });
        }
    }
    missing
}
