//! Environment setup and assertions for resolution tests.

use interlis::hir::{Diagnostic, Environment, RefState, Resolution, ResolveOptions};
use interlis::project::ModelProvider;
use interlis::resolve_environment;
use tokio_util::sync::CancellationToken;

/// Add `(uri, source)` pairs to a fresh environment and resolve it
pub async fn resolve_sources<P>(sources: &[(&str, &str)], provider: &P) -> (Environment, Resolution)
where
    P: ModelProvider + ?Sized,
{
    resolve_with(sources, provider, &ResolveOptions::default()).await
}

pub async fn resolve_with<P>(
    sources: &[(&str, &str)],
    provider: &P,
    options: &ResolveOptions,
) -> (Environment, Resolution)
where
    P: ModelProvider + ?Sized,
{
    let mut env = Environment::new();
    for (uri, source) in sources {
        env.add_source(source, Some(uri));
    }
    let resolution = resolve_environment(&mut env, provider, options, &CancellationToken::new()).await;
    (env, resolution)
}

/// Qualified target of the first reference written as `path`
pub fn target_of(env: &Environment, path: &str) -> Option<String> {
    env.references()
        .find(|(_, r)| r.text() == path)
        .and_then(|(_, r)| r.target())
        .map(|target| env.qualified_name(target))
}

/// Textual paths of all unresolved references
pub fn unresolved(env: &Environment) -> Vec<String> {
    env.references()
        .filter(|(_, r)| r.state == RefState::Unresolved)
        .map(|(_, r)| r.text())
        .collect()
}

/// Assert that every reachable reference was bound
pub fn assert_all_bound(env: &Environment) {
    let unbound: Vec<_> = env
        .references()
        .filter(|(_, r)| r.state == RefState::Unbound)
        .map(|(_, r)| r.text())
        .collect();
    assert!(unbound.is_empty(), "unbound references: {unbound:?}");
}

/// Messages of all diagnostics, for readable assertion failures
pub fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.message.to_string()).collect()
}
