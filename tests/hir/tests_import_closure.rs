//! Import closure through model providers.

use interlis::hir::{ResolveOptions, ResolveOutcome, Severity, codes};
use interlis::project::{InMemoryModelProvider, RepositoryModel};
use interlis::{Environment, resolve_environment};
use tokio_util::sync::CancellationToken;

use crate::helpers::providers::{
    FailingProvider, RecordingProvider, repository_model, repository_model_at,
};
use crate::helpers::resolution::{
    assert_all_bound, messages, resolve_sources, resolve_with, target_of, unresolved,
};

const M_IMPORTS_N: &str = "INTERLIS 2.4;
MODEL M =
  IMPORTS N;
  CLASS A EXTENDS N.Base =
    code: N.Code;
  END A;
END M.
";

const N: &str = "INTERLIS 2.4;
MODEL N =
  DOMAIN Code = TEXT*4;
  CLASS Base (ABSTRACT) =
  END Base;
END N.
";

#[tokio::test]
async fn test_single_match_is_merged_and_bound() {
    let provider = RecordingProvider::new(vec![repository_model("N", N)]);
    let (env, resolution) = resolve_sources(&[("m.ili", M_IMPORTS_N)], &provider).await;

    assert_eq!(resolution.outcome, ResolveOutcome::Completed);
    assert!(resolution.diagnostics.is_empty(), "{:?}", messages(&resolution.diagnostics));
    assert!(env.contains_model("M"));
    assert!(env.contains_model("N"));
    assert_eq!(target_of(&env, "N").as_deref(), Some("N"));
    assert_eq!(target_of(&env, "N.Base").as_deref(), Some("N.Base"));
    assert_eq!(target_of(&env, "N.Code").as_deref(), Some("N.Code"));
    assert_eq!(
        provider.queries(),
        vec![("N".to_string(), Some("ili2_4".to_string()))]
    );
}

#[tokio::test]
async fn test_missing_import_is_reported_once() {
    let source = "INTERLIS 2.4;
MODEL M =
  IMPORTS Missing;
  TOPIC T =
    CLASS A = END A;
    CLASS B EXTENDS A = END B;
  END T;
END M.
";
    let (env, resolution) =
        resolve_sources(&[("m.ili", source)], &InMemoryModelProvider::default()).await;

    assert_eq!(resolution.outcome, ResolveOutcome::Completed);
    assert_eq!(resolution.diagnostics.len(), 1);
    let diagnostic = &resolution.diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.code.as_deref(), Some(codes::MODEL_NOT_FOUND));
    assert!(diagnostic.message.contains("Missing"));
    assert_eq!(diagnostic.span.start.line, 2);

    // The model's own references still resolve
    assert_eq!(target_of(&env, "A").as_deref(), Some("M.T.A"));
    assert_eq!(unresolved(&env), vec!["Missing"]);
    assert_all_bound(&env);
}

#[tokio::test]
async fn test_ambiguous_model_uses_first_match() {
    let provider = InMemoryModelProvider::new(vec![
        repository_model_at(
            "Units",
            "repo://first/Units.ili",
            "INTERLIS 2.4; MODEL Units = UNIT Meter [mtr]; END Units.",
        ),
        repository_model_at(
            "Units",
            "repo://second/Units.ili",
            "INTERLIS 2.4; MODEL Units = UNIT Foot [ft]; END Units.",
        ),
    ]);
    let source = "INTERLIS 2.4; MODEL M = IMPORTS Units; DOMAIN D = 0 .. 10 [Units.mtr]; END M.";
    let (env, resolution) = resolve_sources(&[("m.ili", source)], &provider).await;

    assert_eq!(resolution.diagnostics.len(), 1);
    let diagnostic = &resolution.diagnostics[0];
    assert_eq!(diagnostic.code.as_deref(), Some(codes::AMBIGUOUS_MODEL));
    assert!(diagnostic.message.contains("repo://first/Units.ili"));
    assert!(diagnostic.message.contains("repo://second/Units.ili"));

    let units = env.model("Units").unwrap();
    assert_eq!(
        env.uri_of(units).map(|u| u.as_str()),
        Some("repo://first/Units.ili")
    );
    assert_eq!(target_of(&env, "Units.mtr").as_deref(), Some("Units.Meter"));
}

#[tokio::test]
async fn test_transitive_closure_queries_each_name_once() {
    let provider = RecordingProvider::new(vec![
        repository_model("B", "INTERLIS 2.4; MODEL B = IMPORTS C, D; END B."),
        repository_model("C", "INTERLIS 2.4; MODEL C = IMPORTS D, Gone; END C."),
        repository_model("D", "INTERLIS 2.4; MODEL D = IMPORTS B; END D."),
    ]);
    let sources = [
        ("a.ili", "INTERLIS 2.4; MODEL A = IMPORTS B, Gone; END A."),
        ("e.ili", "INTERLIS 2.4; MODEL E = IMPORTS C; END E."),
    ];
    let (env, resolution) = resolve_sources(&sources, &provider).await;

    for name in ["A", "B", "C", "D", "E"] {
        assert!(env.contains_model(name), "{name} missing");
    }
    let mut queried: Vec<_> = provider.queries().into_iter().map(|(name, _)| name).collect();
    queried.sort();
    assert_eq!(queried, vec!["B", "C", "D", "Gone"]);

    // Both `Gone` imports are unresolved, the first site is reported
    assert_eq!(resolution.diagnostics.len(), 1);
    assert_eq!(resolution.diagnostics[0].uri.as_deref(), Some("a.ili"));
    assert_eq!(unresolved(&env), vec!["Gone", "Gone"]);
}

#[tokio::test]
async fn test_version_mismatch_rejects_import() {
    let provider = InMemoryModelProvider::new(vec![RepositoryModel {
        name: "Old".into(),
        schema_language: "ili2_3".into(),
        uri: "repo://Old.ili".into(),
        content: "INTERLIS 2.3; MODEL Old = CLASS X = END X; END Old.".to_string(),
    }]);
    let source = "INTERLIS 2.4; MODEL M = IMPORTS Old; CLASS A EXTENDS Old.X = END A; END M.";
    let options = ResolveOptions {
        // Let the 2.3 file through the repository filter
        version_filter_override: Some("ili2_3".to_string()),
    };
    let (env, resolution) = resolve_with(&[("m.ili", source)], &provider, &options).await;

    assert!(!env.contains_model("Old"));
    let found: Vec<_> = resolution
        .diagnostics
        .iter()
        .map(|d| d.code.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(found, vec![codes::VERSION_MISMATCH, codes::UNRESOLVED_REFERENCE]);
    assert!(resolution.diagnostics[0].message.contains("2.3"));
    assert_eq!(unresolved(&env), vec!["Old", "Old.X"]);
}

#[tokio::test]
async fn test_version_filter_follows_environment() {
    let provider = RecordingProvider::new(Vec::new());
    let source = "INTERLIS 2.3; MODEL M = IMPORTS X; END M.";
    resolve_sources(&[("m.ili", source)], &provider).await;
    assert_eq!(
        provider.queries(),
        vec![("X".to_string(), Some("ili2_3".to_string()))]
    );
}

#[tokio::test]
async fn test_provider_failure_counts_as_not_found() {
    let source = "INTERLIS 2.4; MODEL M = IMPORTS Remote; CLASS A = END A; END M.";
    let (env, resolution) = resolve_sources(&[("m.ili", source)], &FailingProvider).await;

    assert_eq!(resolution.outcome, ResolveOutcome::Completed);
    assert_eq!(resolution.diagnostics.len(), 1);
    assert_eq!(
        resolution.diagnostics[0].code.as_deref(),
        Some(codes::MODEL_NOT_FOUND)
    );
    assert_all_bound(&env);
}

#[tokio::test]
async fn test_cancellation_stops_before_fetch() {
    let provider = RecordingProvider::new(vec![repository_model("N", N)]);
    let mut env = Environment::new();
    env.add_source(M_IMPORTS_N, Some("m.ili"));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let resolution =
        resolve_environment(&mut env, &provider, &ResolveOptions::default(), &cancel).await;

    assert_eq!(resolution.outcome, ResolveOutcome::Cancelled);
    assert!(resolution.is_cancelled());
    assert!(provider.queries().is_empty());
    assert!(resolution.diagnostics.is_empty());
}

#[tokio::test]
async fn test_cancellation_before_binding() {
    let mut env = Environment::new();
    env.add_source("INTERLIS 2.4; MODEL M = CLASS A EXTENDS B = END A; END M.", Some("m.ili"));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let resolution = resolve_environment(
        &mut env,
        &InMemoryModelProvider::default(),
        &ResolveOptions::default(),
        &cancel,
    )
    .await;

    assert_eq!(resolution.outcome, ResolveOutcome::Cancelled);
    assert!(resolution.diagnostics.is_empty());
}
