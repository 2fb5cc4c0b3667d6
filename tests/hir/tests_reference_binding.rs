//! Reference binding over complete environments.

use interlis::hir::{DefId, FileId, RefId, RefState, ResolveOptions, codes};
use interlis::project::InMemoryModelProvider;
use interlis::resolve_environment;
use rstest::rstest;
use tokio_util::sync::CancellationToken;

use crate::helpers::providers::{RecordingProvider, repository_model};
use crate::helpers::resolution::{assert_all_bound, messages, resolve_sources, target_of};

#[tokio::test]
async fn test_empty_class_has_no_unresolved_references() {
    let source = "INTERLIS 2.4;\nMODEL M =\n  CLASS A = END A;\nEND M.\n";
    let (env, resolution) =
        resolve_sources(&[("m.ili", source)], &InMemoryModelProvider::default()).await;
    assert!(resolution.diagnostics.is_empty());
    assert_eq!(env.references().count(), 0);
}

#[tokio::test]
async fn test_role_targets_later_class() {
    let source = "INTERLIS 2.4;
MODEL M =
  TOPIC T =
    ASSOCIATION Ownership =
      owner -- {1} Person;
      parcel -<> {0..*} Parcel;
    END Ownership;
    CLASS Person = END Person;
    CLASS Parcel = END Parcel;
  END T;
END M.
";
    let (env, resolution) =
        resolve_sources(&[("m.ili", source)], &InMemoryModelProvider::default()).await;
    assert!(resolution.diagnostics.is_empty(), "{:?}", messages(&resolution.diagnostics));
    assert_eq!(target_of(&env, "Person").as_deref(), Some("M.T.Person"));
    assert_eq!(target_of(&env, "Parcel").as_deref(), Some("M.T.Parcel"));
}

#[tokio::test]
async fn test_forward_references_across_topics() {
    let source = "INTERLIS 2.4;
MODEL M =
  TOPIC Early =
    DEPENDS ON M.Late;
    CLASS A =
      late: REFERENCE TO (EXTERNAL) M.Late.B;
      kind: M.Kind;
    END A;
  END Early;
  TOPIC Late =
    CLASS B = END B;
  END Late;
  DOMAIN Kind = (x, y);
END M.
";
    let (env, resolution) =
        resolve_sources(&[("m.ili", source)], &InMemoryModelProvider::default()).await;
    assert!(resolution.diagnostics.is_empty(), "{:?}", messages(&resolution.diagnostics));
    assert_eq!(target_of(&env, "M.Late").as_deref(), Some("M.Late"));
    assert_eq!(target_of(&env, "M.Late.B").as_deref(), Some("M.Late.B"));
    assert_eq!(target_of(&env, "M.Kind").as_deref(), Some("M.Kind"));
}

#[tokio::test]
async fn test_topic_extension_across_models() {
    let base = "INTERLIS 2.4;
MODEL Base =
  TOPIC Core =
    CLASS Feature (ABSTRACT) = END Feature;
  END Core;
END Base.
";
    let derived = "INTERLIS 2.4;
MODEL Derived =
  IMPORTS Base;
  TOPIC Core EXTENDS Base.Core =
    CLASS Road EXTENDS Base.Core.Feature = END Road;
  END Core;
END Derived.
";
    let provider = InMemoryModelProvider::new(vec![repository_model("Base", base)]);
    let (env, resolution) = resolve_sources(&[("derived.ili", derived)], &provider).await;
    assert!(resolution.diagnostics.is_empty(), "{:?}", messages(&resolution.diagnostics));
    assert_eq!(target_of(&env, "Base.Core").as_deref(), Some("Base.Core"));
    assert_eq!(
        target_of(&env, "Base.Core.Feature").as_deref(),
        Some("Base.Core.Feature")
    );
}

#[rstest]
#[case::class_as_domain("DOMAIN D EXTENDS A = TEXT;")]
#[case::domain_as_class("CLASS C EXTENDS Code = END C;")]
#[case::unit_as_type("STRUCTURE S = x: Meter; END S;")]
#[case::model_as_topic("TOPIC T EXTENDS M = END T;")]
#[tokio::test]
async fn test_wrong_kind(#[case] definition: &str) {
    let source = format!(
        "INTERLIS 2.4; MODEL M = CLASS A = END A; DOMAIN Code = TEXT*3; UNIT Meter [mm]; {definition} END M."
    );
    let (env, resolution) =
        resolve_sources(&[("m.ili", source.as_str())], &InMemoryModelProvider::default()).await;
    assert_eq!(resolution.diagnostics.len(), 1, "{:?}", messages(&resolution.diagnostics));
    assert_eq!(
        resolution.diagnostics[0].code.as_deref(),
        Some(codes::WRONG_KIND)
    );
    assert!(
        env.references()
            .all(|(_, r)| r.state == RefState::Unresolved)
    );
}

#[tokio::test]
async fn test_resolution_is_independent_of_import_order() {
    let a = "INTERLIS 2.4; MODEL A = DOMAIN Code = TEXT*2; CLASS Item = END Item; END A.";
    let b = "INTERLIS 2.4; MODEL B = DOMAIN Code = TEXT*8; END B.";
    let user = |imports: &str| {
        format!(
            "INTERLIS 2.4;
MODEL M =
  IMPORTS {imports};
  CLASS X =
    first: A.Code;
    second: B.Code;
    item: REFERENCE TO A.Item;
    missing: C.Code;
  END X;
END M.
"
        )
    };
    let provider = InMemoryModelProvider::new(vec![
        repository_model("A", a),
        repository_model("B", b),
    ]);

    let forward_source = user("A, B");
    let backward_source = user("B, A");
    let (forward_env, forward) =
        resolve_sources(&[("m.ili", forward_source.as_str())], &provider).await;
    let (backward_env, backward) =
        resolve_sources(&[("m.ili", backward_source.as_str())], &provider).await;

    let targets = |env: &interlis::Environment| -> Vec<(String, Option<String>)> {
        let mut targets: Vec<_> = env
            .references()
            .filter(|(_, r)| r.path.len() > 1)
            .map(|(_, r)| (r.text(), r.target().map(|t| env.qualified_name(t))))
            .collect();
        targets.sort();
        targets
    };
    assert_eq!(targets(&forward_env), targets(&backward_env));
    assert_eq!(messages(&forward.diagnostics), messages(&backward.diagnostics));
    assert_eq!(forward.diagnostics.len(), 1);
    assert_all_bound(&forward_env);
    assert_all_bound(&backward_env);
}

#[tokio::test]
async fn test_builtin_references_are_never_reported() {
    let source = "INTERLIS 2.4;
MODEL M =
  TOPIC T =
    BASKET OID AS INTERLIS.UUIDOID;
    OID AS INTERLIS.STANDARDOID;
    CLASS A =
      flag: INTERLIS.BOOLEAN;
      name: NAME;
      align: INTERLIS.HALIGNMENT;
      length: 0 .. 100 [INTERLIS.m];
    END A;
  END T;
END M.
";
    let (env, resolution) =
        resolve_sources(&[("m.ili", source)], &InMemoryModelProvider::default()).await;
    assert!(resolution.diagnostics.is_empty(), "{:?}", messages(&resolution.diagnostics));
    assert_eq!(
        target_of(&env, "INTERLIS.m").as_deref(),
        Some("INTERLIS.METER")
    );
    // The built-in model itself contributes no references
    assert!(env.references().all(|(id, _)| id.file != FileId::BUILTIN));
}

#[tokio::test]
async fn test_import_closure_only_grows_when_resolving_again() {
    let base = "INTERLIS 2.4;\nMODEL Base =\n  DOMAIN Code = TEXT*4;\nEND Base.\n";
    let extra = "INTERLIS 2.4;
MODEL Extra =
  IMPORTS Base;
  DOMAIN Other = Base.Code;
END Extra.
";
    let provider = RecordingProvider::new(vec![
        repository_model("Base", base),
        repository_model("Extra", extra),
    ]);
    let first = "INTERLIS 2.4;
MODEL M =
  IMPORTS Base;
  CLASS A =
    code: Base.Code;
  END A;
END M.
";
    let (mut env, resolution) = resolve_sources(&[("m.ili", first)], &provider).await;
    assert!(resolution.diagnostics.is_empty(), "{:?}", messages(&resolution.diagnostics));
    let models: Vec<(String, DefId)> = env.models().map(|(n, id)| (n.to_string(), id)).collect();
    let bindings: Vec<(RefId, Option<DefId>)> =
        env.references().map(|(id, r)| (id, r.target())).collect();

    env.add_source(
        "INTERLIS 2.4;\nMODEL N =\n  IMPORTS Extra;\n  DOMAIN Local = Extra.Other;\nEND N.\n",
        Some("n.ili"),
    );
    let resolution = resolve_environment(
        &mut env,
        &provider,
        &ResolveOptions::default(),
        &CancellationToken::new(),
    )
    .await;
    assert!(resolution.diagnostics.is_empty(), "{:?}", messages(&resolution.diagnostics));

    for (name, id) in &models {
        assert_eq!(env.model(name), Some(*id), "model {name} moved");
    }
    for (id, target) in &bindings {
        assert_eq!(env.reference(*id).target(), *target);
    }
    assert_eq!(target_of(&env, "Extra.Other").as_deref(), Some("Extra.Other"));
    let base_queries = provider.queries().iter().filter(|(name, _)| name == "Base").count();
    assert_eq!(base_queries, 1);
}
