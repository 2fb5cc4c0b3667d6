use rstest::rstest;

use crate::base::Position;
use crate::hir::{Environment, ResolveOptions, resolve_environment};
use crate::ide::{collect_references, goto_definition};
use crate::project::InMemoryModelProvider;
use tokio_util::sync::CancellationToken;

const MAIN: &str = "INTERLIS 2.4;
MODEL Main =
  IMPORTS Base;
  TOPIC T =
    OID AS INTERLIS.UUIDOID;
    CLASS Parcel EXTENDS Base.Feature =
      owner: REFERENCE TO Person;
      kind: Missing;
    END Parcel;
    CLASS Person =
    END Person;
  END T;
END Main.
";

const BASE: &str = "INTERLIS 2.4;
MODEL Base =
  CLASS Feature =
  END Feature;
END Base.
";

async fn resolved() -> Environment {
    let mut env = Environment::new();
    env.add_source(MAIN, Some("main.ili"));
    env.add_source(BASE, Some("base.ili"));
    let resolution = resolve_environment(
        &mut env,
        &InMemoryModelProvider::default(),
        &ResolveOptions::default(),
        &CancellationToken::new(),
    )
    .await;
    // `Missing` stays unresolved
    assert_eq!(resolution.diagnostics.len(), 1);
    env
}

#[tokio::test]
async fn test_collect_references_lists_resolved_only() {
    let env = resolved().await;
    let names: Vec<_> = collect_references(&env, "main.ili")
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(
        names,
        vec!["Base", "INTERLIS.UUIDOID", "Base.Feature", "Main.T.Person"]
    );
    assert!(collect_references(&env, "unknown.ili").is_empty());
}

#[tokio::test]
async fn test_target_carries_uri_and_name_span() {
    let env = resolved().await;
    let feature = collect_references(&env, "main.ili")
        .into_iter()
        .find(|r| r.name == "Base.Feature")
        .unwrap();
    assert_eq!(feature.target_uri.as_deref(), Some("base.ili"));
    assert_eq!(feature.target_name_span.start, Position::new(2, 8));
    assert_eq!(feature.target_name_span.end, Position::new(2, 15));
}

#[rstest]
#[case::start_of_path(Position::new(5, 25), Some("Base.Feature"))]
#[case::end_of_path(Position::new(5, 37), Some("Base.Feature"))]
#[case::reference_target(Position::new(6, 29), Some("Main.T.Person"))]
#[case::builtin_target(Position::new(4, 20), None)]
#[case::unresolved(Position::new(7, 14), None)]
#[case::whitespace(Position::new(9, 0), None)]
#[tokio::test]
async fn test_goto_definition(#[case] position: Position, #[case] expected: Option<&str>) {
    let env = resolved().await;
    let targets = goto_definition(&env, "main.ili", position);
    assert_eq!(targets.first().map(|t| t.name.as_str()), expected);
}

#[test]
fn test_unbound_environment_has_no_targets() {
    let mut env = Environment::new();
    env.add_source(MAIN, Some("main.ili"));
    env.add_source(BASE, Some("base.ili"));
    assert!(collect_references(&env, "main.ili").is_empty());
    assert!(goto_definition(&env, "main.ili", Position::new(5, 25)).is_empty());
}
