//! Resolution against models stored in a directory tree.

use std::fs;
use std::path::Path;

use interlis::Position;
use interlis::hir::codes;
use interlis::ide::goto_definition;
use interlis::project::DirectoryModelProvider;

use crate::helpers::resolution::{assert_all_bound, messages, resolve_sources, target_of};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const MAIN: &str = "INTERLIS 2.4;
MODEL Main =
  IMPORTS Roads;
  TOPIC Network =
    CLASS Junction EXTENDS Roads.Base.Segment =
    END Junction;
  END Network;
END Main.
";

const ROADS: &str = "INTERLIS 2.4;
MODEL Roads =
  IMPORTS Geometry;
  TOPIC Base =
    CLASS Segment =
      width: Geometry.Width;
    END Segment;
  END Base;
END Roads.
";

const GEOMETRY: &str = "INTERLIS 2.4;
MODEL Geometry =
  DOMAIN Width = 0.0 .. 100.0;
END Geometry.
";

#[tokio::test]
async fn test_imports_resolved_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "roads/Roads.ili", ROADS);
    write(dir.path(), "shared/Geometry.ili", GEOMETRY);

    let provider = DirectoryModelProvider::scan(dir.path()).unwrap();
    let (env, resolution) = resolve_sources(&[("main.ili", MAIN)], &provider).await;

    assert!(resolution.diagnostics.is_empty(), "{:?}", messages(&resolution.diagnostics));
    assert_all_bound(&env);
    assert!(env.contains_model("Roads"));
    assert!(env.contains_model("Geometry"));
    assert_eq!(
        target_of(&env, "Roads.Base.Segment").as_deref(),
        Some("Roads.Base.Segment")
    );
    assert_eq!(target_of(&env, "Geometry.Width").as_deref(), Some("Geometry.Width"));
}

#[tokio::test]
async fn test_goto_lands_in_repository_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Roads.ili", ROADS);
    write(dir.path(), "Geometry.ili", GEOMETRY);

    let provider = DirectoryModelProvider::scan(dir.path()).unwrap();
    let (env, _) = resolve_sources(&[("main.ili", MAIN)], &provider).await;

    // `Roads.Base.Segment` on line 5
    let found = goto_definition(&env, "main.ili", Position::new(4, 30));
    assert_eq!(found.len(), 1);
    let target_uri = found[0].target_uri.as_deref().unwrap();
    assert!(target_uri.ends_with("Roads.ili"), "{target_uri}");
    assert_eq!(found[0].target_name_span.start, Position::new(4, 10));
}

#[tokio::test]
async fn test_missing_file_reported_as_missing_model() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Roads.ili", ROADS);

    let provider = DirectoryModelProvider::scan(dir.path()).unwrap();
    let (env, resolution) = resolve_sources(&[("main.ili", MAIN)], &provider).await;

    let found: Vec<_> = resolution
        .diagnostics
        .iter()
        .filter_map(|d| d.code.as_deref())
        .collect();
    // The import and the attribute type that uses it, both in Roads.ili
    assert_eq!(
        found,
        vec![codes::MODEL_NOT_FOUND, codes::UNRESOLVED_REFERENCE],
        "{:?}",
        messages(&resolution.diagnostics)
    );
    let roads_uri = env.uri_of(env.model("Roads").unwrap()).cloned();
    assert!(resolution.diagnostics.iter().all(|d| d.uri == roads_uri));
    assert_eq!(target_of(&env, "Roads.Base.Segment").as_deref(), Some("Roads.Base.Segment"));
}

#[tokio::test]
async fn test_duplicate_files_use_first_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a/Geometry.ili", GEOMETRY);
    write(dir.path(), "b/Geometry.ili", GEOMETRY);
    write(dir.path(), "Roads.ili", ROADS);

    let provider = DirectoryModelProvider::scan(dir.path()).unwrap();
    let (env, resolution) = resolve_sources(&[("main.ili", MAIN)], &provider).await;

    let found: Vec<_> = resolution
        .diagnostics
        .iter()
        .filter_map(|d| d.code.as_deref())
        .collect();
    assert_eq!(found, vec![codes::AMBIGUOUS_MODEL]);
    let geometry = env.model("Geometry").unwrap();
    let uri = env.uri_of(geometry).unwrap();
    assert!(
        Path::new(uri.as_str()).parent().unwrap().ends_with("a"),
        "{uri}"
    );
    assert_all_bound(&env);
}
