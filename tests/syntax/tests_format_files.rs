//! Formatting files on disk with their editor configuration.

use std::fs;

use interlis::hir::build;
use interlis::{FormatOptions, SyntaxFile, format_source, parse};
use rstest::rstest;
use tokio_util::sync::CancellationToken;

const SOURCE: &str = "INTERLIS 2.4;
MODEL Parcels (en) AT \"https://example.org\" VERSION \"1\" =
IMPORTS UNQUALIFIED Units;
!! land registry



/* parcels */
TOPIC Registry =
CLASS Parcel =
Number : MANDATORY 0 .. 99999 ;
Kind : (private, public) ;
END Parcel ;
CLASS Owner = END Owner ;
ASSOCIATION Owns = owner -- {1} Owner ; parcel -- {0..*} Parcel ; END Owns ;
END Registry ;
END Parcels .
";

fn format_with(source: &str, options: &FormatOptions) -> String {
    format_source(source, options, &CancellationToken::new()).unwrap()
}

#[test]
fn test_editorconfig_controls_indentation() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".editorconfig"),
        "root = true\n\n[*.ili]\nindent_style = space\nindent_size = 4\n",
    )
    .unwrap();
    let file = dir.path().join("Parcels.ili");
    fs::write(&file, SOURCE).unwrap();

    let options = FormatOptions::from_editorconfig(&file).unwrap();
    assert_eq!(options.tab_size, 4);

    let text = fs::read_to_string(&file).unwrap();
    let formatted = format_with(&text, &options);
    assert!(formatted.contains("\n    TOPIC Registry =\n"), "{formatted}");
    assert!(formatted.contains("\n        CLASS Owner = END Owner;\n"), "{formatted}");
    assert!(formatted.contains("\n            Number: MANDATORY 0 .. 99999;\n"), "{formatted}");
}

#[test]
fn test_blank_lines_before_comment_are_clamped() {
    let formatted = format_with(SOURCE, &FormatOptions::default());
    assert!(
        formatted.contains("  !! land registry\n\n  /* parcels */\n"),
        "{formatted}"
    );
    assert!(!formatted.contains("\n\n\n"), "{formatted}");
}

#[test]
fn test_formatted_file_declares_same_definitions() {
    let formatted = format_with(SOURCE, &FormatOptions::default());

    let before = build(&parse(SOURCE), Some("before.ili"));
    let after = build(&parse(&formatted), Some("after.ili"));
    let names = |file: &interlis::hir::AstFile| -> Vec<String> {
        file.definitions
            .iter()
            .map(|d| d.name.to_string())
            .collect()
    };
    assert_eq!(names(&before), names(&after));
    assert_eq!(before.references.len(), after.references.len());

    let syntax = SyntaxFile::new(&formatted);
    assert!(!syntax.has_errors());
    assert_eq!(syntax.model_names(), vec!["Parcels"]);
}

#[rstest]
#[case::defaults(FormatOptions::default())]
#[case::tabs(FormatOptions { insert_spaces: false, ..FormatOptions::default() })]
#[case::wide(FormatOptions { tab_size: 8, ..FormatOptions::default() })]
fn test_formatting_twice_changes_nothing(#[case] options: FormatOptions) {
    let once = format_with(SOURCE, &options);
    let twice = format_with(&once, &options);
    assert_eq!(once, twice);
}
