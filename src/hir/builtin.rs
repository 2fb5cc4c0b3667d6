//! The built-in `INTERLIS` model.
//!
//! Every environment contains it as its first file. It supplies the base
//! units and domains user models refer to as `INTERLIS.xxx` (or unqualified,
//! since it is searched like an `UNQUALIFIED` import).

use super::environment::AstFile;
use super::lower::build;
use crate::parser::parse;

/// Source of the built-in model
pub const BUILTIN_SOURCE: &str = r#"INTERLIS 2.4;

TYPE MODEL INTERLIS (en) AT "https://www.interlis.ch" VERSION "2024-04-18" =

  UNIT
    METER [m];
    KILOGRAM [kg];
    SECOND [s];
    AMPERE [A];
    DEGREE_KELVIN [K];
    MOLE [mol];
    CANDELA [cd];
    RADIAN [rad];

  DOMAIN
    BOOLEAN = BOOLEAN;
    HALIGNMENT = (Left, Center, Right);
    VALIGNMENT = (Top, Cap, Half, Base, Bottom);
    NAME = TEXT*255;
    URI = TEXT*1023;
    UUIDOID = OID TEXT*36;
    STANDARDOID = OID TEXT*16;
    I32OID = OID 0 .. 2147483647;

END INTERLIS.
"#;

/// The built-in model as an AST file without a URI
pub(crate) fn builtin_file() -> AstFile {
    build(&parse(BUILTIN_SOURCE), None)
}
