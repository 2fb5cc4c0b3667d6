//! Building the AST model from a parsed file.
//!
//! One walk over the typed CST wrappers produces the definition and
//! reference arenas of a file. No lookups happen here: every name or path
//! the grammar allows becomes an `Unbound` [`Reference`] that resolution
//! binds later. Error nodes and definitions without a name are skipped.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use super::definitions::{
    AssociationData, AttributeData, ClassData, DefData, Definition, DomainData, Import, ModelData,
    Modifiers, TopicData, UnitData,
};
use super::environment::AstFile;
use super::ids::{LocalDefId, LocalRefId};
use super::reference::{Expected, Reference};
use super::types::{BlackboxKind, Cardinality, EnumNode, RoleKind, TextKind, TypeDef};
use crate::base::{LineIndex, Span, TextRange};
use crate::parser::{
    self, AstNode, EnumType, Member, Parse, Path, Properties, RoleOperator, SourceFile,
    SyntaxKind, SyntaxNode, SyntaxToken, Type,
};

/// Build the AST model of one parsed file.
///
/// `uri` is recorded as the `source_uri` of every model of the file.
pub fn build(parse: &Parse, uri: Option<&str>) -> AstFile {
    let root = parse.syntax();
    let mut ctx = LoweringContext {
        line_index: LineIndex::new(&root.text().to_string()),
        uri: uri.map(SmolStr::new),
        schema_version: None,
        definitions: Vec::new(),
        references: Vec::new(),
        models: Vec::new(),
    };

    if let Some(file) = SourceFile::cast(root) {
        ctx.schema_version = file.header().and_then(|h| h.version());
        for model in file.models() {
            ctx.lower_model(&model);
        }
    }

    trace!(
        uri = ?ctx.uri,
        definitions = ctx.definitions.len(),
        references = ctx.references.len(),
        "built AST"
    );
    AstFile {
        uri: ctx.uri,
        schema_version: ctx.schema_version,
        definitions: ctx.definitions,
        references: ctx.references,
        models: ctx.models,
    }
}

struct LoweringContext {
    line_index: LineIndex,
    uri: Option<SmolStr>,
    schema_version: Option<SmolStr>,
    definitions: Vec<Definition>,
    references: Vec<Reference>,
    models: Vec<LocalDefId>,
}

/// Name, range and name range of a definition being lowered
struct Header {
    name: SmolStr,
    span: Span,
    name_span: Span,
    meta_attributes: IndexMap<SmolStr, SmolStr>,
}

impl LoweringContext {
    /// Handle the next pushed definition will get
    fn next_id(&self) -> LocalDefId {
        LocalDefId::new(self.definitions.len())
    }

    fn span(&self, range: TextRange) -> Span {
        self.line_index.span(range)
    }

    fn header(&self, node: &SyntaxNode, name: Option<parser::Name>) -> Option<Header> {
        let name = name?;
        let ident = name.ident()?;
        Some(self.header_from_token(node, SmolStr::new(ident.text()), &ident))
    }

    fn header_from_token(&self, node: &SyntaxNode, name: SmolStr, token: &SyntaxToken) -> Header {
        Header {
            name,
            span: self.span(node.text_range()),
            name_span: self.span(token.text_range()),
            meta_attributes: meta_attributes(node),
        }
    }

    fn push(&mut self, header: Header, parent: Option<LocalDefId>, data: DefData) -> LocalDefId {
        let id = self.next_id();
        self.definitions.push(Definition {
            name: header.name.clone(),
            parent,
            span: header.span,
            name_span: header.name_span,
            meta_attributes: header.meta_attributes,
            content: IndexMap::new(),
            data,
        });
        if let Some(parent) = parent {
            // Duplicate names in one scope: the last one wins
            self.definitions[parent.index()]
                .content
                .insert(header.name, id);
        }
        id
    }

    fn reference(&mut self, path: &Path, source: LocalDefId, expected: Expected) -> LocalRefId {
        let id = LocalRefId::new(self.references.len());
        let span = self.span(path.syntax().text_range());
        self.references
            .push(Reference::new(path.segments(), span, source, expected));
        id
    }

    fn optional_reference(
        &mut self,
        path: Option<Path>,
        source: LocalDefId,
        expected: Expected,
    ) -> Option<LocalRefId> {
        path.map(|path| self.reference(&path, source, expected))
    }

    // ------------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------------

    fn lower_model(&mut self, model: &parser::Model) {
        let Some(header) = self.header(model.syntax(), model.name()) else {
            return;
        };
        let id = self.next_id();

        let translation_of = self.optional_reference(model.translation_of(), id, Expected::Model);
        let imports = model
            .imports()
            .filter_map(|item| {
                let path = item.path()?;
                Some(Import {
                    model: self.reference(&path, id, Expected::Model),
                    unqualified: item.is_unqualified(),
                })
            })
            .collect();

        let data = ModelData {
            schema_version: self.schema_version.clone(),
            language: model.language(),
            issuer: model.issuer(),
            version: model.version(),
            translation_of,
            imports,
            source_uri: self.uri.clone(),
        };
        let id = self.push(header, None, DefData::Model(data));
        self.models.push(id);

        for member in model.members() {
            match member {
                Member::Topic(topic) => self.lower_topic(&topic, id),
                other => self.lower_member(other, id),
            }
        }
    }

    fn lower_topic(&mut self, topic: &parser::Topic, parent: LocalDefId) {
        let Some(header) = self.header(topic.syntax(), topic.name()) else {
            return;
        };
        let id = self.next_id();

        let mut data = TopicData {
            modifiers: modifiers(topic.properties()),
            extends: self.optional_reference(topic.extends(), id, Expected::Topic),
            ..TopicData::default()
        };
        for member in topic.members() {
            match member {
                Member::OidDecl(oid) => {
                    let target = self.optional_reference(oid.path(), id, Expected::Domain);
                    if oid.is_basket() {
                        data.basket_oid = target;
                    } else {
                        data.oid = target;
                    }
                }
                Member::DependsOn(depends) => {
                    for path in depends.paths() {
                        let target = self.reference(&path, id, Expected::Topic);
                        data.depends_on.push(target);
                    }
                }
                _ => {}
            }
        }
        let id = self.push(header, Some(parent), DefData::Topic(data));

        for member in topic.members() {
            self.lower_member(member, id);
        }
    }

    /// Members shared by model and topic bodies
    fn lower_member(&mut self, member: Member, parent: LocalDefId) {
        match member {
            Member::UnitSection(section) => {
                for unit in section.units() {
                    self.lower_unit(&unit, parent);
                }
            }
            Member::DomainSection(section) => {
                for domain in section.domains() {
                    self.lower_domain(&domain, parent);
                }
            }
            Member::Class(class) => self.lower_class(&class, parent),
            Member::Association(association) => self.lower_association(&association, parent),
            // Handled by the enclosing container
            Member::Imports(_) | Member::Topic(_) | Member::OidDecl(_) | Member::DependsOn(_) => {}
        }
    }

    // ------------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------------

    fn lower_unit(&mut self, unit: &parser::UnitDef, parent: LocalDefId) {
        let Some(header) = self.header(unit.syntax(), unit.name()) else {
            return;
        };
        let id = self.next_id();
        let short_name = unit.short_name().and_then(|n| n.text());
        let data = UnitData {
            short_name: short_name.clone(),
            modifiers: Modifiers {
                is_abstract: unit.is_abstract(),
                ..Modifiers::default()
            },
            extends: self.optional_reference(unit.extends(), id, Expected::Unit),
        };
        let id = self.push(header, Some(parent), DefData::Unit(data));
        // Units are reachable by their short name as well
        if let Some(short_name) = short_name {
            self.definitions[parent.index()]
                .content
                .insert(short_name, id);
        }
    }

    fn lower_domain(&mut self, domain: &parser::DomainDef, parent: LocalDefId) {
        let Some(header) = self.header(domain.syntax(), domain.name()) else {
            return;
        };
        let id = self.next_id();
        let extends = self.optional_reference(domain.extends(), id, Expected::Domain);
        let ty = domain.ty();
        let data = DomainData {
            ty: self.lower_type(ty.as_ref(), id),
            is_mandatory: domain.is_mandatory(),
            modifiers: modifiers(domain.properties()),
            extends,
        };
        let id = self.push(header, Some(parent), DefData::Domain(data));
        self.lower_enum_values(ty.as_ref(), id);
    }

    fn lower_class(&mut self, class: &parser::Class, parent: LocalDefId) {
        let Some(header) = self.header(class.syntax(), class.name()) else {
            return;
        };
        let id = self.next_id();
        let data = ClassData {
            is_structure: class.is_structure(),
            modifiers: modifiers(class.properties()),
            extends: self.optional_reference(class.extends(), id, Expected::Class),
            oid: self.optional_reference(
                class.oid().and_then(|oid| oid.path()),
                id,
                Expected::Domain,
            ),
        };
        let id = self.push(header, Some(parent), DefData::Class(data));

        for role in class.roles() {
            self.lower_role(&role, id);
        }
        for attribute in class.attributes() {
            self.lower_attribute(&attribute, id);
        }
    }

    fn lower_association(&mut self, association: &parser::Association, parent: LocalDefId) {
        let header = match self.header(association.syntax(), association.name()) {
            Some(header) => header,
            None => {
                // Unnamed associations are named after their roles
                let name: String = association
                    .roles()
                    .filter_map(|role| role.name().and_then(|n| n.text()))
                    .map(|text| text.to_string())
                    .collect();
                let Some(token) = association.syntax().first_token() else {
                    return;
                };
                if name.is_empty() {
                    return;
                }
                self.header_from_token(association.syntax(), SmolStr::new(name), &token)
            }
        };
        let id = self.next_id();
        let data = AssociationData {
            modifiers: modifiers(association.properties()),
            extends: self.optional_reference(association.extends(), id, Expected::Association),
            cardinality: association.cardinality().map(cardinality),
        };
        let id = self.push(header, Some(parent), DefData::Association(data));

        for role in association.roles() {
            self.lower_role(&role, id);
        }
        for attribute in association.attributes() {
            self.lower_attribute(&attribute, id);
        }
    }

    fn lower_role(&mut self, role: &parser::Role, parent: LocalDefId) {
        let Some(header) = self.header(role.syntax(), role.name()) else {
            return;
        };
        let id = self.next_id();
        let kind = match role.operator() {
            Some(RoleOperator::Aggregation) => RoleKind::Aggregation,
            Some(RoleOperator::Composition) => RoleKind::Composition,
            Some(RoleOperator::Association) | None => RoleKind::Association,
        };
        let targets = role
            .targets()
            .map(|path| self.reference(&path, id, Expected::Class))
            .collect();
        let data = AttributeData {
            ty: TypeDef::Role {
                kind,
                targets,
                external: role.is_external(),
            },
            is_mandatory: false,
            cardinality: role.cardinality().map(cardinality),
        };
        self.push(header, Some(parent), DefData::Attribute(data));
    }

    fn lower_attribute(&mut self, attribute: &parser::Attribute, parent: LocalDefId) {
        let Some(header) = self.header(attribute.syntax(), attribute.name()) else {
            return;
        };
        let id = self.next_id();
        let ty = attribute.ty();
        let cardinality = match &ty {
            Some(Type::List(list)) => list.cardinality().map(cardinality),
            _ => None,
        };
        let data = AttributeData {
            ty: self.lower_type(ty.as_ref(), id),
            is_mandatory: attribute.is_mandatory(),
            cardinality,
        };
        let id = self.push(header, Some(parent), DefData::Attribute(data));
        self.lower_enum_values(ty.as_ref(), id);
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    fn lower_type(&mut self, ty: Option<&Type>, source: LocalDefId) -> TypeDef {
        let Some(ty) = ty else {
            return TypeDef::Opaque(String::new());
        };
        match ty {
            Type::Text(text) => TypeDef::Text {
                kind: match text.keyword() {
                    Some(SyntaxKind::MTEXT_KW) => TextKind::MText,
                    Some(SyntaxKind::NAME_KW) => TextKind::Name,
                    Some(SyntaxKind::URI_KW) => TextKind::Uri,
                    _ => TextKind::Text,
                },
                length: text.length(),
            },
            Type::Numeric(numeric) => {
                let (min, max) = numeric.bounds();
                TypeDef::Numeric {
                    min,
                    max,
                    unit: self.optional_reference(numeric.unit(), source, Expected::Unit),
                }
            }
            Type::Boolean(_) => TypeDef::Boolean,
            Type::Enum(values) => TypeDef::Enumeration {
                values: values.elements().filter_map(|e| enum_node(&e)).collect(),
                is_final: values.is_final(),
            },
            Type::Reference(reference) => TypeDef::Reference {
                targets: reference
                    .targets()
                    .map(|path| self.reference(&path, source, Expected::Class))
                    .collect(),
                external: reference.is_external(),
            },
            Type::List(list) => match list.target() {
                Some(path) => TypeDef::Structure {
                    ordered: list.is_ordered(),
                    target: self.reference(&path, source, Expected::Class),
                },
                None => opaque(list.syntax()),
            },
            Type::Blackbox(blackbox) => TypeDef::Blackbox(if blackbox.is_xml() {
                BlackboxKind::Xml
            } else {
                BlackboxKind::Binary
            }),
            Type::TypeRef(type_ref) => match type_ref.path() {
                Some(path) => TypeDef::TypeAlias {
                    extends: self.reference(&path, source, Expected::Type),
                },
                None => opaque(type_ref.syntax()),
            },
            Type::Opaque(node) => opaque(node.syntax()),
        }
    }

    /// Enumeration values become definitions nested in their owner
    fn lower_enum_values(&mut self, ty: Option<&Type>, owner: LocalDefId) {
        if let Some(Type::Enum(values)) = ty {
            self.lower_enum(values, owner);
        }
    }

    fn lower_enum(&mut self, values: &EnumType, parent: LocalDefId) {
        for element in values.elements() {
            let Some(header) = self.header(element.syntax(), element.name()) else {
                continue;
            };
            let data = DefData::EnumerationValue {
                is_final: element.is_final(),
            };
            let id = self.push(header, Some(parent), data);
            if let Some(sub_enum) = element.sub_enum() {
                self.lower_enum(&sub_enum, id);
            }
        }
    }
}

fn modifiers(properties: Option<Properties>) -> Modifiers {
    let Some(properties) = properties else {
        return Modifiers::default();
    };
    Modifiers {
        is_abstract: properties.contains("ABSTRACT"),
        is_extended: properties.contains("EXTENDED"),
        is_final: properties.contains("FINAL"),
        is_external: properties.contains("EXTERNAL"),
    }
}

fn cardinality(node: parser::Cardinality) -> Cardinality {
    let (min, max) = node.bounds();
    Cardinality::new(min, max)
}

fn enum_node(element: &parser::EnumElement) -> Option<EnumNode> {
    Some(EnumNode {
        name: element.name()?.text()?,
        children: element
            .sub_enum()
            .map(|sub| sub.elements().filter_map(|e| enum_node(&e)).collect())
            .unwrap_or_default(),
        is_final: element.is_final() || element.sub_enum().is_some_and(|sub| sub.is_final()),
    })
}

/// Source text of a construct the model does not describe, whitespace collapsed
fn opaque(node: &SyntaxNode) -> TypeDef {
    let text = node.text().to_string();
    TypeDef::Opaque(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

// ============================================================================
// Meta attributes
// ============================================================================

/// `!!@ key = value` comments in the trivia directly preceding `node`
fn meta_attributes(node: &SyntaxNode) -> IndexMap<SmolStr, SmolStr> {
    let mut comments = Vec::new();
    let mut current = node.first_token().and_then(|t| t.prev_token());
    while let Some(token) = current {
        if !token.kind().is_trivia() {
            break;
        }
        if token.kind() == SyntaxKind::META_COMMENT {
            comments.push(token.clone());
        }
        current = token.prev_token();
    }

    comments
        .iter()
        .rev()
        .flat_map(|comment| parse_meta_comment(comment.text()))
        .collect()
}

/// Split the body of a meta comment into `key = value` pairs.
///
/// Pairs are separated by `;` outside of quotes; quoted values are unquoted.
/// Items without `=` are ignored.
fn parse_meta_comment(text: &str) -> Vec<(SmolStr, SmolStr)> {
    let body = text.strip_prefix("!!@").unwrap_or(text);
    let mut items = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (offset, c) in body.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' if !quoted => {
                items.push(&body[start..offset]);
                start = offset + 1;
            }
            _ => {}
        }
    }
    items.push(&body[start..]);

    items
        .into_iter()
        .filter_map(|item| {
            let (key, value) = item.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some((SmolStr::new(key), SmolStr::new(value)))
        })
        .collect()
}
