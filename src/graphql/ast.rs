//! Parsed GraphQL documents.
//!
//! The node set covers executable documents and the type system (schema
//! definition language) and mirrors the node kinds of graphql-js, which is
//! the shape consumers of precompiled documents expect.
//! Only the document carries location information; nested nodes are
//! location-free.

/// Name given to every parsed source.
pub const SOURCE_NAME: &str = "GraphQL request";

/// A parsed GraphQL document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
    pub loc: Location,
}

/// Source range of the document plus the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Offset of the first character (always 0 for documents).
    pub start: usize,
    /// Offset just past the last significant token.
    pub end: usize,
    pub source: Source,
}

/// The text a document was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub body: String,
    pub name: String,
    pub location_offset: LocationOffset,
}

impl Source {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            name: SOURCE_NAME.to_string(),
            location_offset: LocationOffset::default(),
        }
    }
}

/// One-based line and column the source starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOffset {
    pub line: usize,
    pub column: usize,
}

impl Default for LocationOffset {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// A top-level definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    Schema(SchemaDefinition),
    Type(TypeDefinition),
    Directive(DirectiveDefinition),
    SchemaExtension(SchemaExtension),
    TypeExtension(TypeExtension),
}

impl Definition {
    /// Returns the definition's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Operation(op) => op.name.as_ref().map(|n| n.value.as_str()),
            Self::Fragment(fragment) => Some(&fragment.name.value),
            Self::Type(ty) => Some(&ty.name.value),
            Self::Directive(directive) => Some(&directive.name.value),
            Self::TypeExtension(extension) => Some(&extension.name.value),
            Self::Schema(_) | Self::SchemaExtension(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(Self::Query),
            "mutation" => Some(Self::Mutation),
            "subscription" => Some(Self::Subscription),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationDefinition {
    pub operation: OperationType,
    /// `None` for anonymous operations, including the `{ ... }` shorthand.
    pub name: Option<Name>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragmentDefinition {
    pub name: Name,
    pub type_condition: NamedType,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    /// Byte range of the whole definition in the source body.
    pub span: (usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    pub variable: Variable,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selection_set: Option<SelectionSet>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSpread {
    pub name: Name,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<NamedType>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: Name,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub value: String,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: Name,
}

/// Input values. Numbers keep their source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Variable(Variable),
    Int(String),
    Float(String),
    String { value: String, block: bool },
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(Vec<ObjectField>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    pub name: Name,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Named(NamedType),
    List(Box<Type>),
    NonNull(Box<Type>),
}

// Type system

/// A description string in front of a type system definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub value: String,
    pub block: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    pub description: Option<Description>,
    pub directives: Vec<Directive>,
    pub operation_types: Vec<OperationTypeDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaExtension {
    pub directives: Vec<Directive>,
    pub operation_types: Vec<OperationTypeDefinition>,
}

/// `query: Query` inside a schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationTypeDefinition {
    pub operation: OperationType,
    pub ty: NamedType,
}

/// A named type definition. The kind of type is carried by `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub description: Option<Description>,
    pub name: Name,
    pub directives: Vec<Directive>,
    pub body: TypeBody,
}

/// `extend <kind> Name ...`, with the same members as the definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExtension {
    pub name: Name,
    pub directives: Vec<Directive>,
    pub body: TypeBody,
}

/// Members specific to each kind of named type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeBody {
    Scalar,
    Object {
        interfaces: Vec<NamedType>,
        fields: Vec<FieldDefinition>,
    },
    Interface {
        interfaces: Vec<NamedType>,
        fields: Vec<FieldDefinition>,
    },
    Union {
        types: Vec<NamedType>,
    },
    Enum {
        values: Vec<EnumValueDefinition>,
    },
    InputObject {
        fields: Vec<InputValueDefinition>,
    },
}

impl TypeBody {
    /// Keyword introducing this kind of type.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Object { .. } => "type",
            Self::Interface { .. } => "interface",
            Self::Union { .. } => "union",
            Self::Enum { .. } => "enum",
            Self::InputObject { .. } => "input",
        }
    }

    /// Prefix of the graphql-js node kind, e.g. `Object` in `ObjectTypeDefinition`.
    pub fn kind_prefix(&self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::Object { .. } => "Object",
            Self::Interface { .. } => "Interface",
            Self::Union { .. } => "Union",
            Self::Enum { .. } => "Enum",
            Self::InputObject { .. } => "InputObject",
        }
    }

    /// True when the body declares no members at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar => true,
            Self::Object { interfaces, fields } | Self::Interface { interfaces, fields } => {
                interfaces.is_empty() && fields.is_empty()
            }
            Self::Union { types } => types.is_empty(),
            Self::Enum { values } => values.is_empty(),
            Self::InputObject { fields } => fields.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<Description>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: Type,
    pub directives: Vec<Directive>,
}

/// An argument or input object field definition.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<Description>,
    pub name: Name,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<Description>,
    pub name: Name,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub description: Option<Description>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<Name>,
}

/// Locations a directive definition may name after `on`.
pub const DIRECTIVE_LOCATIONS: &[&str] = &[
    "QUERY",
    "MUTATION",
    "SUBSCRIPTION",
    "FIELD",
    "FRAGMENT_DEFINITION",
    "FRAGMENT_SPREAD",
    "INLINE_FRAGMENT",
    "VARIABLE_DEFINITION",
    "SCHEMA",
    "SCALAR",
    "OBJECT",
    "FIELD_DEFINITION",
    "ARGUMENT_DEFINITION",
    "INTERFACE",
    "UNION",
    "ENUM",
    "ENUM_VALUE",
    "INPUT_OBJECT",
    "INPUT_FIELD_DEFINITION",
];
