//! Recursive descent parser for GraphQL documents.
//!
//! Executable definitions (operations and fragments) and type system
//! definitions and extensions may be mixed in one document.

use super::ast::*;
use super::errors::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{Lexer, Token};
use super::syntax::SyntaxKind;

/// Keywords that may follow a description.
const DESCRIBED_KEYWORDS: &[&str] = &[
    "schema",
    "scalar",
    "type",
    "interface",
    "union",
    "enum",
    "input",
    "directive",
];

const DEFINITION_START: &[&str] = &[
    "\"query\"",
    "\"mutation\"",
    "\"subscription\"",
    "\"fragment\"",
    "\"{\"",
    "type system definition",
];

/// Parses GraphQL source text into a [`Document`].
pub fn parse(source: &str) -> ParseResult<Document> {
    Parser::new(source)?.parse_document()
}

/// The parser for GraphQL input.
pub struct Parser<'a> {
    /// The source text.
    source: &'a str,
    lexer: Lexer<'a>,
    /// The current (not yet consumed) token.
    token: Token,
    /// End offset of the last consumed token.
    last_end: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first token.
    pub fn new(source: &'a str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let token = lexer.next_token()?;
        Ok(Self {
            source,
            lexer,
            token,
            last_end: 0,
        })
    }

    // =========================================================================
    // Token navigation
    // =========================================================================

    fn peek(&self, kind: SyntaxKind) -> bool {
        self.token.kind == kind
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.token.kind == SyntaxKind::Name && self.token.value == keyword
    }

    /// Consumes the current token and returns it.
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        let token = std::mem::replace(&mut self.token, next);
        self.last_end = token.end;
        Ok(token)
    }

    fn unexpected(&self, expected: &[&str]) -> ParseError {
        ParseError::unexpected_token(self.token.start, expected, &self.token.describe())
    }

    fn expect(&mut self, kind: SyntaxKind) -> ParseResult<Token> {
        if self.peek(kind) {
            self.advance()
        } else {
            Err(self.unexpected(&[kind.describe()]))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
        if self.peek_keyword(keyword) {
            self.advance()?;
            Ok(())
        } else {
            Err(ParseError::expected_keyword(
                self.token.start,
                keyword,
                &self.token.describe(),
            ))
        }
    }

    /// Consumes the current token if it has the given kind.
    fn skip(&mut self, kind: SyntaxKind) -> ParseResult<bool> {
        if self.peek(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses `open item+ close`.
    fn many<T>(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            items.push(item(self)?);
            if self.skip(close)? {
                return Ok(items);
            }
        }
    }

    /// Parses `sep? item (sep item)*`.
    fn delimited<T>(
        &mut self,
        sep: SyntaxKind,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        self.skip(sep)?;
        let mut items = vec![item(self)?];
        while self.skip(sep)? {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Parses `(open item* close)?`, returning an empty list when `open` is absent.
    fn optional_many<T>(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
        item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        if self.peek(open) {
            self.many(open, close, item)
        } else {
            Ok(Vec::new())
        }
    }

    // =========================================================================
    // Document
    // =========================================================================

    /// Parses a whole document.
    pub fn parse_document(mut self) -> ParseResult<Document> {
        let mut definitions = Vec::new();
        loop {
            definitions.push(self.parse_definition()?);
            if self.peek(SyntaxKind::Eof) {
                break;
            }
        }

        Ok(Document {
            definitions,
            loc: Location {
                start: 0,
                end: self.last_end,
                source: Source::new(self.source),
            },
        })
    }

    fn parse_definition(&mut self) -> ParseResult<Definition> {
        match self.token.kind {
            SyntaxKind::LBrace => Ok(Definition::Operation(self.parse_shorthand_operation()?)),
            SyntaxKind::String | SyntaxKind::BlockString => {
                let description = self.parse_description()?;
                if !DESCRIBED_KEYWORDS.iter().any(|k| self.peek_keyword(k)) {
                    return Err(ParseError::unexpected_description(
                        self.token.start,
                        &self.token.describe(),
                    ));
                }
                self.parse_type_system_definition(description)
            }
            SyntaxKind::Name => {
                let keyword = self.token.value.as_str();
                if let Some(operation) = OperationType::from_keyword(keyword) {
                    return Ok(Definition::Operation(self.parse_operation(operation)?));
                }
                match keyword {
                    "fragment" => Ok(Definition::Fragment(self.parse_fragment_definition()?)),
                    "extend" => self.parse_extension(),
                    _ if DESCRIBED_KEYWORDS.contains(&keyword) => {
                        self.parse_type_system_definition(None)
                    }
                    _ => Err(self.unexpected(DEFINITION_START)),
                }
            }
            _ => Err(self.unexpected(DEFINITION_START)),
        }
    }

    // =========================================================================
    // Operations and fragments
    // =========================================================================

    fn parse_shorthand_operation(&mut self) -> ParseResult<OperationDefinition> {
        Ok(OperationDefinition {
            operation: OperationType::Query,
            name: None,
            variable_definitions: Vec::new(),
            directives: Vec::new(),
            selection_set: self.parse_selection_set()?,
        })
    }

    fn parse_operation(&mut self, operation: OperationType) -> ParseResult<OperationDefinition> {
        self.advance()?;
        let name = if self.peek(SyntaxKind::Name) {
            Some(self.parse_name()?)
        } else {
            None
        };

        Ok(OperationDefinition {
            operation,
            name,
            variable_definitions: self.parse_variable_definitions()?,
            directives: self.parse_directives(false)?,
            selection_set: self.parse_selection_set()?,
        })
    }

    fn parse_fragment_definition(&mut self) -> ParseResult<FragmentDefinition> {
        let start = self.token.start;
        self.expect_keyword("fragment")?;
        let name = self.parse_fragment_name()?;
        self.expect_keyword("on")?;
        let type_condition = self.parse_named_type()?;
        let directives = self.parse_directives(false)?;
        let selection_set = self.parse_selection_set()?;

        Ok(FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
            span: (start, self.last_end),
        })
    }

    fn parse_fragment_name(&mut self) -> ParseResult<Name> {
        if self.peek_keyword("on") {
            return Err(ParseError::new(ParseErrorKind::ReservedFragmentName, self.token.start)
                .with_found(&self.token.describe()));
        }
        self.parse_name()
    }

    fn parse_variable_definitions(&mut self) -> ParseResult<Vec<VariableDefinition>> {
        self.optional_many(SyntaxKind::LParen, SyntaxKind::RParen, |p| {
            p.parse_variable_definition()
        })
    }

    fn parse_variable_definition(&mut self) -> ParseResult<VariableDefinition> {
        let variable = self.parse_variable()?;
        self.expect(SyntaxKind::Colon)?;
        let ty = self.parse_type()?;
        let default_value = if self.skip(SyntaxKind::Eq)? {
            Some(self.parse_value(true)?)
        } else {
            None
        };

        Ok(VariableDefinition {
            variable,
            ty,
            default_value,
            directives: self.parse_directives(true)?,
        })
    }

    fn parse_variable(&mut self) -> ParseResult<Variable> {
        self.expect(SyntaxKind::Dollar)?;
        Ok(Variable {
            name: self.parse_name()?,
        })
    }

    // =========================================================================
    // Selections
    // =========================================================================

    fn parse_selection_set(&mut self) -> ParseResult<SelectionSet> {
        Ok(SelectionSet {
            selections: self.many(SyntaxKind::LBrace, SyntaxKind::RBrace, |p| {
                p.parse_selection()
            })?,
        })
    }

    fn parse_selection(&mut self) -> ParseResult<Selection> {
        if self.peek(SyntaxKind::Spread) {
            self.parse_fragment()
        } else {
            Ok(Selection::Field(self.parse_field()?))
        }
    }

    fn parse_field(&mut self) -> ParseResult<Field> {
        let name_or_alias = self.parse_name()?;
        let (alias, name) = if self.skip(SyntaxKind::Colon)? {
            (Some(name_or_alias), self.parse_name()?)
        } else {
            (None, name_or_alias)
        };

        let arguments = self.parse_arguments(false)?;
        let directives = self.parse_directives(false)?;
        let selection_set = if self.peek(SyntaxKind::LBrace) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };

        Ok(Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }

    /// Parses `...Name` or `... on Type { }` / `... { }`.
    fn parse_fragment(&mut self) -> ParseResult<Selection> {
        self.expect(SyntaxKind::Spread)?;

        let has_type_condition = self.peek_keyword("on");
        if !has_type_condition && self.peek(SyntaxKind::Name) {
            return Ok(Selection::FragmentSpread(FragmentSpread {
                name: self.parse_fragment_name()?,
                directives: self.parse_directives(false)?,
            }));
        }

        let type_condition = if has_type_condition {
            self.advance()?;
            Some(self.parse_named_type()?)
        } else {
            None
        };

        Ok(Selection::InlineFragment(InlineFragment {
            type_condition,
            directives: self.parse_directives(false)?,
            selection_set: self.parse_selection_set()?,
        }))
    }

    fn parse_arguments(&mut self, is_const: bool) -> ParseResult<Vec<Argument>> {
        self.optional_many(SyntaxKind::LParen, SyntaxKind::RParen, |p| {
            p.parse_argument(is_const)
        })
    }

    fn parse_argument(&mut self, is_const: bool) -> ParseResult<Argument> {
        let name = self.parse_name()?;
        self.expect(SyntaxKind::Colon)?;
        Ok(Argument {
            name,
            value: self.parse_value(is_const)?,
        })
    }

    fn parse_directives(&mut self, is_const: bool) -> ParseResult<Vec<Directive>> {
        let mut directives = Vec::new();
        while self.skip(SyntaxKind::At)? {
            directives.push(Directive {
                name: self.parse_name()?,
                arguments: self.parse_arguments(is_const)?,
            });
        }
        Ok(directives)
    }

    // =========================================================================
    // Type system
    // =========================================================================

    fn parse_description(&mut self) -> ParseResult<Option<Description>> {
        let block = match self.token.kind {
            SyntaxKind::String => false,
            SyntaxKind::BlockString => true,
            _ => return Ok(None),
        };
        Ok(Some(Description {
            value: self.advance()?.value,
            block,
        }))
    }

    /// Parses a definition from its keyword on; the description, if any, is
    /// already consumed.
    fn parse_type_system_definition(
        &mut self,
        description: Option<Description>,
    ) -> ParseResult<Definition> {
        let keyword = self.advance()?;
        match keyword.value.as_str() {
            "schema" => Ok(Definition::Schema(SchemaDefinition {
                description,
                directives: self.parse_directives(true)?,
                operation_types: self.many(SyntaxKind::LBrace, SyntaxKind::RBrace, |p| {
                    p.parse_operation_type_definition()
                })?,
            })),
            "directive" => Ok(Definition::Directive(
                self.parse_directive_definition(description)?,
            )),
            _ => {
                let (name, directives, body) = self.parse_type_parts(&keyword)?;
                Ok(Definition::Type(TypeDefinition {
                    description,
                    name,
                    directives,
                    body,
                }))
            }
        }
    }

    fn parse_extension(&mut self) -> ParseResult<Definition> {
        self.expect_keyword("extend")?;
        let keyword = self.expect(SyntaxKind::Name)?;

        if keyword.value == "schema" {
            let directives = self.parse_directives(true)?;
            let operation_types = self.optional_many(SyntaxKind::LBrace, SyntaxKind::RBrace, |p| {
                p.parse_operation_type_definition()
            })?;
            if directives.is_empty() && operation_types.is_empty() {
                return Err(self.unexpected(&["\"@\"", "\"{\""]));
            }
            return Ok(Definition::SchemaExtension(SchemaExtension {
                directives,
                operation_types,
            }));
        }

        let (name, directives, body) = self.parse_type_parts(&keyword)?;
        if directives.is_empty() && body.is_empty() {
            return Err(self.unexpected(&["\"@\"", "extension members"]));
        }
        Ok(Definition::TypeExtension(TypeExtension {
            name,
            directives,
            body,
        }))
    }

    /// Parses the name, directives and members of a named type introduced by `keyword`.
    fn parse_type_parts(&mut self, keyword: &Token) -> ParseResult<(Name, Vec<Directive>, TypeBody)> {
        let mut body = match keyword.value.as_str() {
            "scalar" => TypeBody::Scalar,
            "type" => TypeBody::Object {
                interfaces: Vec::new(),
                fields: Vec::new(),
            },
            "interface" => TypeBody::Interface {
                interfaces: Vec::new(),
                fields: Vec::new(),
            },
            "union" => TypeBody::Union { types: Vec::new() },
            "enum" => TypeBody::Enum { values: Vec::new() },
            "input" => TypeBody::InputObject { fields: Vec::new() },
            _ => {
                return Err(ParseError::unexpected_token(
                    keyword.start,
                    &["\"schema\"", "\"scalar\"", "\"type\"", "\"interface\"", "\"union\"", "\"enum\"", "\"input\""],
                    &keyword.describe(),
                ));
            }
        };

        let name = self.parse_name()?;
        if let TypeBody::Object { interfaces, .. } | TypeBody::Interface { interfaces, .. } = &mut body {
            *interfaces = self.parse_implements()?;
        }
        let directives = self.parse_directives(true)?;

        match &mut body {
            TypeBody::Scalar => {}
            TypeBody::Object { fields, .. } | TypeBody::Interface { fields, .. } => {
                *fields = self.optional_many(SyntaxKind::LBrace, SyntaxKind::RBrace, |p| {
                    p.parse_field_definition()
                })?;
            }
            TypeBody::Union { types } => {
                if self.skip(SyntaxKind::Eq)? {
                    *types = self.delimited(SyntaxKind::Pipe, |p| p.parse_named_type())?;
                }
            }
            TypeBody::Enum { values } => {
                *values = self.optional_many(SyntaxKind::LBrace, SyntaxKind::RBrace, |p| {
                    p.parse_enum_value_definition()
                })?;
            }
            TypeBody::InputObject { fields } => {
                *fields = self.optional_many(SyntaxKind::LBrace, SyntaxKind::RBrace, |p| {
                    p.parse_input_value_definition()
                })?;
            }
        }

        Ok((name, directives, body))
    }

    fn parse_implements(&mut self) -> ParseResult<Vec<NamedType>> {
        if !self.peek_keyword("implements") {
            return Ok(Vec::new());
        }
        self.advance()?;
        self.delimited(SyntaxKind::Amp, |p| p.parse_named_type())
    }

    fn parse_operation_type_definition(&mut self) -> ParseResult<OperationTypeDefinition> {
        let token = self.expect(SyntaxKind::Name)?;
        let Some(operation) = OperationType::from_keyword(&token.value) else {
            return Err(ParseError::unexpected_token(
                token.start,
                &["\"query\"", "\"mutation\"", "\"subscription\""],
                &token.describe(),
            ));
        };
        self.expect(SyntaxKind::Colon)?;
        Ok(OperationTypeDefinition {
            operation,
            ty: self.parse_named_type()?,
        })
    }

    fn parse_field_definition(&mut self) -> ParseResult<FieldDefinition> {
        let description = self.parse_description()?;
        let name = self.parse_name()?;
        let arguments = self.parse_argument_definitions()?;
        self.expect(SyntaxKind::Colon)?;
        let ty = self.parse_type()?;

        Ok(FieldDefinition {
            description,
            name,
            arguments,
            ty,
            directives: self.parse_directives(true)?,
        })
    }

    fn parse_argument_definitions(&mut self) -> ParseResult<Vec<InputValueDefinition>> {
        self.optional_many(SyntaxKind::LParen, SyntaxKind::RParen, |p| {
            p.parse_input_value_definition()
        })
    }

    fn parse_input_value_definition(&mut self) -> ParseResult<InputValueDefinition> {
        let description = self.parse_description()?;
        let name = self.parse_name()?;
        self.expect(SyntaxKind::Colon)?;
        let ty = self.parse_type()?;
        let default_value = if self.skip(SyntaxKind::Eq)? {
            Some(self.parse_value(true)?)
        } else {
            None
        };

        Ok(InputValueDefinition {
            description,
            name,
            ty,
            default_value,
            directives: self.parse_directives(true)?,
        })
    }

    fn parse_enum_value_definition(&mut self) -> ParseResult<EnumValueDefinition> {
        let description = self.parse_description()?;
        if ["true", "false", "null"].iter().any(|reserved| self.peek_keyword(reserved)) {
            return Err(ParseError::new(ParseErrorKind::ReservedEnumValueName, self.token.start)
                .with_found(&self.token.describe()));
        }

        Ok(EnumValueDefinition {
            description,
            name: self.parse_name()?,
            directives: self.parse_directives(true)?,
        })
    }

    /// Parses `@name(args) repeatable? on A | B`; the `directive` keyword is consumed.
    fn parse_directive_definition(
        &mut self,
        description: Option<Description>,
    ) -> ParseResult<DirectiveDefinition> {
        self.expect(SyntaxKind::At)?;
        let name = self.parse_name()?;
        let arguments = self.parse_argument_definitions()?;
        let repeatable = self.peek_keyword("repeatable");
        if repeatable {
            self.advance()?;
        }
        self.expect_keyword("on")?;

        Ok(DirectiveDefinition {
            description,
            name,
            arguments,
            repeatable,
            locations: self.delimited(SyntaxKind::Pipe, |p| p.parse_directive_location())?,
        })
    }

    fn parse_directive_location(&mut self) -> ParseResult<Name> {
        let start = self.token.start;
        let name = self.parse_name()?;
        if DIRECTIVE_LOCATIONS.contains(&name.value.as_str()) {
            Ok(name)
        } else {
            Err(ParseError::new(ParseErrorKind::UnknownDirectiveLocation, start)
                .with_found(&format!("Name \"{}\"", name.value)))
        }
    }

    // =========================================================================
    // Values and types
    // =========================================================================

    fn parse_value(&mut self, is_const: bool) -> ParseResult<Value> {
        match self.token.kind {
            SyntaxKind::LBracket => {
                self.advance()?;
                let mut values = Vec::new();
                while !self.skip(SyntaxKind::RBracket)? {
                    values.push(self.parse_value(is_const)?);
                }
                Ok(Value::List(values))
            }
            SyntaxKind::LBrace => {
                self.advance()?;
                let mut fields = Vec::new();
                while !self.skip(SyntaxKind::RBrace)? {
                    let name = self.parse_name()?;
                    self.expect(SyntaxKind::Colon)?;
                    fields.push(ObjectField {
                        name,
                        value: self.parse_value(is_const)?,
                    });
                }
                Ok(Value::Object(fields))
            }
            SyntaxKind::Int => Ok(Value::Int(self.advance()?.value)),
            SyntaxKind::Float => Ok(Value::Float(self.advance()?.value)),
            SyntaxKind::String => Ok(Value::String {
                value: self.advance()?.value,
                block: false,
            }),
            SyntaxKind::BlockString => Ok(Value::String {
                value: self.advance()?.value,
                block: true,
            }),
            SyntaxKind::Name => {
                let token = self.advance()?;
                Ok(match token.value.as_str() {
                    "true" => Value::Boolean(true),
                    "false" => Value::Boolean(false),
                    "null" => Value::Null,
                    _ => Value::Enum(token.value),
                })
            }
            SyntaxKind::Dollar if is_const => {
                let position = self.token.start;
                let variable = self.parse_variable()?;
                Err(ParseError::new(ParseErrorKind::VariableInConstValue, position)
                    .with_found(&format!("\"${}\"", variable.name.value)))
            }
            SyntaxKind::Dollar => Ok(Value::Variable(self.parse_variable()?)),
            _ => Err(self.unexpected(&["value"])),
        }
    }

    fn parse_type(&mut self) -> ParseResult<Type> {
        let ty = if self.skip(SyntaxKind::LBracket)? {
            let inner = self.parse_type()?;
            self.expect(SyntaxKind::RBracket)?;
            Type::List(Box::new(inner))
        } else {
            Type::Named(self.parse_named_type()?)
        };

        if self.skip(SyntaxKind::Bang)? {
            Ok(Type::NonNull(Box::new(ty)))
        } else {
            Ok(ty)
        }
    }

    fn parse_named_type(&mut self) -> ParseResult<NamedType> {
        Ok(NamedType {
            name: self.parse_name()?,
        })
    }

    fn parse_name(&mut self) -> ParseResult<Name> {
        let token = self.expect(SyntaxKind::Name)?;
        Ok(Name { value: token.value })
    }
}
