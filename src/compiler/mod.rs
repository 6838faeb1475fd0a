//! Compilation of a single `gql` tagged template literal.
//!
//! A literal goes through these steps:
//! - Validate: every interpolation must be a reference to another document
//! - Parse: the static text becomes a [`Document`](crate::graphql::Document)
//! - Merge: interpolated documents' definitions are appended at run time
//! - Reconstruct: the registered text of each interpolated document is
//!   prepended to the literal's own text
//! - Register and emit the document as an object literal

mod interpolation;

pub use interpolation::{root_name, validate};

use swc_core::atoms::Atom;
use swc_core::common::{BytePos, Span, Spanned};
use swc_core::ecma::ast::{Expr, TaggedTpl};
use tracing::debug;

use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::graphql::{self, FragmentSources, process_fragments};
use crate::literal::{DocumentLiteral, ToLiteral};
use crate::registry::FragmentRegistry;

/// One static chunk of a template literal.
#[derive(Debug, Clone)]
pub struct Quasi {
    pub raw: String,
    pub span: Span,
}

/// The parts of a tagged template the compiler needs.
#[derive(Debug, Clone)]
pub struct TaggedLiteral {
    pub span: Span,
    pub quasis: Vec<Quasi>,
    pub exprs: Vec<Box<Expr>>,
    /// Variable the literal is assigned to, if any.
    pub binding: Option<Atom>,
}

impl TaggedLiteral {
    pub fn from_tagged_tpl(tagged: &TaggedTpl, binding: Option<Atom>) -> Self {
        Self {
            span: tagged.span,
            quasis: tagged
                .tpl
                .quasis
                .iter()
                .map(|quasi| Quasi {
                    raw: quasi.raw.to_string(),
                    span: quasi.span,
                })
                .collect(),
            exprs: tagged.tpl.exprs.clone(),
            binding,
        }
    }

    /// The static text of the literal; interpolations contribute nothing.
    pub fn query_source(&self) -> String {
        self.quasis.iter().map(|q| q.raw.as_str()).collect()
    }

    /// Maps a byte offset in [`query_source`](Self::query_source) back to a
    /// span in the program source.
    pub fn span_at(&self, offset: usize) -> Span {
        let mut start = 0;
        for (i, quasi) in self.quasis.iter().enumerate() {
            let end = start + quasi.raw.len();
            if offset < end || i + 1 == self.quasis.len() {
                if quasi.span.is_dummy() {
                    break;
                }
                let pos = quasi.span.lo + BytePos((offset.min(end) - start) as u32);
                return Span::new(pos, pos);
            }
            start = end;
        }
        self.span
    }
}

/// Compiles literals against a shared registry.
pub struct Compiler<'a> {
    config: &'a TransformConfig,
    registry: &'a mut FragmentRegistry,
    fragments: &'a mut FragmentSources,
}

impl<'a> Compiler<'a> {
    pub fn new(
        config: &'a TransformConfig,
        registry: &'a mut FragmentRegistry,
        fragments: &'a mut FragmentSources,
    ) -> Self {
        Self {
            config,
            registry,
            fragments,
        }
    }

    /// Compiles `literal` into the expression that replaces it.
    ///
    /// On error nothing is registered.
    pub fn compile(&mut self, literal: &TaggedLiteral) -> Result<Expr, TransformError> {
        for expr in &literal.exprs {
            validate(expr)?;
        }

        let source = literal.query_source();
        let mut document = graphql::parse(&source).map_err(|error| TransformError::Syntax {
            span: literal.span_at(error.position),
            error,
        })?;
        let conflicts = process_fragments(&mut document, self.fragments, self.config.fragment_warnings);
        let definitions = document.definitions.len();

        let compiled = if literal.exprs.is_empty() {
            self.register(literal, &document.loc.source.body);
            DocumentLiteral::new(document)
        } else {
            let text = self.reconstruct(literal, source)?;
            self.register(literal, &text);
            DocumentLiteral::compose(document, literal.exprs.clone(), text)
        };

        debug!(
            binding = literal.binding.as_deref().unwrap_or("<unbound>"),
            interpolations = literal.exprs.len(),
            definitions,
            fragment_conflicts = conflicts.len(),
            "compiled gql literal"
        );

        Ok(compiled.to_literal())
    }

    /// Prepends the registered text of each interpolated document, in order,
    /// so the last interpolation ends up first.
    fn reconstruct(&self, literal: &TaggedLiteral, source: String) -> Result<String, TransformError> {
        literal.exprs.iter().try_fold(source, |text, expr| {
            let name = root_name(expr)
                .ok_or(TransformError::UnresolvableReference { span: expr.span() })?;
            let fragment = self
                .registry
                .get(name)
                .ok_or_else(|| TransformError::UnknownFragment {
                    name: name.to_string(),
                    span: expr.span(),
                })?;
            Ok(format!("{fragment}{text}"))
        })
    }

    fn register(&mut self, literal: &TaggedLiteral, text: &str) {
        if let Some(binding) = &literal.binding {
            self.registry.put(binding.to_string(), text);
        }
    }
}

/// Compiles one literal with a one-off [`Compiler`].
pub fn compile_literal(
    literal: &TaggedLiteral,
    config: &TransformConfig,
    registry: &mut FragmentRegistry,
    fragments: &mut FragmentSources,
) -> Result<Expr, TransformError> {
    Compiler::new(config, registry, fragments).compile(literal)
}
