use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::*;

use super::{ObjectBuilder, ToLiteral};
use crate::graphql::Document;
use crate::graphql::ast::{Definition, Location};

/// The `definitions` array of an emitted document.
#[derive(Debug, Clone)]
pub enum Definitions {
    /// Every definition is known at compile time.
    Inline(Vec<Definition>),
    /// Own definitions followed by those of interpolated documents, merged
    /// at run time with `[...].concat(a.definitions, b.definitions)`.
    Concat {
        base: Vec<Definition>,
        external: Vec<Box<Expr>>,
    },
}

impl Definitions {
    pub fn new(base: Vec<Definition>, external: Vec<Box<Expr>>) -> Self {
        if external.is_empty() {
            Self::Inline(base)
        } else {
            Self::Concat { base, external }
        }
    }

    /// Definitions parsed from this literal's own text.
    pub fn base(&self) -> &[Definition] {
        match self {
            Self::Inline(base) | Self::Concat { base, .. } => base,
        }
    }
}

impl ToLiteral for Definitions {
    fn to_literal(&self) -> Expr {
        match self {
            Self::Inline(base) => base.to_literal(),
            Self::Concat { base, external } => {
                let args = external
                    .iter()
                    .map(|expr| ExprOrSpread {
                        spread: None,
                        expr: Box::new(member(expr.clone(), "definitions")),
                    })
                    .collect();

                Expr::Call(CallExpr {
                    span: DUMMY_SP,
                    callee: Callee::Expr(Box::new(member(Box::new(base.to_literal()), "concat"))),
                    args,
                    ..Default::default()
                })
            }
        }
    }
}

fn member(obj: Box<Expr>, prop: &str) -> Expr {
    Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj,
        prop: MemberProp::Ident(IdentName::new(prop.into(), DUMMY_SP)),
    })
}

/// A compiled document ready to be emitted in place of its literal.
#[derive(Debug, Clone)]
pub struct DocumentLiteral {
    pub definitions: Definitions,
    pub loc: Location,
}

impl DocumentLiteral {
    /// A document with no interpolations.
    pub fn new(document: Document) -> Self {
        Self {
            definitions: Definitions::Inline(document.definitions),
            loc: document.loc,
        }
    }

    /// A document whose definitions are merged with `external` documents at
    /// run time and whose source body is replaced by `body`.
    pub fn compose(document: Document, external: Vec<Box<Expr>>, body: String) -> Self {
        let mut loc = document.loc;
        loc.source.body = body;
        Self {
            definitions: Definitions::new(document.definitions, external),
            loc,
        }
    }
}

impl ToLiteral for DocumentLiteral {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("Document")
            .add("definitions", &self.definitions)
            .add("loc", &self.loc)
            .build()
    }
}
