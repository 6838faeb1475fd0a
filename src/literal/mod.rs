//! Embedding parsed documents as ECMAScript literals.
//!
//! [`ToLiteral`] converts a value into the SWC expression that evaluates to
//! the same value at run time. Objects use string-literal keys in graphql-js
//! field order, and absent optional fields are left out entirely.

mod document;
mod nodes;

pub use document::{Definitions, DocumentLiteral};

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::*;

/// Converts a value to an expression that constructs it.
pub trait ToLiteral {
    fn to_literal(&self) -> Expr;
}

impl<T: ToLiteral> ToLiteral for Box<T> {
    fn to_literal(&self) -> Expr {
        (**self).to_literal()
    }
}

impl<T: ToLiteral> ToLiteral for [T] {
    fn to_literal(&self) -> Expr {
        array(self.iter().map(ToLiteral::to_literal))
    }
}

impl<T: ToLiteral> ToLiteral for Vec<T> {
    fn to_literal(&self) -> Expr {
        self.as_slice().to_literal()
    }
}

impl ToLiteral for str {
    fn to_literal(&self) -> Expr {
        string(self)
    }
}

impl ToLiteral for String {
    fn to_literal(&self) -> Expr {
        string(self)
    }
}

impl ToLiteral for bool {
    fn to_literal(&self) -> Expr {
        Expr::Lit(Lit::Bool(Bool {
            span: DUMMY_SP,
            value: *self,
        }))
    }
}

impl ToLiteral for usize {
    fn to_literal(&self) -> Expr {
        Expr::Lit(Lit::Num(Number {
            span: DUMMY_SP,
            value: *self as f64,
            raw: None,
        }))
    }
}

/// A string literal expression.
pub(crate) fn string(value: &str) -> Expr {
    Expr::Lit(Lit::Str(str_lit(value)))
}

fn str_lit(value: &str) -> Str {
    Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }
}

/// An array literal expression.
pub(crate) fn array(elems: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Array(ArrayLit {
        span: DUMMY_SP,
        elems: elems
            .into_iter()
            .map(|expr| {
                Some(ExprOrSpread {
                    spread: None,
                    expr: Box::new(expr),
                })
            })
            .collect(),
    })
}

/// Builds an object literal one property at a time.
pub(crate) struct ObjectBuilder {
    props: Vec<PropOrSpread>,
}

impl ObjectBuilder {
    /// Starts an AST node object with its `kind` property.
    pub fn node(kind: &str) -> Self {
        let mut builder = Self::plain();
        builder.add("kind", kind);
        builder
    }

    /// Starts an object without a `kind` property.
    pub fn plain() -> Self {
        Self { props: Vec::new() }
    }

    pub fn add<T: ToLiteral + ?Sized>(&mut self, key: &str, value: &T) -> &mut Self {
        self.add_expr(key, value.to_literal())
    }

    /// Adds the property only when `value` is present.
    pub fn add_opt<T: ToLiteral>(&mut self, key: &str, value: Option<&T>) -> &mut Self {
        if let Some(value) = value {
            self.add(key, value);
        }
        self
    }

    pub fn add_expr(&mut self, key: &str, value: Expr) -> &mut Self {
        self.props
            .push(PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                key: PropName::Str(str_lit(key)),
                value: Box::new(value),
            }))));
        self
    }

    pub fn build(&mut self) -> Expr {
        Expr::Object(ObjectLit {
            span: DUMMY_SP,
            props: std::mem::take(&mut self.props),
        })
    }
}
