//! Checks on `${...}` expressions inside a `gql` literal.

use swc_core::atoms::Atom;
use swc_core::common::Spanned;
use swc_core::ecma::ast::Expr;

use crate::error::TransformError;

/// Accepts identifiers and member expressions, looking through parentheses.
pub fn validate(expr: &Expr) -> Result<(), TransformError> {
    match unparen(expr) {
        Expr::Ident(_) | Expr::Member(_) => Ok(()),
        _ => Err(TransformError::InvalidInterpolation { span: expr.span() }),
    }
}

/// The identifier a reference starts from: `a` for `a`, `a.b.c` and `(a).b`.
///
/// Returns `None` for member chains rooted in anything else, such as
/// `this.x` or `f().x`.
pub fn root_name(expr: &Expr) -> Option<&Atom> {
    match unparen(expr) {
        Expr::Ident(ident) => Some(&ident.sym),
        Expr::Member(member) => root_name(&member.obj),
        _ => None,
    }
}

fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unparen(&paren.expr),
        expr => expr,
    }
}
