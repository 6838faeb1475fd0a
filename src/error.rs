//! Errors raised while compiling `gql` literals.

use swc_core::common::Span;
use thiserror::Error;

use crate::graphql::ParseError;

/// Message reported for interpolations that are not references.
pub const INVALID_INTERPOLATION: &str = "Only identifiers or member expressions are allowed by this macro as an interpolation in a graphql template literal.";

/// A fatal error for the current pass.
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    #[error("{}", INVALID_INTERPOLATION)]
    InvalidInterpolation { span: Span },

    #[error("fragment `{name}` referenced before definition")]
    UnknownFragment { name: String, span: Span },

    #[error("interpolated member expression does not start with an identifier")]
    UnresolvableReference { span: Span },

    #[error("{error}")]
    Syntax {
        #[source]
        error: ParseError,
        span: Span,
    },
}

impl TransformError {
    /// Source span the error is attributed to.
    pub fn span(&self) -> Span {
        match self {
            Self::InvalidInterpolation { span }
            | Self::UnknownFragment { span, .. }
            | Self::UnresolvableReference { span }
            | Self::Syntax { span, .. } => *span,
        }
    }

    /// Short label shown under the caret of a code frame.
    pub fn annotation(&self) -> Option<String> {
        match self {
            Self::InvalidInterpolation { .. } => Some("not an identifier or member expression".into()),
            Self::UnknownFragment { name, .. } => Some(format!("`{name}` is not a compiled gql literal")),
            Self::UnresolvableReference { .. } => None,
            Self::Syntax { error, .. } => error
                .found
                .as_ref()
                .map(|found| format!("found: {found}"))
                .or_else(|| {
                    (!error.expected.is_empty())
                        .then(|| format!("expected: {}", error.expected.join(" or ")))
                }),
        }
    }

    /// Suggestion to print after the frame.
    pub fn help(&self) -> Option<&str> {
        match self {
            Self::UnknownFragment { .. } => {
                Some("declare the fragment with `const Name = gql`...`` before it is interpolated")
            }
            Self::Syntax { error, .. } => error.help.as_deref(),
            _ => None,
        }
    }
}
