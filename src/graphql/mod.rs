//! GraphQL query parsing.
//!
//! This module turns the static text of a `gql` literal into a [`Document`]:
//! - Lexer: tokenizes the query text (strings decoded, block strings dedented)
//! - Parser: builds the document for executable and type system definitions
//! - Fragments: per-document fragment dedup and pass-wide name tracking

pub mod ast;
pub mod errors;
pub mod fragments;
pub mod lexer;
pub mod parser;
pub mod syntax;

pub use ast::Document;
pub use errors::{ParseError, ParseErrorKind, ParseResult};
pub use fragments::{FragmentSources, process_fragments};
pub use parser::parse;
