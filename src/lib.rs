//! Compile-time precompilation of `gql` tagged template literals.
//!
//! Tagged templates whose tag is imported from a GraphQL macro module are
//! parsed at build time and replaced by the object literal of the parsed
//! document, so that no GraphQL parsing happens at run time:
//!
//! ```js
//! import gql from "graphql-tag.macro";
//!
//! const UserFields = gql`fragment UserFields on User { id name }`;
//! const Viewer = gql`
//!   { viewer { ...UserFields } }
//!   ${UserFields}
//! `;
//! ```
//!
//! becomes (abbreviated)
//!
//! ```js
//! const UserFields = { "kind": "Document", "definitions": [...], "loc": {...} };
//! const Viewer = {
//!   "kind": "Document",
//!   "definitions": [...].concat(UserFields.definitions),
//!   "loc": { ..., "source": { "body": "fragment UserFields on User { id name }\n  { viewer ... }", ... } }
//! };
//! ```
//!
//! # Architecture
//!
//! - [`graphql`] - lexer and parser for GraphQL documents, schema definitions included
//! - [`literal`] - conversion of parsed documents into SWC expressions
//! - [`compiler`] - compiles one literal against the [`FragmentRegistry`]
//! - [`visitor`] - SWC `VisitMut` pass that finds macro bindings and literals
//! - [`source`] - parse, transform and print whole files
//!
//! Interpolations must be identifiers or member expressions naming a literal
//! compiled earlier in the same pass.

pub mod compiler;
pub mod config;
pub mod error;
pub mod error_fmt;
pub mod graphql;
pub mod literal;
pub mod registry;
pub mod source;
pub mod visitor;

pub use compiler::{Compiler, TaggedLiteral, compile_literal};
pub use config::TransformConfig;
pub use error::TransformError;
pub use registry::FragmentRegistry;
pub use source::{resolve_program, transform_program, transform_source};
pub use visitor::GraphqlTagVisitor;
