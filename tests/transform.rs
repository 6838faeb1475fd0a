//! End-to-end tests for `transform_source`.
//!
//! Each test feeds a complete JS/TS file through the pass and inspects the
//! printed output.

use graphql_tag_swc::{TransformConfig, TransformError, transform_source};

// =============================================================================
// Helper Functions
// =============================================================================

const IMPORT: &str = "import gql from \"graphql-tag.macro\";\n";

fn transform(body: &str) -> String {
    let src = format!("{IMPORT}{body}");
    transform_source(&src, "query.js", &TransformConfig::default())
        .unwrap_or_else(|err| panic!("transform failed:\n{err:#}"))
}

fn transform_err(body: &str) -> anyhow::Error {
    let src = format!("{IMPORT}{body}");
    match transform_source(&src, "query.js", &TransformConfig::default()) {
        Ok(out) => panic!("expected an error, got:\n{out}"),
        Err(err) => err,
    }
}

// =============================================================================
// Composition
// =============================================================================

mod composition {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fragment_then_query() {
        let out = transform(
            "const F = gql`fragment F on T { z }`;\nconst Q = gql`{ y ...F }${F}`;\n",
        );

        assert!(!out.contains("graphql-tag.macro"), "import not removed:\n{out}");
        assert!(!out.contains("gql`"), "literal not replaced:\n{out}");
        assert!(out.contains(".concat(F.definitions)"), "missing merge:\n{out}");
        assert!(out.contains("fragment F on T { z }{ y ...F }"), "missing body:\n{out}");
        assert_eq!(out.matches("FragmentDefinition").count(), 1);
        assert_eq!(out.matches("OperationDefinition").count(), 1);
    }

    #[test]
    fn nested_composition_accumulates_text() {
        let out = transform(
            "const A = gql`fragment A on T { a }`;\n\
             const B = gql`fragment B on T { ...A }${A}`;\n\
             const Q = gql`{ ...B }${B}`;\n",
        );

        assert!(out.contains("fragment A on T { a }fragment B on T { ...A }"));
        assert!(out.contains("fragment A on T { a }fragment B on T { ...A }{ ...B }"));
        assert!(out.contains(".concat(A.definitions)"));
        assert!(out.contains(".concat(B.definitions)"));
    }

    #[test]
    fn member_expression_interpolation() {
        let out = transform(
            "const fragments = {};\n\
             const frags = gql`fragment X on T { x }`;\n\
             const Q = gql`{ ...X }${frags.X}`;\n",
        );
        assert!(out.contains("frags.X.definitions"), "got:\n{out}");
        assert!(out.contains("fragment X on T { x }{ ...X }"));
    }

    #[test]
    fn typescript_source() {
        let src = format!(
            "{IMPORT}export const Q: DocumentNode = gql`query Q($id: ID!) {{ node(id: $id) {{ id }} }}`;\n"
        );
        let out = transform_source(&src, "query.ts", &TransformConfig::default()).unwrap();
        assert!(out.contains("VariableDefinition"));
        assert!(out.contains("NonNullType"));
        assert!(out.contains("DocumentNode"));
    }

    #[test]
    fn comments_survive() {
        let out = transform("// leading note\nconst Q = gql`{ a }`;\n");
        assert!(out.contains("// leading note"));
    }
}

// =============================================================================
// Schema definitions
// =============================================================================

mod schema {
    use super::*;

    #[test]
    fn type_definitions_compile() {
        let out = transform(
            "export const typeDefs = gql`\n  \"The root\"\n  type Query { user(id: ID!): User }\n  type User { id: ID! name: String }\n  extend type User { email: String }\n`;\n",
        );

        assert!(!out.contains("gql`"), "literal not replaced:\n{out}");
        assert_eq!(out.matches("ObjectTypeDefinition").count(), 2, "got:\n{out}");
        assert!(out.contains("ObjectTypeExtension"));
        assert!(out.contains("FieldDefinition"));
        assert!(out.contains("InputValueDefinition"));
        assert!(out.contains("description"));
    }

    #[test]
    fn enum_union_and_schema() {
        let out = transform(
            "const S = gql`schema { query: Query } enum Role { ADMIN USER } union Result = User | Error`;\n",
        );
        assert!(out.contains("SchemaDefinition"));
        assert!(out.contains("OperationTypeDefinition"));
        assert!(out.contains("EnumTypeDefinition"));
        assert!(out.contains("UnionTypeDefinition"));
    }
}

// =============================================================================
// Bindings
// =============================================================================

mod bindings {
    use super::*;

    #[test]
    fn require_in_commonjs_file() {
        let src = "const gql = require('graphql-tag.macro');\nconst Q = gql`{ a }`;\nmodule.exports = { Q };\n";
        let out = transform_source(src, "a.js", &TransformConfig::default()).unwrap();

        assert!(!out.contains("graphql-tag.macro"), "require not removed:\n{out}");
        assert!(!out.contains("gql`"), "literal not replaced:\n{out}");
        assert!(out.contains("OperationDefinition"));
        assert!(out.contains("module.exports"));
    }

    #[test]
    fn require_next_to_imports() {
        let src = "import React from 'react';\nconst gql = require('graphql.macro');\nexport const Q = gql`{ a }`;\n";
        let out = transform_source(src, "a.js", &TransformConfig::default()).unwrap();

        assert!(!out.contains("graphql.macro"), "got:\n{out}");
        assert!(out.contains("react"));
        assert!(out.contains("OperationDefinition"));
    }

    #[test]
    fn require_kept_when_configured() {
        let config = TransformConfig::from_json(r#"{ "removeImports": false }"#).unwrap();
        let src = "const gql = require('graphql-tag.macro');\nconst Q = gql`{ a }`;\n";
        let out = transform_source(src, "a.js", &config).unwrap();

        assert!(out.contains("require('graphql-tag.macro')"), "got:\n{out}");
        assert!(out.contains("OperationDefinition"));
    }

    #[test]
    fn shadowing_parameter_is_not_the_tag() {
        let out = transform("function f(gql) {\n  return gql`not graphql`;\n}\nconst Q = gql`{ a }`;\n");

        assert!(out.contains("gql`not graphql`"), "got:\n{out}");
        assert!(out.contains("OperationDefinition"));
    }

    #[test]
    fn shadowing_block_binding_is_not_the_tag() {
        let out = transform("{\n  const gql = String.raw;\n  gql`not graphql`;\n}\n");
        assert!(out.contains("gql`not graphql`"), "got:\n{out}");
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn invalid_interpolation_points_at_expression() {
        let err = transform_err("const Q = gql`{ y }${f()}`;\n");
        let frame = err.to_string();

        assert!(frame.contains(
            "Only identifiers or member expressions are allowed by this macro as an interpolation in a graphql template literal."
        ));
        assert!(frame.contains(" --> query.js:2:22"), "got:\n{frame}");
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::InvalidInterpolation { .. })
        ));
    }

    #[test]
    fn unknown_fragment() {
        let err = transform_err("const Q = gql`{ y ...M }${Missing}`;\n");
        assert!(err.to_string().contains("fragment `Missing` referenced before definition"));
        assert!(err.to_string().contains("help: "));
    }

    #[test]
    fn fragment_used_before_definition() {
        let err = transform_err(
            "const Q = gql`{ y ...F }${F}`;\nconst F = gql`fragment F on T { z }`;\n",
        );
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::UnknownFragment { name, .. }) if name == "F"
        ));
    }

    #[test]
    fn graphql_syntax_error() {
        let err = transform_err("const Q = gql`{ a`;\n");
        let frame = err.to_string();
        assert!(frame.contains("GraphQL syntax error"), "got:\n{frame}");
        assert!(frame.contains(" --> query.js:2:"), "got:\n{frame}");
    }

    #[test]
    fn description_before_operation() {
        let err = transform_err("const Q = gql`\"Docs\" query { a }`;\n");
        let frame = err.to_string();
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::Syntax { .. })
        ));
        assert_eq!(frame.matches("help:").count(), 1, "got:\n{frame}");
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn custom_module() {
        let config = TransformConfig::from_json(r#"{ "modules": ["@app/gql"] }"#).unwrap();
        let src = "import gql from '@app/gql';\nconst Q = gql`{ a }`;\n";
        let out = transform_source(src, "a.js", &config).unwrap();
        assert!(!out.contains("@app/gql"));
        assert!(out.contains("OperationDefinition"));
    }

    #[test]
    fn without_macro_import_nothing_changes() {
        let src = "import gql from 'graphql-tag';\nconst Q = gql`{ a }`;\n";
        let out = transform_source(src, "a.js", &TransformConfig::default()).unwrap();
        assert!(out.contains("gql`{ a }`"));
    }
}
