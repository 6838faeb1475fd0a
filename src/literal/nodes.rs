use swc_core::ecma::ast::Expr;

use super::{ObjectBuilder, ToLiteral};
use crate::graphql::ast::*;

impl ToLiteral for Name {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("Name").add("value", &self.value).build()
    }
}

impl ToLiteral for Variable {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("Variable").add("name", &self.name).build()
    }
}

impl ToLiteral for NamedType {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("NamedType").add("name", &self.name).build()
    }
}

impl ToLiteral for Type {
    fn to_literal(&self) -> Expr {
        match self {
            Type::Named(named) => named.to_literal(),
            Type::List(inner) => ObjectBuilder::node("ListType").add("type", inner).build(),
            Type::NonNull(inner) => ObjectBuilder::node("NonNullType").add("type", inner).build(),
        }
    }
}

impl ToLiteral for Value {
    fn to_literal(&self) -> Expr {
        match self {
            Value::Variable(variable) => variable.to_literal(),
            Value::Int(value) => ObjectBuilder::node("IntValue").add("value", value).build(),
            Value::Float(value) => ObjectBuilder::node("FloatValue").add("value", value).build(),
            Value::String { value, block } => ObjectBuilder::node("StringValue")
                .add("value", value)
                .add("block", block)
                .build(),
            Value::Boolean(value) => ObjectBuilder::node("BooleanValue").add("value", value).build(),
            Value::Null => ObjectBuilder::node("NullValue").build(),
            Value::Enum(value) => ObjectBuilder::node("EnumValue").add("value", value).build(),
            Value::List(values) => ObjectBuilder::node("ListValue").add("values", values).build(),
            Value::Object(fields) => ObjectBuilder::node("ObjectValue").add("fields", fields).build(),
        }
    }
}

impl ToLiteral for ObjectField {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("ObjectField")
            .add("name", &self.name)
            .add("value", &self.value)
            .build()
    }
}

impl ToLiteral for Argument {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("Argument")
            .add("name", &self.name)
            .add("value", &self.value)
            .build()
    }
}

impl ToLiteral for Directive {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("Directive")
            .add("name", &self.name)
            .add("arguments", &self.arguments)
            .build()
    }
}

impl ToLiteral for VariableDefinition {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("VariableDefinition")
            .add("variable", &self.variable)
            .add("type", &self.ty)
            .add_opt("defaultValue", self.default_value.as_ref())
            .add("directives", &self.directives)
            .build()
    }
}

impl ToLiteral for SelectionSet {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("SelectionSet")
            .add("selections", &self.selections)
            .build()
    }
}

impl ToLiteral for Selection {
    fn to_literal(&self) -> Expr {
        match self {
            Selection::Field(field) => field.to_literal(),
            Selection::FragmentSpread(spread) => spread.to_literal(),
            Selection::InlineFragment(inline) => inline.to_literal(),
        }
    }
}

impl ToLiteral for Field {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("Field")
            .add_opt("alias", self.alias.as_ref())
            .add("name", &self.name)
            .add("arguments", &self.arguments)
            .add("directives", &self.directives)
            .add_opt("selectionSet", self.selection_set.as_ref())
            .build()
    }
}

impl ToLiteral for FragmentSpread {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("FragmentSpread")
            .add("name", &self.name)
            .add("directives", &self.directives)
            .build()
    }
}

impl ToLiteral for InlineFragment {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("InlineFragment")
            .add_opt("typeCondition", self.type_condition.as_ref())
            .add("directives", &self.directives)
            .add("selectionSet", &self.selection_set)
            .build()
    }
}

impl ToLiteral for OperationDefinition {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("OperationDefinition")
            .add("operation", self.operation.as_str())
            .add_opt("name", self.name.as_ref())
            .add("variableDefinitions", &self.variable_definitions)
            .add("directives", &self.directives)
            .add("selectionSet", &self.selection_set)
            .build()
    }
}

impl ToLiteral for FragmentDefinition {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("FragmentDefinition")
            .add("name", &self.name)
            .add("typeCondition", &self.type_condition)
            .add("directives", &self.directives)
            .add("selectionSet", &self.selection_set)
            .build()
    }
}

impl ToLiteral for Description {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("StringValue")
            .add("value", &self.value)
            .add("block", &self.block)
            .build()
    }
}

impl ToLiteral for OperationTypeDefinition {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("OperationTypeDefinition")
            .add("operation", self.operation.as_str())
            .add("type", &self.ty)
            .build()
    }
}

impl ToLiteral for SchemaDefinition {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("SchemaDefinition")
            .add_opt("description", self.description.as_ref())
            .add("directives", &self.directives)
            .add("operationTypes", &self.operation_types)
            .build()
    }
}

impl ToLiteral for SchemaExtension {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("SchemaExtension")
            .add("directives", &self.directives)
            .add("operationTypes", &self.operation_types)
            .build()
    }
}

impl ToLiteral for InputValueDefinition {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("InputValueDefinition")
            .add_opt("description", self.description.as_ref())
            .add("name", &self.name)
            .add("type", &self.ty)
            .add_opt("defaultValue", self.default_value.as_ref())
            .add("directives", &self.directives)
            .build()
    }
}

impl ToLiteral for FieldDefinition {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("FieldDefinition")
            .add_opt("description", self.description.as_ref())
            .add("name", &self.name)
            .add("arguments", &self.arguments)
            .add("type", &self.ty)
            .add("directives", &self.directives)
            .build()
    }
}

impl ToLiteral for EnumValueDefinition {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("EnumValueDefinition")
            .add_opt("description", self.description.as_ref())
            .add("name", &self.name)
            .add("directives", &self.directives)
            .build()
    }
}

impl ToLiteral for DirectiveDefinition {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::node("DirectiveDefinition")
            .add_opt("description", self.description.as_ref())
            .add("name", &self.name)
            .add("arguments", &self.arguments)
            .add("repeatable", &self.repeatable)
            .add("locations", &self.locations)
            .build()
    }
}

/// Writes a named type node. Definitions and extensions share the layout;
/// extensions have no description.
fn named_type_node(
    suffix: &str,
    description: Option<&Description>,
    name: &Name,
    directives: &[Directive],
    body: &TypeBody,
) -> Expr {
    let mut node = ObjectBuilder::node(&format!("{}{suffix}", body.kind_prefix()));
    node.add_opt("description", description).add("name", name);
    match body {
        TypeBody::Scalar => node.add("directives", directives),
        TypeBody::Object { interfaces, fields } | TypeBody::Interface { interfaces, fields } => node
            .add("interfaces", interfaces)
            .add("directives", directives)
            .add("fields", fields),
        TypeBody::Union { types } => node.add("directives", directives).add("types", types),
        TypeBody::Enum { values } => node.add("directives", directives).add("values", values),
        TypeBody::InputObject { fields } => node.add("directives", directives).add("fields", fields),
    };
    node.build()
}

impl ToLiteral for TypeDefinition {
    fn to_literal(&self) -> Expr {
        named_type_node(
            "TypeDefinition",
            self.description.as_ref(),
            &self.name,
            &self.directives,
            &self.body,
        )
    }
}

impl ToLiteral for TypeExtension {
    fn to_literal(&self) -> Expr {
        named_type_node("TypeExtension", None, &self.name, &self.directives, &self.body)
    }
}

impl ToLiteral for Definition {
    fn to_literal(&self) -> Expr {
        match self {
            Definition::Operation(op) => op.to_literal(),
            Definition::Fragment(fragment) => fragment.to_literal(),
            Definition::Schema(schema) => schema.to_literal(),
            Definition::Type(ty) => ty.to_literal(),
            Definition::Directive(directive) => directive.to_literal(),
            Definition::SchemaExtension(extension) => extension.to_literal(),
            Definition::TypeExtension(extension) => extension.to_literal(),
        }
    }
}

impl ToLiteral for LocationOffset {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::plain()
            .add("line", &self.line)
            .add("column", &self.column)
            .build()
    }
}

impl ToLiteral for Source {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::plain()
            .add("body", &self.body)
            .add("name", &self.name)
            .add("locationOffset", &self.location_offset)
            .build()
    }
}

impl ToLiteral for Location {
    fn to_literal(&self) -> Expr {
        ObjectBuilder::plain()
            .add("start", &self.start)
            .add("end", &self.end)
            .add("source", &self.source)
            .build()
    }
}
