//! Program traversal that finds and replaces `gql` literals.
//!
//! Tags are bindings introduced by `import` declarations or by top-level
//! `require()` calls naming a macro module. They are matched by binding
//! identity, so the program should have been through the SWC resolver.

use rustc_hash::FxHashSet;
use swc_core::atoms::Atom;
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};
use tracing::debug;

use crate::compiler::{Compiler, TaggedLiteral};
use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::graphql::FragmentSources;
use crate::registry::FragmentRegistry;

/// Name a macro module exports its tag under besides the default export.
const NAMED_TAG: &str = "gql";

/// Replaces every tagged template whose tag is bound to a macro module with
/// the compiled document.
///
/// Literals are compiled in source order. After the first error nothing else
/// is compiled; the error is available from [`GraphqlTagVisitor::finish`].
pub struct GraphqlTagVisitor<'a> {
    config: &'a TransformConfig,
    registry: &'a mut FragmentRegistry,
    fragments: FragmentSources,
    tags: FxHashSet<Id>,
    error: Option<TransformError>,
}

impl<'a> GraphqlTagVisitor<'a> {
    pub fn new(config: &'a TransformConfig, registry: &'a mut FragmentRegistry) -> Self {
        Self {
            config,
            registry,
            fragments: FragmentSources::new(),
            tags: FxHashSet::default(),
            error: None,
        }
    }

    /// Returns the first error raised during the traversal.
    pub fn finish(self) -> Result<(), TransformError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn is_macro_source(&self, src: &Str) -> bool {
        src.value
            .as_str()
            .is_some_and(|src| self.config.is_macro_module(src))
    }

    fn is_macro_import(&self, import: &ImportDecl) -> bool {
        self.is_macro_source(&import.src)
    }

    /// True for `require("<macro module>")` initializers.
    fn is_macro_require(&self, declarator: &VarDeclarator) -> bool {
        let Some(Expr::Call(call)) = declarator.init.as_deref() else {
            return false;
        };
        let Callee::Expr(callee) = &call.callee else {
            return false;
        };
        if !matches!(&**callee, Expr::Ident(ident) if &*ident.sym == "require") {
            return false;
        }
        matches!(
            call.args.as_slice(),
            [ExprOrSpread { spread: None, expr }]
                if matches!(&**expr, Expr::Lit(Lit::Str(src)) if self.is_macro_source(src))
        )
    }

    fn collect_import(&mut self, import: &ImportDecl) {
        for specifier in &import.specifiers {
            match specifier {
                ImportSpecifier::Default(default) => {
                    self.tags.insert(default.local.to_id());
                }
                ImportSpecifier::Named(named) => {
                    let imported = match &named.imported {
                        Some(ModuleExportName::Ident(ident)) => &*ident.sym,
                        Some(ModuleExportName::Str(_)) => continue,
                        None => &*named.local.sym,
                    };
                    if imported == NAMED_TAG {
                        self.tags.insert(named.local.to_id());
                    }
                }
                ImportSpecifier::Namespace(_) => {}
            }
        }
    }

    /// Collects `const gql = require(..)` and `const { gql } = require(..)`.
    fn collect_require(&mut self, stmt: &Stmt) {
        let Stmt::Decl(Decl::Var(var)) = stmt else {
            return;
        };
        for declarator in &var.decls {
            if !self.is_macro_require(declarator) {
                continue;
            }
            match &declarator.name {
                Pat::Ident(binding) => {
                    self.tags.insert(binding.id.to_id());
                }
                Pat::Object(object) => {
                    for prop in &object.props {
                        match prop {
                            ObjectPatProp::KeyValue(KeyValuePatProp {
                                key: PropName::Ident(key),
                                value,
                            }) if &*key.sym == NAMED_TAG => {
                                if let Pat::Ident(binding) = &**value {
                                    self.tags.insert(binding.id.to_id());
                                }
                            }
                            ObjectPatProp::Assign(assign) if &*assign.key.sym == NAMED_TAG => {
                                self.tags.insert(assign.key.id.to_id());
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Drops macro `require()` declarators from `stmt`. Returns false when
    /// nothing is left of the statement.
    fn strip_requires(&self, stmt: &mut Stmt) -> bool {
        let Stmt::Decl(Decl::Var(var)) = stmt else {
            return true;
        };
        var.decls.retain(|declarator| !self.is_macro_require(declarator));
        !var.decls.is_empty()
    }

    fn is_tag(&self, tagged: &TaggedTpl) -> bool {
        matches!(&*tagged.tag, Expr::Ident(ident) if self.tags.contains(&ident.to_id()))
    }

    /// Compiles `tagged` and returns its replacement, recording any error.
    fn compile(&mut self, tagged: &TaggedTpl, binding: Option<Atom>) -> Option<Expr> {
        let literal = TaggedLiteral::from_tagged_tpl(tagged, binding);
        let result = Compiler::new(self.config, self.registry, &mut self.fragments).compile(&literal);
        match result {
            Ok(expr) => Some(expr),
            Err(err) => {
                debug!(error = %err, "gql literal failed to compile");
                self.error = Some(err);
                None
            }
        }
    }
}

impl VisitMut for GraphqlTagVisitor<'_> {
    fn visit_mut_module(&mut self, module: &mut Module) {
        for item in &module.body {
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) if self.is_macro_import(import) => {
                    self.collect_import(import);
                }
                ModuleItem::Stmt(stmt) => self.collect_require(stmt),
                _ => {}
            }
        }

        if self.tags.is_empty() {
            return;
        }

        module.visit_mut_children_with(self);

        if self.config.remove_imports {
            module.body.retain_mut(|item| match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => !self.is_macro_import(import),
                ModuleItem::Stmt(stmt) => self.strip_requires(stmt),
                _ => true,
            });
        }
    }

    fn visit_mut_script(&mut self, script: &mut Script) {
        for stmt in &script.body {
            self.collect_require(stmt);
        }

        if self.tags.is_empty() {
            return;
        }

        script.visit_mut_children_with(self);

        if self.config.remove_imports {
            script.body.retain_mut(|stmt| self.strip_requires(stmt));
        }
    }

    fn visit_mut_var_declarator(&mut self, declarator: &mut VarDeclarator) {
        if self.error.is_some() {
            return;
        }

        if let Pat::Ident(name) = &declarator.name
            && let Some(Expr::TaggedTpl(tagged)) = declarator.init.as_deref()
            && self.is_tag(tagged)
        {
            if let Some(compiled) = self.compile(tagged, Some(name.id.sym.clone())) {
                declarator.init = Some(Box::new(compiled));
            }
            return;
        }

        declarator.visit_mut_children_with(self);
    }

    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        if let Expr::TaggedTpl(tagged) = expr
            && self.is_tag(tagged)
        {
            if let Some(compiled) = self.compile(tagged, None) {
                *expr = compiled;
            }
            return;
        }

        expr.visit_mut_children_with(self);
    }
}
