//! Running the transform over a program or a whole source file.

use anyhow::anyhow;
use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, GLOBALS, Globals, Mark, SourceFile, SourceMap, Span, Spanned};
use swc_core::ecma::ast::{EsVersion, Program};
use swc_core::ecma::codegen::to_code_default;
use swc_core::ecma::parser::{EsSyntax, PResult, Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::VisitMutWith;
use tracing::debug;

use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::error_fmt::ErrorFormat;
use crate::registry::FragmentRegistry;
use crate::visitor::GraphqlTagVisitor;

/// Replaces every macro-tagged literal in `program`.
///
/// `registry` carries fragment texts between literals and may be shared by
/// several programs of the same compilation unit.
///
/// Tags are matched by binding, so `program` should already be resolved
/// (see [`resolve_program`]); otherwise a local that shadows the tag name
/// is taken for the tag.
pub fn transform_program(
    program: &mut Program,
    config: &TransformConfig,
    registry: &mut FragmentRegistry,
) -> Result<(), TransformError> {
    let mut visitor = GraphqlTagVisitor::new(config, registry);
    program.visit_mut_with(&mut visitor);
    visitor.finish()
}

/// Parses `src`, transforms it with a fresh registry and prints the result.
///
/// Errors carry a code frame pointing into `src`.
pub fn transform_source(src: &str, filename: &str, config: &TransformConfig) -> anyhow::Result<String> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Custom(filename.to_string()).into(), src.to_string());
    let comments = SingleThreadedComments::default();

    let mut program = parse_program(&fm, filename, &comments).map_err(|err| {
        let message = err.kind().msg();
        anyhow!(
            ErrorFormat::new(&message, src, offset_in(&fm, err.span()))
                .filename(filename)
                .format()
        )
    })?;

    let mut registry = FragmentRegistry::new();
    GLOBALS.set(&Globals::new(), || {
        resolve_program(&mut program, syntax_for(filename));
        transform_program(&mut program, config, &mut registry)
    })
    .map_err(|err| {
        let frame = code_frame(&err, &fm, src, filename);
        anyhow::Error::new(err).context(frame)
    })?;

    debug!(filename, fragments = registry.len(), "transformed source");
    Ok(to_code_default(cm, Some(&comments), &program))
}

/// Runs the SWC resolver so that every identifier carries the syntax context
/// of its binding.
///
/// Must be called inside `GLOBALS.set`.
pub fn resolve_program(program: &mut Program, syntax: Syntax) {
    let unresolved_mark = Mark::new();
    let top_level_mark = Mark::new();
    let typescript = matches!(syntax, Syntax::Typescript(_));
    program.visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, typescript));
}

/// Picks the parser syntax from the file extension.
pub fn syntax_for(filename: &str) -> Syntax {
    let extension = filename.rsplit_once('.').map_or("", |(_, ext)| ext);
    match extension {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax::default()),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

fn parse_program(
    fm: &SourceFile,
    filename: &str,
    comments: &SingleThreadedComments,
) -> PResult<Program> {
    let lexer = Lexer::new(
        syntax_for(filename),
        EsVersion::latest(),
        StringInput::from(fm),
        Some(comments),
    );
    Parser::new_from(lexer).parse_program()
}

fn code_frame(err: &TransformError, fm: &SourceFile, src: &str, filename: &str) -> String {
    let message = err.to_string();
    let mut frame = ErrorFormat::new(&message, src, offset_in(fm, err.span())).filename(filename);
    if let Some(annotation) = err.annotation() {
        frame = frame.annotation(annotation);
    }
    if let Some(help) = err.help() {
        frame = frame.help(help);
    }
    frame.format()
}

/// Byte offset of `span` within `fm`.
fn offset_in(fm: &SourceFile, span: Span) -> usize {
    span.lo.0.saturating_sub(fm.start_pos.0) as usize
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Parses and resolves a program with the TypeScript syntax.
    pub(crate) fn parse_module(src: &str) -> (Lrc<SourceMap>, Program) {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(FileName::Anon.into(), src.to_string());
        let comments = SingleThreadedComments::default();
        let mut program = parse_program(&fm, "input.ts", &comments)
            .unwrap_or_else(|e| panic!("failed to parse {src:?}: {e:?}"));
        GLOBALS.set(&Globals::new(), || {
            resolve_program(&mut program, syntax_for("input.ts"));
        });
        (cm, program)
    }

    pub(crate) fn emit(cm: Lrc<SourceMap>, program: &Program) -> String {
        to_code_default(cm, None, program)
    }

    #[test]
    fn test_syntax_for_extension() {
        assert!(matches!(syntax_for("a.ts"), Syntax::Typescript(TsSyntax { tsx: false, .. })));
        assert!(matches!(syntax_for("a.tsx"), Syntax::Typescript(TsSyntax { tsx: true, .. })));
        assert!(matches!(syntax_for("a.jsx"), Syntax::Es(EsSyntax { jsx: true, .. })));
        assert!(matches!(syntax_for("noext"), Syntax::Es(_)));
    }

    #[test]
    fn test_transform_program_shares_registry() {
        let config = TransformConfig::default();
        let mut registry = FragmentRegistry::new();

        let (_, mut first) = parse_module(
            "import gql from 'graphql-tag.macro';\nexport const F = gql`fragment F on T { z }`;",
        );
        transform_program(&mut first, &config, &mut registry).unwrap();

        let (cm, mut second) = parse_module(
            "import gql from 'graphql-tag.macro';\nimport { F } from './f';\nconst Q = gql`{ ...F }${F}`;",
        );
        transform_program(&mut second, &config, &mut registry).unwrap();

        assert_eq!(registry.get("Q"), Some("fragment F on T { z }{ ...F }"));
        assert!(emit(cm, &second).contains("F.definitions"));
    }

    #[test]
    fn test_program_without_macro_is_unchanged() {
        let src = "const a = 1;\n";
        let out = transform_source(src, "a.js", &TransformConfig::default()).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_syntax_error_help_printed_once() {
        let src = "import gql from 'graphql-tag.macro';\nconst Q = gql`\"Docs\" query { a }`;\n";
        let err = transform_source(src, "a.js", &TransformConfig::default()).unwrap_err();
        let frame = err.to_string();

        assert!(frame.contains("unexpected description"), "got:\n{frame}");
        assert_eq!(frame.matches("help:").count(), 1, "got:\n{frame}");
        assert!(frame.contains("help: descriptions are supported only on type system definitions"));
    }

    #[test]
    fn test_unresolved_program_matches_by_name() {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(
            FileName::Anon.into(),
            "import gql from 'graphql-tag.macro';\nconst Q = gql`{ a }`;".to_string(),
        );
        let comments = SingleThreadedComments::default();
        let mut program = parse_program(&fm, "input.js", &comments).unwrap();

        let mut registry = FragmentRegistry::new();
        transform_program(&mut program, &TransformConfig::default(), &mut registry).unwrap();
        assert_eq!(registry.get("Q"), Some("{ a }"));
    }

    #[test]
    fn test_js_parse_error_has_frame() {
        let err = transform_source("const = ;", "broken.js", &TransformConfig::default()).unwrap_err();
        assert!(err.to_string().contains(" --> broken.js:1:"), "got:\n{err}");
    }
}
