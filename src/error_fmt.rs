//! Rustc-style code frames for transform errors.
//!
//! Renders a message, the `file:line:column` of the offending byte, and the
//! source line with a caret under it.

/// One-based line and column of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

impl LineColumn {
    /// Locates `offset` in `source`. Offsets past the end clamp to the end.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

/// A code frame pointing at one position in a source file.
pub struct ErrorFormat<'a> {
    pub message: &'a str,
    pub source: &'a str,
    /// Byte offset of the error in `source`.
    pub position: usize,
    pub filename: &'a str,
    pub annotation: Option<String>,
    pub help: Option<&'a str>,
}

impl<'a> ErrorFormat<'a> {
    pub fn new(message: &'a str, source: &'a str, position: usize) -> Self {
        Self {
            message,
            source,
            position: position.min(source.len()),
            filename: "input",
            annotation: None,
            help: None,
        }
    }

    pub fn filename(mut self, filename: &'a str) -> Self {
        self.filename = filename;
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }

    /// Formats the frame:
    ///
    /// ```text
    /// error: message
    ///  --> file:line:column
    /// `N | source line`
    /// `  |     ^ annotation`
    /// help: suggestion
    /// ```
    pub fn format(&self) -> String {
        let loc = LineColumn::from_offset(self.source, self.position);

        let mut msg = format!("error: {}\n", self.message);
        msg.push_str(&format!(" --> {}:{}:{}\n", self.filename, loc.line, loc.column));

        if let Some(line_content) = self.source.lines().nth(loc.line - 1) {
            let expanded = line_content.replace('\t', "    ");

            // Visual caret column, with tabs expanded.
            let visual_column: usize = line_content
                .chars()
                .take(loc.column - 1)
                .map(|c| if c == '\t' { 4 } else { 1 })
                .sum();

            let leading = expanded.len() - expanded.trim_start().len();
            let trimmed = expanded.trim();
            let column = visual_column.saturating_sub(leading);

            let (display, caret_col) = truncate_around(trimmed, column);

            let width = loc.line.to_string().len();
            let source_line = format!("{:>width$} | {}", loc.line, display);
            let caret = format!(
                "{:>col$}^ {}",
                "",
                self.annotation.as_deref().unwrap_or(""),
                col = caret_col
            );
            let caret_line = format!("{:>width$} | {}", "", caret);

            let max_len = source_line.len().max(caret_line.len());
            msg.push_str(&format!("`{source_line:<max_len$}`\n"));
            msg.push_str(&format!("`{caret_line:<max_len$}`\n"));
        }

        if let Some(help) = self.help {
            msg.push_str(&format!("help: {help}\n"));
        }

        msg
    }
}

const MAX_LINE_LEN: usize = 80;
const CONTEXT_CHARS: usize = 30;

/// Shortens long lines to a window around `column`, returning the text and
/// the caret column within it.
fn truncate_around(content: &str, column: usize) -> (String, usize) {
    let chars: Vec<char> = content.chars().collect();
    if chars.len() <= MAX_LINE_LEN {
        return (content.to_string(), column);
    }

    let start = column.saturating_sub(CONTEXT_CHARS).min(chars.len());
    let end = (column + CONTEXT_CHARS).min(chars.len());
    let prefix = if start > 0 { "..." } else { "" };
    let suffix = if end < chars.len() { "..." } else { "" };
    let snippet: String = chars[start..end].iter().collect();

    (
        format!("{prefix}{snippet}{suffix}"),
        column - start + prefix.len(),
    )
}
