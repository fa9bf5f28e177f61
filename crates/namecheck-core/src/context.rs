//! Per-file context used to attach source spans to diagnostics.

use std::path::{Path, PathBuf};

use crate::types::Diagnostic;

/// A source file being analyzed.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Calculates byte offset for a given line and column.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-indexed line number
    /// * `column` - 1-indexed column, counted in characters
    ///
    /// # Returns
    ///
    /// Byte offset from the start of the file, or 0 if out of bounds.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }

        let mut offset = 0;
        for (i, line_content) in self.content.split_inclusive('\n').enumerate() {
            if i + 1 == line {
                let within = line_content
                    .char_indices()
                    .nth(column.saturating_sub(1))
                    .map_or(line_content.len(), |(byte, _)| byte);
                return offset + within;
            }
            offset += line_content.len();
        }

        0
    }

    /// Fills in the byte offset of a diagnostic from its line and column.
    pub fn locate(&self, diagnostic: &mut Diagnostic) {
        let location = &mut diagnostic.location;
        location.offset = self.offset_for(location.line, location.column);
        let available = self.content.len() - location.offset;
        location.length = location.length.min(available);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{DeclId, DeclKind};
    use crate::rule::NamingRule;
    use crate::types::Location;

    fn ctx(content: &str) -> FileContext<'_> {
        FileContext {
            path: Path::new("Test.java"),
            content,
            relative_path: PathBuf::from("Test.java"),
        }
    }

    #[test]
    fn test_offset_calculation() {
        let ctx = ctx("line1\nline2\nline3");
        assert_eq!(ctx.offset_for(1, 1), 0); // Start of line 1
        assert_eq!(ctx.offset_for(2, 1), 6); // Start of line 2
        assert_eq!(ctx.offset_for(2, 3), 8); // "ne" in line2
        assert_eq!(ctx.offset_for(9, 1), 0);
    }

    #[test]
    fn test_offset_handles_crlf() {
        let ctx = ctx("a\r\nbc\r\n");
        assert_eq!(ctx.offset_for(2, 2), 4);
    }

    #[test]
    fn test_offset_counts_characters() {
        let ctx = ctx("x\n/* é */ int Bad;\n");
        let offset = ctx.offset_for(2, 13);
        assert_eq!(&ctx.content[offset..offset + 3], "Bad");
        assert_eq!(ctx.offset_for(2, 99), ctx.content.len());
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/project");
        let path = Path::new("/project/src/Foo.java");
        let ctx = FileContext::new(path, "", root);
        assert_eq!(ctx.relative_path, PathBuf::from("src/Foo.java"));
    }

    #[test]
    fn test_locate_fills_offset() {
        let content = "class Foo {\n  int Bad;\n}\n";
        let ctx = ctx(content);
        let mut d = Diagnostic::new(
            NamingRule::VariableName,
            DeclId::default(),
            DeclKind::Field,
            "Bad",
            Location::new(PathBuf::from("Test.java"), 2, 7).with_span(0, 3),
            "name `Bad` should start with a lowercase letter",
        );
        ctx.locate(&mut d);
        assert_eq!(&content[d.location.offset..d.location.offset + d.location.length], "Bad");
    }
}
