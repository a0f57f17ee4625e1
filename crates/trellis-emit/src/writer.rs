//! Indentation-aware output buffer.

use std::fmt;

/// String builder that tracks an indentation level.
///
/// [`line`](Self::line) prefixes the current indentation; [`write`](Self::write)
/// appends text as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeWriter {
    buffer: String,
    indent_unit: String,
    level: usize,
    comment_prefix: String,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new("    ", 0)
    }
}

impl CodeWriter {
    #[must_use]
    pub fn new(indent_unit: impl Into<String>, level: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_unit: indent_unit.into(),
            level,
            comment_prefix: "#".to_string(),
        }
    }

    #[must_use]
    pub fn with_comment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.comment_prefix = prefix.into();
        self
    }

    pub fn set_comment_prefix(&mut self, prefix: impl Into<String>) {
        self.comment_prefix = prefix.into();
    }

    /// Writes one indented line. An empty line gets no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.buffer.push_str(&self.indent_unit);
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self
    }

    pub fn write(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buffer.push_str(text.as_ref());
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Writes each line of `text` behind the comment prefix.
    pub fn comment(&mut self, text: impl AsRef<str>) -> &mut Self {
        for line in text.as_ref().lines() {
            let commented = if line.is_empty() {
                self.comment_prefix.clone()
            } else {
                format!("{} {line}", self.comment_prefix)
            };
            self.line(commented);
        }
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Removes and returns everything written after byte offset `at`.
    pub fn split_off(&mut self, at: usize) -> String {
        if at >= self.buffer.len() {
            return String::new();
        }
        self.buffer.split_off(at)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.buffer
    }
}

impl fmt::Write for CodeWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut writer = CodeWriter::new("  ", 0);
        writer.line("proc a {} {");
        writer.indent().line("puts a").blank();
        writer.dedent().line("}");
        insta::assert_snapshot!(writer.finish().trim_end(), @r"
        proc a {} {
          puts a

        }
        ");
    }

    #[test]
    fn test_comment_prefix() {
        let mut writer = CodeWriter::new("\t", 1).with_comment_prefix("//");
        writer.comment("first\nsecond");
        assert_eq!(writer.as_str(), "\t// first\n\t// second\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut writer = CodeWriter::default();
        writer.dedent().dedent();
        assert_eq!(writer.level(), 0);
    }

    #[test]
    fn test_split_off() {
        let mut writer = CodeWriter::default();
        writer.line("kept");
        let mark = writer.len();
        writer.line("taken");
        assert_eq!(writer.split_off(mark), "taken\n");
        assert_eq!(writer.as_str(), "kept\n");
        assert_eq!(writer.split_off(100), "");
    }
}
