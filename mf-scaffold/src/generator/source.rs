//! Small line-oriented C# source builder.

use crate::generator::traits::GeneratorConfig;

/// Header placed at the top of every fully generated file.
const AUTO_GENERATED: [&str; 4] = [
    "// <auto-generated>",
    "//     This code was generated by mf-scaffold.",
    "//     Changes to this file will be lost when the code is regenerated.",
    "// </auto-generated>",
];

/// Builds source text with the configured indentation and line endings,
/// C-style bracing (braces on their own lines).
#[derive(Debug)]
pub struct SourceBuilder<'a> {
    config: &'a GeneratorConfig,
    buf: String,
    depth: usize,
}

impl<'a> SourceBuilder<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            buf: String::new(),
            depth: 0,
        }
    }

    /// Emit the auto-generated banner.
    pub fn banner(&mut self) -> &mut Self {
        for line in AUTO_GENERATED {
            self.line(line);
        }
        self
    }

    /// Emit one `using` line per namespace, then a blank line.
    pub fn usings(&mut self, namespaces: &[&str]) -> &mut Self {
        for namespace in namespaces {
            self.line(format!("using {namespace};"));
        }
        self.blank()
    }

    /// Emit an indented line.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            self.buf.push_str(&self.config.indent.indent(self.depth));
            self.buf.push_str(text);
        }
        self.buf.push_str(self.config.line_ending.as_str());
        self
    }

    /// Emit an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Emit `{` and indent.
    pub fn open(&mut self) -> &mut Self {
        self.line("{");
        self.depth += 1;
        self
    }

    /// Dedent and emit `}`.
    pub fn close(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line("}")
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Escape text for a C# regular string literal.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            other => out.push(other),
        }
    }
    out
}

/// Quote text as a C# string literal.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape_literal(text))
}

/// Text safe to place after `//`.
pub fn comment_text(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Text safe inside an XML doc comment.
pub fn doc_text(text: &str) -> String {
    comment_text(text)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::traits::{IndentStyle, LineEnding};

    #[test]
    fn test_builder_indents_and_braces() {
        let config = GeneratorConfig::new()
            .with_indent(IndentStyle::Spaces2)
            .with_line_ending(LineEnding::Lf);
        let mut builder = SourceBuilder::new(&config);
        builder.line("namespace A").open().line("class B").open().close().close();

        assert_eq!(builder.finish(), "namespace A\n{\n  class B\n  {\n  }\n}\n");
    }

    #[test]
    fn test_blank_lines_carry_no_indentation() {
        let config = GeneratorConfig::new();
        let mut builder = SourceBuilder::new(&config);
        builder.open().blank().close();

        assert_eq!(builder.finish(), "{\r\n\r\n}\r\n");
    }

    #[test]
    fn test_usings() {
        let config = GeneratorConfig::new().with_line_ending(LineEnding::Lf);
        let mut builder = SourceBuilder::new(&config);
        builder.usings(&["System", "MFilesAPI"]);

        assert_eq!(builder.finish(), "using System;\nusing MFilesAPI;\n\n");
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal(r#"Say "hi"\now"#), r#"Say \"hi\"\\now"#);
        assert_eq!(quote("Line\nbreak"), r#""Line\nbreak""#);
    }

    #[test]
    fn test_comment_text_is_single_line() {
        assert_eq!(comment_text("a\r\nb"), "a  b");
        assert_eq!(doc_text("R&D <draft>"), "R&amp;D &lt;draft&gt;");
    }
}
