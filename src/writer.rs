//! Line-oriented text buffer with scoped indentation.

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    level: usize,
}

impl CodeWriter {
    pub fn new() -> Self { Self::default() }

    /// Write one line at the current indentation. Empty lines carry no indentation.
    pub fn print(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if !line.is_empty() {
            for _ in 0..self.level {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(line);
        }
        self.buf.push('\n');
    }

    pub fn newline(&mut self) {
        self.buf.push('\n');
    }

    /// Write a multi-line block, stripping the indentation common to its
    /// non-blank lines and a single leading newline.
    pub fn print_block(&mut self, text: &str) {
        let text = text.strip_prefix('\n').unwrap_or(text);
        let text = text.trim_end_matches([' ', '\t']);
        let margin = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0);
        for line in text.lines() {
            if line.trim().is_empty() {
                self.newline();
            } else {
                self.print(&line[margin..]);
            }
        }
    }

    /// Run `body` one indentation level deeper.
    pub fn indented<F>(&mut self, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.level += 1;
        body(self);
        self.level -= 1;
    }

    pub fn as_str(&self) -> &str { &self.buf }

    pub fn into_string(self) -> String { self.buf }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_indentation_unwinds() {
        let mut w = CodeWriter::new();
        w.print("class A:");
        w.indented(|w| {
            w.print("def f(self):");
            w.indented(|w| w.print("pass"));
            w.newline();
        });
        w.print("x = 1");
        assert_eq!(w.into_string(), "class A:\n    def f(self):\n        pass\n\nx = 1\n");
    }

    #[test]
    fn block_is_dedented() {
        let mut w = CodeWriter::new();
        w.print_block(
            "
            first
                second

            third
            ",
        );
        assert_eq!(w.as_str(), "first\n    second\n\nthird\n");
    }

    #[test]
    fn block_respects_current_level() {
        let mut w = CodeWriter::new();
        w.indented(|w| w.print_block("  a\n  b\n"));
        assert_eq!(w.as_str(), "    a\n    b\n");
    }
}
