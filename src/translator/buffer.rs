use std::io::{self, Write};

const INDENT_UNIT: &str = "  ";

/// Receives tokens for the line currently being built.
///
/// Strategy hooks only ever see this view of the output, so they can append
/// text but never end a line or touch indentation.
pub trait TokenSink {
    fn append(&mut self, token: &str);
}

/// Accumulates tokens for the current line and writes finished lines to `sink`.
pub struct EmitBuffer<W: Write> {
    sink: W,
    line: String,
    depth: usize,
}

impl<W: Write> EmitBuffer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            line: String::new(),
            depth: 0,
        }
    }

    /// Writes the pending line prefixed with the current indentation, then resets it.
    /// A closing line is dedented before it is written; an opening line indents
    /// whatever follows it.
    pub fn flush_line(&mut self, open_block: bool, close_block: bool) -> io::Result<()> {
        if close_block {
            self.depth = self.depth.saturating_sub(1);
        }

        if !self.line.is_empty() {
            for _ in 0..self.depth {
                self.sink.write_all(INDENT_UNIT.as_bytes())?;
            }
        }
        self.sink.write_all(self.line.as_bytes())?;
        self.sink.write_all(b"\n")?;
        self.line.clear();

        if open_block {
            self.depth += 1;
        }
        Ok(())
    }

    /// Copies `text` to the sink untouched, bypassing line and indentation state.
    pub fn write_verbatim(&mut self, text: &str) -> io::Result<()> {
        self.sink.write_all(text.as_bytes())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> TokenSink for EmitBuffer<W> {
    fn append(&mut self, token: &str) {
        self.line.push_str(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn rendered(buffer: EmitBuffer<Vec<u8>>) -> String {
        String::from_utf8(buffer.into_inner()).expect("buffer output is utf-8")
    }

    #[test]
    fn indents_two_spaces_per_open_block() -> io::Result<()> {
        let mut buffer = EmitBuffer::new(Vec::new());
        buffer.append("function main()");
        buffer.append(" {");
        buffer.flush_line(true, false)?;
        buffer.append("if (x)");
        buffer.append(" {");
        buffer.flush_line(true, false)?;
        buffer.append("y;");
        buffer.flush_line(false, false)?;
        buffer.append("}");
        buffer.flush_line(false, true)?;
        buffer.append("}");
        buffer.flush_line(false, true)?;

        assert_eq!(
            rendered(buffer),
            indoc! {"
                function main() {
                  if (x) {
                    y;
                  }
                }
            "}
        );
        Ok(())
    }

    #[test]
    fn empty_line_has_no_indentation() -> io::Result<()> {
        let mut buffer = EmitBuffer::new(Vec::new());
        buffer.append("{");
        buffer.flush_line(true, false)?;
        buffer.flush_line(false, false)?;
        assert_eq!(buffer.depth(), 1);
        assert_eq!(rendered(buffer), "{\n\n");
        Ok(())
    }

    #[test]
    fn verbatim_text_skips_line_state() -> io::Result<()> {
        let mut buffer = EmitBuffer::new(Vec::new());
        buffer.append("pending");
        buffer.write_verbatim("raw\n")?;
        buffer.flush_line(false, false)?;
        assert_eq!(rendered(buffer), "raw\npending\n");
        Ok(())
    }
}
