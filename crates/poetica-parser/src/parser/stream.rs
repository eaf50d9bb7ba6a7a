//! Line stream wrapper for the indentation parser.

use crate::score::indent_width;

/// One physical source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'src> {
    /// 1-based line number
    pub number: usize,
    /// Line as written, including indentation
    pub raw: &'src str,
    /// Line with surrounding whitespace removed
    pub text: &'src str,
    /// Leading whitespace width
    pub indent: usize,
}

impl<'src> Line<'src> {
    fn new(index: usize, raw: &'src str) -> Self {
        Self {
            number: index + 1,
            raw,
            text: raw.trim(),
            indent: indent_width(raw),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Line stream with lookahead.
pub struct LineStream<'src> {
    lines: Vec<Line<'src>>,
    pos: usize,
}

impl<'src> LineStream<'src> {
    /// Split `source` on `\n` into a stream.
    pub fn new(source: &'src str) -> Self {
        Self {
            lines: source
                .split('\n')
                .enumerate()
                .map(|(index, raw)| Line::new(index, raw))
                .collect(),
            pos: 0,
        }
    }

    /// Peek at the current line without consuming it.
    pub fn peek(&self) -> Option<Line<'src>> {
        self.lines.get(self.pos).copied()
    }

    /// Advance past the current line and return it.
    pub fn advance(&mut self) -> Option<Line<'src>> {
        let line = self.peek();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// Skip blank lines, then peek at the next non-blank one.
    pub fn peek_non_blank(&mut self) -> Option<Line<'src>> {
        while let Some(line) = self.peek() {
            if !line.is_blank() {
                return Some(line);
            }
            self.pos += 1;
        }
        None
    }
}
