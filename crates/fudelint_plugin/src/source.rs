//! Source text with a line index for offset-to-position mapping.

use fudelint_ast::{Position, Span, TxtNode};

/// The text of one pass together with its line starts.
///
/// Line breaks are `\n`; a preceding `\r` stays part of the line.
#[derive(Debug, Clone)]
pub struct SourceCode<'a> {
    text: &'a str,
    line_starts: Vec<u32>,
}

impl<'a> SourceCode<'a> {
    /// Indexes `text`.
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                text.bytes()
                    .enumerate()
                    .filter(|(_, b)| *b == b'\n')
                    .map(|(i, _)| i as u32 + 1),
            )
            .collect();
        Self { text, line_starts }
    }

    /// The full text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length of the text in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.text.len() as u32
    }

    /// Returns true if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines. An empty text has one line.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the text covered by `span`, if it is in bounds.
    pub fn slice(&self, span: Span) -> Option<&'a str> {
        self.text.get(span.to_range())
    }

    /// Returns the raw source of a node.
    pub fn node_text(&self, node: &TxtNode<'_>) -> Option<&'a str> {
        self.slice(node.span)
    }

    /// Returns true if `index` is within the text and on a `char` boundary.
    /// The end of the text counts as in bounds.
    #[inline]
    pub fn is_valid_offset(&self, index: u32) -> bool {
        self.text.is_char_boundary(index as usize)
    }

    /// Maps a byte offset to a 1-based line and column.
    ///
    /// Offsets past the end resolve to the end of the text.
    pub fn position(&self, index: u32) -> Position {
        let index = index.min(self.len());
        let line = self.line_starts.partition_point(|&start| start <= index);
        let line_start = self.line_starts[line - 1];
        let column = match self.text.get(line_start as usize..index as usize) {
            Some(prefix) => prefix.chars().count() as u32,
            None => index - line_start,
        };
        Position::new(line as u32, column + 1)
    }
}
