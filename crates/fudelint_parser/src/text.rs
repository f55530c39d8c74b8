//! Plain text processor.
//!
//! The text becomes a `Document` of `Paragraph`s separated by blank lines.
//! Each paragraph holds one `Str` per line with a `Break` between lines.

use serde_json::Value;

use fudelint_ast::{AstArena, NodeType, Span, TxtNode};
use fudelint_plugin::{ParseError, Plugin, PluginError, Processor};

/// Plugin providing [`TextProcessor`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPlugin;

impl Plugin for TextPlugin {
    fn extensions(&self) -> &[&str] {
        &[".txt", ".text"]
    }

    fn create_processor(&self, _options: Option<&Value>) -> Result<Box<dyn Processor>, PluginError> {
        Ok(Box::new(TextProcessor))
    }
}

/// Plain text processor.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextProcessor;

impl TextProcessor {
    fn paragraph<'a>(arena: &'a AstArena, source: &str, lines: &[Span]) -> TxtNode<'a> {
        let mut children = Vec::with_capacity(lines.len() * 2);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                let prev = lines[i - 1];
                children.push(TxtNode::new_leaf(
                    NodeType::Break,
                    Span::new(prev.end, line.start),
                ));
            }
            let value = arena.alloc_str(&source[line.to_range()]);
            children.push(TxtNode::new_text(NodeType::Str, *line, value));
        }

        let span = Span::new(lines[0].start, lines[lines.len() - 1].end);
        TxtNode::new_parent(NodeType::Paragraph, span, arena.alloc_slice_copy(&children))
    }
}

impl Processor for TextProcessor {
    fn name(&self) -> &str {
        "text"
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError> {
        let len = u32::try_from(source.len())
            .map_err(|_| ParseError::unsupported("texts larger than 4 GiB"))?;

        let mut paragraphs = Vec::new();
        let mut lines: Vec<Span> = Vec::new();
        let mut offset = 0u32;

        for raw in source.split_inclusive('\n') {
            let content = raw.trim_end_matches(['\n', '\r']);
            if content.trim().is_empty() {
                if !lines.is_empty() {
                    paragraphs.push(Self::paragraph(arena, source, &lines));
                    lines.clear();
                }
            } else {
                lines.push(Span::new(offset, offset + content.len() as u32));
            }
            offset += raw.len() as u32;
        }
        if !lines.is_empty() {
            paragraphs.push(Self::paragraph(arena, source, &lines));
        }

        Ok(TxtNode::new_parent(
            NodeType::Document,
            Span::new(0, len),
            arena.alloc_slice_copy(&paragraphs),
        ))
    }
}
