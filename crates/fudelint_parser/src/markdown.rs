//! Markdown processor using markdown-rs (wooorm/markdown-rs).
//!
//! mdast nodes are mapped onto textlint node types. Constructs without a
//! textlint counterpart (frontmatter, math, MDX) become `Html` leaves so
//! their ranges stay visible to rules.

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};
use serde::Deserialize;
use serde_json::Value;

use fudelint_ast::{
    AstArena, DefinitionData, LinkData, NodeData, NodeType, ReferenceData, Span, TxtNode,
};
use fudelint_plugin::{ParseError, Plugin, PluginError, Processor};

/// Options accepted by [`MarkdownPlugin`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown (tables, strikethrough, footnotes).
    #[serde(default = "default_gfm")]
    pub gfm: bool,
}

fn default_gfm() -> bool {
    true
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self { gfm: default_gfm() }
    }
}

/// Plugin providing [`MarkdownProcessor`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownPlugin;

impl Plugin for MarkdownPlugin {
    fn extensions(&self) -> &[&str] {
        &[".md", ".markdown", ".mdown", ".mkdn", ".mkd"]
    }

    fn create_processor(&self, options: Option<&Value>) -> Result<Box<dyn Processor>, PluginError> {
        let options = match options {
            Some(value) => MarkdownOptions::deserialize(value)?,
            None => MarkdownOptions::default(),
        };
        Ok(Box::new(MarkdownProcessor::new(options)))
    }
}

/// Markdown processor.
pub struct MarkdownProcessor {
    options: MarkdownOptions,
}

impl MarkdownProcessor {
    /// Creates a processor with the given options.
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn parse_options(&self) -> ParseOptions {
        if self.options.gfm {
            ParseOptions::gfm()
        } else {
            ParseOptions::default()
        }
    }

    fn convert<'a>(&self, arena: &'a AstArena, node: &Node) -> TxtNode<'a> {
        let span = node
            .position()
            .map(|pos| Span::new(pos.start.offset as u32, pos.end.offset as u32))
            .unwrap_or(Span::new(0, 0));

        let alloc = |s: &str| -> &'a str { arena.alloc_str(s) };
        let alloc_opt = |s: &Option<String>| s.as_deref().map(|s| arena.alloc_str(s));

        let (node_type, value, data) = match node {
            Node::Root(_) => (NodeType::Document, None, NodeData::None),
            Node::Paragraph(_) => (NodeType::Paragraph, None, NodeData::None),
            Node::Heading(h) => (NodeType::Header, None, NodeData::Header(h.depth)),
            Node::Text(t) => (NodeType::Str, Some(alloc(&t.value)), NodeData::None),
            Node::Emphasis(_) => (NodeType::Emphasis, None, NodeData::None),
            Node::Strong(_) => (NodeType::Strong, None, NodeData::None),
            Node::Delete(_) => (NodeType::Delete, None, NodeData::None),
            Node::InlineCode(c) => (NodeType::Code, Some(alloc(&c.value)), NodeData::None),
            Node::Code(c) => (
                NodeType::CodeBlock,
                Some(alloc(&c.value)),
                NodeData::CodeBlock(alloc_opt(&c.lang)),
            ),
            Node::Html(h) => (NodeType::Html, Some(alloc(&h.value)), NodeData::None),
            Node::Link(l) => (
                NodeType::Link,
                None,
                NodeData::Link(LinkData {
                    url: alloc(&l.url),
                    title: alloc_opt(&l.title),
                }),
            ),
            Node::Image(i) => (
                NodeType::Image,
                None,
                NodeData::Link(LinkData {
                    url: alloc(&i.url),
                    title: alloc_opt(&i.title),
                }),
            ),
            Node::List(l) => (NodeType::List, None, NodeData::List(l.ordered)),
            Node::ListItem(_) => (NodeType::ListItem, None, NodeData::None),
            Node::Blockquote(_) => (NodeType::BlockQuote, None, NodeData::None),
            Node::ThematicBreak(_) => (NodeType::HorizontalRule, None, NodeData::None),
            Node::Break(_) => (NodeType::Break, None, NodeData::None),
            Node::Table(_) => (NodeType::Table, None, NodeData::None),
            Node::TableRow(_) => (NodeType::TableRow, None, NodeData::None),
            Node::TableCell(_) => (NodeType::TableCell, None, NodeData::None),
            Node::FootnoteDefinition(d) => (
                NodeType::FootnoteDefinition,
                None,
                NodeData::Reference(ReferenceData {
                    identifier: alloc(&d.identifier),
                    label: alloc_opt(&d.label),
                }),
            ),
            Node::FootnoteReference(r) => (
                NodeType::FootnoteReference,
                None,
                NodeData::Reference(ReferenceData {
                    identifier: alloc(&r.identifier),
                    label: alloc_opt(&r.label),
                }),
            ),
            Node::LinkReference(r) => (
                NodeType::LinkReference,
                None,
                NodeData::Reference(ReferenceData {
                    identifier: alloc(&r.identifier),
                    label: alloc_opt(&r.label),
                }),
            ),
            Node::ImageReference(r) => (
                NodeType::ImageReference,
                None,
                NodeData::Reference(ReferenceData {
                    identifier: alloc(&r.identifier),
                    label: alloc_opt(&r.label),
                }),
            ),
            Node::Definition(d) => (
                NodeType::Definition,
                None,
                NodeData::Definition(DefinitionData {
                    identifier: alloc(&d.identifier),
                    url: alloc(&d.url),
                    title: alloc_opt(&d.title),
                }),
            ),
            _ => (NodeType::Html, None, NodeData::None),
        };

        // Leaves mapped from unsupported constructs drop their children.
        let children: &'a [TxtNode<'a>] = match node.children() {
            Some(children) if node_type.is_parent() => {
                arena.alloc_slice_fill_iter(children.iter().map(|child| self.convert(arena, child)))
            }
            _ => &[],
        };

        TxtNode {
            node_type,
            span,
            children,
            value,
            data,
        }
    }
}

impl Processor for MarkdownProcessor {
    fn name(&self) -> &str {
        "markdown"
    }

    fn supports(&self, extension: &str) -> bool {
        MarkdownPlugin.declares(extension)
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError> {
        let mdast = to_mdast(source, &self.parse_options())
            .map_err(|e| ParseError::invalid_source(e.to_string()))?;
        let mut root = self.convert(arena, &mdast);
        // mdast ends the root at the last node; the document covers all text.
        root.span = Span::new(0, source.len() as u32);
        Ok(root)
    }
}
