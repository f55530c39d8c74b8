//! TxtNode definition.

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::{NodeType, Span};

/// A node in the structural tree.
///
/// The `'a` lifetime ties the node to the [`AstArena`](crate::AstArena)
/// holding its children and text.
///
/// # Example
///
/// ```rust
/// use fudelint_ast::{AstArena, TxtNode, NodeType, Span};
///
/// let arena = AstArena::new();
/// let text_node = arena.alloc(TxtNode::new_text(NodeType::Str, Span::new(0, 5), "Hello"));
/// let children = arena.alloc_slice_copy(&[*text_node]);
/// let paragraph = TxtNode::new_parent(NodeType::Paragraph, Span::new(0, 5), children);
///
/// assert_eq!(paragraph.children[0].text(), Some("Hello"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TxtNode<'a> {
    /// The type of this node.
    pub node_type: NodeType,

    /// Byte span in the source text.
    pub span: Span,

    /// Child nodes (for parent nodes).
    pub children: &'a [TxtNode<'a>],

    /// Text value (for text nodes like Str, Code, CodeBlock).
    pub value: Option<&'a str>,

    /// Additional node-specific data.
    pub data: NodeData<'a>,
}

/// Node-specific attributes.
#[derive(Debug, Clone, Copy, Default)]
pub enum NodeData<'a> {
    #[default]
    None,
    Header(u8),
    List(bool),
    CodeBlock(Option<&'a str>),
    Link(LinkData<'a>),
    Reference(ReferenceData<'a>),
    Definition(DefinitionData<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct LinkData<'a> {
    pub url: &'a str,
    pub title: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReferenceData<'a> {
    pub identifier: &'a str,
    pub label: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub struct DefinitionData<'a> {
    pub identifier: &'a str,
    pub url: &'a str,
    pub title: Option<&'a str>,
}

impl<'a> TxtNode<'a> {
    /// Creates a new parent node with children.
    #[inline]
    pub const fn new_parent(node_type: NodeType, span: Span, children: &'a [TxtNode<'a>]) -> Self {
        Self {
            node_type,
            span,
            children,
            value: None,
            data: NodeData::None,
        }
    }

    /// Creates a new text node with a value.
    #[inline]
    pub const fn new_text(node_type: NodeType, span: Span, value: &'a str) -> Self {
        Self {
            node_type,
            span,
            children: &[],
            value: Some(value),
            data: NodeData::None,
        }
    }

    /// Creates a new leaf node (no children, no value).
    #[inline]
    pub const fn new_leaf(node_type: NodeType, span: Span) -> Self {
        Self {
            node_type,
            span,
            children: &[],
            value: None,
            data: NodeData::None,
        }
    }

    /// Replaces the node data.
    #[inline]
    pub const fn with_data(mut self, data: NodeData<'a>) -> Self {
        self.data = data;
        self
    }

    /// Returns true if this node has children.
    #[inline]
    pub const fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the text value of a text node.
    ///
    /// Parent nodes return `None`; use the source text for their raw content.
    #[inline]
    pub const fn text(&self) -> Option<&'a str> {
        self.value
    }

    /// Counts this node and all of its descendants.
    pub fn descendant_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TxtNode::descendant_count)
            .sum::<usize>()
    }
}

impl Serialize for TxtNode<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.node_type)?;
        map.serialize_entry("range", &[self.span.start, self.span.end])?;

        if self.node_type.is_parent() || self.has_children() {
            map.serialize_entry("children", self.children)?;
        }
        if let Some(value) = self.value {
            map.serialize_entry("value", value)?;
        }

        match self.data {
            NodeData::None => {}
            NodeData::Header(depth) => map.serialize_entry("depth", &depth)?,
            NodeData::List(ordered) => map.serialize_entry("ordered", &ordered)?,
            NodeData::CodeBlock(lang) => {
                if let Some(lang) = lang {
                    map.serialize_entry("lang", lang)?;
                }
            }
            NodeData::Link(link) => {
                map.serialize_entry("url", link.url)?;
                if let Some(title) = link.title {
                    map.serialize_entry("title", title)?;
                }
            }
            NodeData::Reference(reference) => {
                map.serialize_entry("identifier", reference.identifier)?;
                if let Some(label) = reference.label {
                    map.serialize_entry("label", label)?;
                }
            }
            NodeData::Definition(def) => {
                map.serialize_entry("identifier", def.identifier)?;
                map.serialize_entry("url", def.url)?;
                if let Some(title) = def.title {
                    map.serialize_entry("title", title)?;
                }
            }
        }

        map.end()
    }
}
