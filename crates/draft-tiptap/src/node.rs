//! Tiptap (ProseMirror JSON) document model.
//!
//! Only serialization is provided: the output vocabulary (`type`, `attrs`,
//! `content`, `marks`, `text`, ...) is what downstream Tiptap renderers
//! consume, so every field name here is load-bearing.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use smol_str::SmolStr;

/// Link target attribute every converted link carries.
pub const LINK_TARGET: &str = "_blank";
/// Link rel attribute every converted link carries.
pub const LINK_REL: &str = "noopener noreferrer nofollow";

/// Root node: `{ "type": "doc", "content": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "doc")]
pub struct Document {
    pub content: Vec<BlockNode>,
}

impl Document {
    pub fn to_json(&self) -> Value {
        // No non-string map keys anywhere in the model, so this never fails.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockNode {
    Paragraph {
        content: Vec<InlineNode>,
    },
    Heading {
        attrs: HeadingAttrs,
        content: Vec<InlineNode>,
    },
    BulletList {
        content: Vec<ListItem>,
    },
    OrderedList {
        content: Vec<ListItem>,
    },
    Blockquote {
        content: Vec<InlineNode>,
    },
    CodeBlock {
        attrs: CodeBlockAttrs,
        content: Vec<InlineNode>,
    },
    /// Node produced by a caller hook, serialized as-is.
    #[serde(untagged)]
    Custom(CustomNode),
}

impl BlockNode {
    pub fn paragraph(content: Vec<InlineNode>) -> Self {
        BlockNode::Paragraph { content }
    }

    pub fn heading(level: u8, content: Vec<InlineNode>) -> Self {
        BlockNode::Heading {
            attrs: HeadingAttrs { level },
            content,
        }
    }

    /// Tiptap node type name.
    pub fn node_type(&self) -> &str {
        match self {
            BlockNode::Paragraph { .. } => "paragraph",
            BlockNode::Heading { .. } => "heading",
            BlockNode::BulletList { .. } => "bulletList",
            BlockNode::OrderedList { .. } => "orderedList",
            BlockNode::Blockquote { .. } => "blockquote",
            BlockNode::CodeBlock { .. } => "codeBlock",
            BlockNode::Custom(custom) => custom.node_type.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeBlockAttrs {
    /// Always serialized, `null` when unknown.
    pub language: Option<String>,
}

/// `{ "type": "listItem", "content": [paragraph] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "listItem")]
pub struct ListItem {
    pub content: Vec<BlockNode>,
}

impl ListItem {
    pub fn with_paragraph(content: Vec<InlineNode>) -> Self {
        Self {
            content: vec![BlockNode::paragraph(content)],
        }
    }
}

/// Caller-defined node, for block types outside the fixed table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomNode {
    #[serde(rename = "type")]
    pub node_type: SmolStr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
}

impl CustomNode {
    pub fn new(node_type: impl Into<SmolStr>) -> Self {
        Self {
            node_type: node_type.into(),
            attrs: None,
            content: None,
        }
    }

    pub fn with_attrs(mut self, attrs: Map<String, Value>) -> Self {
        self.attrs = Some(attrs);
        self
    }

    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = Some(content);
        self
    }
}

/// Any node, for the content of custom nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Block(BlockNode),
    ListItem(ListItem),
    Inline(InlineNode),
}

impl From<BlockNode> for Node {
    fn from(node: BlockNode) -> Self {
        Node::Block(node)
    }
}

impl From<ListItem> for Node {
    fn from(node: ListItem) -> Self {
        Node::ListItem(node)
    }
}

impl From<InlineNode> for Node {
    fn from(node: InlineNode) -> Self {
        Node::Inline(node)
    }
}

/// An inline node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InlineNode {
    /// Text run. `marks` is left out of the JSON entirely when empty.
    Text {
        text: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    Mention {
        attrs: Map<String, Value>,
    },
}

impl InlineNode {
    pub fn text(text: impl Into<String>) -> Self {
        InlineNode::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        InlineNode::Text {
            text: text.into(),
            marks,
        }
    }
}

/// Link mark attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkAttrs {
    pub href: String,
    pub target: SmolStr,
    pub rel: SmolStr,
}

impl LinkAttrs {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: SmolStr::new(LINK_TARGET),
            rel: SmolStr::new(LINK_REL),
        }
    }
}

/// Inline formatting mark.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// A lower-cased Draft.js inline style (`bold`, `italic`, `code`, ...).
    Style(SmolStr),
    Link(LinkAttrs),
    /// Transient: lifted into a mention node before output.
    Mention(Map<String, Value>),
    /// Produced by the unknown mark hook.
    Custom {
        mark_type: SmolStr,
        attrs: Option<Map<String, Value>>,
    },
}

impl Mark {
    /// Style mark from a Draft.js style token, lower-casing it.
    pub fn style(token: &str) -> Self {
        Mark::Style(SmolStr::new(token.to_lowercase()))
    }

    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link(LinkAttrs::new(href))
    }

    pub fn custom(mark_type: impl Into<SmolStr>, attrs: Option<Map<String, Value>>) -> Self {
        Mark::Custom {
            mark_type: mark_type.into(),
            attrs,
        }
    }

    /// Tiptap mark type name.
    pub fn mark_type(&self) -> &str {
        match self {
            Mark::Style(name) => name.as_str(),
            Mark::Link(_) => "link",
            Mark::Mention(_) => "mention",
            Mark::Custom { mark_type, .. } => mark_type.as_str(),
        }
    }
}

impl Serialize for Mark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let has_attrs = matches!(
            self,
            Mark::Link(_) | Mark::Mention(_) | Mark::Custom { attrs: Some(_), .. }
        );
        let mut map = serializer.serialize_map(Some(if has_attrs { 2 } else { 1 }))?;
        map.serialize_entry("type", self.mark_type())?;
        match self {
            Mark::Style(_) => {}
            Mark::Link(attrs) => map.serialize_entry("attrs", attrs)?,
            Mark::Mention(attrs) => map.serialize_entry("attrs", attrs)?,
            Mark::Custom { attrs, .. } => {
                if let Some(attrs) = attrs {
                    map.serialize_entry("attrs", attrs)?;
                }
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_text_without_marks_omits_field() {
        let node = InlineNode::text("plain");
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({ "type": "text", "text": "plain" })
        );
    }

    #[test]
    fn test_marks_serialize() {
        let node = InlineNode::marked(
            "road.is",
            vec![Mark::link("https://www.road.is/"), Mark::style("BOLD")],
        );
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "text",
                "text": "road.is",
                "marks": [
                    {
                        "type": "link",
                        "attrs": {
                            "href": "https://www.road.is/",
                            "target": "_blank",
                            "rel": "noopener noreferrer nofollow"
                        }
                    },
                    { "type": "bold" }
                ]
            })
        );
    }

    #[test]
    fn test_block_nodes_serialize() {
        let doc = Document {
            content: vec![
                BlockNode::heading(2, vec![InlineNode::text("Title")]),
                BlockNode::CodeBlock {
                    attrs: CodeBlockAttrs::default(),
                    content: vec![InlineNode::text("let x = 1;")],
                },
                BlockNode::BulletList {
                    content: vec![ListItem::with_paragraph(vec![InlineNode::text("one")])],
                },
            ],
        };

        assert_eq!(
            doc.to_json(),
            json!({
                "type": "doc",
                "content": [
                    {
                        "type": "heading",
                        "attrs": { "level": 2 },
                        "content": [{ "type": "text", "text": "Title" }]
                    },
                    {
                        "type": "codeBlock",
                        "attrs": { "language": null },
                        "content": [{ "type": "text", "text": "let x = 1;" }]
                    },
                    {
                        "type": "bulletList",
                        "content": [{
                            "type": "listItem",
                            "content": [{
                                "type": "paragraph",
                                "content": [{ "type": "text", "text": "one" }]
                            }]
                        }]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_custom_node_serializes_verbatim() {
        let mut attrs = Map::new();
        attrs.insert("src".into(), json!("a.png"));
        let node = BlockNode::Custom(
            CustomNode::new("image")
                .with_attrs(attrs)
                .with_content(vec![InlineNode::text("alt").into()]),
        );

        assert_eq!(node.node_type(), "image");
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "image",
                "attrs": { "src": "a.png" },
                "content": [{ "type": "text", "text": "alt" }]
            })
        );
    }

    #[test]
    fn test_custom_mark_without_attrs() {
        assert_eq!(
            serde_json::to_value(Mark::custom("highlight", None)).unwrap(),
            json!({ "type": "highlight" })
        );
    }

    #[test]
    fn test_style_mark_is_lower_cased() {
        assert_eq!(Mark::style("STRIKETHROUGH").mark_type(), "strikethrough");
    }
}
