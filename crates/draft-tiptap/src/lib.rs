//! draft-tiptap: convert Draft.js raw content into Tiptap documents.
//!
//! Draft.js stores a document as a flat list of blocks, each holding plain
//! text plus style and entity ranges over codepoint offsets. Tiptap (and
//! ProseMirror) want a tree: block nodes holding text runs, each run
//! carrying the marks active over it.
//!
//! This crate provides:
//! - `SourceDocument` and friends: serde types for Draft.js raw content
//! - `overlay`: the range overlay that partitions a block's text
//! - `Document` and friends: serde types for Tiptap JSON
//! - `convert` / `convert_value` / `convert_str`: the conversion itself
//! - `ConvertConfig`: optional hooks for mentions, unknown entities and
//!   unknown block types
//!
//! ```ignore
//! use draft_tiptap::{ConvertConfig, convert_str};
//!
//! let config = ConvertConfig::new().with_mention_attrs(|m| m.attrs_from_fields("id", "name"));
//! let doc = convert_str(raw_json, &config)?;
//! println!("{}", serde_json::to_string(&doc)?);
//! ```

pub mod config;
pub mod convert;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod list;
pub mod marks;
pub mod node;
pub mod overlay;
pub mod source;
pub mod text;

pub use config::ConvertConfig;
pub use convert::{Context, convert, convert_str, convert_value};
pub use cursor::BlockCursor;
pub use error::ConvertError;
pub use node::{
    BlockNode, CodeBlockAttrs, CustomNode, Document, HeadingAttrs, InlineNode, LinkAttrs, ListItem,
    Mark, Node,
};
pub use source::{
    BlockType, Entity, EntityKey, EntityMap, EntityRange, ListKind, MentionEntity, RawEntity,
    SourceBlock, SourceDocument, StyleRange,
};
pub use text::{CharIndex, char_len, char_slice};
