use miette::Diagnostic;
use thiserror::Error;

use crate::source::EntityKey;

#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    #[error("invalid draftjs document: expected document blocks to be an array")]
    #[diagnostic(code(draft_tiptap::input::blocks))]
    InvalidBlocks,

    #[error("invalid draftjs document: expected document entityMap to be an object")]
    #[diagnostic(code(draft_tiptap::input::entity_map))]
    InvalidEntityMap,

    #[error("malformed draftjs document: {0}")]
    #[diagnostic(code(draft_tiptap::input::malformed))]
    Malformed(#[from] serde_json::Error),

    #[error("entity range refers to key {key}, which is not in the entityMap")]
    #[diagnostic(code(draft_tiptap::data::missing_entity))]
    MissingEntity { key: EntityKey },

    #[error("entity {key} ({entity_type}) is malformed: {reason}")]
    #[diagnostic(code(draft_tiptap::data::invalid_entity))]
    InvalidEntity {
        key: EntityKey,
        entity_type: String,
        reason: String,
    },

    #[error("don't know how to convert a mention entity")]
    #[diagnostic(
        code(draft_tiptap::config::mention),
        help("supply a mention attribute extractor or an unknown mark handler")
    )]
    MissingMentionHandler,

    #[error("don't know how to convert a {entity_type:?} entity")]
    #[diagnostic(
        code(draft_tiptap::config::entity),
        help("supply an unknown mark handler to convert or drop it")
    )]
    UnsupportedEntity { entity_type: String },

    #[error("conversion hook failed: {message}")]
    #[diagnostic(code(draft_tiptap::hook))]
    Hook { message: String },
}

impl ConvertError {
    /// Error for a caller hook to report a failure through the converter.
    pub fn hook(message: impl Into<String>) -> Self {
        ConvertError::Hook {
            message: message.into(),
        }
    }
}
