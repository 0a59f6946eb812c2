//! Mark resolution for overlay segments, and the mention lift.
//!
//! Draft.js stores mentions as entities (so they come out of the overlay as
//! marks), but Tiptap models a mention as its own inline node.

use crate::convert::Context;
use crate::error::ConvertError;
use crate::node::{InlineNode, Mark};
use crate::overlay::Segment;
use crate::source::{Entity, EntityRange};

/// Marks for one segment: entity marks first, then style marks, each in
/// range order. A mark type that is already present is not added again.
pub fn segment_marks(segment: &Segment<'_>, ctx: &Context<'_>) -> Result<Vec<Mark>, ConvertError> {
    let mut marks: Vec<Mark> = Vec::with_capacity(segment.entities.len() + segment.styles.len());

    for range in &segment.entities {
        if let Some(mark) = entity_mark(range, ctx)? {
            push_unique(&mut marks, mark);
        }
    }
    for range in &segment.styles {
        push_unique(&mut marks, Mark::style(&range.style));
    }

    Ok(marks)
}

fn push_unique(marks: &mut Vec<Mark>, mark: Mark) {
    if !marks.iter().any(|m| m.mark_type() == mark.mark_type()) {
        marks.push(mark);
    }
}

/// Resolve an entity range to a mark through the entity map and the hooks.
///
/// `Ok(None)` means the unknown mark hook chose to drop the entity.
pub fn entity_mark(range: &EntityRange, ctx: &Context<'_>) -> Result<Option<Mark>, ConvertError> {
    let entity = ctx
        .entity_map()
        .get(&range.key)
        .ok_or(ConvertError::MissingEntity { key: range.key })?;
    let config = ctx.config();

    match entity {
        Entity::Link(link) => Ok(Some(Mark::link(link.url.as_str()))),
        Entity::Mention(mention) => {
            if let Some(attrs) = config.mention_attrs() {
                return Ok(Some(Mark::Mention(attrs(mention))));
            }
            match config.unknown_mark_handler() {
                Some(handler) => Ok(unknown_mark(handler(entity), entity)),
                None => Err(ConvertError::MissingMentionHandler),
            }
        }
        Entity::Other(raw) => match config.unknown_mark_handler() {
            Some(handler) => Ok(unknown_mark(handler(entity), entity)),
            None => Err(ConvertError::UnsupportedEntity {
                entity_type: raw.entity_type.clone(),
            }),
        },
        Entity::Invalid { raw, reason } => Err(ConvertError::InvalidEntity {
            key: range.key,
            entity_type: raw.entity_type.clone(),
            reason: reason.clone(),
        }),
    }
}

fn unknown_mark(mark: Option<Mark>, entity: &Entity) -> Option<Mark> {
    if mark.is_none() {
        tracing::debug!(entity_type = entity.entity_type(), "dropped entity");
    }
    mark
}

/// Replace a text run carrying a mention mark with a mention node.
///
/// Any mark of type `mention` counts, including a custom one returned by the
/// unknown mark hook. The run's text and every other mark are discarded.
/// Only the first mention mark counts.
pub fn lift_mention(node: InlineNode) -> InlineNode {
    let InlineNode::Text { text, marks } = node else {
        return node;
    };
    let mut kept = Vec::with_capacity(marks.len());
    for mark in marks {
        match mark {
            Mark::Mention(attrs) => return InlineNode::Mention { attrs },
            Mark::Custom { mark_type, attrs } if mark_type == MENTION_MARK => {
                return InlineNode::Mention {
                    attrs: attrs.unwrap_or_default(),
                };
            }
            other => kept.push(other),
        }
    }
    InlineNode::Text { text, marks: kept }
}

const MENTION_MARK: &str = "mention";
