//! Structured content blocks.
//!
//! - `content`: the decoded block model (types, style and entity ranges)
//! - `group`: collapsing consecutive list items into list groups
//! - `atomic`: resolving atomic blocks to media, code or dividers

mod atomic;
mod content;
mod group;

pub use atomic::{resolve_atomic, strip_fence, Fence};
pub use content::{
    BlockType, ContentBlock, EntityKey, EntityRange, InlineStyle, InlineStyleRange, ListKind,
};
pub use group::{group_blocks, BlockGroup, ListItems};

pub(crate) use content::lenient_vec;
