//! Grouping of consecutive list items.

use smallvec::SmallVec;

use super::content::{ContentBlock, ListKind};

/// Items of one list group. Most lists are short.
pub type ListItems<'a> = SmallVec<[&'a ContentBlock; 4]>;

/// A run of blocks collapsed into one list, or a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockGroup<'a> {
    UnorderedList(ListItems<'a>),
    OrderedList(ListItems<'a>),
    Single(&'a ContentBlock),
}

impl<'a> BlockGroup<'a> {
    fn list(kind: ListKind, first: &'a ContentBlock) -> Self {
        let mut items = ListItems::new();
        items.push(first);
        match kind {
            ListKind::Unordered => Self::UnorderedList(items),
            ListKind::Ordered => Self::OrderedList(items),
        }
    }

    /// List kind of this group, `None` for singles.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            Self::UnorderedList(_) => Some(ListKind::Unordered),
            Self::OrderedList(_) => Some(ListKind::Ordered),
            Self::Single(_) => None,
        }
    }
}

/// Group blocks in one pass.
///
/// A list item joins the previous group only if that group is a list of the
/// same kind; every other block starts its own `Single` group.
pub fn group_blocks(blocks: &[ContentBlock]) -> Vec<BlockGroup<'_>> {
    let mut groups: Vec<BlockGroup<'_>> = Vec::with_capacity(blocks.len());

    for block in blocks {
        let Some(kind) = block.kind.list_kind() else {
            groups.push(BlockGroup::Single(block));
            continue;
        };

        match groups.last_mut() {
            Some(BlockGroup::UnorderedList(items)) if kind == ListKind::Unordered => items.push(block),
            Some(BlockGroup::OrderedList(items)) if kind == ListKind::Ordered => items.push(block),
            _ => groups.push(BlockGroup::list(kind, block)),
        }
    }

    groups
}
