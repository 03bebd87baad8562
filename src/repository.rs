//! Collection operations shared by notes and bookmarks.

use crate::item::{Item, generate_id};
use std::collections::HashSet;

/// Everything needed to put a deleted item back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal<T> {
    pub item: T,
    pub index: usize,
    /// The collection as it was right before the delete.
    pub snapshot: Vec<T>,
}

/// How an undo puts a deleted item back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestorePolicy {
    /// Reinsert only the deleted item; later edits to other items survive.
    #[default]
    Merge,
    /// Replace the collection with the pre-delete snapshot.
    Snapshot,
}

impl RestorePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Some(Self::Merge),
            "snapshot" => Some(Self::Snapshot),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Snapshot => "snapshot",
        }
    }
}

/// Create an item from a draft and put it at the front.
pub fn add<T: Item>(items: &mut Vec<T>, draft: T::Draft, now: i64) -> T {
    let id = {
        let taken: HashSet<&str> = items.iter().map(|i| i.id()).collect();
        generate_id(&taken)
    };
    let item = T::create(id, draft, now);
    items.insert(0, item.clone());
    item
}

pub fn find<'a, T: Item>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|i| i.id() == id)
}

/// Merge `patch` into the item with `id`. Returns `false` when there is no
/// such item.
pub fn update<T: Item>(items: &mut [T], id: &str, patch: T::Patch, now: i64) -> bool {
    let Some(item) = items.iter_mut().find(|i| i.id() == id) else {
        return false;
    };
    let previous = item.updated_at();
    item.apply(patch);
    item.set_updated_at(now.max(previous.saturating_add(1)));
    true
}

/// Flip the pinned flag. Returns the new value.
pub fn toggle_pin<T: Item>(items: &mut [T], id: &str, now: i64) -> Option<bool> {
    let pinned = !find(items, id)?.is_pinned();
    update(items, id, T::pin_patch(pinned), now).then_some(pinned)
}

/// Flip the favorite flag. Returns the new value.
pub fn toggle_favorite<T: Item>(items: &mut [T], id: &str, now: i64) -> Option<bool> {
    let favorite = !find(items, id)?.is_favorite();
    update(items, id, T::favorite_patch(favorite), now).then_some(favorite)
}

pub fn remove<T: Item>(items: &mut Vec<T>, id: &str) -> Option<Removal<T>> {
    let index = items.iter().position(|i| i.id() == id)?;
    let snapshot = items.clone();
    let item = items.remove(index);
    Some(Removal { item, index, snapshot })
}

/// Undo a removal. Returns `false` when nothing changed.
pub fn restore<T: Item>(items: &mut Vec<T>, removal: Removal<T>, policy: RestorePolicy) -> bool {
    match policy {
        RestorePolicy::Snapshot => {
            *items = removal.snapshot;
            true
        }
        RestorePolicy::Merge => {
            if items.iter().any(|i| i.id() == removal.item.id()) {
                return false;
            }
            let index = removal.index.min(items.len());
            items.insert(index, removal.item);
            true
        }
    }
}
