//! The store, the toast queue and a clock, behind one handle.
//!
//! Every mutation goes through here so that timestamps, persistence and
//! undo bookkeeping stay in step.

use crate::clock::Clock;
use crate::error::Result;
use crate::item::{Bookmark, BookmarkDraft, Item, ItemKind, Note};
use crate::metadata::{FetchOutcome, MetadataFetcher, fetch_metadata};
use crate::repository::{self, Removal, RestorePolicy};
use crate::store::{AppState, Storage, Store, Theme};
use crate::tags::tag_index;
use crate::toast::{Toast, ToastKind, ToastQueue, UndoAction};

/// Maps an item type to its undo payload.
pub trait Undoable: Item {
    fn undo_action(removal: Removal<Self>) -> UndoAction;
}

impl Undoable for Note {
    fn undo_action(removal: Removal<Self>) -> UndoAction {
        UndoAction::Note(removal)
    }
}

impl Undoable for Bookmark {
    fn undo_action(removal: Removal<Self>) -> UndoAction {
        UndoAction::Bookmark(removal)
    }
}

pub struct Vault<S: Storage, C: Clock> {
    store: Store<S>,
    toasts: ToastQueue,
    policy: RestorePolicy,
    clock: C,
    last_tick: i64,
}

impl<S: Storage, C: Clock> Vault<S, C> {
    pub fn open(storage: S, clock: C, toast_duration: u64, policy: RestorePolicy) -> Self {
        let last_tick = clock.now_millis();
        Self {
            store: Store::load(storage),
            toasts: ToastQueue::new(toast_duration),
            policy,
            clock,
            last_tick,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn policy(&self) -> RestorePolicy {
        self.policy
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn items<T: Item>(&self) -> &[T] {
        T::collection(self.store.state())
    }

    pub fn get<T: Item>(&self, id: &str) -> Option<&T> {
        repository::find(self.items::<T>(), id)
    }

    pub fn tag_index(&self) -> Vec<String> {
        tag_index(self.store.state())
    }

    pub fn add<T: Item>(&mut self, draft: T::Draft) -> Result<T> {
        let now = self.clock.now_millis();
        let item = self.store.mutate(|state| repository::add(T::collection_mut(state), draft, now))?;
        log::info!("Added {} {}", T::KIND.label().to_lowercase(), item.id());
        Ok(item)
    }

    /// Merge `patch` into the item. `Ok(false)` when the id is unknown; the
    /// state is then left untouched and nothing is written.
    pub fn update<T: Item>(&mut self, id: &str, patch: T::Patch) -> Result<bool> {
        if self.get::<T>(id).is_none() {
            return Ok(false);
        }
        let now = self.clock.now_millis();
        let updated =
            self.store.mutate(|state| repository::update(T::collection_mut(state), id, patch, now))?;
        log::info!("Updated {} {id}", T::KIND.label().to_lowercase());
        Ok(updated)
    }

    pub fn toggle_pin<T: Item>(&mut self, id: &str) -> Result<Option<bool>> {
        if self.get::<T>(id).is_none() {
            return Ok(None);
        }
        let now = self.clock.now_millis();
        Ok(self.store.mutate(|state| repository::toggle_pin(T::collection_mut(state), id, now))?)
    }

    pub fn toggle_favorite<T: Item>(&mut self, id: &str) -> Result<Option<bool>> {
        if self.get::<T>(id).is_none() {
            return Ok(None);
        }
        let now = self.clock.now_millis();
        Ok(self
            .store
            .mutate(|state| repository::toggle_favorite(T::collection_mut(state), id, now))?)
    }

    /// Delete an item and open a toast that can undo it. Returns the toast
    /// id, or `None` when there was nothing to delete.
    pub fn delete<T: Undoable>(&mut self, id: &str) -> Result<Option<u64>> {
        if self.get::<T>(id).is_none() {
            return Ok(None);
        }
        let Some(removal) = self.store.mutate(|state| repository::remove(T::collection_mut(state), id))?
        else {
            return Ok(None);
        };
        let message = format!("{} \"{}\" deleted", T::KIND.label(), removal.item.display_title());
        log::info!("Deleted {} {id}", T::KIND.label().to_lowercase());
        let toast = self.toasts.push(message, ToastKind::Delete, Some(T::undo_action(removal)));
        Ok(Some(toast.id))
    }

    /// Run the undo attached to toast `toast_id`. Returns the kind and id of
    /// the restored item, or `None` if the toast is gone or had no undo.
    pub fn undo(&mut self, toast_id: u64) -> Result<Option<(ItemKind, String)>> {
        let Some(action) = self.toasts.take_undo(toast_id) else {
            return Ok(None);
        };
        let policy = self.policy;
        let restored = match action {
            UndoAction::Note(removal) => {
                let id = removal.item.id.clone();
                self.store
                    .mutate(|state| repository::restore(&mut state.notes, removal, policy))?
                    .then_some((ItemKind::Note, id))
            }
            UndoAction::Bookmark(removal) => {
                let id = removal.item.id.clone();
                self.store
                    .mutate(|state| repository::restore(&mut state.bookmarks, removal, policy))?
                    .then_some((ItemKind::Bookmark, id))
            }
        };
        match &restored {
            Some((kind, id)) => log::info!("Restored {} {id}", kind.label().to_lowercase()),
            None => log::info!("Undo for toast {toast_id} had nothing to restore"),
        }
        Ok(restored)
    }

    pub fn dismiss(&mut self, toast_id: u64) -> bool {
        self.toasts.close(toast_id).is_some()
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.toasts.push(message, kind, None).id
    }

    /// Move the toast countdowns forward to the clock's current time.
    pub fn advance_toasts(&mut self) -> Vec<Toast> {
        let now = self.clock.now_millis();
        let elapsed = u64::try_from(now - self.last_tick).unwrap_or(0);
        self.last_tick = now.max(self.last_tick);
        self.toasts.tick(elapsed)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme> {
        Ok(self.store.set_theme(theme)?)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        Ok(self.store.toggle_theme()?)
    }

    /// Add a bookmark, filling in a blank title from `fetcher`. A supplied
    /// description is kept; a blank one takes the fetched description.
    pub fn add_bookmark_with_metadata(
        &mut self,
        mut draft: BookmarkDraft,
        fetcher: &dyn MetadataFetcher,
    ) -> Result<(Bookmark, Option<FetchOutcome>)> {
        let mut outcome = None;
        if draft.title.trim().is_empty() {
            let fetched = fetch_metadata(fetcher, &draft.url);
            draft.title = fetched.metadata.title.clone();
            if draft.description.trim().is_empty() {
                draft.description = fetched.metadata.description.clone();
            }
            outcome = Some(fetched);
        }
        let bookmark = self.add::<Bookmark>(draft)?;
        Ok((bookmark, outcome))
    }
}
