//! Transient notifications with an optional one-shot undo.
//!
//! Toasts count down from a fixed duration. Time only moves when the owner
//! calls [`ToastQueue::tick`], so the queue itself never reads a clock.

use crate::item::{Bookmark, Note};
use crate::repository::Removal;

pub const DEFAULT_TOAST_DURATION: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Delete,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Delete => "delete",
        }
    }
}

/// Work to run if the user presses undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    Note(Removal<Note>),
    Bookmark(Removal<Bookmark>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub duration: u64,
    pub remaining: u64,
    undo: Option<UndoAction>,
}

impl Toast {
    pub fn has_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// Fraction of the countdown left, from 1.0 down to 0.0.
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        self.remaining as f64 / self.duration as f64
    }
}

#[derive(Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    duration: u64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    pub fn new(duration: u64) -> Self {
        Self { toasts: Vec::new(), next_id: 1, duration }
    }

    pub fn push(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        undo: Option<UndoAction>,
    ) -> &Toast {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            duration: self.duration,
            remaining: self.duration,
            undo,
        });
        log::debug!("Toast {id} opened");
        &self.toasts[self.toasts.len() - 1]
    }

    /// Advance every countdown by `elapsed` milliseconds and drop the toasts
    /// that ran out. Their undo actions are discarded with them.
    /// A zero-length toast expires on the first tick.
    pub fn tick(&mut self, elapsed: u64) -> Vec<Toast> {
        for toast in &mut self.toasts {
            toast.remaining = toast.remaining.saturating_sub(elapsed);
        }
        let (expired, active): (Vec<Toast>, Vec<Toast>) =
            std::mem::take(&mut self.toasts).into_iter().partition(|t| t.remaining == 0);
        self.toasts = active;
        for toast in &expired {
            log::debug!("Toast {} expired", toast.id);
        }
        expired
    }

    pub fn close(&mut self, id: u64) -> Option<Toast> {
        let index = self.toasts.iter().position(|t| t.id == id)?;
        Some(self.toasts.remove(index))
    }

    /// Dismiss the toast and hand back its undo action. `None` if the toast
    /// is gone or never had one; in that case the queue is left unchanged.
    pub fn take_undo(&mut self, id: u64) -> Option<UndoAction> {
        let index = self.toasts.iter().position(|t| t.id == id && t.has_undo())?;
        self.toasts.remove(index).undo
    }

    /// Most recent toast that can still be undone.
    pub fn latest_undoable(&self) -> Option<u64> {
        self.toasts.iter().rev().find(|t| t.has_undo()).map(|t| t.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, NoteDraft};

    fn removal() -> UndoAction {
        let note = Note::create("n1".into(), NoteDraft::default(), 1);
        UndoAction::Note(Removal { item: note.clone(), index: 0, snapshot: vec![note] })
    }

    #[test]
    fn ids_are_sequential() {
        let mut q = ToastQueue::new(1_000);
        assert_eq!(q.push("a", ToastKind::Info, None).id, 1);
        assert_eq!(q.push("b", ToastKind::Success, None).id, 2);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn tick_expires_at_zero() {
        let mut q = ToastQueue::new(5_000);
        q.push("gone", ToastKind::Delete, Some(removal()));
        assert!(q.tick(4_999).is_empty());
        let toast = q.iter().next().unwrap();
        assert_eq!(toast.remaining, 1);
        assert!(toast.progress() < 0.01);

        let expired = q.tick(1);
        assert_eq!(expired.len(), 1);
        assert!(q.is_empty());
        assert!(q.take_undo(1).is_none());
    }

    #[test]
    fn countdowns_are_independent() {
        let mut q = ToastQueue::new(5_000);
        q.push("first", ToastKind::Info, None);
        q.tick(3_000);
        q.push("second", ToastKind::Info, None);
        let expired = q.tick(2_000);
        assert_eq!(expired.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(q.iter().next().unwrap().remaining, 3_000);
    }

    #[test]
    fn undo_is_one_shot() {
        let mut q = ToastQueue::default();
        let id = q.push("Note deleted", ToastKind::Delete, Some(removal())).id;
        assert_eq!(q.latest_undoable(), Some(id));
        assert!(q.take_undo(id).is_some());
        assert!(q.take_undo(id).is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn take_undo_without_action_leaves_toast() {
        let mut q = ToastQueue::default();
        let id = q.push("Saved", ToastKind::Success, None).id;
        assert!(q.take_undo(id).is_none());
        assert_eq!(q.len(), 1);
        assert_eq!(q.latest_undoable(), None);
    }

    #[test]
    fn close_discards_undo() {
        let mut q = ToastQueue::default();
        let id = q.push("x", ToastKind::Delete, Some(removal())).id;
        let closed = q.close(id).unwrap();
        assert!(closed.has_undo());
        assert!(q.close(id).is_none());
        assert!(q.take_undo(id).is_none());
    }
}
