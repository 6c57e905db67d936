//! Temporal (undo/redo) layer over the deck store.
//!
//! Mutations go through [`Editor::apply`], which snapshots the document
//! before the change. Identical before/after snapshots (structural
//! equality) are never recorded, so no-op updates do not pollute history.
//! Snapshots carry only the document and the current slide index, never
//! selection or clipboard, so selection-only changes leave history
//! untouched.

use std::collections::VecDeque;

use crate::document::Document;
use crate::store::DeckStore;

/// Maximum snapshots retained per direction; the oldest entry is silently
/// evicted on overflow.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    document: Document,
    current_slide: usize,
}

/// Undo/redo wrapper around a [`DeckStore`].
#[derive(Debug)]
pub struct Editor {
    store: DeckStore,
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    limit: usize,
}

impl Editor {
    /// Create an editor around a fresh store with the default history cap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// Create an editor with a custom history cap.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            store: DeckStore::new(),
            past: VecDeque::with_capacity(limit),
            future: Vec::new(),
            limit,
        }
    }

    /// Read access to the wrapped store.
    #[must_use]
    pub const fn store(&self) -> &DeckStore {
        &self.store
    }

    /// Run a mutation against the store, recording the pre-change state
    /// when the document actually changed. Every new recorded change
    /// clears the redo stack (linear history, no branching).
    pub fn apply<T>(&mut self, f: impl FnOnce(&mut DeckStore) -> T) -> T {
        let before = self.snapshot();
        let out = f(&mut self.store);
        if self.snapshot() != before {
            if self.past.len() == self.limit {
                self.past.pop_front();
            }
            self.past.push_back(before);
            self.future.clear();
        }
        out
    }

    /// Restore the most recent past snapshot, moving the current state to
    /// the redo stack. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.past.pop_back() else {
            return false;
        };
        let current = self.snapshot();
        if self.future.len() == self.limit {
            self.future.remove(0);
        }
        self.future.push(current);
        self.restore(snapshot);
        true
    }

    /// Re-apply the most recently undone snapshot. Returns `false` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.future.pop() else {
            return false;
        };
        let current = self.snapshot();
        if self.past.len() == self.limit {
            self.past.pop_front();
        }
        self.past.push_back(current);
        self.restore(snapshot);
        true
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of recorded past states.
    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.store.document().clone(),
            current_slide: self.store.current_slide_index(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.store
            .restore_document(snapshot.document, snapshot.current_slide);
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
