// src/history.rs

//! Bounded undo/redo history over full-canvas snapshots.

use crate::canvas::Canvas;
use log::{debug, trace};

/// Ordered canvas snapshots plus a cursor into them. The entry at `index` is
/// always the most recently applied state, so undo/redo are pure index moves.
///
/// Bounded: once `capacity` snapshots exist, each push evicts the oldest.
/// Pushing while the cursor is mid-sequence truncates the redo branch first.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Canvas>,
    index: usize,
    capacity: usize,
}

impl History {
    /// Creates a history seeded with one snapshot of the initial state, so
    /// the sequence is never empty and `position()` starts at 1.
    pub fn new(initial: Canvas, capacity: usize) -> Self {
        History {
            snapshots: vec![initial],
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Records a new snapshot as the current state.
    ///
    /// Any redo branch beyond the cursor is destroyed first. If the sequence
    /// would exceed capacity the oldest snapshot is evicted; the cursor ends
    /// on the newly pushed entry either way.
    pub fn push(&mut self, snapshot: Canvas) {
        if self.index + 1 < self.snapshots.len() {
            trace!(
                "History: truncating redo branch ({} entries dropped)",
                self.snapshots.len() - self.index - 1
            );
            self.snapshots.truncate(self.index + 1);
        }

        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
            debug!("History: capacity {} reached, evicted oldest snapshot", self.capacity);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Steps back one snapshot and returns it, or `None` at the beginning.
    pub fn undo(&mut self) -> Option<&Canvas> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        trace!("History: undo to {}/{}", self.index + 1, self.snapshots.len());
        Some(&self.snapshots[self.index])
    }

    /// Steps forward one snapshot and returns it, or `None` at the end.
    pub fn redo(&mut self) -> Option<&Canvas> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        trace!("History: redo to {}/{}", self.index + 1, self.snapshots.len());
        Some(&self.snapshots[self.index])
    }

    /// 1-based cursor position, for the status line.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
