//! Undo/redo history.
//!
//! Two stacks of executed commands. Committing executes the command inside a
//! store transaction, pushes it onto the undo stack and drops the redo branch.
//! The undo stack is bounded; the oldest entries fall off first.

use crate::commands::Command;
use crate::constants::MAX_HISTORY_OPERATIONS;
use crate::error::EditorResult;
use crate::profile_scope;
use crate::store::Store;
use std::collections::VecDeque;

pub struct History {
    undo: VecDeque<Box<dyn Command>>,
    redo: Vec<Box<dyn Command>>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY_OPERATIONS)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Execute and record. Returns `Ok(false)` when the command changed
    /// nothing and was not recorded; on error nothing is recorded and the
    /// redo stack is kept.
    pub fn commit(&mut self, mut command: Box<dyn Command>, store: &mut Store) -> EditorResult<bool> {
        profile_scope!("history_commit");

        store.transaction(|store| command.execute(store))?;
        if command.is_noop() {
            tracing::trace!(command = command.label(), "No-op command not recorded");
            return Ok(false);
        }
        tracing::debug!(command = command.label(), "Committed");
        self.undo.push_back(command);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.clear();
        Ok(true)
    }

    pub fn undo(&mut self, store: &mut Store) -> bool {
        let Some(mut command) = self.undo.pop_back() else {
            return false;
        };
        store.transaction(|store| command.undo(store));
        tracing::debug!(command = command.label(), "Undone");
        self.redo.push(command);
        true
    }

    /// Re-execute the most recently undone command. If it no longer applies
    /// (state moved on through outside syncs) it is dropped.
    pub fn redo(&mut self, store: &mut Store) -> bool {
        let Some(mut command) = self.redo.pop() else {
            return false;
        };
        match store.transaction(|store| command.execute(store)) {
            Ok(()) => {
                tracing::debug!(command = command.label(), "Redone");
                self.undo.push_back(command);
                true
            }
            Err(err) => {
                tracing::warn!(command = command.label(), error = %err, "Redo no longer applies");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    /// Labels of the undo stack, oldest first.
    pub fn undo_labels(&self) -> Vec<&'static str> {
        self.undo.iter().map(|command| command.label()).collect()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("undo", &self.undo.len())
            .field("redo", &self.redo.len())
            .field("limit", &self.limit)
            .finish()
    }
}
