//! Editing session with event-log undo/redo
//!
//! The session keeps the pre-commit state alive while a unit runs: `apply()`
//! takes a clone and the session's own store is only swapped on success, so a
//! failed unit leaves the session exactly where it was.
//!
//! Undo does not snapshot whole stores. Each settled unit's change log is
//! invertible (added nodes carry their snapshot in `NodeDeleting`, field
//! changes carry old and new), so undo replays the log backwards with every
//! event inverted, and redo replays it forwards. Replay units run with
//! `CommitOptions::replay()`: the derivation rules still fire but their
//! identity checks make them no-ops against restored state, and the
//! defaulting rules stand down entirely.

use ermod_core::apply::{apply, CommitOptions};
use ermod_core::commands::Command;
use ermod_core::errors::ModelError;
use ermod_core::events::ChangeEvent;
use ermod_core::ops::ModelStore;
use ermod_core::snapshot::SnapshotDocument;
use ermod_core_types::NodeId;
use thiserror::Error;

/// Session-level errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Undo requested with an empty history
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Redo requested with an empty redo stack
    #[error("Nothing to redo")]
    NothingToRedo,

    /// A commit unit failed; the session state is unchanged
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// What a settled commit unit produced, for the caller
#[derive(Debug, Clone)]
pub struct CommitReceipt {
    /// Ids of nodes created by the unit's own commands, in command order
    pub created: Vec<NodeId>,
    /// Full ordered change log of the unit, rule effects included
    pub events: Vec<ChangeEvent>,
}

/// An editing session over one model
#[derive(Debug, Default)]
pub struct Session {
    store: ModelStore,
    undo_stack: Vec<Vec<ChangeEvent>>,
    redo_stack: Vec<Vec<ChangeEvent>>,
}

impl Session {
    /// Start a session over an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session over an existing store, with empty history
    pub fn from_store(store: ModelStore) -> Self {
        Self {
            store,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Start a session from a persisted snapshot
    ///
    /// # Errors
    /// Propagates any restore failure.
    pub fn from_snapshot(document: &SnapshotDocument) -> Result<Self, SessionError> {
        let store = ermod_core::snapshot::restore(document)?;
        Ok(Self::from_store(store))
    }

    /// Current model state
    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Commit one unit of edits
    ///
    /// On success the unit's change log joins the undo history and the redo
    /// stack is cleared. On failure the session state is unchanged.
    ///
    /// # Errors
    /// Propagates any commit-unit error.
    pub fn commit(&mut self, commands: Vec<Command>) -> Result<CommitReceipt, SessionError> {
        let out = apply(self.store.clone(), commands, CommitOptions::default())?;
        self.store = out.store;

        if !out.events.is_empty() {
            self.undo_stack.push(out.events.clone());
            self.redo_stack.clear();
        }

        Ok(CommitReceipt {
            created: out.created,
            events: out.events,
        })
    }

    /// Undo the most recent committed unit
    ///
    /// # Errors
    /// * `NothingToUndo` - The undo history is empty
    /// * `Model` - The replay unit failed; the log is put back on the stack
    pub fn undo(&mut self) -> Result<(), SessionError> {
        let events = self.undo_stack.pop().ok_or(SessionError::NothingToUndo)?;
        let commands = invert_events(&events);

        match apply(self.store.clone(), commands, CommitOptions::replay()) {
            Ok(out) => {
                self.store = out.store;
                tracing::debug!(events = events.len(), "unit undone");
                self.redo_stack.push(events);
                Ok(())
            }
            Err(e) => {
                self.undo_stack.push(events);
                Err(e.into())
            }
        }
    }

    /// Re-apply the most recently undone unit
    ///
    /// # Errors
    /// * `NothingToRedo` - The redo stack is empty
    /// * `Model` - The replay unit failed; the log is put back on the stack
    pub fn redo(&mut self) -> Result<(), SessionError> {
        let events = self.redo_stack.pop().ok_or(SessionError::NothingToRedo)?;
        let commands = replay_events(&events);

        match apply(self.store.clone(), commands, CommitOptions::replay()) {
            Ok(out) => {
                self.store = out.store;
                tracing::debug!(events = events.len(), "unit redone");
                self.undo_stack.push(events);
                Ok(())
            }
            Err(e) => {
                self.redo_stack.push(events);
                Err(e.into())
            }
        }
    }
}

/// Build the inverse replay of a change log (for undo)
///
/// The log is walked backwards with every event inverted. `NodeDeleted` is
/// skipped: the matching `NodeDeleting` carries the node snapshot and maps to
/// the restore.
fn invert_events(events: &[ChangeEvent]) -> Vec<Command> {
    events
        .iter()
        .rev()
        .filter_map(|event| match event {
            ChangeEvent::NodeAdded { node } => Some(Command::RemoveNode { node_id: node.id() }),
            ChangeEvent::NodeDeleting { node } => Some(Command::RestoreNode { node: node.clone() }),
            ChangeEvent::NodeDeleted { .. } => None,
            ChangeEvent::FieldChanged {
                node_id,
                change,
                touched,
                ..
            } => Some(Command::RestoreField {
                node_id: *node_id,
                change: change.inverted(),
                updated_at: touched.old,
            }),
        })
        .collect()
}

/// Build the forward replay of a change log (for redo)
fn replay_events(events: &[ChangeEvent]) -> Vec<Command> {
    events
        .iter()
        .filter_map(|event| match event {
            ChangeEvent::NodeAdded { node } => Some(Command::RestoreNode { node: node.clone() }),
            ChangeEvent::NodeDeleting { node } => Some(Command::RemoveNode { node_id: node.id() }),
            ChangeEvent::NodeDeleted { .. } => None,
            ChangeEvent::FieldChanged {
                node_id,
                change,
                touched,
                ..
            } => Some(Command::RestoreField {
                node_id: *node_id,
                change: change.clone(),
                updated_at: touched.new,
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_no_history() {
        let session = Session::new();
        assert!(!session.can_undo());
        assert!(!session.can_redo());
    }

    #[test]
    fn test_undo_on_empty_history_errors() {
        let mut session = Session::new();
        assert!(matches!(session.undo(), Err(SessionError::NothingToUndo)));
    }

    #[test]
    fn test_commit_clears_redo_stack() {
        let mut session = Session::new();
        session
            .commit(vec![Command::EntityCreate {
                name: "Order".to_string(),
                module: None,
            }])
            .unwrap();
        session.undo().unwrap();
        assert!(session.can_redo());

        session
            .commit(vec![Command::EntityCreate {
                name: "Customer".to_string(),
                module: None,
            }])
            .unwrap();
        assert!(!session.can_redo());
    }

    #[test]
    fn test_failed_commit_leaves_state_and_history() {
        let mut session = Session::new();
        session
            .commit(vec![Command::EntityCreate {
                name: "Order".to_string(),
                module: None,
            }])
            .unwrap();

        let result = session.commit(vec![Command::EntityCreate {
            name: "  ".to_string(),
            module: None,
        }]);
        assert!(result.is_err());
        assert_eq!(session.store().list_entities().len(), 1);
        assert!(session.can_undo());
    }
}
