use std::collections::VecDeque;

use chrono::Utc;
use ermod_core_types::NodeId;

use crate::apply::CommitOptions;
use crate::events::{ChangeEvent, FieldChange, Touched};
use crate::model::{Node, NodeKind};
use crate::ops::store::ModelStore;

/// Mutation context for one commit unit
///
/// All store mutations inside a unit flow through the `Tx` so that every
/// edit leaves a typed event in the pending queue. The queue is drained
/// through the rule registry by `apply()` after the unit's direct edits;
/// rule handlers receive the same `Tx`, so their own mutations queue up
/// behind the event currently being processed.
pub(crate) struct Tx<'a> {
    store: &'a mut ModelStore,
    options: CommitOptions,
    pending: VecDeque<ChangeEvent>,
}

impl<'a> Tx<'a> {
    pub(crate) fn new(store: &'a mut ModelStore, options: CommitOptions) -> Self {
        Self {
            store,
            options,
            pending: VecDeque::new(),
        }
    }

    pub(crate) fn store(&self) -> &ModelStore {
        self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut ModelStore {
        self.store
    }

    pub(crate) fn options(&self) -> CommitOptions {
        self.options
    }

    /// Insert a node and queue its NodeAdded event
    pub(crate) fn insert(&mut self, node: Node) {
        self.pending.push_back(ChangeEvent::NodeAdded {
            node: node.clone(),
        });
        self.store.insert_node(node);
    }

    /// Remove a node, queueing NodeDeleting (with its final state) and
    /// NodeDeleted
    ///
    /// Returns false when the node is already gone, which makes cascades and
    /// replay deletions naturally idempotent.
    pub(crate) fn delete(&mut self, id: NodeId) -> bool {
        match self.store.remove_node(id) {
            Some(node) => {
                let kind = node.kind();
                self.pending
                    .push_back(ChangeEvent::NodeDeleting { node });
                self.pending
                    .push_back(ChangeEvent::NodeDeleted { node_id: id, kind });
                true
            }
            None => false,
        }
    }

    /// Queue a FieldChanged event for an edit already applied to the store
    ///
    /// This is also where `updated_at` is stamped, so the old/new pair lands
    /// on the event. Replay units keep the node's current stamp; the recorded
    /// one is restored explicitly by the `RestoreField` primitive.
    pub(crate) fn record(&mut self, node_id: NodeId, kind: NodeKind, change: FieldChange) {
        let old = self
            .store
            .updated_at_of(node_id)
            .unwrap_or_else(Utc::now);
        let new = if self.options.is_replay {
            old
        } else {
            Utc::now()
        };
        self.store.touch(node_id, new);
        self.pending.push_back(ChangeEvent::FieldChanged {
            node_id,
            kind,
            change,
            touched: Touched { old, new },
        });
    }

    /// Pop the next pending event, if any
    pub(crate) fn take_pending(&mut self) -> Option<ChangeEvent> {
        self.pending.pop_front()
    }

    /// Number of events queued and not yet dispatched
    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
