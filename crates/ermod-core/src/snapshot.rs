//! Model snapshot capture and restore
//!
//! A snapshot is a flat, ordered list of every node in the store, suitable
//! for persistence and for seeding a fresh store. Restoring goes through the
//! ordinary commit boundary as a bulk-load unit: every node re-enters via
//! `RestoreNode` with derivation suppressed, so exactly the persisted graph
//! comes back and nothing is re-invented.
//!
//! Determinism: nodes are emitted in a fixed kind order, each kind sorted by
//! id, so the same model state always serializes to the same document and
//! the same digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::apply::{apply, CommitOptions};
use crate::commands::Command;
use crate::errors::{ModelError, Result};
use crate::model::Node;
use crate::ops::ModelStore;

/// Current snapshot document version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of one model graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Document format version
    pub version: u32,
    /// Every node of the model, in deterministic order
    pub nodes: Vec<Node>,
}

/// Capture a deterministic snapshot of a store
pub fn capture(store: &ModelStore) -> SnapshotDocument {
    let mut nodes = Vec::new();
    nodes.extend(store.list_modules().into_iter().cloned().map(Node::Module));
    nodes.extend(store.list_enums().into_iter().cloned().map(Node::Enum));
    nodes.extend(store.list_entities().into_iter().cloned().map(Node::Entity));
    nodes.extend(
        store
            .list_properties()
            .into_iter()
            .cloned()
            .map(Node::Property),
    );
    nodes.extend(
        store
            .list_navigations()
            .into_iter()
            .cloned()
            .map(Node::Navigation),
    );
    nodes.extend(
        store
            .list_associations()
            .into_iter()
            .cloned()
            .map(Node::Association),
    );
    nodes.extend(
        store
            .list_enum_associations()
            .into_iter()
            .cloned()
            .map(Node::EnumAssociation),
    );

    SnapshotDocument {
        version: SNAPSHOT_VERSION,
        nodes,
    }
}

/// Serialize a snapshot document to pretty JSON
///
/// # Errors
/// Returns `Serialization` if JSON encoding fails.
pub fn to_json(document: &SnapshotDocument) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(|e| ModelError::Serialization {
        reason: e.to_string(),
    })
}

/// Parse a snapshot document from JSON
///
/// # Errors
/// Returns `Serialization` if the input is not a valid document.
pub fn from_json(input: &str) -> Result<SnapshotDocument> {
    serde_json::from_str(input).map_err(|e| ModelError::Serialization {
        reason: e.to_string(),
    })
}

/// Compute the hex-encoded SHA256 digest of a snapshot document
///
/// Canonical (compact) JSON is hashed, so the digest is stable for the same
/// model state regardless of how the document was formatted on disk.
///
/// # Errors
/// Returns `Serialization` if canonical encoding fails.
pub fn digest(document: &SnapshotDocument) -> Result<String> {
    let canonical = serde_json::to_string(document).map_err(|e| ModelError::Serialization {
        reason: e.to_string(),
    })?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Rebuild a store from a snapshot document
///
/// Runs as one bulk-load commit unit over an empty store: derivation is
/// suppressed, so derived members come back exactly as persisted.
///
/// # Errors
/// Propagates any commit-unit error; the document's own nodes never fail to
/// restore individually.
pub fn restore(document: &SnapshotDocument) -> Result<ModelStore> {
    let commands: Vec<Command> = document
        .nodes
        .iter()
        .cloned()
        .map(|node| Command::RestoreNode { node })
        .collect();

    let out = apply(ModelStore::new(), commands, CommitOptions::bulk_load())?;
    tracing::info!(nodes = document.nodes.len(), "snapshot restored");
    Ok(out.store)
}
