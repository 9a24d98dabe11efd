//! Stable node identifiers
//!
//! Every node in a model graph is addressed by a `NodeId`. Edges hold
//! identifier pairs rather than live references, so reverse lookups are
//! plain scans over the flat node tables and deletion never dangles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a model node
///
/// Backed by UUIDv7 so freshly generated ids sort by creation time, which
/// keeps event logs and snapshots readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Generate a new random NodeId using UUIDv7
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from an existing UUID (for deserialization and replay)
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = NodeId::generate();
        let b = NodeId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_round_trip() {
        let id = NodeId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_v7_ids_sort_by_creation() {
        let a = NodeId::generate();
        let b = NodeId::generate();
        assert!(a < b);
    }
}
