use chrono::{DateTime, Utc};
use ermod_core_types::NodeId;
use serde::{Deserialize, Serialize};

/// Navigation property - a derived member pointing at another entity
///
/// Both `target_entity` and `is_collection` are derived from the owning
/// association end; the node itself stores them so read-only consumers never
/// have to chase the edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationPropertyNode {
    /// Stable identifier for this navigation property
    pub id: NodeId,

    /// Owning entity
    pub entity_id: NodeId,

    /// Member name; doubles as the association's role name
    pub name: String,

    /// Entity this navigation points at
    pub target_entity: NodeId,

    /// True when the opposite association end has Many multiplicity
    pub is_collection: bool,

    /// Timestamp when this navigation property was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this navigation property was last updated
    pub updated_at: DateTime<Utc>,
}

impl NavigationPropertyNode {
    /// Create a new navigation property
    pub fn new(
        id: NodeId,
        entity_id: NodeId,
        name: String,
        target_entity: NodeId,
        is_collection: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            entity_id,
            name,
            target_entity,
            is_collection,
            created_at: now,
            updated_at: now,
        }
    }
}
