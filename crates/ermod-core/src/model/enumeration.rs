use chrono::{DateTime, Utc};
use ermod_core_types::NodeId;
use serde::{Deserialize, Serialize};

/// Model enumeration
///
/// Referenced from properties by name (`enum_type_name`), never by pointer,
/// so a property's enum type can be set directly without an edge. The enum
/// rule group keeps those string references in sync on rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumNode {
    /// Stable identifier for this enumeration
    pub id: NodeId,

    /// Enumeration name
    pub name: String,

    /// Member names, in declaration order
    pub values: Vec<String>,

    /// Timestamp when this enumeration was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this enumeration was last updated
    pub updated_at: DateTime<Utc>,
}

impl EnumNode {
    /// Create a new enumeration
    pub fn new(id: NodeId, name: String, values: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            values,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Link between an entity and an enumeration
///
/// The authored element behind a derived enum-typed property. `property_name`
/// caches the collision-resolved name of that property for reverse matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumAssociationEdge {
    /// Stable identifier for this link
    pub id: NodeId,

    /// Entity that gains the enum-typed property
    pub entity_id: NodeId,

    /// Enumeration providing the property type
    pub enum_id: NodeId,

    /// Cached name of the derived property; empty until derived
    pub property_name: String,

    /// Timestamp when this link was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this link was last updated
    pub updated_at: DateTime<Utc>,
}

impl EnumAssociationEdge {
    /// Create a new enum association with an empty cached property name
    pub fn new(id: NodeId, entity_id: NodeId, enum_id: NodeId) -> Self {
        let now = Utc::now();
        Self {
            id,
            entity_id,
            enum_id,
            property_name: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
