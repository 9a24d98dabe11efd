use chrono::{DateTime, Utc};
use ermod_core_types::NodeId;
use serde::{Deserialize, Serialize};

/// Entity - a modeled class that will become a generated type and a table
///
/// Entities own their properties and navigation properties, but ownership is
/// expressed through the children's `entity_id` back-reference rather than a
/// child list, so the store stays a flat arena. The `module` field is a
/// free-text reference to a `ModuleNode` name (never a pointer); rename and
/// delete of the module are synchronized by the module rule group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityNode {
    /// Stable identifier for this entity
    pub id: NodeId,

    /// Entity name (unique names are a validation concern, not enforced here)
    pub name: String,

    /// Name of the module this entity belongs to; empty when unassigned
    pub module: String,

    /// Whether a RowVersion concurrency token property is maintained
    pub incl_row_version: bool,

    /// Timestamp when this entity was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this entity was last updated
    pub updated_at: DateTime<Utc>,
}

impl EntityNode {
    /// Create a new entity with the given id and name, no module assigned
    pub fn new(id: NodeId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            module: String::new(),
            incl_row_version: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this entity is assigned to a module
    pub fn has_module(&self) -> bool {
        !self.module.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_defaults() {
        let entity = EntityNode::new(NodeId::generate(), "Order".to_string());
        assert_eq!(entity.name, "Order");
        assert!(!entity.has_module());
        assert!(!entity.incl_row_version);
    }
}
