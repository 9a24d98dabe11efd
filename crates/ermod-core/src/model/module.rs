use chrono::{DateTime, Utc};
use ermod_core_types::NodeId;
use serde::{Deserialize, Serialize};

/// Module - a namespace grouping for entities
///
/// Entities reference a module by name (free text). Deleting a module clears
/// those references; it never cascades into the entities themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleNode {
    /// Stable identifier for this module
    pub id: NodeId,

    /// Module name
    pub name: String,

    /// Timestamp when this module was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this module was last updated
    pub updated_at: DateTime<Utc>,
}

impl ModuleNode {
    /// Create a new module
    pub fn new(id: NodeId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            created_at: now,
            updated_at: now,
        }
    }
}
