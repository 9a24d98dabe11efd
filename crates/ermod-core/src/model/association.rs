use chrono::{DateTime, Utc};
use ermod_core_types::{Multiplicity, NodeId};
use serde::{Deserialize, Serialize};

/// Association between two entities
///
/// The edge is the authored element; the navigation properties and the
/// foreign-key property are derived from it. The `*_role_name` and
/// `fk_property_name` fields cache the collision-resolved names of those
/// derived members so the reverse-sync rules can match them later without a
/// structural back-pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationEdge {
    /// Stable identifier for this association
    pub id: NodeId,

    /// Principal end of the association
    pub source_entity: NodeId,

    /// Dependent end; the foreign-key property lives here
    pub target_entity: NodeId,

    pub source_multiplicity: Multiplicity,
    pub target_multiplicity: Multiplicity,

    /// Whether a navigation property is generated on the source entity
    pub gen_source_nav: bool,

    /// Whether a navigation property is generated on the target entity
    pub gen_target_nav: bool,

    /// Cached name of the source-side navigation property; empty until derived
    pub source_role_name: String,

    /// Cached name of the target-side navigation property; empty until derived
    pub target_role_name: String,

    /// Cached name of the foreign-key property on the target; empty until derived
    pub fk_property_name: String,

    /// Timestamp when this association was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this association was last updated
    pub updated_at: DateTime<Utc>,
}

impl AssociationEdge {
    /// Create a new association with empty cached role/FK names
    pub fn new(
        id: NodeId,
        source_entity: NodeId,
        target_entity: NodeId,
        source_multiplicity: Multiplicity,
        target_multiplicity: Multiplicity,
        gen_source_nav: bool,
        gen_target_nav: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            source_entity,
            target_entity,
            source_multiplicity,
            target_multiplicity,
            gen_source_nav,
            gen_target_nav,
            source_role_name: String::new(),
            target_role_name: String::new(),
            fk_property_name: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the foreign key on the target must allow NULL
    pub fn fk_nullable(&self) -> bool {
        self.source_multiplicity.fk_nullable()
    }
}
