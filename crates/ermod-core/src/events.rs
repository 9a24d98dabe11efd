//! Change notification events
//!
//! Every mutation of the store inside a commit unit produces a typed event.
//! Events are queued while the unit's direct edits are applied and dispatched
//! through the rule registry afterwards, to a fixed point. They also form the
//! commit's change log: field changes carry old and new values and are
//! invertible, which is what the undo/redo collaborator replays.

use chrono::{DateTime, Utc};
use ermod_core_types::{DataType, Multiplicity, NodeId};
use serde::{Deserialize, Serialize};

use crate::model::{Node, NodeKind};

/// Lifecycle phase a rule handler can bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecyclePhase {
    Added,
    Deleting,
    Deleted,
    FieldChanged,
}

/// Old/new `updated_at` pair recorded with every field change
///
/// Replay restores the recorded stamp instead of re-stamping, so an undone
/// or redone unit reproduces the store byte for byte, timestamps included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touched {
    pub old: DateTime<Utc>,
    pub new: DateTime<Utc>,
}

/// Typed old/new pair for a single mutable field
///
/// One variant per field the engine lets commands or rules mutate. Keeping
/// the pair on the event makes rename/toggle rules self-contained and makes
/// the change log replayable in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldChange {
    EntityName { old: String, new: String },
    EntityModule { old: String, new: String },
    EntityInclRowVersion { old: bool, new: bool },

    PropertyName { old: String, new: String },
    PropertyDataType { old: DataType, new: DataType },
    PropertyEnumTypeName { old: String, new: String },
    PropertyIsPrimaryKey { old: bool, new: bool },
    PropertyIsForeignKey { old: bool, new: bool },
    PropertyIsNullable { old: bool, new: bool },
    PropertyLength { old: u32, new: u32 },
    PropertyIsIndexed { old: bool, new: bool },
    PropertyIsIndexUnique { old: bool, new: bool },
    PropertyIsIndexClustered { old: bool, new: bool },

    NavigationName { old: String, new: String },
    NavigationIsCollection { old: bool, new: bool },

    AssociationGenSourceNav { old: bool, new: bool },
    AssociationGenTargetNav { old: bool, new: bool },
    AssociationSourceRole { old: String, new: String },
    AssociationTargetRole { old: String, new: String },
    AssociationSourceMultiplicity { old: Multiplicity, new: Multiplicity },
    AssociationTargetMultiplicity { old: Multiplicity, new: Multiplicity },
    AssociationFkPropertyName { old: String, new: String },

    EnumAssociationPropertyName { old: String, new: String },

    EnumName { old: String, new: String },
    ModuleName { old: String, new: String },
}

impl FieldChange {
    /// The same change with old and new swapped
    pub fn inverted(&self) -> Self {
        use FieldChange::*;
        match self.clone() {
            EntityName { old, new } => EntityName { old: new, new: old },
            EntityModule { old, new } => EntityModule { old: new, new: old },
            EntityInclRowVersion { old, new } => EntityInclRowVersion { old: new, new: old },
            PropertyName { old, new } => PropertyName { old: new, new: old },
            PropertyDataType { old, new } => PropertyDataType { old: new, new: old },
            PropertyEnumTypeName { old, new } => PropertyEnumTypeName { old: new, new: old },
            PropertyIsPrimaryKey { old, new } => PropertyIsPrimaryKey { old: new, new: old },
            PropertyIsForeignKey { old, new } => PropertyIsForeignKey { old: new, new: old },
            PropertyIsNullable { old, new } => PropertyIsNullable { old: new, new: old },
            PropertyLength { old, new } => PropertyLength { old: new, new: old },
            PropertyIsIndexed { old, new } => PropertyIsIndexed { old: new, new: old },
            PropertyIsIndexUnique { old, new } => PropertyIsIndexUnique { old: new, new: old },
            PropertyIsIndexClustered { old, new } => PropertyIsIndexClustered { old: new, new: old },
            NavigationName { old, new } => NavigationName { old: new, new: old },
            NavigationIsCollection { old, new } => NavigationIsCollection { old: new, new: old },
            AssociationGenSourceNav { old, new } => AssociationGenSourceNav { old: new, new: old },
            AssociationGenTargetNav { old, new } => AssociationGenTargetNav { old: new, new: old },
            AssociationSourceRole { old, new } => AssociationSourceRole { old: new, new: old },
            AssociationTargetRole { old, new } => AssociationTargetRole { old: new, new: old },
            AssociationSourceMultiplicity { old, new } => {
                AssociationSourceMultiplicity { old: new, new: old }
            }
            AssociationTargetMultiplicity { old, new } => {
                AssociationTargetMultiplicity { old: new, new: old }
            }
            AssociationFkPropertyName { old, new } => {
                AssociationFkPropertyName { old: new, new: old }
            }
            EnumAssociationPropertyName { old, new } => {
                EnumAssociationPropertyName { old: new, new: old }
            }
            EnumName { old, new } => EnumName { old: new, new: old },
            ModuleName { old, new } => ModuleName { old: new, new: old },
        }
    }

    /// Stable field name for structured logging
    pub fn field_name(&self) -> &'static str {
        use FieldChange::*;
        match self {
            EntityName { .. } => "entity.name",
            EntityModule { .. } => "entity.module",
            EntityInclRowVersion { .. } => "entity.incl_row_version",
            PropertyName { .. } => "property.name",
            PropertyDataType { .. } => "property.data_type",
            PropertyEnumTypeName { .. } => "property.enum_type_name",
            PropertyIsPrimaryKey { .. } => "property.is_primary_key",
            PropertyIsForeignKey { .. } => "property.is_foreign_key",
            PropertyIsNullable { .. } => "property.is_nullable",
            PropertyLength { .. } => "property.length",
            PropertyIsIndexed { .. } => "property.is_indexed",
            PropertyIsIndexUnique { .. } => "property.is_index_unique",
            PropertyIsIndexClustered { .. } => "property.is_index_clustered",
            NavigationName { .. } => "navigation.name",
            NavigationIsCollection { .. } => "navigation.is_collection",
            AssociationGenSourceNav { .. } => "association.gen_source_nav",
            AssociationGenTargetNav { .. } => "association.gen_target_nav",
            AssociationSourceRole { .. } => "association.source_role_name",
            AssociationTargetRole { .. } => "association.target_role_name",
            AssociationSourceMultiplicity { .. } => "association.source_multiplicity",
            AssociationTargetMultiplicity { .. } => "association.target_multiplicity",
            AssociationFkPropertyName { .. } => "association.fk_property_name",
            EnumAssociationPropertyName { .. } => "enum_association.property_name",
            EnumName { .. } => "enum.name",
            ModuleName { .. } => "module.name",
        }
    }
}

/// Lifecycle event emitted for a single store mutation
///
/// Deletion events carry the node as it was immediately before removal, so
/// reverse-sync handlers can match on its fields after the arena slot is gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChangeEvent {
    /// A node was inserted; the payload is its state at insertion time
    NodeAdded { node: Node },
    /// A node is being removed; the payload is its state before removal
    NodeDeleting { node: Node },
    /// A node has been removed
    NodeDeleted { node_id: NodeId, kind: NodeKind },
    /// A single field of a node changed value
    FieldChanged {
        node_id: NodeId,
        kind: NodeKind,
        change: FieldChange,
        /// The node's `updated_at` before and after the edit
        touched: Touched,
    },
}

impl ChangeEvent {
    /// Identifier of the affected node
    pub fn node_id(&self) -> NodeId {
        match self {
            ChangeEvent::NodeAdded { node } | ChangeEvent::NodeDeleting { node } => node.id(),
            ChangeEvent::NodeDeleted { node_id, .. }
            | ChangeEvent::FieldChanged { node_id, .. } => *node_id,
        }
    }

    /// Kind of the affected node
    pub fn kind(&self) -> NodeKind {
        match self {
            ChangeEvent::NodeAdded { node } | ChangeEvent::NodeDeleting { node } => node.kind(),
            ChangeEvent::NodeDeleted { kind, .. } | ChangeEvent::FieldChanged { kind, .. } => *kind,
        }
    }

    /// Lifecycle phase this event belongs to
    pub fn phase(&self) -> LifecyclePhase {
        match self {
            ChangeEvent::NodeAdded { .. } => LifecyclePhase::Added,
            ChangeEvent::NodeDeleting { .. } => LifecyclePhase::Deleting,
            ChangeEvent::NodeDeleted { .. } => LifecyclePhase::Deleted,
            ChangeEvent::FieldChanged { .. } => LifecyclePhase::FieldChanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_swaps_old_and_new() {
        let change = FieldChange::EntityName {
            old: "Order".to_string(),
            new: "Invoice".to_string(),
        };
        let inverted = change.inverted();
        assert_eq!(
            inverted,
            FieldChange::EntityName {
                old: "Invoice".to_string(),
                new: "Order".to_string(),
            }
        );
        // Inverting twice is the identity
        assert_eq!(inverted.inverted(), change);
    }

    #[test]
    fn test_event_phase_mapping() {
        let node_id = NodeId::generate();
        let now = Utc::now();
        let event = ChangeEvent::FieldChanged {
            node_id,
            kind: NodeKind::Property,
            change: FieldChange::PropertyIsNullable {
                old: false,
                new: true,
            },
            touched: Touched { old: now, new: now },
        };
        assert_eq!(event.phase(), LifecyclePhase::FieldChanged);
        assert_eq!(event.node_id(), node_id);
        assert_eq!(event.kind(), NodeKind::Property);
    }
}
