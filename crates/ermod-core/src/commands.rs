//! Command types representing all model edits
//!
//! Commands are the entry point for commit units via the `apply()` function.
//! One logical editor action maps to one unit of one or more commands; the
//! loader and the undo/redo collaborator use the `Restore*`/`RemoveNode`
//! replay primitives inside units tagged through `CommitOptions`.

use chrono::{DateTime, Utc};
use ermod_core_types::{DataType, Multiplicity, NodeId};
use serde::{Deserialize, Serialize};

use crate::events::FieldChange;
use crate::model::Node;

/// Command enum covering the full editor and loader surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    // ===== Entities =====
    /// Create an entity; the Id property is derived unless bulk-loading
    EntityCreate {
        name: String,
        module: Option<String>,
    },
    EntityRename { entity_id: NodeId, name: String },
    /// Set the module reference (empty string clears it)
    EntitySetModule { entity_id: NodeId, module: String },
    /// Toggle the RowVersion concurrency token
    EntitySetRowVersion { entity_id: NodeId, include: bool },
    EntityDelete { entity_id: NodeId },

    // ===== Properties =====
    PropertyCreate {
        entity_id: NodeId,
        name: String,
        data_type: DataType,
    },
    PropertyRename { property_id: NodeId, name: String },
    PropertySetDataType {
        property_id: NodeId,
        data_type: DataType,
    },
    /// Set the enum-type reference directly, without an enum association
    PropertySetEnumType {
        property_id: NodeId,
        enum_type_name: String,
    },
    PropertySetPrimaryKey { property_id: NodeId, value: bool },
    PropertySetForeignKey { property_id: NodeId, value: bool },
    PropertySetNullable { property_id: NodeId, value: bool },
    PropertySetLength { property_id: NodeId, length: u32 },
    PropertySetIndex {
        property_id: NodeId,
        indexed: bool,
        unique: bool,
        clustered: bool,
    },
    PropertyDelete { property_id: NodeId },

    // ===== Navigation properties (derived; direct edits reverse-sync) =====
    NavigationRename { navigation_id: NodeId, name: String },
    NavigationDelete { navigation_id: NodeId },

    // ===== Associations =====
    AssociationCreate {
        source_entity: NodeId,
        target_entity: NodeId,
        source_multiplicity: Multiplicity,
        target_multiplicity: Multiplicity,
        gen_source_nav: bool,
        gen_target_nav: bool,
    },
    AssociationSetGenSourceNav { association_id: NodeId, value: bool },
    AssociationSetGenTargetNav { association_id: NodeId, value: bool },
    AssociationSetSourceRole { association_id: NodeId, role: String },
    AssociationSetTargetRole { association_id: NodeId, role: String },
    AssociationSetSourceMultiplicity {
        association_id: NodeId,
        multiplicity: Multiplicity,
    },
    AssociationSetTargetMultiplicity {
        association_id: NodeId,
        multiplicity: Multiplicity,
    },
    AssociationDelete { association_id: NodeId },

    // ===== Enumerations =====
    EnumCreate { name: String, values: Vec<String> },
    EnumRename { enum_id: NodeId, name: String },
    EnumDelete { enum_id: NodeId },
    EnumAssociationCreate {
        entity_id: NodeId,
        enum_id: NodeId,
    },
    EnumAssociationSetPropertyName {
        enum_association_id: NodeId,
        name: String,
    },
    EnumAssociationDelete { enum_association_id: NodeId },

    // ===== Modules =====
    ModuleCreate { name: String },
    ModuleRename { module_id: NodeId, name: String },
    ModuleDelete { module_id: NodeId },

    // ===== Replay primitives (loader, undo/redo) =====
    /// Insert a node verbatim with its recorded id; no-op if present
    RestoreNode { node: Node },
    /// Re-apply a recorded field change (sets the field to `change.new` and
    /// `updated_at` to the recorded stamp)
    RestoreField {
        node_id: NodeId,
        change: FieldChange,
        updated_at: DateTime<Utc>,
    },
    /// Remove a node of any kind by id; no-op if absent
    RemoveNode { node_id: NodeId },
}
