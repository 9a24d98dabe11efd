//! Replay primitives for the loader and the undo/redo collaborator
//!
//! These ops re-apply previously recorded state verbatim: nodes are inserted
//! with their original ids, and field restores route through the ordinary
//! setters so the event log stays faithful. All of them tolerate nodes that
//! are already present / already gone, because a replayed unit races only
//! against the rule cascade it itself triggers.

use chrono::{DateTime, Utc};
use ermod_core_types::NodeId;

use crate::errors::Result;
use crate::events::FieldChange;
use crate::model::Node;
use crate::ops::{
    association_ops, entity_ops, enumeration_ops, module_ops, navigation_ops, property_ops, Tx,
};

/// Insert a node verbatim, keeping its recorded id
///
/// No-op when a node with that id already exists.
pub(crate) fn restore_node(tx: &mut Tx<'_>, node: Node) -> Result<()> {
    if tx.store().contains(node.id()) {
        return Ok(());
    }
    tx.insert(node);
    Ok(())
}

/// Remove a node by id, whatever its kind
///
/// No-op when the node is already gone.
pub(crate) fn remove_node(tx: &mut Tx<'_>, id: NodeId) -> Result<()> {
    tx.delete(id);
    Ok(())
}

/// Re-apply a recorded field change, setting the field to `change.new`
///
/// Routed through the typed setters so rule handlers observe the restore the
/// same way they observe a live edit. The node's `updated_at` is then forced
/// to the recorded stamp: inside a replay unit the setters leave it alone,
/// and restoring it here is what makes undo/redo byte-exact.
pub(crate) fn apply_field(
    tx: &mut Tx<'_>,
    id: NodeId,
    change: FieldChange,
    updated_at: DateTime<Utc>,
) -> Result<()> {
    apply_change(tx, id, change)?;
    tx.store_mut().touch(id, updated_at);
    Ok(())
}

fn apply_change(tx: &mut Tx<'_>, id: NodeId, change: FieldChange) -> Result<()> {
    use FieldChange::*;
    match change {
        EntityName { new, .. } => entity_ops::rename_entity(tx, id, new),
        EntityModule { new, .. } => entity_ops::set_module(tx, id, new),
        EntityInclRowVersion { new, .. } => entity_ops::set_incl_row_version(tx, id, new),

        PropertyName { new, .. } => property_ops::rename_property(tx, id, new),
        PropertyDataType { new, .. } => property_ops::set_data_type(tx, id, new),
        PropertyEnumTypeName { new, .. } => property_ops::set_enum_type_name(tx, id, new),
        PropertyIsPrimaryKey { new, .. } => property_ops::set_primary_key(tx, id, new),
        PropertyIsForeignKey { new, .. } => property_ops::set_foreign_key(tx, id, new),
        PropertyIsNullable { new, .. } => property_ops::set_nullable(tx, id, new),
        PropertyLength { new, .. } => property_ops::set_length(tx, id, new),
        PropertyIsIndexed { new, .. } => {
            let p = tx.store().get_property(id)?;
            let (unique, clustered) = (p.is_index_unique, p.is_index_clustered);
            property_ops::set_index(tx, id, new, unique, clustered)
        }
        PropertyIsIndexUnique { new, .. } => {
            let p = tx.store().get_property(id)?;
            let (indexed, clustered) = (p.is_indexed, p.is_index_clustered);
            property_ops::set_index(tx, id, indexed, new, clustered)
        }
        PropertyIsIndexClustered { new, .. } => {
            let p = tx.store().get_property(id)?;
            let (indexed, unique) = (p.is_indexed, p.is_index_unique);
            property_ops::set_index(tx, id, indexed, unique, new)
        }

        NavigationName { new, .. } => navigation_ops::rename_navigation(tx, id, new),
        NavigationIsCollection { new, .. } => navigation_ops::set_is_collection(tx, id, new),

        AssociationGenSourceNav { new, .. } => association_ops::set_gen_source_nav(tx, id, new),
        AssociationGenTargetNav { new, .. } => association_ops::set_gen_target_nav(tx, id, new),
        AssociationSourceRole { new, .. } => association_ops::set_source_role(tx, id, new),
        AssociationTargetRole { new, .. } => association_ops::set_target_role(tx, id, new),
        AssociationSourceMultiplicity { new, .. } => {
            association_ops::set_source_multiplicity(tx, id, new)
        }
        AssociationTargetMultiplicity { new, .. } => {
            association_ops::set_target_multiplicity(tx, id, new)
        }
        AssociationFkPropertyName { new, .. } => {
            association_ops::set_fk_property_name(tx, id, new)
        }

        EnumAssociationPropertyName { new, .. } => enumeration_ops::set_property_name(tx, id, new),

        EnumName { new, .. } => enumeration_ops::rename_enum(tx, id, new),
        ModuleName { new, .. } => module_ops::rename_module(tx, id, new),
    }
}
