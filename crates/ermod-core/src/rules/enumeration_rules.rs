//! Enum association derivation and enum-name sync
//!
//! An enum association edge derives one enum-typed property on its entity;
//! the edge caches the resolved property name for reverse matching. Enum
//! renames propagate to every property whose `enum_type_name` referenced the
//! old name, including properties typed directly without an edge.

use crate::errors::Result;
use crate::events::{ChangeEvent, FieldChange};
use crate::model::Node;
use crate::naming::allocate_name;
use crate::ops::{enumeration_ops, property_ops, Tx};
use ermod_core_types::{DataType, NodeId};

/// Derive the enum-typed property for a new enum association
pub(crate) fn on_enum_association_created(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    if tx.options().suppress_derivation {
        return Ok(());
    }
    let ChangeEvent::NodeAdded {
        node: Node::EnumAssociation(added),
    } = event
    else {
        return Ok(());
    };
    let id = added.id;
    let Ok(edge) = tx.store().get_enum_association(id) else {
        return Ok(());
    };
    let entity_id = edge.entity_id;
    let enum_id = edge.enum_id;
    let cached = edge.property_name.clone();

    // Already materialized
    if !cached.is_empty() {
        if let Some(existing) = tx.store().property_by_name(entity_id, &cached) {
            if existing.data_type == DataType::Enum {
                return Ok(());
            }
        }
    }

    let enum_name = tx.store().get_enum(enum_id)?.name.clone();
    let base = if cached.is_empty() { enum_name.clone() } else { cached };
    let taken = tx.store().member_names(entity_id);
    let name = allocate_name(&base, taken.iter().map(String::as_str));

    let property_id = property_ops::create_property(tx, entity_id, name.clone(), DataType::Enum)?;
    property_ops::set_enum_type_name(tx, property_id, enum_name)?;
    tracing::debug!(enum_association = %id, property = %name, "derived enum-typed property");

    enumeration_ops::set_property_name(tx, id, name)
}

/// Cascade the derived property when an enum association is deleted
pub(crate) fn on_enum_association_deleting(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::NodeDeleting {
        node: Node::EnumAssociation(edge),
    } = event
    else {
        return Ok(());
    };
    if edge.property_name.is_empty() {
        return Ok(());
    }

    let property_id = tx
        .store()
        .property_by_name(edge.entity_id, &edge.property_name)
        .filter(|p| p.data_type == DataType::Enum)
        .map(|p| p.id);
    if let Some(property_id) = property_id {
        tx.delete(property_id);
    }

    Ok(())
}

/// Renaming the cached property name renames the derived property
pub(crate) fn on_enum_association_field_changed(
    tx: &mut Tx<'_>,
    event: &ChangeEvent,
) -> Result<()> {
    let ChangeEvent::FieldChanged {
        node_id,
        change: FieldChange::EnumAssociationPropertyName { old, new },
        ..
    } = event
    else {
        return Ok(());
    };
    if old.is_empty() || new.is_empty() {
        return Ok(());
    }
    let Ok(edge) = tx.store().get_enum_association(*node_id) else {
        return Ok(());
    };
    let property_id = tx
        .store()
        .property_by_name(edge.entity_id, old)
        .filter(|p| p.data_type == DataType::Enum)
        .map(|p| p.id);
    if let Some(property_id) = property_id {
        property_ops::rename_property(tx, property_id, new.clone())?;
    }

    Ok(())
}

/// Renaming an enum rewrites every property reference to the old name
///
/// Graph-wide: covers edge-derived properties and directly typed ones alike.
pub(crate) fn on_enum_renamed(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::FieldChanged {
        change: FieldChange::EnumName { old, new },
        ..
    } = event
    else {
        return Ok(());
    };
    if old.is_empty() {
        return Ok(());
    }

    let referencing: Vec<NodeId> = tx
        .store()
        .list_properties()
        .into_iter()
        .filter(|p| p.has_enum_type(old))
        .map(|p| p.id)
        .collect();
    if !referencing.is_empty() {
        tracing::debug!(old = %old, new = %new, count = referencing.len(), "enum renamed; rewriting property references");
    }
    for property_id in referencing {
        property_ops::set_enum_type_name(tx, property_id, new.clone())?;
    }

    Ok(())
}

/// Deleting an enum cascades its enum association edges
pub(crate) fn on_enum_deleting(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::NodeDeleting {
        node: Node::Enum(node),
    } = event
    else {
        return Ok(());
    };

    let edges: Vec<NodeId> = tx
        .store()
        .list_enum_associations()
        .into_iter()
        .filter(|e| e.enum_id == node.id)
        .map(|e| e.id)
        .collect();
    for edge_id in edges {
        tx.delete(edge_id);
    }

    Ok(())
}

/// Reverse sync: deleting a derived enum-typed property deletes its edge
pub(crate) fn on_enum_property_deleting(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::NodeDeleting {
        node: Node::Property(property),
    } = event
    else {
        return Ok(());
    };
    if property.data_type != DataType::Enum {
        return Ok(());
    }

    let edge_id = tx
        .store()
        .list_enum_associations()
        .into_iter()
        .find(|e| e.entity_id == property.entity_id && e.property_name == property.name)
        .map(|e| e.id);
    if let Some(edge_id) = edge_id {
        tx.delete(edge_id);
    }

    Ok(())
}
