//! Entity creation defaults and deletion cascade
//!
//! A freshly created entity gets an `Id` primary-key property (suppressed
//! during bulk load, where the loader restores the recorded one). Deleting
//! an entity cascades everything it owns or touches: edges first, so their
//! own cascades can clean up derived members on the far entity, then the
//! remaining owned members.

use ermod_core_types::{DataType, NodeId};

use crate::errors::Result;
use crate::events::ChangeEvent;
use crate::model::Node;
use crate::ops::{property_ops, Tx};

/// Well-known name of the derived primary-key property
pub const ID_PROPERTY_NAME: &str = "Id";

pub(crate) fn on_entity_created(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    if tx.options().suppress_derivation {
        return Ok(());
    }
    let ChangeEvent::NodeAdded {
        node: Node::Entity(added),
    } = event
    else {
        return Ok(());
    };
    let entity_id = added.id;
    if tx.store().get_entity(entity_id).is_err() {
        return Ok(());
    }
    if tx
        .store()
        .property_by_name(entity_id, ID_PROPERTY_NAME)
        .is_some()
    {
        return Ok(());
    }

    let property_id = property_ops::create_property(
        tx,
        entity_id,
        ID_PROPERTY_NAME.to_string(),
        DataType::Int32,
    )?;
    property_ops::set_primary_key(tx, property_id, true)?;
    property_ops::set_index(tx, property_id, true, true, false)?;
    tracing::debug!(entity = %entity_id, property = %property_id, "derived Id primary key");

    Ok(())
}

pub(crate) fn on_entity_deleting(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::NodeDeleting {
        node: Node::Entity(entity),
    } = event
    else {
        return Ok(());
    };
    let entity_id = entity.id;

    // Edges first: their cascades remove derived members on both ends,
    // including members owned by other entities.
    let edges: Vec<NodeId> = tx
        .store()
        .list_associations()
        .into_iter()
        .filter(|e| e.source_entity == entity_id || e.target_entity == entity_id)
        .map(|e| e.id)
        .collect();
    for edge_id in edges {
        tx.delete(edge_id);
    }

    let enum_edges: Vec<NodeId> = tx
        .store()
        .list_enum_associations()
        .into_iter()
        .filter(|e| e.entity_id == entity_id)
        .map(|e| e.id)
        .collect();
    for edge_id in enum_edges {
        tx.delete(edge_id);
    }

    let properties: Vec<NodeId> = tx
        .store()
        .properties_of(entity_id)
        .into_iter()
        .map(|p| p.id)
        .collect();
    for property_id in properties {
        tx.delete(property_id);
    }

    let navigations: Vec<NodeId> = tx
        .store()
        .navigations_of(entity_id)
        .into_iter()
        .map(|n| n.id)
        .collect();
    for nav_id in navigations {
        tx.delete(nav_id);
    }

    tracing::debug!(entity = %entity_id, name = %entity.name, "entity deleted; members cascaded");
    Ok(())
}
