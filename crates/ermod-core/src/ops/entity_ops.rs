use ermod_core_types::NodeId;

use crate::errors::Result;
use crate::events::FieldChange;
use crate::model::{EntityNode, Node, NodeKind};
use crate::ops::{validate_name, Tx};

/// Create a new entity
///
/// The `Id` primary-key property is not created here; it is derived by the
/// entity rule group when the commit unit settles (and suppressed during
/// bulk load).
///
/// # Errors
/// * `InvalidName` - If the name is empty or whitespace-only
pub(crate) fn create_entity(
    tx: &mut Tx<'_>,
    name: String,
    module: Option<String>,
) -> Result<NodeId> {
    validate_name(&name, "entity name")?;

    let mut entity = EntityNode::new(NodeId::generate(), name);
    if let Some(module) = module {
        entity.module = module;
    }
    let id = entity.id;
    tx.insert(Node::Entity(entity));

    Ok(id)
}

/// Rename an entity
///
/// # Errors
/// * `EntityNotFound` - If the entity doesn't exist
/// * `InvalidName` - If the new name is empty or whitespace-only
pub(crate) fn rename_entity(tx: &mut Tx<'_>, id: NodeId, name: String) -> Result<()> {
    validate_name(&name, "entity name")?;

    let entity = tx.store_mut().get_entity_mut(id)?;
    if entity.name == name {
        return Ok(());
    }
    let old = std::mem::replace(&mut entity.name, name.clone());
    tx.record(id, NodeKind::Entity, FieldChange::EntityName { old, new: name });

    Ok(())
}

/// Set an entity's module reference (empty clears it)
pub(crate) fn set_module(tx: &mut Tx<'_>, id: NodeId, module: String) -> Result<()> {
    let entity = tx.store_mut().get_entity_mut(id)?;
    if entity.module == module {
        return Ok(());
    }
    let old = std::mem::replace(&mut entity.module, module.clone());
    tx.record(
        id,
        NodeKind::Entity,
        FieldChange::EntityModule { old, new: module },
    );

    Ok(())
}

/// Toggle the RowVersion concurrency-token flag
pub(crate) fn set_incl_row_version(tx: &mut Tx<'_>, id: NodeId, value: bool) -> Result<()> {
    let entity = tx.store_mut().get_entity_mut(id)?;
    if entity.incl_row_version == value {
        return Ok(());
    }
    let old = entity.incl_row_version;
    entity.incl_row_version = value;
    tx.record(
        id,
        NodeKind::Entity,
        FieldChange::EntityInclRowVersion { old, new: value },
    );

    Ok(())
}

/// Delete an entity
///
/// Owned properties, navigation properties, and any edges touching the
/// entity are cascaded by the entity rule group.
///
/// # Errors
/// * `EntityNotFound` - If the entity doesn't exist
pub(crate) fn delete_entity(tx: &mut Tx<'_>, id: NodeId) -> Result<()> {
    // Existence check up front so a user-issued delete of a missing entity
    // is an error while rule-issued cascades stay idempotent via tx.delete.
    tx.store().get_entity(id)?;
    tx.delete(id);
    Ok(())
}
