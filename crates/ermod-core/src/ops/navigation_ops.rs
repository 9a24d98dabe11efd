use ermod_core_types::NodeId;

use crate::errors::{ModelError, Result};
use crate::events::FieldChange;
use crate::model::{NavigationPropertyNode, Node, NodeKind};
use crate::ops::{validate_name, Tx};

/// Create a navigation property
///
/// Navigation properties are derived members: the association rule group is
/// the normal caller. The loader reaches them through `RestoreNode` instead.
///
/// # Errors
/// * `EntityNotFound` - If owner or target entity doesn't exist
/// * `InvalidName` - If the name is empty or whitespace-only
/// * `DuplicateSibling` - If the owner already has a member with this name
pub(crate) fn create_navigation(
    tx: &mut Tx<'_>,
    entity_id: NodeId,
    name: String,
    target_entity: NodeId,
    is_collection: bool,
) -> Result<NodeId> {
    validate_name(&name, "navigation property name")?;
    tx.store().get_entity(entity_id)?;
    tx.store().get_entity(target_entity)?;
    if tx.store().has_member(entity_id, &name) {
        return Err(ModelError::DuplicateSibling { entity_id, name });
    }

    let nav = NavigationPropertyNode::new(
        NodeId::generate(),
        entity_id,
        name,
        target_entity,
        is_collection,
    );
    let id = nav.id;
    tx.insert(Node::Navigation(nav));

    Ok(id)
}

/// Rename a navigation property
///
/// The owning association's role name is brought in line by the reverse-sync
/// rule reacting to the emitted event.
///
/// # Errors
/// * `NavigationNotFound` - If the navigation property doesn't exist
/// * `InvalidName` - If the new name is empty or whitespace-only
/// * `DuplicateSibling` - If a sibling member already carries the new name
pub(crate) fn rename_navigation(tx: &mut Tx<'_>, id: NodeId, name: String) -> Result<()> {
    validate_name(&name, "navigation property name")?;

    let nav = tx.store().get_navigation(id)?;
    if nav.name == name {
        return Ok(());
    }
    let entity_id = nav.entity_id;
    if tx.store().has_member(entity_id, &name) {
        return Err(ModelError::DuplicateSibling { entity_id, name });
    }

    let nav = tx.store_mut().get_navigation_mut(id)?;
    let old = std::mem::replace(&mut nav.name, name.clone());
    tx.record(
        id,
        NodeKind::Navigation,
        FieldChange::NavigationName { old, new: name },
    );

    Ok(())
}

/// Set the collection flag of a navigation property
///
/// Derived from the opposite association end's multiplicity; only the
/// association rule group calls this.
pub(crate) fn set_is_collection(tx: &mut Tx<'_>, id: NodeId, value: bool) -> Result<()> {
    let nav = tx.store_mut().get_navigation_mut(id)?;
    if nav.is_collection == value {
        return Ok(());
    }
    let old = nav.is_collection;
    nav.is_collection = value;
    tx.record(
        id,
        NodeKind::Navigation,
        FieldChange::NavigationIsCollection { old, new: value },
    );

    Ok(())
}

/// Delete a navigation property
///
/// Deleting a derived navigation directly does not delete the association;
/// the reverse-sync rule clears the edge's generation flag instead.
///
/// # Errors
/// * `NavigationNotFound` - If the navigation property doesn't exist
pub(crate) fn delete_navigation(tx: &mut Tx<'_>, id: NodeId) -> Result<()> {
    tx.store().get_navigation(id)?;
    tx.delete(id);
    Ok(())
}
