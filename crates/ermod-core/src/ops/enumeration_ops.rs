use ermod_core_types::NodeId;

use crate::errors::Result;
use crate::events::FieldChange;
use crate::model::{EnumAssociationEdge, EnumNode, Node, NodeKind};
use crate::ops::{validate_name, Tx};

/// Create a model enumeration
///
/// # Errors
/// * `InvalidName` - If the name is empty or whitespace-only
pub(crate) fn create_enum(tx: &mut Tx<'_>, name: String, values: Vec<String>) -> Result<NodeId> {
    validate_name(&name, "enum name")?;

    let node = EnumNode::new(NodeId::generate(), name, values);
    let id = node.id;
    tx.insert(Node::Enum(node));

    Ok(id)
}

/// Rename an enumeration
///
/// The graph-wide enum-type-name sync is performed by the enum rule group
/// reacting to the emitted event.
pub(crate) fn rename_enum(tx: &mut Tx<'_>, id: NodeId, name: String) -> Result<()> {
    validate_name(&name, "enum name")?;

    let node = tx.store_mut().get_enum_mut(id)?;
    if node.name == name {
        return Ok(());
    }
    let old = std::mem::replace(&mut node.name, name.clone());
    tx.record(id, NodeKind::Enum, FieldChange::EnumName { old, new: name });

    Ok(())
}

/// Delete an enumeration
///
/// Enum association edges pointing at it are cascaded by the enum rule
/// group; properties that reference the enum name directly keep their
/// (now dangling) reference for the validation pass to flag.
///
/// # Errors
/// * `EnumNotFound` - If the enumeration doesn't exist
pub(crate) fn delete_enum(tx: &mut Tx<'_>, id: NodeId) -> Result<()> {
    tx.store().get_enum(id)?;
    tx.delete(id);
    Ok(())
}

/// Link an entity to an enumeration
///
/// The derived enum-typed property is created by the enum rule group when
/// the commit unit settles.
///
/// # Errors
/// * `EntityNotFound` - If the entity doesn't exist
/// * `EnumNotFound` - If the enumeration doesn't exist
pub(crate) fn create_enum_association(
    tx: &mut Tx<'_>,
    entity_id: NodeId,
    enum_id: NodeId,
) -> Result<NodeId> {
    tx.store().get_entity(entity_id)?;
    tx.store().get_enum(enum_id)?;

    let edge = EnumAssociationEdge::new(NodeId::generate(), entity_id, enum_id);
    let id = edge.id;
    tx.insert(Node::EnumAssociation(edge));

    Ok(id)
}

/// Set the cached property name of an enum association
///
/// Renaming it also renames the linked property, via the enum rule group.
pub(crate) fn set_property_name(tx: &mut Tx<'_>, id: NodeId, name: String) -> Result<()> {
    let edge = tx.store_mut().get_enum_association_mut(id)?;
    if edge.property_name == name {
        return Ok(());
    }
    let old = std::mem::replace(&mut edge.property_name, name.clone());
    tx.record(
        id,
        NodeKind::EnumAssociation,
        FieldChange::EnumAssociationPropertyName { old, new: name },
    );

    Ok(())
}

/// Delete an enum association
///
/// The derived property is cascaded by the enum rule group.
///
/// # Errors
/// * `EnumAssociationNotFound` - If the link doesn't exist
pub(crate) fn delete_enum_association(tx: &mut Tx<'_>, id: NodeId) -> Result<()> {
    tx.store().get_enum_association(id)?;
    tx.delete(id);
    Ok(())
}
