use ermod_core_types::{Multiplicity, NodeId};

use crate::errors::Result;
use crate::events::FieldChange;
use crate::model::{AssociationEdge, Node, NodeKind};
use crate::ops::Tx;

/// Create an association between two entities
///
/// The derived navigation properties and foreign-key property are created by
/// the association rule group when the commit unit settles; their resolved
/// names are then cached back onto the edge.
///
/// # Errors
/// * `EntityNotFound` - If either end entity doesn't exist
#[allow(clippy::too_many_arguments)]
pub(crate) fn create_association(
    tx: &mut Tx<'_>,
    source_entity: NodeId,
    target_entity: NodeId,
    source_multiplicity: Multiplicity,
    target_multiplicity: Multiplicity,
    gen_source_nav: bool,
    gen_target_nav: bool,
) -> Result<NodeId> {
    tx.store().get_entity(source_entity)?;
    tx.store().get_entity(target_entity)?;

    let edge = AssociationEdge::new(
        NodeId::generate(),
        source_entity,
        target_entity,
        source_multiplicity,
        target_multiplicity,
        gen_source_nav,
        gen_target_nav,
    );
    let id = edge.id;
    tx.insert(Node::Association(edge));

    Ok(id)
}

pub(crate) fn set_gen_source_nav(tx: &mut Tx<'_>, id: NodeId, value: bool) -> Result<()> {
    let edge = tx.store_mut().get_association_mut(id)?;
    if edge.gen_source_nav == value {
        return Ok(());
    }
    let old = edge.gen_source_nav;
    edge.gen_source_nav = value;
    tx.record(
        id,
        NodeKind::Association,
        FieldChange::AssociationGenSourceNav { old, new: value },
    );

    Ok(())
}

pub(crate) fn set_gen_target_nav(tx: &mut Tx<'_>, id: NodeId, value: bool) -> Result<()> {
    let edge = tx.store_mut().get_association_mut(id)?;
    if edge.gen_target_nav == value {
        return Ok(());
    }
    let old = edge.gen_target_nav;
    edge.gen_target_nav = value;
    tx.record(
        id,
        NodeKind::Association,
        FieldChange::AssociationGenTargetNav { old, new: value },
    );

    Ok(())
}

pub(crate) fn set_source_role(tx: &mut Tx<'_>, id: NodeId, role: String) -> Result<()> {
    let edge = tx.store_mut().get_association_mut(id)?;
    if edge.source_role_name == role {
        return Ok(());
    }
    let old = std::mem::replace(&mut edge.source_role_name, role.clone());
    tx.record(
        id,
        NodeKind::Association,
        FieldChange::AssociationSourceRole { old, new: role },
    );

    Ok(())
}

pub(crate) fn set_target_role(tx: &mut Tx<'_>, id: NodeId, role: String) -> Result<()> {
    let edge = tx.store_mut().get_association_mut(id)?;
    if edge.target_role_name == role {
        return Ok(());
    }
    let old = std::mem::replace(&mut edge.target_role_name, role.clone());
    tx.record(
        id,
        NodeKind::Association,
        FieldChange::AssociationTargetRole { old, new: role },
    );

    Ok(())
}

pub(crate) fn set_source_multiplicity(
    tx: &mut Tx<'_>,
    id: NodeId,
    multiplicity: Multiplicity,
) -> Result<()> {
    let edge = tx.store_mut().get_association_mut(id)?;
    if edge.source_multiplicity == multiplicity {
        return Ok(());
    }
    let old = edge.source_multiplicity;
    edge.source_multiplicity = multiplicity;
    tx.record(
        id,
        NodeKind::Association,
        FieldChange::AssociationSourceMultiplicity {
            old,
            new: multiplicity,
        },
    );

    Ok(())
}

pub(crate) fn set_target_multiplicity(
    tx: &mut Tx<'_>,
    id: NodeId,
    multiplicity: Multiplicity,
) -> Result<()> {
    let edge = tx.store_mut().get_association_mut(id)?;
    if edge.target_multiplicity == multiplicity {
        return Ok(());
    }
    let old = edge.target_multiplicity;
    edge.target_multiplicity = multiplicity;
    tx.record(
        id,
        NodeKind::Association,
        FieldChange::AssociationTargetMultiplicity {
            old,
            new: multiplicity,
        },
    );

    Ok(())
}

/// Cache the resolved foreign-key property name on the edge
pub(crate) fn set_fk_property_name(tx: &mut Tx<'_>, id: NodeId, name: String) -> Result<()> {
    let edge = tx.store_mut().get_association_mut(id)?;
    if edge.fk_property_name == name {
        return Ok(());
    }
    let old = std::mem::replace(&mut edge.fk_property_name, name.clone());
    tx.record(
        id,
        NodeKind::Association,
        FieldChange::AssociationFkPropertyName { old, new: name },
    );

    Ok(())
}

/// Delete an association
///
/// The derived navigation properties and foreign-key property are cascaded
/// by the association rule group reacting to the deletion event.
///
/// # Errors
/// * `AssociationNotFound` - If the association doesn't exist
pub(crate) fn delete_association(tx: &mut Tx<'_>, id: NodeId) -> Result<()> {
    tx.store().get_association(id)?;
    tx.delete(id);
    Ok(())
}
