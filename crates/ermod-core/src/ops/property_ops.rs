use ermod_core_types::{DataType, NodeId};

use crate::errors::{ModelError, Result};
use crate::events::FieldChange;
use crate::model::{Node, NodeKind, PropertyNode};
use crate::ops::{validate_name, Tx};

/// Create a new property on an entity
///
/// The property is appended to the entity's display order. Defaulting (e.g.
/// string length) is applied by the property rule group at commit time.
///
/// # Errors
/// * `EntityNotFound` - If the owning entity doesn't exist
/// * `InvalidName` - If the name is empty or whitespace-only
/// * `DuplicateSibling` - If the entity already has a member with this name
pub(crate) fn create_property(
    tx: &mut Tx<'_>,
    entity_id: NodeId,
    name: String,
    data_type: DataType,
) -> Result<NodeId> {
    validate_name(&name, "property name")?;
    tx.store().get_entity(entity_id)?;
    if tx.store().has_member(entity_id, &name) {
        return Err(ModelError::DuplicateSibling { entity_id, name });
    }

    let mut property = PropertyNode::new(NodeId::generate(), entity_id, name, data_type);
    property.display_order = tx.store().next_display_order(entity_id);
    let id = property.id;
    tx.insert(Node::Property(property));

    Ok(id)
}

/// Rename a property
///
/// # Errors
/// * `PropertyNotFound` - If the property doesn't exist
/// * `InvalidName` - If the new name is empty or whitespace-only
/// * `DuplicateSibling` - If a sibling member already carries the new name
pub(crate) fn rename_property(tx: &mut Tx<'_>, id: NodeId, name: String) -> Result<()> {
    validate_name(&name, "property name")?;

    let property = tx.store().get_property(id)?;
    if property.name == name {
        return Ok(());
    }
    let entity_id = property.entity_id;
    if tx.store().has_member(entity_id, &name) {
        return Err(ModelError::DuplicateSibling { entity_id, name });
    }

    let property = tx.store_mut().get_property_mut(id)?;
    let old = std::mem::replace(&mut property.name, name.clone());
    tx.record(
        id,
        NodeKind::Property,
        FieldChange::PropertyName { old, new: name },
    );

    Ok(())
}

/// Change a property's data type
pub(crate) fn set_data_type(tx: &mut Tx<'_>, id: NodeId, data_type: DataType) -> Result<()> {
    let property = tx.store_mut().get_property_mut(id)?;
    if property.data_type == data_type {
        return Ok(());
    }
    let old = property.data_type;
    property.data_type = data_type;
    tx.record(
        id,
        NodeKind::Property,
        FieldChange::PropertyDataType {
            old,
            new: data_type,
        },
    );

    Ok(())
}

/// Set the enum-type reference of a property
///
/// Meaningful only for `DataType::Enum` properties; this is how a property's
/// enum type is set directly, without an enum association edge.
pub(crate) fn set_enum_type_name(tx: &mut Tx<'_>, id: NodeId, enum_type_name: String) -> Result<()> {
    let property = tx.store_mut().get_property_mut(id)?;
    if property.enum_type_name == enum_type_name {
        return Ok(());
    }
    let old = std::mem::replace(&mut property.enum_type_name, enum_type_name.clone());
    tx.record(
        id,
        NodeKind::Property,
        FieldChange::PropertyEnumTypeName {
            old,
            new: enum_type_name,
        },
    );

    Ok(())
}

pub(crate) fn set_primary_key(tx: &mut Tx<'_>, id: NodeId, value: bool) -> Result<()> {
    let property = tx.store_mut().get_property_mut(id)?;
    if property.is_primary_key == value {
        return Ok(());
    }
    let old = property.is_primary_key;
    property.is_primary_key = value;
    tx.record(
        id,
        NodeKind::Property,
        FieldChange::PropertyIsPrimaryKey { old, new: value },
    );

    Ok(())
}

pub(crate) fn set_foreign_key(tx: &mut Tx<'_>, id: NodeId, value: bool) -> Result<()> {
    let property = tx.store_mut().get_property_mut(id)?;
    if property.is_foreign_key == value {
        return Ok(());
    }
    let old = property.is_foreign_key;
    property.is_foreign_key = value;
    tx.record(
        id,
        NodeKind::Property,
        FieldChange::PropertyIsForeignKey { old, new: value },
    );

    Ok(())
}

pub(crate) fn set_nullable(tx: &mut Tx<'_>, id: NodeId, value: bool) -> Result<()> {
    let property = tx.store_mut().get_property_mut(id)?;
    if property.is_nullable == value {
        return Ok(());
    }
    let old = property.is_nullable;
    property.is_nullable = value;
    tx.record(
        id,
        NodeKind::Property,
        FieldChange::PropertyIsNullable { old, new: value },
    );

    Ok(())
}

pub(crate) fn set_length(tx: &mut Tx<'_>, id: NodeId, length: u32) -> Result<()> {
    let property = tx.store_mut().get_property_mut(id)?;
    if property.length == length {
        return Ok(());
    }
    let old = property.length;
    property.length = length;
    tx.record(
        id,
        NodeKind::Property,
        FieldChange::PropertyLength { old, new: length },
    );

    Ok(())
}

/// Set the index flags of a property
///
/// Emits one FieldChanged event per flag that actually changed.
pub(crate) fn set_index(
    tx: &mut Tx<'_>,
    id: NodeId,
    indexed: bool,
    unique: bool,
    clustered: bool,
) -> Result<()> {
    let property = tx.store_mut().get_property_mut(id)?;
    let old_indexed = property.is_indexed;
    let old_unique = property.is_index_unique;
    let old_clustered = property.is_index_clustered;

    if (old_indexed, old_unique, old_clustered) == (indexed, unique, clustered) {
        return Ok(());
    }

    property.is_indexed = indexed;
    property.is_index_unique = unique;
    property.is_index_clustered = clustered;

    if old_indexed != indexed {
        tx.record(
            id,
            NodeKind::Property,
            FieldChange::PropertyIsIndexed {
                old: old_indexed,
                new: indexed,
            },
        );
    }
    if old_unique != unique {
        tx.record(
            id,
            NodeKind::Property,
            FieldChange::PropertyIsIndexUnique {
                old: old_unique,
                new: unique,
            },
        );
    }
    if old_clustered != clustered {
        tx.record(
            id,
            NodeKind::Property,
            FieldChange::PropertyIsIndexClustered {
                old: old_clustered,
                new: clustered,
            },
        );
    }

    Ok(())
}

/// Delete a property
///
/// Reverse sync (FK-backed edges, enum links, RowVersion flag) is handled by
/// the rule groups reacting to the deletion event.
///
/// # Errors
/// * `PropertyNotFound` - If the property doesn't exist
pub(crate) fn delete_property(tx: &mut Tx<'_>, id: NodeId) -> Result<()> {
    tx.store().get_property(id)?;
    tx.delete(id);
    Ok(())
}
