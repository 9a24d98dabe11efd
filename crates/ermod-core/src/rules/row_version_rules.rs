//! RowVersion concurrency-token maintenance
//!
//! Toggling an entity's `incl_row_version` flag materializes or removes the
//! well-known `RowVersion` property. Deleting the property directly resets
//! the flag instead of being treated as an error.

use crate::errors::Result;
use crate::events::{ChangeEvent, FieldChange};
use crate::model::{Node, ROW_VERSION_NAME};
use crate::ops::{entity_ops, property_ops, Tx};
use ermod_core_types::DataType;

pub(crate) fn on_entity_row_version_toggled(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::FieldChanged {
        node_id,
        change: FieldChange::EntityInclRowVersion { new, .. },
        ..
    } = event
    else {
        return Ok(());
    };
    let entity_id = *node_id;

    if *new {
        if tx.options().suppress_derivation {
            return Ok(());
        }
        if tx.store().get_entity(entity_id).is_err() {
            return Ok(());
        }
        if tx
            .store()
            .property_by_name(entity_id, ROW_VERSION_NAME)
            .is_some()
        {
            return Ok(());
        }
        let property_id = property_ops::create_property(
            tx,
            entity_id,
            ROW_VERSION_NAME.to_string(),
            DataType::Binary,
        )?;
        tracing::debug!(entity = %entity_id, property = %property_id, "derived RowVersion property");
    } else {
        let property_id = tx
            .store()
            .property_by_name(entity_id, ROW_VERSION_NAME)
            .map(|p| p.id);
        if let Some(property_id) = property_id {
            tx.delete(property_id);
        }
    }

    Ok(())
}

/// Reverse sync: deleting the RowVersion property turns the flag off
pub(crate) fn on_row_version_property_deleting(
    tx: &mut Tx<'_>,
    event: &ChangeEvent,
) -> Result<()> {
    let ChangeEvent::NodeDeleting {
        node: Node::Property(property),
    } = event
    else {
        return Ok(());
    };
    if !property.is_row_version() {
        return Ok(());
    }

    let flagged = tx
        .store()
        .get_entity(property.entity_id)
        .map(|e| e.incl_row_version)
        .unwrap_or(false);
    if flagged {
        entity_ops::set_incl_row_version(tx, property.entity_id, false)?;
    }

    Ok(())
}
