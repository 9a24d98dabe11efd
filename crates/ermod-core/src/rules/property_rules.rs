//! Property defaulting and nullability maintenance
//!
//! These handlers fill in sensible defaults (string length) and keep the
//! nullability of key properties consistent (primary keys never nullable,
//! foreign keys follow the source end's multiplicity). All of them are
//! suppressed during replay: a replayed unit restores recorded values
//! verbatim, and re-deriving on top of a half-restored graph would fight the
//! restore.

use crate::errors::Result;
use crate::events::{ChangeEvent, FieldChange};
use crate::model::Node;
use crate::ops::{property_ops, Tx};
use ermod_core_types::DataType;

/// Default maximum length applied to new string properties
pub const DEFAULT_STRING_LENGTH: u32 = 50;

pub(crate) fn on_property_created(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    if tx.options().is_replay {
        return Ok(());
    }
    let ChangeEvent::NodeAdded {
        node: Node::Property(added),
    } = event
    else {
        return Ok(());
    };
    let id = added.id;
    let Ok(property) = tx.store().get_property(id) else {
        return Ok(());
    };

    if property.data_type == DataType::String && property.length == 0 {
        property_ops::set_length(tx, id, DEFAULT_STRING_LENGTH)?;
    }

    Ok(())
}

pub(crate) fn on_property_field_changed(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    if tx.options().is_replay {
        return Ok(());
    }
    let ChangeEvent::FieldChanged {
        node_id, change, ..
    } = event
    else {
        return Ok(());
    };
    let id = *node_id;

    match change {
        // Primary keys are never nullable
        FieldChange::PropertyIsPrimaryKey { new: true, .. } => {
            if tx.store().get_property(id).is_ok() {
                property_ops::set_nullable(tx, id, false)?;
            }
        }
        // Standing invariant: an attempt to make a primary key nullable is
        // corrected back in the same unit
        FieldChange::PropertyIsNullable { new: true, .. } => {
            let is_primary_key = tx
                .store()
                .get_property(id)
                .map(|p| p.is_primary_key)
                .unwrap_or(false);
            if is_primary_key {
                tracing::debug!(property = %id, "primary key cannot be nullable; reverting");
                property_ops::set_nullable(tx, id, false)?;
            }
        }
        // A property flagged as FK picks up nullability from its edge
        FieldChange::PropertyIsForeignKey { new: true, .. } => {
            let Ok(property) = tx.store().get_property(id) else {
                return Ok(());
            };
            let nullable = tx
                .store()
                .list_associations()
                .into_iter()
                .find(|e| {
                    e.target_entity == property.entity_id && e.fk_property_name == property.name
                })
                .map(|e| e.fk_nullable());
            if let Some(nullable) = nullable {
                property_ops::set_nullable(tx, id, nullable)?;
            }
        }
        _ => {}
    }

    Ok(())
}
