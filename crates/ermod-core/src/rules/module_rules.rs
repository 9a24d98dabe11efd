//! Module reference sync
//!
//! Entities reference modules by name, not by id. Renaming a module rewrites
//! every matching entity reference; deleting one clears them.

use ermod_core_types::NodeId;

use crate::errors::Result;
use crate::events::{ChangeEvent, FieldChange};
use crate::model::Node;
use crate::ops::{entity_ops, Tx};

pub(crate) fn on_module_renamed(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::FieldChanged {
        change: FieldChange::ModuleName { old, new },
        ..
    } = event
    else {
        return Ok(());
    };
    if old.is_empty() {
        return Ok(());
    }

    let members: Vec<NodeId> = tx
        .store()
        .list_entities()
        .into_iter()
        .filter(|e| e.module == *old)
        .map(|e| e.id)
        .collect();
    for entity_id in members {
        entity_ops::set_module(tx, entity_id, new.clone())?;
    }

    Ok(())
}

pub(crate) fn on_module_deleting(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::NodeDeleting {
        node: Node::Module(module),
    } = event
    else {
        return Ok(());
    };

    let members: Vec<NodeId> = tx
        .store()
        .list_entities()
        .into_iter()
        .filter(|e| e.module == module.name)
        .map(|e| e.id)
        .collect();
    if !members.is_empty() {
        tracing::debug!(module = %module.name, count = members.len(), "module deleted; clearing entity references");
    }
    for entity_id in members {
        entity_ops::set_module(tx, entity_id, String::new())?;
    }

    Ok(())
}
