use ermod_core_types::NodeId;

use crate::errors::Result;
use crate::events::FieldChange;
use crate::model::{ModuleNode, Node, NodeKind};
use crate::ops::{validate_name, Tx};

/// Create a module
///
/// # Errors
/// * `InvalidName` - If the name is empty or whitespace-only
pub(crate) fn create_module(tx: &mut Tx<'_>, name: String) -> Result<NodeId> {
    validate_name(&name, "module name")?;

    let module = ModuleNode::new(NodeId::generate(), name);
    let id = module.id;
    tx.insert(Node::Module(module));

    Ok(id)
}

/// Rename a module
///
/// Entities referencing the old name are re-pointed by the module rule group.
pub(crate) fn rename_module(tx: &mut Tx<'_>, id: NodeId, name: String) -> Result<()> {
    validate_name(&name, "module name")?;

    let module = tx.store_mut().get_module_mut(id)?;
    if module.name == name {
        return Ok(());
    }
    let old = std::mem::replace(&mut module.name, name.clone());
    tx.record(id, NodeKind::Module, FieldChange::ModuleName { old, new: name });

    Ok(())
}

/// Delete a module
///
/// Entities referencing it get their module field cleared by the module rule
/// group; the entities themselves are untouched.
///
/// # Errors
/// * `ModuleNotFound` - If the module doesn't exist
pub(crate) fn delete_module(tx: &mut Tx<'_>, id: NodeId) -> Result<()> {
    tx.store().get_module(id)?;
    tx.delete(id);
    Ok(())
}
