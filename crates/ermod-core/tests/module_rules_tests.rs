/// Module reference sync
mod common;

use common::{commit, create_entity};
use ermod_core::commands::Command;
use ermod_core::ops::ModelStore;

#[test]
fn test_module_rename_syncs_entity_references() {
    // GIVEN two entities in the Sales module and one outside it
    let out = commit(
        ModelStore::new(),
        vec![Command::ModuleCreate {
            name: "Sales".to_string(),
        }],
    );
    let module_id = out.created[0];
    let (store, order) = create_entity(out.store, "Order");
    let (store, invoice) = create_entity(store, "Invoice");
    let (store, product) = create_entity(store, "Product");
    let out = commit(
        store,
        vec![
            Command::EntitySetModule {
                entity_id: order,
                module: "Sales".to_string(),
            },
            Command::EntitySetModule {
                entity_id: invoice,
                module: "Sales".to_string(),
            },
        ],
    );

    // WHEN renaming the module
    let out = commit(
        out.store,
        vec![Command::ModuleRename {
            module_id,
            name: "Billing".to_string(),
        }],
    );

    // THEN member references follow; the outsider is untouched
    assert_eq!(out.store.get_entity(order).unwrap().module, "Billing");
    assert_eq!(out.store.get_entity(invoice).unwrap().module, "Billing");
    assert_eq!(out.store.get_entity(product).unwrap().module, "");
}

#[test]
fn test_module_delete_clears_entity_references() {
    // GIVEN an entity in the Sales module
    let out = commit(
        ModelStore::new(),
        vec![Command::ModuleCreate {
            name: "Sales".to_string(),
        }],
    );
    let module_id = out.created[0];
    let (store, order) = create_entity(out.store, "Order");
    let out = commit(
        store,
        vec![Command::EntitySetModule {
            entity_id: order,
            module: "Sales".to_string(),
        }],
    );

    // WHEN deleting the module
    let out = commit(out.store, vec![Command::ModuleDelete { module_id }]);

    // THEN the entity survives with its module reference cleared
    let entity = out.store.get_entity(order).unwrap();
    assert_eq!(entity.module, "");
    assert!(!entity.has_module());
}
