/// Member-name uniqueness for user-supplied names
///
/// Rule-derived names go through the allocator and never collide; names the
/// user types are validated instead, so a create or rename that would land
/// on a taken sibling name aborts the unit with `DuplicateSibling`.
mod common;

use common::{commit, create_entity, create_one_to_many};
use ermod_core::apply::{apply, CommitOptions};
use ermod_core::commands::Command;
use ermod_core::errors::ModelError;
use ermod_core::ops::ModelStore;
use ermod_core_types::DataType;

#[test]
fn test_property_create_with_taken_name_is_rejected() {
    // GIVEN a settled entity with its derived Id
    let (store, order) = create_entity(ModelStore::new(), "Order");
    assert!(store.property_by_name(order, "Id").is_some());

    // WHEN creating a property under the same name
    let result = apply(
        store.clone(),
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "Id".to_string(),
            data_type: DataType::Int64,
        }],
        CommitOptions::default(),
    );

    // THEN the unit aborts and the model still has exactly one Id
    assert!(matches!(
        result,
        Err(ModelError::DuplicateSibling { entity_id, ref name })
            if entity_id == order && name == "Id"
    ));
    let ids: Vec<_> = store
        .properties_of(order)
        .into_iter()
        .filter(|p| p.name == "Id")
        .collect();
    assert_eq!(ids.len(), 1);
}

#[test]
fn test_property_rename_to_taken_name_is_rejected() {
    // GIVEN an entity with Id and Total
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let out = commit(
        store,
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "Total".to_string(),
            data_type: DataType::Decimal,
        }],
    );
    let total = out.created[0];

    // WHEN renaming Total to Id
    let result = apply(
        out.store.clone(),
        vec![Command::PropertyRename {
            property_id: total,
            name: "Id".to_string(),
        }],
        CommitOptions::default(),
    );

    // THEN the rename is rejected and Total keeps its name
    assert!(matches!(result, Err(ModelError::DuplicateSibling { .. })));
    assert_eq!(out.store.get_property(total).unwrap().name, "Total");
}

#[test]
fn test_property_rename_to_own_name_is_noop() {
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let id_prop = store.property_by_name(order, "Id").unwrap().id;

    let out = commit(
        store,
        vec![Command::PropertyRename {
            property_id: id_prop,
            name: "Id".to_string(),
        }],
    );
    assert!(out.events.is_empty());
}

#[test]
fn test_property_create_colliding_with_navigation_is_rejected() {
    // GIVEN Customer 1--* Order with the derived "Customer" navigation on Order
    let (store, customer) = create_entity(ModelStore::new(), "Customer");
    let (store, order) = create_entity(store, "Order");
    let (store, _) = create_one_to_many(store, customer, order);
    assert!(store.navigation_by_name(order, "Customer").is_some());

    // WHEN creating a property named like the navigation
    let result = apply(
        store,
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "Customer".to_string(),
            data_type: DataType::String,
        }],
        CommitOptions::default(),
    );

    // THEN the sibling set spans both member kinds
    assert!(matches!(result, Err(ModelError::DuplicateSibling { .. })));
}

#[test]
fn test_navigation_rename_to_taken_name_is_rejected() {
    // GIVEN Customer 1--* Order with the derived CustomerId foreign key
    let (store, customer) = create_entity(ModelStore::new(), "Customer");
    let (store, order) = create_entity(store, "Order");
    let (store, _) = create_one_to_many(store, customer, order);
    let nav = store.navigation_by_name(order, "Customer").unwrap().id;
    assert!(store.property_by_name(order, "CustomerId").is_some());

    // WHEN renaming the navigation onto the foreign key's name
    let result = apply(
        store.clone(),
        vec![Command::NavigationRename {
            navigation_id: nav,
            name: "CustomerId".to_string(),
        }],
        CommitOptions::default(),
    );

    // THEN the rename is rejected and the navigation is untouched
    assert!(matches!(result, Err(ModelError::DuplicateSibling { .. })));
    assert_eq!(store.get_navigation(nav).unwrap().name, "Customer");
}

#[test]
fn test_derived_names_still_collision_resolve() {
    // GIVEN an entity that already has a member named "Customer"
    let (store, customer) = create_entity(ModelStore::new(), "Customer");
    let (store, order) = create_entity(store, "Order");
    let out = commit(
        store,
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "Customer".to_string(),
            data_type: DataType::String,
        }],
    );

    // WHEN an association derives a navigation with the same base name
    let (store, _) = create_one_to_many(out.store, customer, order);

    // THEN the derived member is suffixed instead of rejected
    assert!(store.navigation_by_name(order, "Customer2").is_some());
}
