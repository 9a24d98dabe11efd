/// RowVersion concurrency-token maintenance
mod common;

use common::{commit, create_entity};
use ermod_core::commands::Command;
use ermod_core::model::ROW_VERSION_NAME;
use ermod_core::ops::ModelStore;
use ermod_core_types::DataType;

#[test]
fn test_toggle_on_derives_row_version_property() {
    // GIVEN an entity
    let (store, order) = create_entity(ModelStore::new(), "Order");

    // WHEN enabling the concurrency token
    let out = commit(
        store,
        vec![Command::EntitySetRowVersion {
            entity_id: order,
            include: true,
        }],
    );

    // THEN the RowVersion property is derived: binary, not nullable
    let prop = out
        .store
        .property_by_name(order, ROW_VERSION_NAME)
        .expect("RowVersion should be derived");
    assert_eq!(prop.data_type, DataType::Binary);
    assert!(!prop.is_nullable);
    assert!(prop.is_row_version());
}

#[test]
fn test_toggle_off_removes_row_version_property() {
    // GIVEN an entity with the token enabled
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let out = commit(
        store,
        vec![Command::EntitySetRowVersion {
            entity_id: order,
            include: true,
        }],
    );

    // WHEN disabling it
    let out = commit(
        out.store,
        vec![Command::EntitySetRowVersion {
            entity_id: order,
            include: false,
        }],
    );

    // THEN the property is gone
    assert!(out.store.property_by_name(order, ROW_VERSION_NAME).is_none());
}

#[test]
fn test_toggle_is_idempotent_when_property_exists() {
    // GIVEN an entity with the token enabled
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let out = commit(
        store,
        vec![Command::EntitySetRowVersion {
            entity_id: order,
            include: true,
        }],
    );

    // WHEN enabling it again
    let out = commit(
        out.store,
        vec![Command::EntitySetRowVersion {
            entity_id: order,
            include: true,
        }],
    );

    // THEN nothing changed: the set was a value no-op and produced no event
    assert!(out.events.is_empty());
    let count = out
        .store
        .properties_of(order)
        .into_iter()
        .filter(|p| p.is_row_version())
        .count();
    assert_eq!(count, 1);
}

#[test]
fn test_deleting_row_version_property_resets_flag() {
    // GIVEN an entity with the token enabled
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let out = commit(
        store,
        vec![Command::EntitySetRowVersion {
            entity_id: order,
            include: true,
        }],
    );
    let prop_id = out
        .store
        .property_by_name(order, ROW_VERSION_NAME)
        .unwrap()
        .id;

    // WHEN deleting the property directly
    let out = commit(
        out.store,
        vec![Command::PropertyDelete {
            property_id: prop_id,
        }],
    );

    // THEN the entity flag is reverse-synced off, without re-deriving the
    // property
    let entity = out.store.get_entity(order).unwrap();
    assert!(!entity.incl_row_version);
    assert!(out.store.property_by_name(order, ROW_VERSION_NAME).is_none());
}
