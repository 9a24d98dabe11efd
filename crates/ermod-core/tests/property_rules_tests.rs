/// Property defaulting and nullability maintenance
mod common;

use common::{commit, create_entity};
use ermod_core::apply::{apply, CommitOptions};
use ermod_core::commands::Command;
use ermod_core::model::{Node, PropertyNode};
use ermod_core::ops::ModelStore;
use ermod_core::rules::DEFAULT_STRING_LENGTH;
use ermod_core_types::{DataType, NodeId};

#[test]
fn test_new_string_property_gets_default_length() {
    // GIVEN an entity
    let (store, order) = create_entity(ModelStore::new(), "Order");

    // WHEN creating a string property without a length
    let out = commit(
        store,
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "Reference".to_string(),
            data_type: DataType::String,
        }],
    );

    // THEN the default length is applied
    let prop = out.store.get_property(out.created[0]).unwrap();
    assert_eq!(prop.length, DEFAULT_STRING_LENGTH);
}

#[test]
fn test_explicit_length_in_same_unit_wins() {
    // GIVEN an entity
    let (store, order) = create_entity(ModelStore::new(), "Order");

    // WHEN the unit sets an explicit length alongside the create
    let out = commit(
        store,
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "Reference".to_string(),
            data_type: DataType::String,
        }],
    );
    let prop_id = out.created[0];
    let out = commit(
        out.store,
        vec![Command::PropertySetLength {
            property_id: prop_id,
            length: 200,
        }],
    );

    // THEN the explicit value stands
    assert_eq!(out.store.get_property(prop_id).unwrap().length, 200);
}

#[test]
fn test_non_string_property_gets_no_length() {
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let out = commit(
        store,
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "Total".to_string(),
            data_type: DataType::Decimal,
        }],
    );
    assert_eq!(out.store.get_property(out.created[0]).unwrap().length, 0);
}

#[test]
fn test_primary_key_forces_non_nullable() {
    // GIVEN a nullable property
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let out = commit(
        store,
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "Code".to_string(),
            data_type: DataType::Guid,
        }],
    );
    let prop_id = out.created[0];
    let out = commit(
        out.store,
        vec![Command::PropertySetNullable {
            property_id: prop_id,
            value: true,
        }],
    );
    assert!(out.store.get_property(prop_id).unwrap().is_nullable);

    // WHEN flagging it as primary key
    let out = commit(
        out.store,
        vec![Command::PropertySetPrimaryKey {
            property_id: prop_id,
            value: true,
        }],
    );

    // THEN nullability is corrected in the same unit
    let prop = out.store.get_property(prop_id).unwrap();
    assert!(prop.is_primary_key);
    assert!(!prop.is_nullable);
}

#[test]
fn test_making_primary_key_nullable_is_corrected_back() {
    // GIVEN the derived Id primary key
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let id_prop = store.property_by_name(order, "Id").unwrap().id;

    // WHEN a unit tries to make it nullable
    let out = commit(
        store,
        vec![Command::PropertySetNullable {
            property_id: id_prop,
            value: true,
        }],
    );

    // THEN the unit settles with the value corrected back, and the change
    // log records both the edit and the correction
    let prop = out.store.get_property(id_prop).unwrap();
    assert!(!prop.is_nullable);
    assert_eq!(out.events.len(), 2);
}

#[test]
fn test_replay_unit_skips_defaulting() {
    // GIVEN a replay unit restoring a zero-length string property, the shape
    // a redo of a bulk-loaded model produces
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let restored = PropertyNode::new(
        NodeId::generate(),
        order,
        "LegacyCode".to_string(),
        DataType::String,
    );
    let prop_id = restored.id;

    let out = apply(
        store,
        vec![Command::RestoreNode {
            node: Node::Property(restored),
        }],
        CommitOptions::replay(),
    )
    .expect("Unit should settle");

    // THEN the recorded length is kept verbatim
    assert_eq!(out.store.get_property(prop_id).unwrap().length, 0);
}
