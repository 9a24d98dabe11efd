/// Enum association derivation and enum-name sync
mod common;

use common::{commit, create_entity};
use ermod_core::commands::Command;
use ermod_core::ops::ModelStore;
use ermod_core_types::{DataType, NodeId};

fn order_with_status(store: ModelStore) -> (ModelStore, NodeId, NodeId, NodeId) {
    let (store, order) = create_entity(store, "Order");
    let out = commit(
        store,
        vec![Command::EnumCreate {
            name: "OrderStatus".to_string(),
            values: vec!["Open".to_string(), "Shipped".to_string(), "Closed".to_string()],
        }],
    );
    let enum_id = out.created[0];
    let out = commit(
        out.store,
        vec![Command::EnumAssociationCreate {
            entity_id: order,
            enum_id,
        }],
    );
    let link_id = out.created[0];
    (out.store, order, enum_id, link_id)
}

#[test]
fn test_enum_association_derives_typed_property() {
    // GIVEN an entity and an enumeration
    // WHEN linking them
    let (store, order, _enum_id, link_id) = order_with_status(ModelStore::new());

    // THEN the entity gains an enum-typed property named after the enum
    let prop = store
        .property_by_name(order, "OrderStatus")
        .expect("Enum-typed property should be derived");
    assert_eq!(prop.data_type, DataType::Enum);
    assert_eq!(prop.enum_type_name, "OrderStatus");

    // AND the link caches the resolved property name
    let link = store.get_enum_association(link_id).unwrap();
    assert_eq!(link.property_name, "OrderStatus");
}

#[test]
fn test_enum_rename_rewrites_all_references() {
    // GIVEN a linked enum property plus a second property typed directly
    let (store, order, enum_id, _link) = order_with_status(ModelStore::new());
    let out = commit(
        store,
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "PreviousStatus".to_string(),
            data_type: DataType::Enum,
        }],
    );
    let direct_prop = out.created[0];
    let out = commit(
        out.store,
        vec![Command::PropertySetEnumType {
            property_id: direct_prop,
            enum_type_name: "OrderStatus".to_string(),
        }],
    );

    // WHEN renaming the enumeration
    let out = commit(
        out.store,
        vec![Command::EnumRename {
            enum_id,
            name: "Status".to_string(),
        }],
    );

    // THEN every property reference follows, edge-derived or direct; the
    // property NAMES stay as they were
    let derived = out.store.property_by_name(order, "OrderStatus").unwrap();
    assert_eq!(derived.enum_type_name, "Status");
    let direct = out.store.get_property(direct_prop).unwrap();
    assert_eq!(direct.enum_type_name, "Status");
    assert_eq!(direct.name, "PreviousStatus");
}

#[test]
fn test_link_property_name_change_renames_property() {
    // GIVEN a linked enum property
    let (store, order, _enum_id, link_id) = order_with_status(ModelStore::new());

    // WHEN renaming the cached property name on the link
    let out = commit(
        store,
        vec![Command::EnumAssociationSetPropertyName {
            enum_association_id: link_id,
            name: "Status".to_string(),
        }],
    );

    // THEN the derived property follows
    assert!(out.store.property_by_name(order, "OrderStatus").is_none());
    let prop = out.store.property_by_name(order, "Status").unwrap();
    assert_eq!(prop.data_type, DataType::Enum);
}

#[test]
fn test_link_delete_cascades_property() {
    // GIVEN a linked enum property
    let (store, order, _enum_id, link_id) = order_with_status(ModelStore::new());

    // WHEN deleting the link
    let out = commit(
        store,
        vec![Command::EnumAssociationDelete {
            enum_association_id: link_id,
        }],
    );

    // THEN the derived property goes with it
    assert!(out.store.property_by_name(order, "OrderStatus").is_none());
}

#[test]
fn test_property_delete_cascades_link() {
    // GIVEN a linked enum property
    let (store, order, _enum_id, link_id) = order_with_status(ModelStore::new());
    let prop_id = store.property_by_name(order, "OrderStatus").unwrap().id;

    // WHEN deleting the derived property directly
    let out = commit(
        store,
        vec![Command::PropertyDelete {
            property_id: prop_id,
        }],
    );

    // THEN the link is reverse-cascaded away while the enum survives
    assert!(out.store.get_enum_association(link_id).is_err());
    assert_eq!(out.store.list_enums().len(), 1);
}

#[test]
fn test_enum_delete_cascades_links_and_properties() {
    // GIVEN a linked enum property
    let (store, order, enum_id, link_id) = order_with_status(ModelStore::new());

    // WHEN deleting the enumeration
    let out = commit(store, vec![Command::EnumDelete { enum_id }]);

    // THEN the link and the derived property cascade away
    assert!(out.store.get_enum_association(link_id).is_err());
    assert!(out.store.property_by_name(order, "OrderStatus").is_none());
    assert!(out.store.get_entity(order).is_ok());
}

#[test]
fn test_enum_property_name_collision_takes_suffix() {
    // GIVEN an entity that already has a member named like the enum
    let (store, order) = create_entity(ModelStore::new(), "Order");
    let out = commit(
        store,
        vec![Command::PropertyCreate {
            entity_id: order,
            name: "OrderStatus".to_string(),
            data_type: DataType::String,
        }],
    );
    let out = commit(
        out.store,
        vec![Command::EnumCreate {
            name: "OrderStatus".to_string(),
            values: vec!["Open".to_string()],
        }],
    );
    let enum_id = out.created[0];

    // WHEN linking the enum
    let out = commit(
        out.store,
        vec![Command::EnumAssociationCreate {
            entity_id: order,
            enum_id,
        }],
    );
    let link_id = out.created[0];

    // THEN the derived property takes the next free suffix
    let link = out.store.get_enum_association(link_id).unwrap();
    assert_eq!(link.property_name, "OrderStatus2");
    let prop = out.store.property_by_name(order, "OrderStatus2").unwrap();
    assert_eq!(prop.data_type, DataType::Enum);
}
