/// Session undo/redo over the event-log history
///
/// Undo replays a unit's change log backwards with every event inverted;
/// redo replays it forwards. Both go through the ordinary commit boundary as
/// replay units, so the derivation rules observe the restores but their
/// identity checks keep them quiet.
use ermod_core::commands::Command;
use ermod_core::model::ROW_VERSION_NAME;
use ermod_core::snapshot;
use ermod_core_types::{DataType, Multiplicity, NodeId};
use ermod_engine::{Session, SessionError};

fn create_entity(session: &mut Session, name: &str) -> NodeId {
    session
        .commit(vec![Command::EntityCreate {
            name: name.to_string(),
            module: None,
        }])
        .expect("Unit should settle")
        .created[0]
}

#[test]
fn test_undo_entity_create_removes_derived_members_too() {
    // GIVEN a committed entity (with its derived Id)
    let mut session = Session::new();
    let order = create_entity(&mut session, "Order");
    assert!(session.store().property_by_name(order, "Id").is_some());

    // WHEN undoing
    session.undo().expect("Undo should settle");

    // THEN the entity AND the rule-created Id property are gone
    assert!(session.store().list_entities().is_empty());
    assert!(session.store().list_properties().is_empty());
}

#[test]
fn test_redo_restores_exact_state() {
    // GIVEN a committed and undone entity
    let mut session = Session::new();
    let order = create_entity(&mut session, "Order");
    let before = snapshot::capture(session.store());
    session.undo().expect("Undo should settle");

    // WHEN redoing
    session.redo().expect("Redo should settle");

    // THEN the state is identical, same node ids included
    assert_eq!(snapshot::capture(session.store()), before);
    assert!(session.store().get_entity(order).is_ok());
}

#[test]
fn test_undo_restores_exact_prior_state() {
    // GIVEN a settled entity, then a committed rename
    let mut session = Session::new();
    let order = create_entity(&mut session, "Order");
    let before = snapshot::capture(session.store());
    session
        .commit(vec![Command::EntityRename {
            entity_id: order,
            name: "PurchaseOrder".to_string(),
        }])
        .expect("Unit should settle");

    // WHEN undoing the rename
    session.undo().expect("Undo should settle");

    // THEN the state is identical to the pre-rename capture, `updated_at`
    // stamps included
    assert_eq!(snapshot::capture(session.store()), before);
}

#[test]
fn test_undo_entity_delete_restores_cascade() {
    // GIVEN Customer 1--* Order fully derived, then Customer deleted
    let mut session = Session::new();
    let customer = create_entity(&mut session, "Customer");
    let order = create_entity(&mut session, "Order");
    session
        .commit(vec![Command::AssociationCreate {
            source_entity: customer,
            target_entity: order,
            source_multiplicity: Multiplicity::One,
            target_multiplicity: Multiplicity::Many,
            gen_source_nav: true,
            gen_target_nav: true,
        }])
        .expect("Unit should settle");
    let before = snapshot::capture(session.store());

    session
        .commit(vec![Command::EntityDelete {
            entity_id: customer,
        }])
        .expect("Unit should settle");
    assert!(session.store().get_entity(customer).is_err());
    assert!(session.store().property_by_name(order, "CustomerId").is_none());

    // WHEN undoing the delete
    session.undo().expect("Undo should settle");

    // THEN the whole cascade is back: entity, edge, navigations, foreign key
    assert_eq!(snapshot::capture(session.store()), before);
    assert!(session.store().property_by_name(order, "CustomerId").is_some());
    assert!(session
        .store()
        .navigation_by_name(customer, "Order")
        .is_some());
}

#[test]
fn test_undo_field_change_restores_old_value() {
    // GIVEN a renamed entity
    let mut session = Session::new();
    let order = create_entity(&mut session, "Order");
    session
        .commit(vec![Command::EntityRename {
            entity_id: order,
            name: "PurchaseOrder".to_string(),
        }])
        .expect("Unit should settle");

    // WHEN undoing just the rename
    session.undo().expect("Undo should settle");

    // THEN the old name is back and the entity still exists
    assert_eq!(session.store().get_entity(order).unwrap().name, "Order");
}

#[test]
fn test_undo_row_version_toggle() {
    // GIVEN an entity with the concurrency token enabled
    let mut session = Session::new();
    let order = create_entity(&mut session, "Order");
    session
        .commit(vec![Command::EntitySetRowVersion {
            entity_id: order,
            include: true,
        }])
        .expect("Unit should settle");
    assert!(session
        .store()
        .property_by_name(order, ROW_VERSION_NAME)
        .is_some());

    // WHEN undoing
    session.undo().expect("Undo should settle");

    // THEN both the flag and the derived property are back off
    assert!(!session.store().get_entity(order).unwrap().incl_row_version);
    assert!(session
        .store()
        .property_by_name(order, ROW_VERSION_NAME)
        .is_none());
}

#[test]
fn test_multi_step_undo_redo_walks_history() {
    // GIVEN three committed units
    let mut session = Session::new();
    let order = create_entity(&mut session, "Order");
    session
        .commit(vec![Command::PropertyCreate {
            entity_id: order,
            name: "Total".to_string(),
            data_type: DataType::Decimal,
        }])
        .expect("Unit should settle");
    session
        .commit(vec![Command::EntityRename {
            entity_id: order,
            name: "Invoice".to_string(),
        }])
        .expect("Unit should settle");

    // WHEN undoing twice and redoing once
    session.undo().expect("Undo should settle");
    session.undo().expect("Undo should settle");
    session.redo().expect("Redo should settle");

    // THEN we are one step back: property exists, rename undone
    assert_eq!(session.store().get_entity(order).unwrap().name, "Order");
    assert!(session.store().property_by_name(order, "Total").is_some());
    assert!(session.can_undo());
    assert!(session.can_redo());
}

#[test]
fn test_noop_unit_adds_no_history() {
    // GIVEN a settled entity
    let mut session = Session::new();
    let order = create_entity(&mut session, "Order");

    // WHEN committing a value no-op
    session
        .commit(vec![Command::EntitySetRowVersion {
            entity_id: order,
            include: false, // already false
        }])
        .expect("Unit should settle");

    // THEN no history entry was added: one undo drains the whole history
    session.undo().expect("Undo should settle");
    assert!(!session.can_undo());
    assert!(session.store().list_entities().is_empty());
}

#[test]
fn test_redo_stack_cleared_by_new_edit() {
    let mut session = Session::new();
    create_entity(&mut session, "Order");
    session.undo().expect("Undo should settle");
    assert!(session.can_redo());

    create_entity(&mut session, "Customer");
    assert!(!session.can_redo());
    assert!(matches!(session.redo(), Err(SessionError::NothingToRedo)));
}

#[test]
fn test_session_from_snapshot_starts_clean() {
    // GIVEN a captured model
    let mut source = Session::new();
    let order = create_entity(&mut source, "Order");
    let document = snapshot::capture(source.store());

    // WHEN opening a session from the snapshot
    let session = Session::from_snapshot(&document).expect("Restore should settle");

    // THEN the model is there and the history is empty
    assert!(session.store().get_entity(order).is_ok());
    assert!(!session.can_undo());
    assert!(!session.can_redo());
}
