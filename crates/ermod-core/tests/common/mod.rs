use ermod_core::apply::{apply, CommitOptions, CommitOutput};
use ermod_core::commands::Command;
use ermod_core::ops::ModelStore;
use ermod_core_types::{Multiplicity, NodeId};

/// Apply one commit unit that is expected to settle
#[allow(dead_code)]
pub fn commit(store: ModelStore, commands: Vec<Command>) -> CommitOutput {
    apply(store, commands, CommitOptions::default()).expect("Unit should settle")
}

/// Create an entity in its own unit, returning the new state and its id
#[allow(dead_code)]
pub fn create_entity(store: ModelStore, name: &str) -> (ModelStore, NodeId) {
    let out = commit(
        store,
        vec![Command::EntityCreate {
            name: name.to_string(),
            module: None,
        }],
    );
    let id = out.created[0];
    (out.store, id)
}

/// Create a one-to-many association with both navigation flags set
///
/// `source` is the "one" end; the foreign key lands on `target`.
#[allow(dead_code)]
pub fn create_one_to_many(
    store: ModelStore,
    source: NodeId,
    target: NodeId,
) -> (ModelStore, NodeId) {
    let out = commit(
        store,
        vec![Command::AssociationCreate {
            source_entity: source,
            target_entity: target,
            source_multiplicity: Multiplicity::One,
            target_multiplicity: Multiplicity::Many,
            gen_source_nav: true,
            gen_target_nav: true,
        }],
    );
    let id = out.created[0];
    (out.store, id)
}
