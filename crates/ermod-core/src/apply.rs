//! Functional-boundary apply function
//!
//! This module provides `apply()`, the canonical entry point for commit
//! units. A unit is atomic and is the only point at which rules observe and
//! react to state:
//!
//! - **All-or-nothing**: either the whole unit succeeds and returns a settled
//!   new state, or it fails and the caller's pre-commit state remains the
//!   valid one
//! - **Rules after edits**: the unit's direct edits are applied first; the
//!   queued events are then dispatched through the rule registry, and any
//!   mutation a rule makes is processed the same way, to a fixed point
//! - **No panics**: invalid input returns typed errors
//!
//! ## Example
//!
//! ```
//! use ermod_core::{apply, Command, CommitOptions, ModelStore};
//!
//! let store = ModelStore::new();
//! let out = apply(
//!     store,
//!     vec![Command::EntityCreate { name: "Order".to_string(), module: None }],
//!     CommitOptions::default(),
//! )
//! .unwrap();
//!
//! // The entity plus its derived Id property
//! let entity = out.store.get_entity(out.created[0]).unwrap();
//! assert!(out.store.property_by_name(entity.id, "Id").is_some());
//! ```

use ermod_core_types::NodeId;
use serde::{Deserialize, Serialize};

use crate::commands::Command;
use crate::errors::{ModelError, Result};
use crate::events::ChangeEvent;
use crate::ops::{
    association_ops, entity_ops, enumeration_ops, module_ops, navigation_ops, property_ops,
    restore_ops, ModelStore, Tx,
};
use crate::rules::RuleRegistry;

/// Upper bound on rule-produced events per unit before the cascade is
/// declared non-converging. Generously above anything a real model edit
/// produces. Events from the unit's own commands are not counted, so bulk
/// loads of any size settle.
const MAX_CASCADE_EVENTS: usize = 10_000;

/// Context flags for one commit unit
///
/// Both flags are threaded explicitly instead of living on an ambient
/// transaction context, so the engine carries no hidden global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOptions {
    /// Bulk load: suppress every rule that would *create* derived content,
    /// since the loader is about to materialize exactly what was persisted
    pub suppress_derivation: bool,
    /// Undo/redo replay: suppress the defaulting/nullability rules, since
    /// the previous, already-consistent field values are restored verbatim
    pub is_replay: bool,
}

impl CommitOptions {
    /// Options for a loader unit
    pub fn bulk_load() -> Self {
        Self {
            suppress_derivation: true,
            is_replay: false,
        }
    }

    /// Options for an undo/redo replay unit
    pub fn replay() -> Self {
        Self {
            suppress_derivation: false,
            is_replay: true,
        }
    }
}

/// Result of a successfully settled commit unit
#[derive(Debug, Clone)]
pub struct CommitOutput {
    /// The new, consistent store state
    pub store: ModelStore,
    /// Full ordered change log of the unit, rule effects included; this is
    /// what the editor re-reads and what the undo/redo collaborator records
    pub events: Vec<ChangeEvent>,
    /// Ids of nodes created by the unit's own commands, in command order
    pub created: Vec<NodeId>,
}

/// Apply a commit unit to a store, returning the settled new state
///
/// Takes ownership of the current state, executes the commands, runs the
/// rule cascade to a fixed point, and returns either a new consistent state
/// or an error. On `Err` the caller's pre-commit copy remains valid and
/// unchanged; no partial derived state leaks.
///
/// # Errors
///
/// Returns an error when a command fails validation (missing node, invalid
/// name) or when the rule cascade exceeds its event budget
/// (`CascadeOverflow`, an internal contract violation).
pub fn apply(
    mut store: ModelStore,
    commands: Vec<Command>,
    options: CommitOptions,
) -> Result<CommitOutput> {
    let mut tx = Tx::new(&mut store, options);
    let mut created = Vec::new();

    for command in commands {
        if let Some(id) = dispatch(&mut tx, command)? {
            created.push(id);
        }
    }

    let events = run_rules(&mut tx)?;
    drop(tx);

    tracing::info!(
        events = events.len(),
        created = created.len(),
        suppress_derivation = options.suppress_derivation,
        is_replay = options.is_replay,
        "commit unit settled"
    );

    Ok(CommitOutput {
        store,
        events,
        created,
    })
}

/// Execute one command's direct edit, returning the created id if any
fn dispatch(tx: &mut Tx<'_>, command: Command) -> Result<Option<NodeId>> {
    match command {
        Command::EntityCreate { name, module } => {
            entity_ops::create_entity(tx, name, module).map(Some)
        }
        Command::EntityRename { entity_id, name } => {
            entity_ops::rename_entity(tx, entity_id, name).map(|()| None)
        }
        Command::EntitySetModule { entity_id, module } => {
            entity_ops::set_module(tx, entity_id, module).map(|()| None)
        }
        Command::EntitySetRowVersion { entity_id, include } => {
            entity_ops::set_incl_row_version(tx, entity_id, include).map(|()| None)
        }
        Command::EntityDelete { entity_id } => {
            entity_ops::delete_entity(tx, entity_id).map(|()| None)
        }

        Command::PropertyCreate {
            entity_id,
            name,
            data_type,
        } => property_ops::create_property(tx, entity_id, name, data_type).map(Some),
        Command::PropertyRename { property_id, name } => {
            property_ops::rename_property(tx, property_id, name).map(|()| None)
        }
        Command::PropertySetDataType {
            property_id,
            data_type,
        } => property_ops::set_data_type(tx, property_id, data_type).map(|()| None),
        Command::PropertySetEnumType {
            property_id,
            enum_type_name,
        } => property_ops::set_enum_type_name(tx, property_id, enum_type_name).map(|()| None),
        Command::PropertySetPrimaryKey { property_id, value } => {
            property_ops::set_primary_key(tx, property_id, value).map(|()| None)
        }
        Command::PropertySetForeignKey { property_id, value } => {
            property_ops::set_foreign_key(tx, property_id, value).map(|()| None)
        }
        Command::PropertySetNullable { property_id, value } => {
            property_ops::set_nullable(tx, property_id, value).map(|()| None)
        }
        Command::PropertySetLength {
            property_id,
            length,
        } => property_ops::set_length(tx, property_id, length).map(|()| None),
        Command::PropertySetIndex {
            property_id,
            indexed,
            unique,
            clustered,
        } => property_ops::set_index(tx, property_id, indexed, unique, clustered).map(|()| None),
        Command::PropertyDelete { property_id } => {
            property_ops::delete_property(tx, property_id).map(|()| None)
        }

        Command::NavigationRename {
            navigation_id,
            name,
        } => navigation_ops::rename_navigation(tx, navigation_id, name).map(|()| None),
        Command::NavigationDelete { navigation_id } => {
            navigation_ops::delete_navigation(tx, navigation_id).map(|()| None)
        }

        Command::AssociationCreate {
            source_entity,
            target_entity,
            source_multiplicity,
            target_multiplicity,
            gen_source_nav,
            gen_target_nav,
        } => association_ops::create_association(
            tx,
            source_entity,
            target_entity,
            source_multiplicity,
            target_multiplicity,
            gen_source_nav,
            gen_target_nav,
        )
        .map(Some),
        Command::AssociationSetGenSourceNav {
            association_id,
            value,
        } => association_ops::set_gen_source_nav(tx, association_id, value).map(|()| None),
        Command::AssociationSetGenTargetNav {
            association_id,
            value,
        } => association_ops::set_gen_target_nav(tx, association_id, value).map(|()| None),
        Command::AssociationSetSourceRole {
            association_id,
            role,
        } => association_ops::set_source_role(tx, association_id, role).map(|()| None),
        Command::AssociationSetTargetRole {
            association_id,
            role,
        } => association_ops::set_target_role(tx, association_id, role).map(|()| None),
        Command::AssociationSetSourceMultiplicity {
            association_id,
            multiplicity,
        } => {
            association_ops::set_source_multiplicity(tx, association_id, multiplicity)
                .map(|()| None)
        }
        Command::AssociationSetTargetMultiplicity {
            association_id,
            multiplicity,
        } => {
            association_ops::set_target_multiplicity(tx, association_id, multiplicity)
                .map(|()| None)
        }
        Command::AssociationDelete { association_id } => {
            association_ops::delete_association(tx, association_id).map(|()| None)
        }

        Command::EnumCreate { name, values } => {
            enumeration_ops::create_enum(tx, name, values).map(Some)
        }
        Command::EnumRename { enum_id, name } => {
            enumeration_ops::rename_enum(tx, enum_id, name).map(|()| None)
        }
        Command::EnumDelete { enum_id } => {
            enumeration_ops::delete_enum(tx, enum_id).map(|()| None)
        }
        Command::EnumAssociationCreate { entity_id, enum_id } => {
            enumeration_ops::create_enum_association(tx, entity_id, enum_id).map(Some)
        }
        Command::EnumAssociationSetPropertyName {
            enum_association_id,
            name,
        } => enumeration_ops::set_property_name(tx, enum_association_id, name).map(|()| None),
        Command::EnumAssociationDelete {
            enum_association_id,
        } => enumeration_ops::delete_enum_association(tx, enum_association_id).map(|()| None),

        Command::ModuleCreate { name } => module_ops::create_module(tx, name).map(Some),
        Command::ModuleRename { module_id, name } => {
            module_ops::rename_module(tx, module_id, name).map(|()| None)
        }
        Command::ModuleDelete { module_id } => {
            module_ops::delete_module(tx, module_id).map(|()| None)
        }

        Command::RestoreNode { node } => restore_ops::restore_node(tx, node).map(|()| None),
        Command::RestoreField {
            node_id,
            change,
            updated_at,
        } => restore_ops::apply_field(tx, node_id, change, updated_at).map(|()| None),
        Command::RemoveNode { node_id } => restore_ops::remove_node(tx, node_id).map(|()| None),
    }
}

/// Drain the pending event queue through the rule registry to a fixed point
fn run_rules(tx: &mut Tx<'_>) -> Result<Vec<ChangeEvent>> {
    let registry = RuleRegistry::standard();
    // Everything queued at this point came from the unit's own commands; the
    // budget bounds only what the rules add on top of them.
    let direct = tx.pending_len();
    let mut events = Vec::new();

    while let Some(event) = tx.take_pending() {
        let cascaded = events.len().saturating_sub(direct);
        if cascaded >= MAX_CASCADE_EVENTS {
            return Err(ModelError::CascadeOverflow {
                processed: cascaded,
            });
        }
        registry.dispatch(tx, &event)?;
        events.push(event);
    }

    Ok(events)
}
