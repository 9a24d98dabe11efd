//! # ermod-core
//!
//! Structural consistency engine for entity-relationship models.
//!
//! The model is a flat element store of typed nodes (entities, properties,
//! navigation properties, association edges, enum association edges, modules,
//! enumerations). All edits flow through `apply()` as atomic commit units;
//! a registry of reactive rules keyed by node kind and lifecycle phase keeps
//! the derived layer (navigation properties, foreign keys, enum-typed
//! properties, Id and RowVersion properties) consistent with the authored
//! layer before a unit settles.
//!
//! ## Architecture
//!
//! - `model` - Node types and the kind-erased `Node` enum
//! - `events` - Typed lifecycle events with invertible field changes
//! - `commands` - The command surface, including replay primitives
//! - `ops` - The element store and per-kind edit operations
//! - `rules` - Reactive rule groups and the registry
//! - `apply` - The commit boundary: dispatch, cascade, settle
//! - `naming` - Collision-resolving name allocation
//! - `snapshot` - Deterministic capture / restore / digest
//! - `logging_facility` - Tracing subscriber setup

pub mod apply;
pub mod commands;
pub mod errors;
pub mod events;
pub mod logging_facility;
pub mod model;
pub mod naming;
pub mod ops;
pub mod rules;
pub mod snapshot;

// Primary API re-exports
pub use apply::{apply, CommitOptions, CommitOutput};
pub use commands::Command;
pub use errors::{ModelError, Result};
pub use events::{ChangeEvent, FieldChange, LifecyclePhase, Touched};
pub use model::{
    AssociationEdge, EntityNode, EnumAssociationEdge, EnumNode, ModuleNode,
    NavigationPropertyNode, Node, NodeKind, PropertyNode, ROW_VERSION_NAME,
};
pub use naming::allocate_name;
pub use ops::ModelStore;
pub use rules::RuleRegistry;
pub use snapshot::SnapshotDocument;
