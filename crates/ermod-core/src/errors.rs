use ermod_core_types::NodeId;
use thiserror::Error;

/// Result type alias using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;

/// Typed error taxonomy for the consistency engine
///
/// The rule layer itself never raises errors for ordinary model conditions:
/// rules are guarded no-ops when their preconditions do not hold, and the
/// names they derive are collision-resolved rather than reported. Names the
/// user supplies directly are validated instead (`DuplicateSibling`). The
/// remaining variants cover command validation, missing-node lookups, and
/// the one fatal contract-violation path (`CascadeOverflow`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    // ===== Lookup Errors =====
    /// Entity not found in the store
    #[error("Entity not found: {node_id}")]
    EntityNotFound { node_id: NodeId },

    /// Property not found in the store
    #[error("Property not found: {node_id}")]
    PropertyNotFound { node_id: NodeId },

    /// Navigation property not found in the store
    #[error("Navigation property not found: {node_id}")]
    NavigationNotFound { node_id: NodeId },

    /// Association not found in the store
    #[error("Association not found: {node_id}")]
    AssociationNotFound { node_id: NodeId },

    /// Enum association not found in the store
    #[error("Enum association not found: {node_id}")]
    EnumAssociationNotFound { node_id: NodeId },

    /// Module not found in the store
    #[error("Module not found: {node_id}")]
    ModuleNotFound { node_id: NodeId },

    /// Enum not found in the store
    #[error("Enum not found: {node_id}")]
    EnumNotFound { node_id: NodeId },

    // ===== Validation Errors =====
    /// A name failed command-level validation
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    /// A user-supplied member name is already taken on the entity
    #[error("Entity {entity_id} already has a member named {name}")]
    DuplicateSibling { entity_id: NodeId, name: String },

    // ===== Contract Violations =====
    /// Rule cascade failed to reach a fixed point within the event budget
    ///
    /// This indicates an internal contract violation (a rule pair feeding each
    /// other mutations without converging). The enclosing commit unit is
    /// aborted and the caller's pre-commit state remains valid.
    #[error("Rule cascade exceeded the event budget after {processed} events")]
    CascadeOverflow { processed: usize },

    // ===== Snapshot / Serialization =====
    /// Snapshot document could not be encoded or decoded
    #[error("Snapshot serialization failed: {reason}")]
    Serialization { reason: String },
}
