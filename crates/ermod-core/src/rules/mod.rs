//! Reactive rule registry
//!
//! Rules are the reactive handlers that keep the derived layer (navigation
//! properties, foreign keys, enum-typed properties, Id / RowVersion
//! properties) synchronized with the authored layer. The registry is an
//! explicit table keyed by `(NodeKind, LifecyclePhase)`; matching handlers
//! run synchronously in registration order, and any mutation a handler makes
//! queues further events that are processed before the commit unit settles.
//!
//! Handlers never raise errors for ordinary model conditions: when a
//! precondition fails (node already gone, name empty, no matching edge) the
//! handler is a no-op. Creation handlers first check for an existing node
//! with the target identity, which bounds the cascade.

pub(crate) mod association_rules;
pub(crate) mod entity_rules;
pub(crate) mod enumeration_rules;
pub(crate) mod module_rules;
pub(crate) mod property_rules;
pub(crate) mod row_version_rules;

pub use entity_rules::ID_PROPERTY_NAME;
pub use property_rules::DEFAULT_STRING_LENGTH;

use crate::errors::Result;
use crate::events::{ChangeEvent, LifecyclePhase};
use crate::model::NodeKind;
use crate::ops::Tx;

pub(crate) type RuleFn = fn(&mut Tx<'_>, &ChangeEvent) -> Result<()>;

struct RuleEntry {
    kind: NodeKind,
    phase: LifecyclePhase,
    name: &'static str,
    run: RuleFn,
}

/// Ordered registry of reactive handlers
pub struct RuleRegistry {
    entries: Vec<RuleEntry>,
}

impl RuleRegistry {
    /// The standard rule set covering all derived-state synchronization
    pub fn standard() -> Self {
        use LifecyclePhase::{Added, Deleting, FieldChanged};

        let mut registry = Self {
            entries: Vec::new(),
        };

        // Association lifecycle
        registry.on(
            NodeKind::Association,
            Added,
            "association_created",
            association_rules::on_association_created,
        );
        registry.on(
            NodeKind::Association,
            Deleting,
            "association_deleting",
            association_rules::on_association_deleting,
        );
        registry.on(
            NodeKind::Association,
            FieldChanged,
            "association_field_changed",
            association_rules::on_association_field_changed,
        );
        registry.on(
            NodeKind::Navigation,
            Deleting,
            "navigation_deleted_clears_gen_flag",
            association_rules::on_navigation_deleting,
        );
        registry.on(
            NodeKind::Navigation,
            FieldChanged,
            "navigation_renamed_updates_role",
            association_rules::on_navigation_renamed,
        );
        registry.on(
            NodeKind::Property,
            Deleting,
            "foreign_key_deleted_cascades_edge",
            association_rules::on_foreign_key_property_deleting,
        );

        // Enum association lifecycle
        registry.on(
            NodeKind::EnumAssociation,
            Added,
            "enum_association_created",
            enumeration_rules::on_enum_association_created,
        );
        registry.on(
            NodeKind::EnumAssociation,
            Deleting,
            "enum_association_deleting",
            enumeration_rules::on_enum_association_deleting,
        );
        registry.on(
            NodeKind::EnumAssociation,
            FieldChanged,
            "enum_association_property_renamed",
            enumeration_rules::on_enum_association_field_changed,
        );
        registry.on(
            NodeKind::Enum,
            FieldChanged,
            "enum_renamed_syncs_property_types",
            enumeration_rules::on_enum_renamed,
        );
        registry.on(
            NodeKind::Enum,
            Deleting,
            "enum_deleted_cascades_links",
            enumeration_rules::on_enum_deleting,
        );
        registry.on(
            NodeKind::Property,
            Deleting,
            "enum_property_deleted_cascades_link",
            enumeration_rules::on_enum_property_deleting,
        );

        // Module string-reference sync
        registry.on(
            NodeKind::Module,
            FieldChanged,
            "module_renamed_syncs_entities",
            module_rules::on_module_renamed,
        );
        registry.on(
            NodeKind::Module,
            Deleting,
            "module_deleted_clears_entities",
            module_rules::on_module_deleting,
        );

        // Property defaulting and nullability (suppressed during replay)
        registry.on(
            NodeKind::Property,
            Added,
            "property_created_defaults",
            property_rules::on_property_created,
        );
        registry.on(
            NodeKind::Property,
            FieldChanged,
            "property_flags_changed",
            property_rules::on_property_field_changed,
        );

        // RowVersion concurrency token
        registry.on(
            NodeKind::Entity,
            FieldChanged,
            "row_version_toggled",
            row_version_rules::on_entity_row_version_toggled,
        );
        registry.on(
            NodeKind::Property,
            Deleting,
            "row_version_deleted_resets_flag",
            row_version_rules::on_row_version_property_deleting,
        );

        // Entity creation and cascade
        registry.on(
            NodeKind::Entity,
            Added,
            "entity_created_derives_id",
            entity_rules::on_entity_created,
        );
        registry.on(
            NodeKind::Entity,
            Deleting,
            "entity_deleted_cascades_members",
            entity_rules::on_entity_deleting,
        );

        registry
    }

    fn on(&mut self, kind: NodeKind, phase: LifecyclePhase, name: &'static str, run: RuleFn) {
        self.entries.push(RuleEntry {
            kind,
            phase,
            name,
            run,
        });
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every handler registered for this event's (kind, phase) key
    pub(crate) fn dispatch(&self, tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
        let kind = event.kind();
        let phase = event.phase();
        for entry in &self.entries {
            if entry.kind == kind && entry.phase == phase {
                tracing::trace!(rule = entry.name, node_id = %event.node_id(), "rule dispatch");
                (entry.run)(tx, event)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_is_populated() {
        let registry = RuleRegistry::standard();
        assert!(!registry.is_empty());
        // Three independent groups react to property deletion
        let property_deleting = registry
            .entries
            .iter()
            .filter(|e| e.kind == NodeKind::Property && e.phase == LifecyclePhase::Deleting)
            .count();
        assert_eq!(property_deleting, 3);
    }
}
