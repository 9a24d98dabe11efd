//! Association derivation and reverse sync
//!
//! An association edge is the authored element; its navigation properties
//! (one per end with the generation flag set) and the foreign-key property on
//! the target entity are derived from it. The edge caches the resolved names
//! of those members (`source_role_name`, `target_role_name`,
//! `fk_property_name`) so later edits and deletions can be matched back
//! without structural back-pointers.

use ermod_core_types::{DataType, Multiplicity, NodeId};

use crate::errors::Result;
use crate::events::{ChangeEvent, FieldChange};
use crate::model::Node;
use crate::naming::allocate_name;
use crate::ops::{association_ops, navigation_ops, property_ops, Tx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Source,
    Target,
}

/// Derive navigation properties and the foreign-key property for a new edge
pub(crate) fn on_association_created(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    if tx.options().suppress_derivation {
        return Ok(());
    }
    let ChangeEvent::NodeAdded {
        node: Node::Association(added),
    } = event
    else {
        return Ok(());
    };
    let id = added.id;
    // A cascade earlier in the unit may already have removed the edge
    let Ok(edge) = tx.store().get_association(id) else {
        return Ok(());
    };
    let (gen_source, gen_target) = (edge.gen_source_nav, edge.gen_target_nav);

    if gen_source {
        ensure_navigation(tx, id, End::Source)?;
    }
    if gen_target {
        ensure_navigation(tx, id, End::Target)?;
    }
    ensure_foreign_key(tx, id)?;

    Ok(())
}

/// Materialize the navigation property for one end of an edge
///
/// Idempotent: when the cached role name is non-empty and a navigation with
/// that name exists on the owning entity, the member is already materialized
/// and nothing happens. Otherwise the name is resolved against the owner's
/// member set (base name = cached role, or the pointed-at entity's name) and
/// the resolved name is cached back onto the edge, which is what makes a
/// re-fired creation event a no-op.
fn ensure_navigation(tx: &mut Tx<'_>, edge_id: NodeId, end: End) -> Result<()> {
    let Ok(edge) = tx.store().get_association(edge_id) else {
        return Ok(());
    };
    let (owner, points_at, cached_role, is_collection) = match end {
        End::Source => (
            edge.source_entity,
            edge.target_entity,
            edge.source_role_name.clone(),
            edge.target_multiplicity == Multiplicity::Many,
        ),
        End::Target => (
            edge.target_entity,
            edge.source_entity,
            edge.target_role_name.clone(),
            edge.source_multiplicity == Multiplicity::Many,
        ),
    };

    if !cached_role.is_empty() && tx.store().navigation_by_name(owner, &cached_role).is_some() {
        return Ok(());
    }

    let base = if cached_role.is_empty() {
        tx.store().get_entity(points_at)?.name.clone()
    } else {
        cached_role
    };
    let taken = tx.store().member_names(owner);
    let name = allocate_name(&base, taken.iter().map(String::as_str));

    navigation_ops::create_navigation(tx, owner, name.clone(), points_at, is_collection)?;
    tracing::debug!(association = %edge_id, navigation = %name, ?end, "derived navigation property");

    match end {
        End::Source => association_ops::set_source_role(tx, edge_id, name),
        End::Target => association_ops::set_target_role(tx, edge_id, name),
    }
}

/// Materialize the foreign-key property on the target entity
///
/// Idempotent via the cached `fk_property_name`: when it names an existing
/// FK-flagged property on the target, the member is already materialized.
fn ensure_foreign_key(tx: &mut Tx<'_>, edge_id: NodeId) -> Result<()> {
    let Ok(edge) = tx.store().get_association(edge_id) else {
        return Ok(());
    };
    let target = edge.target_entity;
    let source = edge.source_entity;
    let cached = edge.fk_property_name.clone();
    let nullable = edge.fk_nullable();

    if !cached.is_empty() {
        if let Some(existing) = tx.store().property_by_name(target, &cached) {
            if existing.is_foreign_key {
                return Ok(());
            }
        }
    }

    let base = format!("{}Id", tx.store().get_entity(source)?.name);
    let taken = tx.store().member_names(target);
    let name = allocate_name(&base, taken.iter().map(String::as_str));

    let property_id = property_ops::create_property(tx, target, name.clone(), DataType::Int32)?;
    property_ops::set_foreign_key(tx, property_id, true)?;
    property_ops::set_nullable(tx, property_id, nullable)?;
    tracing::debug!(association = %edge_id, property = %name, "derived foreign-key property");

    association_ops::set_fk_property_name(tx, edge_id, name)
}

/// Cascade the derived members when an edge is deleted
pub(crate) fn on_association_deleting(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::NodeDeleting {
        node: Node::Association(edge),
    } = event
    else {
        return Ok(());
    };

    if !edge.source_role_name.is_empty() {
        let nav_id = tx
            .store()
            .navigation_by_name(edge.source_entity, &edge.source_role_name)
            .map(|n| n.id);
        if let Some(nav_id) = nav_id {
            tx.delete(nav_id);
        }
    }
    if !edge.target_role_name.is_empty() {
        let nav_id = tx
            .store()
            .navigation_by_name(edge.target_entity, &edge.target_role_name)
            .map(|n| n.id);
        if let Some(nav_id) = nav_id {
            tx.delete(nav_id);
        }
    }
    if !edge.fk_property_name.is_empty() {
        let property_id = tx
            .store()
            .property_by_name(edge.target_entity, &edge.fk_property_name)
            .filter(|p| p.is_foreign_key)
            .map(|p| p.id);
        if let Some(property_id) = property_id {
            tx.delete(property_id);
        }
    }

    Ok(())
}

/// Forward sync for edits to edge fields
pub(crate) fn on_association_field_changed(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::FieldChanged {
        node_id, change, ..
    } = event
    else {
        return Ok(());
    };
    let id = *node_id;

    match change {
        FieldChange::AssociationGenSourceNav { new: true, .. } => {
            if !tx.options().suppress_derivation {
                ensure_navigation(tx, id, End::Source)?;
            }
        }
        FieldChange::AssociationGenSourceNav { new: false, .. } => {
            remove_navigation(tx, id, End::Source);
        }
        FieldChange::AssociationGenTargetNav { new: true, .. } => {
            if !tx.options().suppress_derivation {
                ensure_navigation(tx, id, End::Target)?;
            }
        }
        FieldChange::AssociationGenTargetNav { new: false, .. } => {
            remove_navigation(tx, id, End::Target);
        }
        FieldChange::AssociationSourceRole { old, new } => {
            rename_role_navigation(tx, id, End::Source, old, new)?;
        }
        FieldChange::AssociationTargetRole { old, new } => {
            rename_role_navigation(tx, id, End::Target, old, new)?;
        }
        FieldChange::AssociationSourceMultiplicity { new, .. } => {
            sync_source_multiplicity(tx, id, *new)?;
        }
        FieldChange::AssociationTargetMultiplicity { new, .. } => {
            sync_target_multiplicity(tx, id, *new)?;
        }
        _ => {}
    }

    Ok(())
}

/// Delete the navigation derived for one end (generation flag turned off)
fn remove_navigation(tx: &mut Tx<'_>, edge_id: NodeId, end: End) {
    let Ok(edge) = tx.store().get_association(edge_id) else {
        return;
    };
    let (owner, role) = match end {
        End::Source => (edge.source_entity, edge.source_role_name.clone()),
        End::Target => (edge.target_entity, edge.target_role_name.clone()),
    };
    if role.is_empty() {
        return;
    }
    let nav_id = tx.store().navigation_by_name(owner, &role).map(|n| n.id);
    if let Some(nav_id) = nav_id {
        tx.delete(nav_id);
    }
}

/// Rename the derived navigation when a role name changes on the edge
///
/// Only fires when both old and new names are non-empty; the empty-to-name
/// transition is the creation rule caching its resolved name.
fn rename_role_navigation(
    tx: &mut Tx<'_>,
    edge_id: NodeId,
    end: End,
    old: &str,
    new: &str,
) -> Result<()> {
    if old.is_empty() || new.is_empty() {
        return Ok(());
    }
    let Ok(edge) = tx.store().get_association(edge_id) else {
        return Ok(());
    };
    let owner = match end {
        End::Source => edge.source_entity,
        End::Target => edge.target_entity,
    };
    let nav_id = tx.store().navigation_by_name(owner, old).map(|n| n.id);
    if let Some(nav_id) = nav_id {
        navigation_ops::rename_navigation(tx, nav_id, new.to_string())?;
    }
    Ok(())
}

/// Source-end multiplicity governs FK nullability and whether the
/// target-side navigation is a collection
fn sync_source_multiplicity(tx: &mut Tx<'_>, edge_id: NodeId, new: Multiplicity) -> Result<()> {
    let Ok(edge) = tx.store().get_association(edge_id) else {
        return Ok(());
    };
    let target = edge.target_entity;
    let fk_name = edge.fk_property_name.clone();
    let target_role = edge.target_role_name.clone();

    if !fk_name.is_empty() {
        let property_id = tx
            .store()
            .property_by_name(target, &fk_name)
            .filter(|p| p.is_foreign_key)
            .map(|p| p.id);
        if let Some(property_id) = property_id {
            property_ops::set_nullable(tx, property_id, new.fk_nullable())?;
        }
    }
    if !target_role.is_empty() {
        let nav_id = tx
            .store()
            .navigation_by_name(target, &target_role)
            .map(|n| n.id);
        if let Some(nav_id) = nav_id {
            navigation_ops::set_is_collection(tx, nav_id, new == Multiplicity::Many)?;
        }
    }
    Ok(())
}

/// Target-end multiplicity governs whether the source-side navigation is a
/// collection
fn sync_target_multiplicity(tx: &mut Tx<'_>, edge_id: NodeId, new: Multiplicity) -> Result<()> {
    let Ok(edge) = tx.store().get_association(edge_id) else {
        return Ok(());
    };
    let source = edge.source_entity;
    let source_role = edge.source_role_name.clone();

    if !source_role.is_empty() {
        let nav_id = tx
            .store()
            .navigation_by_name(source, &source_role)
            .map(|n| n.id);
        if let Some(nav_id) = nav_id {
            navigation_ops::set_is_collection(tx, nav_id, new == Multiplicity::Many)?;
        }
    }
    Ok(())
}

/// Reverse sync: deleting a derived navigation clears the edge's generation
/// flag instead of deleting the edge
///
/// Source-side edges are checked first, then target-side; the scan stops at
/// the first match.
pub(crate) fn on_navigation_deleting(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::NodeDeleting {
        node: Node::Navigation(nav),
    } = event
    else {
        return Ok(());
    };

    let mut hit: Option<(NodeId, End)> = None;
    for edge in tx.store().list_associations() {
        if edge.source_entity == nav.entity_id
            && edge.gen_source_nav
            && edge.source_role_name == nav.name
        {
            hit = Some((edge.id, End::Source));
            break;
        }
    }
    if hit.is_none() {
        for edge in tx.store().list_associations() {
            if edge.target_entity == nav.entity_id
                && edge.gen_target_nav
                && edge.target_role_name == nav.name
            {
                hit = Some((edge.id, End::Target));
                break;
            }
        }
    }

    if let Some((edge_id, end)) = hit {
        tracing::debug!(navigation = %nav.id, association = %edge_id, ?end, "navigation deleted; clearing generation flag");
        match end {
            End::Source => association_ops::set_gen_source_nav(tx, edge_id, false)?,
            End::Target => association_ops::set_gen_target_nav(tx, edge_id, false)?,
        }
    }

    Ok(())
}

/// Reverse sync: renaming a derived navigation updates the matching role
/// name on its edge
pub(crate) fn on_navigation_renamed(tx: &mut Tx<'_>, event: &ChangeEvent) -> Result<()> {
    let ChangeEvent::FieldChanged {
        node_id,
        change: FieldChange::NavigationName { old, new },
        ..
    } = event
    else {
        return Ok(());
    };
    if old.is_empty() || new.is_empty() {
        return Ok(());
    }
    let Ok(nav) = tx.store().get_navigation(*node_id) else {
        return Ok(());
    };
    let owner = nav.entity_id;

    let mut hit: Option<(NodeId, End)> = None;
    for edge in tx.store().list_associations() {
        if edge.source_entity == owner && edge.gen_source_nav && edge.source_role_name == *old {
            hit = Some((edge.id, End::Source));
            break;
        }
    }
    if hit.is_none() {
        for edge in tx.store().list_associations() {
            if edge.target_entity == owner && edge.gen_target_nav && edge.target_role_name == *old {
                hit = Some((edge.id, End::Target));
                break;
            }
        }
    }

    if let Some((edge_id, end)) = hit {
        match end {
            End::Source => association_ops::set_source_role(tx, edge_id, new.clone())?,
            End::Target => association_ops::set_target_role(tx, edge_id, new.clone())?,
        }
    }

    Ok(())
}

/// Reverse sync: deleting the derived foreign-key property deletes the edge
/// it backs, which cascades the remaining derived members
pub(crate) fn on_foreign_key_property_deleting(
    tx: &mut Tx<'_>,
    event: &ChangeEvent,
) -> Result<()> {
    let ChangeEvent::NodeDeleting {
        node: Node::Property(property),
    } = event
    else {
        return Ok(());
    };
    if !property.is_foreign_key {
        return Ok(());
    }

    let edge_id = tx
        .store()
        .list_associations()
        .into_iter()
        .find(|e| e.target_entity == property.entity_id && e.fk_property_name == property.name)
        .map(|e| e.id);
    if let Some(edge_id) = edge_id {
        tracing::debug!(property = %property.id, association = %edge_id, "foreign key deleted; cascading association");
        tx.delete(edge_id);
    }

    Ok(())
}
