use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ermod_core_types::NodeId;

use crate::errors::{ModelError, Result};
use crate::model::{
    AssociationEdge, EntityNode, EnumAssociationEdge, EnumNode, ModuleNode,
    NavigationPropertyNode, Node, NodeKind, PropertyNode,
};

/// Flat element store for one model graph
///
/// One arena table per node kind, addressed by `NodeId`. All cross-node
/// relationships are identifier pairs or free-text strings, so the reverse
/// lookups the rule layer needs ("the edge whose cached FK name equals X")
/// are plain linear scans. Scan results are sorted by id (UUIDv7, so
/// creation order) to keep first-match rules deterministic.
///
/// Not thread-safe by design: all mutation happens on one logical thread
/// inside commit units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelStore {
    pub(crate) entities: HashMap<NodeId, EntityNode>,
    pub(crate) properties: HashMap<NodeId, PropertyNode>,
    pub(crate) navigations: HashMap<NodeId, NavigationPropertyNode>,
    pub(crate) associations: HashMap<NodeId, AssociationEdge>,
    pub(crate) enum_associations: HashMap<NodeId, EnumAssociationEdge>,
    pub(crate) modules: HashMap<NodeId, ModuleNode>,
    pub(crate) enums: HashMap<NodeId, EnumNode>,
}

impl ModelStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Typed getters =====

    /// Get an entity by id
    ///
    /// # Errors
    /// Returns `EntityNotFound` if no entity has this id.
    pub fn get_entity(&self, id: NodeId) -> Result<&EntityNode> {
        self.entities
            .get(&id)
            .ok_or(ModelError::EntityNotFound { node_id: id })
    }

    /// Get a property by id
    ///
    /// # Errors
    /// Returns `PropertyNotFound` if no property has this id.
    pub fn get_property(&self, id: NodeId) -> Result<&PropertyNode> {
        self.properties
            .get(&id)
            .ok_or(ModelError::PropertyNotFound { node_id: id })
    }

    /// Get a navigation property by id
    ///
    /// # Errors
    /// Returns `NavigationNotFound` if no navigation property has this id.
    pub fn get_navigation(&self, id: NodeId) -> Result<&NavigationPropertyNode> {
        self.navigations
            .get(&id)
            .ok_or(ModelError::NavigationNotFound { node_id: id })
    }

    /// Get an association by id
    ///
    /// # Errors
    /// Returns `AssociationNotFound` if no association has this id.
    pub fn get_association(&self, id: NodeId) -> Result<&AssociationEdge> {
        self.associations
            .get(&id)
            .ok_or(ModelError::AssociationNotFound { node_id: id })
    }

    /// Get an enum association by id
    ///
    /// # Errors
    /// Returns `EnumAssociationNotFound` if no enum association has this id.
    pub fn get_enum_association(&self, id: NodeId) -> Result<&EnumAssociationEdge> {
        self.enum_associations
            .get(&id)
            .ok_or(ModelError::EnumAssociationNotFound { node_id: id })
    }

    /// Get a module by id
    ///
    /// # Errors
    /// Returns `ModuleNotFound` if no module has this id.
    pub fn get_module(&self, id: NodeId) -> Result<&ModuleNode> {
        self.modules
            .get(&id)
            .ok_or(ModelError::ModuleNotFound { node_id: id })
    }

    /// Get an enumeration by id
    ///
    /// # Errors
    /// Returns `EnumNotFound` if no enumeration has this id.
    pub fn get_enum(&self, id: NodeId) -> Result<&EnumNode> {
        self.enums
            .get(&id)
            .ok_or(ModelError::EnumNotFound { node_id: id })
    }

    // ===== Mutable getters (engine-internal; external edits go through commands) =====

    pub(crate) fn get_entity_mut(&mut self, id: NodeId) -> Result<&mut EntityNode> {
        self.entities
            .get_mut(&id)
            .ok_or(ModelError::EntityNotFound { node_id: id })
    }

    pub(crate) fn get_property_mut(&mut self, id: NodeId) -> Result<&mut PropertyNode> {
        self.properties
            .get_mut(&id)
            .ok_or(ModelError::PropertyNotFound { node_id: id })
    }

    pub(crate) fn get_navigation_mut(&mut self, id: NodeId) -> Result<&mut NavigationPropertyNode> {
        self.navigations
            .get_mut(&id)
            .ok_or(ModelError::NavigationNotFound { node_id: id })
    }

    pub(crate) fn get_association_mut(&mut self, id: NodeId) -> Result<&mut AssociationEdge> {
        self.associations
            .get_mut(&id)
            .ok_or(ModelError::AssociationNotFound { node_id: id })
    }

    pub(crate) fn get_enum_association_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut EnumAssociationEdge> {
        self.enum_associations
            .get_mut(&id)
            .ok_or(ModelError::EnumAssociationNotFound { node_id: id })
    }

    pub(crate) fn get_module_mut(&mut self, id: NodeId) -> Result<&mut ModuleNode> {
        self.modules
            .get_mut(&id)
            .ok_or(ModelError::ModuleNotFound { node_id: id })
    }

    pub(crate) fn get_enum_mut(&mut self, id: NodeId) -> Result<&mut EnumNode> {
        self.enums
            .get_mut(&id)
            .ok_or(ModelError::EnumNotFound { node_id: id })
    }

    // ===== Listings (sorted by id for deterministic iteration) =====

    /// List all entities
    pub fn list_entities(&self) -> Vec<&EntityNode> {
        let mut items: Vec<_> = self.entities.values().collect();
        items.sort_by_key(|n| n.id);
        items
    }

    /// List all properties
    pub fn list_properties(&self) -> Vec<&PropertyNode> {
        let mut items: Vec<_> = self.properties.values().collect();
        items.sort_by_key(|n| n.id);
        items
    }

    /// List all navigation properties
    pub fn list_navigations(&self) -> Vec<&NavigationPropertyNode> {
        let mut items: Vec<_> = self.navigations.values().collect();
        items.sort_by_key(|n| n.id);
        items
    }

    /// List all associations
    pub fn list_associations(&self) -> Vec<&AssociationEdge> {
        let mut items: Vec<_> = self.associations.values().collect();
        items.sort_by_key(|n| n.id);
        items
    }

    /// List all enum associations
    pub fn list_enum_associations(&self) -> Vec<&EnumAssociationEdge> {
        let mut items: Vec<_> = self.enum_associations.values().collect();
        items.sort_by_key(|n| n.id);
        items
    }

    /// List all modules
    pub fn list_modules(&self) -> Vec<&ModuleNode> {
        let mut items: Vec<_> = self.modules.values().collect();
        items.sort_by_key(|n| n.id);
        items
    }

    /// List all enumerations
    pub fn list_enums(&self) -> Vec<&EnumNode> {
        let mut items: Vec<_> = self.enums.values().collect();
        items.sort_by_key(|n| n.id);
        items
    }

    // ===== Ownership scans =====

    /// Properties of one entity in display order
    ///
    /// This is the ordered property list the code generator consumes.
    pub fn properties_of(&self, entity_id: NodeId) -> Vec<&PropertyNode> {
        let mut items: Vec<_> = self
            .properties
            .values()
            .filter(|p| p.entity_id == entity_id)
            .collect();
        items.sort_by_key(|p| (p.display_order, p.id));
        items
    }

    /// Navigation properties of one entity, in creation order
    pub fn navigations_of(&self, entity_id: NodeId) -> Vec<&NavigationPropertyNode> {
        let mut items: Vec<_> = self
            .navigations
            .values()
            .filter(|n| n.entity_id == entity_id)
            .collect();
        items.sort_by_key(|n| n.id);
        items
    }

    /// Find a property of an entity by name
    pub fn property_by_name(&self, entity_id: NodeId, name: &str) -> Option<&PropertyNode> {
        self.properties_of(entity_id)
            .into_iter()
            .find(|p| p.name == name)
    }

    /// Find a navigation property of an entity by name
    pub fn navigation_by_name(
        &self,
        entity_id: NodeId,
        name: &str,
    ) -> Option<&NavigationPropertyNode> {
        self.navigations_of(entity_id)
            .into_iter()
            .find(|n| n.name == name)
    }

    /// Names of all members (properties and navigation properties) of an entity
    ///
    /// This is the sibling set the name allocator resolves against: generated
    /// members must not collide with either kind, since both become members
    /// of the same generated type.
    pub fn member_names(&self, entity_id: NodeId) -> Vec<String> {
        let mut names: Vec<String> = self
            .properties
            .values()
            .filter(|p| p.entity_id == entity_id)
            .map(|p| p.name.clone())
            .collect();
        names.extend(
            self.navigations
                .values()
                .filter(|n| n.entity_id == entity_id)
                .map(|n| n.name.clone()),
        );
        names
    }

    /// Whether an entity already has a member (property or navigation
    /// property) with this name
    ///
    /// User-issued creates and renames validate against this; rule-derived
    /// names go through the allocator instead and never collide.
    pub fn has_member(&self, entity_id: NodeId, name: &str) -> bool {
        self.property_by_name(entity_id, name).is_some()
            || self.navigation_by_name(entity_id, name).is_some()
    }

    /// Next free display-order slot for a new property of an entity
    pub fn next_display_order(&self, entity_id: NodeId) -> u32 {
        self.properties
            .values()
            .filter(|p| p.entity_id == entity_id)
            .map(|p| p.display_order + 1)
            .max()
            .unwrap_or(0)
    }

    // ===== Kind-erased access =====

    /// Check whether any node with this id exists
    pub fn contains(&self, id: NodeId) -> bool {
        self.kind_of(id).is_some()
    }

    /// Kind of the node with this id, if present
    pub fn kind_of(&self, id: NodeId) -> Option<NodeKind> {
        if self.entities.contains_key(&id) {
            Some(NodeKind::Entity)
        } else if self.properties.contains_key(&id) {
            Some(NodeKind::Property)
        } else if self.navigations.contains_key(&id) {
            Some(NodeKind::Navigation)
        } else if self.associations.contains_key(&id) {
            Some(NodeKind::Association)
        } else if self.enum_associations.contains_key(&id) {
            Some(NodeKind::EnumAssociation)
        } else if self.modules.contains_key(&id) {
            Some(NodeKind::Module)
        } else if self.enums.contains_key(&id) {
            Some(NodeKind::Enum)
        } else {
            None
        }
    }

    /// Clone the node with this id, if present
    pub fn get_node(&self, id: NodeId) -> Option<Node> {
        match self.kind_of(id)? {
            NodeKind::Entity => self.entities.get(&id).cloned().map(Node::Entity),
            NodeKind::Property => self.properties.get(&id).cloned().map(Node::Property),
            NodeKind::Navigation => self.navigations.get(&id).cloned().map(Node::Navigation),
            NodeKind::Association => self.associations.get(&id).cloned().map(Node::Association),
            NodeKind::EnumAssociation => self
                .enum_associations
                .get(&id)
                .cloned()
                .map(Node::EnumAssociation),
            NodeKind::Module => self.modules.get(&id).cloned().map(Node::Module),
            NodeKind::Enum => self.enums.get(&id).cloned().map(Node::Enum),
        }
    }

    /// Current `updated_at` stamp of the node with this id, if present
    pub(crate) fn updated_at_of(&self, id: NodeId) -> Option<DateTime<Utc>> {
        match self.kind_of(id)? {
            NodeKind::Entity => self.entities.get(&id).map(|n| n.updated_at),
            NodeKind::Property => self.properties.get(&id).map(|n| n.updated_at),
            NodeKind::Navigation => self.navigations.get(&id).map(|n| n.updated_at),
            NodeKind::Association => self.associations.get(&id).map(|n| n.updated_at),
            NodeKind::EnumAssociation => self.enum_associations.get(&id).map(|n| n.updated_at),
            NodeKind::Module => self.modules.get(&id).map(|n| n.updated_at),
            NodeKind::Enum => self.enums.get(&id).map(|n| n.updated_at),
        }
    }

    /// Set the `updated_at` stamp of the node with this id
    ///
    /// No-op when the node is gone; deletion events for a node may still be
    /// in flight after its arena slot is removed.
    pub(crate) fn touch(&mut self, id: NodeId, at: DateTime<Utc>) {
        let Some(kind) = self.kind_of(id) else {
            return;
        };
        match kind {
            NodeKind::Entity => {
                if let Some(n) = self.entities.get_mut(&id) {
                    n.updated_at = at;
                }
            }
            NodeKind::Property => {
                if let Some(n) = self.properties.get_mut(&id) {
                    n.updated_at = at;
                }
            }
            NodeKind::Navigation => {
                if let Some(n) = self.navigations.get_mut(&id) {
                    n.updated_at = at;
                }
            }
            NodeKind::Association => {
                if let Some(n) = self.associations.get_mut(&id) {
                    n.updated_at = at;
                }
            }
            NodeKind::EnumAssociation => {
                if let Some(n) = self.enum_associations.get_mut(&id) {
                    n.updated_at = at;
                }
            }
            NodeKind::Module => {
                if let Some(n) = self.modules.get_mut(&id) {
                    n.updated_at = at;
                }
            }
            NodeKind::Enum => {
                if let Some(n) = self.enums.get_mut(&id) {
                    n.updated_at = at;
                }
            }
        }
    }

    /// Insert a node into its kind table
    pub(crate) fn insert_node(&mut self, node: Node) {
        match node {
            Node::Entity(n) => {
                self.entities.insert(n.id, n);
            }
            Node::Property(n) => {
                self.properties.insert(n.id, n);
            }
            Node::Navigation(n) => {
                self.navigations.insert(n.id, n);
            }
            Node::Association(n) => {
                self.associations.insert(n.id, n);
            }
            Node::EnumAssociation(n) => {
                self.enum_associations.insert(n.id, n);
            }
            Node::Module(n) => {
                self.modules.insert(n.id, n);
            }
            Node::Enum(n) => {
                self.enums.insert(n.id, n);
            }
        }
    }

    /// Remove the node with this id, returning it
    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        match self.kind_of(id)? {
            NodeKind::Entity => self.entities.remove(&id).map(Node::Entity),
            NodeKind::Property => self.properties.remove(&id).map(Node::Property),
            NodeKind::Navigation => self.navigations.remove(&id).map(Node::Navigation),
            NodeKind::Association => self.associations.remove(&id).map(Node::Association),
            NodeKind::EnumAssociation => {
                self.enum_associations.remove(&id).map(Node::EnumAssociation)
            }
            NodeKind::Module => self.modules.remove(&id).map(Node::Module),
            NodeKind::Enum => self.enums.remove(&id).map(Node::Enum),
        }
    }
}
