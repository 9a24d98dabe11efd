use ermod_core_types::NodeId;
use serde::{Deserialize, Serialize};

use super::{
    AssociationEdge, EntityNode, EnumAssociationEdge, EnumNode, ModuleNode,
    NavigationPropertyNode, PropertyNode,
};

/// Discriminant for the node kinds held by the store
///
/// Rule dispatch is keyed by `(NodeKind, LifecyclePhase)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Entity,
    Property,
    Navigation,
    Association,
    EnumAssociation,
    Module,
    Enum,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            NodeKind::Entity => "Entity",
            NodeKind::Property => "Property",
            NodeKind::Navigation => "Navigation",
            NodeKind::Association => "Association",
            NodeKind::EnumAssociation => "EnumAssociation",
            NodeKind::Module => "Module",
            NodeKind::Enum => "Enum",
        };
        write!(f, "{tag}")
    }
}

/// Kind-erased model node
///
/// Used wherever a node must travel as a value: lifecycle event payloads
/// (deletion events carry the node as it was before removal), snapshot
/// documents, and the `RestoreNode` replay command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Entity(EntityNode),
    Property(PropertyNode),
    Navigation(NavigationPropertyNode),
    Association(AssociationEdge),
    EnumAssociation(EnumAssociationEdge),
    Module(ModuleNode),
    Enum(EnumNode),
}

impl Node {
    /// Identifier of the wrapped node
    pub fn id(&self) -> NodeId {
        match self {
            Node::Entity(n) => n.id,
            Node::Property(n) => n.id,
            Node::Navigation(n) => n.id,
            Node::Association(n) => n.id,
            Node::EnumAssociation(n) => n.id,
            Node::Module(n) => n.id,
            Node::Enum(n) => n.id,
        }
    }

    /// Kind of the wrapped node
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Entity(_) => NodeKind::Entity,
            Node::Property(_) => NodeKind::Property,
            Node::Navigation(_) => NodeKind::Navigation,
            Node::Association(_) => NodeKind::Association,
            Node::EnumAssociation(_) => NodeKind::EnumAssociation,
            Node::Module(_) => NodeKind::Module,
            Node::Enum(_) => NodeKind::Enum,
        }
    }
}
