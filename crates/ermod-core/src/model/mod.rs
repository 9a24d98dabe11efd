pub mod association;
pub mod entity;
pub mod enumeration;
pub mod module;
pub mod navigation;
pub mod node;
pub mod property;

pub use association::AssociationEdge;
pub use entity::EntityNode;
pub use enumeration::{EnumAssociationEdge, EnumNode};
pub use module::ModuleNode;
pub use navigation::NavigationPropertyNode;
pub use node::{Node, NodeKind};
pub use property::{PropertyNode, ROW_VERSION_NAME};
