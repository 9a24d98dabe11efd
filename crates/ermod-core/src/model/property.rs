use chrono::{DateTime, Utc};
use ermod_core_types::{DataType, NodeId};
use serde::{Deserialize, Serialize};

/// Reserved name of the concurrency-token property maintained by the
/// RowVersion rule group.
pub const ROW_VERSION_NAME: &str = "RowVersion";

/// Scalar property owned by an entity
///
/// A property is either authored by the user or derived by a rule (foreign
/// keys, enum-typed properties, the `Id` primary key, `RowVersion`). Derived
/// properties are ordinary nodes; what makes them derived is the cached name
/// on the producing edge, which the reverse-sync rules match against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyNode {
    /// Stable identifier for this property
    pub id: NodeId,

    /// Owning entity
    pub entity_id: NodeId,

    /// Property name, unique among the owning entity's members
    pub name: String,

    /// Primitive type tag, or `Enum` together with `enum_type_name`
    pub data_type: DataType,

    /// Free-text reference to an `EnumNode` name; meaningful only when
    /// `data_type == DataType::Enum`
    pub enum_type_name: String,

    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub is_nullable: bool,
    pub is_indexed: bool,
    pub is_index_unique: bool,
    pub is_index_clustered: bool,

    /// Maximum length for length-bearing types; 0 means unspecified
    pub length: u32,

    /// Position in the entity's ordered property list
    pub display_order: u32,

    /// Timestamp when this property was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this property was last updated
    pub updated_at: DateTime<Utc>,
}

impl PropertyNode {
    /// Create a new property with default flags (not a key, not nullable)
    pub fn new(id: NodeId, entity_id: NodeId, name: String, data_type: DataType) -> Self {
        let now = Utc::now();
        Self {
            id,
            entity_id,
            name,
            data_type,
            enum_type_name: String::new(),
            is_primary_key: false,
            is_foreign_key: false,
            is_nullable: false,
            is_indexed: false,
            is_index_unique: false,
            is_index_clustered: false,
            length: 0,
            display_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this property is the RowVersion concurrency token
    pub fn is_row_version(&self) -> bool {
        self.name == ROW_VERSION_NAME && self.data_type == DataType::Binary
    }

    /// Whether this property is typed by the named enumeration
    pub fn has_enum_type(&self, enum_name: &str) -> bool {
        self.data_type == DataType::Enum && self.enum_type_name == enum_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_property_defaults() {
        let prop = PropertyNode::new(
            NodeId::generate(),
            NodeId::generate(),
            "Name".to_string(),
            DataType::String,
        );
        assert!(!prop.is_primary_key);
        assert!(!prop.is_nullable);
        assert_eq!(prop.length, 0);
    }

    #[test]
    fn test_row_version_detection() {
        let mut prop = PropertyNode::new(
            NodeId::generate(),
            NodeId::generate(),
            ROW_VERSION_NAME.to_string(),
            DataType::Binary,
        );
        assert!(prop.is_row_version());

        // Same name with a different type is not a concurrency token
        prop.data_type = DataType::String;
        assert!(!prop.is_row_version());
    }
}
