//! Property data types and association multiplicities

use serde::{Deserialize, Serialize};

/// Data type of a property
///
/// A fixed primitive set plus `Enum`, which marks the property as typed by a
/// model enumeration. The enumeration itself is referenced by name on the
/// property (`enum_type_name`), not by pointer, so enum rename/delete sync is
/// a string-level concern handled by the rule layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Int32,
    Int64,
    Boolean,
    DateTime,
    Decimal,
    Double,
    Guid,
    /// Byte array, used for concurrency tokens (RowVersion)
    Binary,
    /// Typed by a model enumeration named in `enum_type_name`
    Enum,
}

impl DataType {
    /// Whether properties of this type carry a meaningful `length`
    pub fn has_length(&self) -> bool {
        matches!(self, DataType::String | DataType::Binary)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            DataType::String => "String",
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::Boolean => "Boolean",
            DataType::DateTime => "DateTime",
            DataType::Decimal => "Decimal",
            DataType::Double => "Double",
            DataType::Guid => "Guid",
            DataType::Binary => "Binary",
            DataType::Enum => "Enum",
        };
        write!(f, "{tag}")
    }
}

/// Cardinality marker on an association end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplicity {
    ZeroOrOne,
    One,
    Many,
}

impl Multiplicity {
    /// Whether a foreign key pointing at this end must allow NULL
    ///
    /// The FK on the target is nullable unless the source end is exactly One.
    pub fn fk_nullable(&self) -> bool {
        !matches!(self, Multiplicity::One)
    }
}

impl std::fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Multiplicity::ZeroOrOne => "ZeroOrOne",
            Multiplicity::One => "One",
            Multiplicity::Many => "Many",
        };
        write!(f, "{tag}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fk_nullable_per_multiplicity() {
        assert!(!Multiplicity::One.fk_nullable());
        assert!(Multiplicity::ZeroOrOne.fk_nullable());
        assert!(Multiplicity::Many.fk_nullable());
    }

    #[test]
    fn test_length_bearing_types() {
        assert!(DataType::String.has_length());
        assert!(DataType::Binary.has_length());
        assert!(!DataType::Int32.has_length());
        assert!(!DataType::Enum.has_length());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&DataType::Enum).unwrap();
        let back: DataType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DataType::Enum);
    }
}
