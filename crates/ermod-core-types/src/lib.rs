//! Core types shared across ermod crates
//!
//! This crate provides the foundational vocabulary used by both the
//! consistency engine and the orchestration layer:
//!
//! - **Identifiers**: `NodeId`, the stable arena identifier for model nodes
//! - **Type tags**: `DataType`, the fixed primitive set plus the enum marker
//! - **Cardinality**: `Multiplicity`, the association-end marker

pub mod data_type;
pub mod id;

pub use data_type::{DataType, Multiplicity};
pub use id::NodeId;
