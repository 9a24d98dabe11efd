pub(crate) mod association_ops;
pub(crate) mod entity_ops;
pub(crate) mod enumeration_ops;
pub(crate) mod module_ops;
pub(crate) mod navigation_ops;
pub(crate) mod property_ops;
pub(crate) mod restore_ops;
pub mod store;
pub(crate) mod tx;

pub use store::ModelStore;
pub(crate) use tx::Tx;

use crate::errors::{ModelError, Result};

/// Shared command-level name validation
pub(crate) fn validate_name(name: &str, what: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ModelError::InvalidName {
            reason: format!("{what} cannot be empty or whitespace-only"),
        });
    }
    Ok(())
}
