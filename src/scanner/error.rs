//! Scanner error types.

use crate::exchanges::RegistryError;

/// Errors that prevent the scanner from starting.
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}
