//! Registry error types

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The global registry was already constructed, so a configuration can
    /// no longer be applied
    AlreadyInitialized,
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::AlreadyInitialized => {
                write!(f, "Global queue registry already initialized")
            }
        }
    }
}

impl std::error::Error for RegistryError {}
