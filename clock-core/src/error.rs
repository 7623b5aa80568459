use alloc::string::String;
use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    EmptyCatalog,
    UnknownKey { key: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "catalog must contain at least one entry"),
            Self::UnknownKey { key } => write!(f, "unknown catalog key: '{key}'"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegistryError {}
