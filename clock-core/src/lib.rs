#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod registry;
pub mod rng;

pub use error::RegistryError;
pub use registry::{CatalogEntry, Registry};
pub use rng::Xor128;
