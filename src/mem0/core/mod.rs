//! Core configuration types and errors.

pub mod blocks;
pub mod config;
pub mod errors;

pub use blocks::{MemoryConfig, PGVECTOR_PROVIDER, ProviderBlock};
pub use config::AssemblerSettings;
pub use errors::{ConfigResult, ConfigurationError};
