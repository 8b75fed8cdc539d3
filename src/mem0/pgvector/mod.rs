//! pgvector vector-store configuration.

pub mod normalize;

pub use normalize::{VALID_KEYS, normalize_pgvector_config};
