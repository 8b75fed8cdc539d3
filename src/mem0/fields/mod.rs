//! Credential readers and form-field block builders.

pub mod builders;
pub mod credentials;

pub use builders::{build_embedder_from_fields, build_llm_from_fields, build_vector_db_from_fields};
pub use credentials::{Credentials, int_credential, is_async_mode};
