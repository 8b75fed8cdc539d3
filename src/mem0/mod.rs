//! Local-mode configuration assembly for the Mem0 memory backend.
//!
//! Provider credentials arrive either as JSON-ish blocks (`local_llm_json`, ...)
//! or as discrete form fields (`llm_provider`, `vector_db_user`, ...). This module
//! turns them into the `{llm, embedder, vector_store, reranker?, graph_store?}`
//! object Mem0 expects:
//! - `core`: settings, errors and the provider block / config types
//! - `parse`: code-fence stripping, strict JSON and relaxed literal decoding
//! - `fields`: typed credential readers and form-field block builders
//! - `pgvector`: connection normalization for the pgvector store
//! - `engine`: the assembler and its build cache
//! - `adapters`: tracing setup for hosting runtimes

pub mod adapters;
pub mod core;
pub mod engine;
pub mod fields;
pub mod parse;
pub mod pgvector;

pub use adapters::init_tracing;
pub use self::core::{
    AssemblerSettings, ConfigResult, ConfigurationError, MemoryConfig, PGVECTOR_PROVIDER,
    ProviderBlock,
};
pub use engine::{BuildCache, ConfigAssembler, build_local_mem0_config, cache_key};
pub use fields::{Credentials, int_credential, is_async_mode};
pub use parse::{parse_block, parse_literal, strip_code_fence};
pub use pgvector::normalize_pgvector_config;
