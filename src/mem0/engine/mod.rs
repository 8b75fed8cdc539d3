//! Assembly orchestration and memoization.

pub mod cache;
pub mod core;

pub use cache::{BuildCache, cache_key};
pub use self::core::{
    ConfigAssembler, EMBEDDER_JSON, GRAPH_DB_JSON, LLM_JSON, RERANKER_JSON, VECTOR_DB_JSON,
    build_local_mem0_config,
};
