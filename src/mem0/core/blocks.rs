//! Provider blocks and the assembled Mem0 configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::mem0::core::errors::{ConfigResult, ConfigurationError};

/// Provider name for the Postgres vector-extension store.
pub const PGVECTOR_PROVIDER: &str = "pgvector";

/// One `{provider, config}` unit of backend configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderBlock {
    /// Backend implementation name (`openai`, `pgvector`, ...).
    pub provider: String,
    /// Backend parameters, passed through to Mem0.
    pub config: Map<String, Value>,
    /// Any other top-level keys supplied alongside `provider`/`config`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProviderBlock {
    /// Create a block with no extra keys.
    #[must_use]
    pub fn new(provider: impl Into<String>, config: Map<String, Value>) -> Self {
        Self {
            provider: provider.into(),
            config,
            extra: Map::new(),
        }
    }

    /// Split a decoded object into a block.
    ///
    /// An empty `config` object is accepted.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::MissingShape`] if `provider` is not a
    /// non-empty string or `config` is not an object.
    pub fn from_object(field: &str, mut object: Map<String, Value>) -> ConfigResult<Self> {
        let provider = match object.remove("provider") {
            Some(Value::String(provider)) if !provider.is_empty() => provider,
            _ => return Err(ConfigurationError::missing_shape(field)),
        };
        let Some(Value::Object(config)) = object.remove("config") else {
            return Err(ConfigurationError::missing_shape(field));
        };

        Ok(Self {
            provider,
            config,
            extra: object,
        })
    }

    /// Whether this block targets the pgvector store.
    #[must_use]
    pub fn is_pgvector(&self) -> bool {
        self.provider == PGVECTOR_PROVIDER
    }

    /// JSON object form of the block.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = self.extra.clone();
        object.insert("provider".to_string(), Value::String(self.provider.clone()));
        object.insert("config".to_string(), Value::Object(self.config.clone()));
        Value::Object(object)
    }
}

/// Assembled configuration handed to the Mem0 initializer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Language model block.
    pub llm: ProviderBlock,
    /// Embedding model block.
    pub embedder: ProviderBlock,
    /// Vector store block.
    pub vector_store: ProviderBlock,
    /// Optional reranker block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reranker: Option<ProviderBlock>,
    /// Optional graph store block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_store: Option<ProviderBlock>,
}

impl MemoryConfig {
    /// JSON object form, omitting absent optional blocks.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("llm".to_string(), self.llm.to_value());
        object.insert("embedder".to_string(), self.embedder.to_value());
        object.insert("vector_store".to_string(), self.vector_store.to_value());
        if let Some(reranker) = &self.reranker {
            object.insert("reranker".to_string(), reranker.to_value());
        }
        if let Some(graph_store) = &self.graph_store {
            object.insert("graph_store".to_string(), graph_store.to_value());
        }
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_from_object_keeps_extra_keys() {
        let block = ProviderBlock::from_object(
            "local_llm_json",
            object(json!({"provider": "openai", "config": {"model": "gpt-4o"}, "label": "main"})),
        );
        let block = block.ok().unwrap_or_else(|| unreachable!());

        assert_eq!(block.provider, "openai");
        assert_eq!(block.config.get("model"), Some(&json!("gpt-4o")));
        assert_eq!(block.extra.get("label"), Some(&json!("main")));
        assert_eq!(
            block.to_value(),
            json!({"provider": "openai", "config": {"model": "gpt-4o"}, "label": "main"})
        );
    }

    #[test]
    fn test_from_object_accepts_empty_config() {
        let block = ProviderBlock::from_object(
            "local_reranker_json",
            object(json!({"provider": "x", "config": {}})),
        );
        assert!(block.is_ok());
    }

    #[test]
    fn test_from_object_rejects_bad_shape() {
        for value in [
            json!({"config": {}}),
            json!({"provider": "", "config": {}}),
            json!({"provider": "openai"}),
            json!({"provider": "openai", "config": "model=gpt"}),
            json!({"provider": 3, "config": {}}),
        ] {
            let result = ProviderBlock::from_object("local_llm_json", object(value));
            assert!(matches!(result, Err(ConfigurationError::MissingShape { .. })));
        }
    }

    #[test]
    fn test_memory_config_omits_absent_blocks() {
        let config = MemoryConfig {
            llm: ProviderBlock::new("openai", Map::new()),
            embedder: ProviderBlock::new("openai", Map::new()),
            vector_store: ProviderBlock::new(PGVECTOR_PROVIDER, Map::new()),
            reranker: None,
            graph_store: Some(ProviderBlock::new("neo4j", Map::new())),
        };
        let value = config.to_value();

        assert!(value.get("reranker").is_none());
        assert_eq!(value["graph_store"]["provider"], json!("neo4j"));
        assert_eq!(serde_json::to_value(&config).ok(), Some(value));
        assert!(config.vector_store.is_pgvector());
    }
}
