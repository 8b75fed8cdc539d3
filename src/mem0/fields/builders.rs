//! Provider block synthesis from discrete form fields.
//!
//! Each builder returns `None` when the fields are insufficient; the caller
//! decides whether that is an error.

use serde_json::{Map, Value};
use tracing::debug;

use crate::mem0::core::{PGVECTOR_PROVIDER, ProviderBlock};
use crate::mem0::fields::credentials::{Credentials, float_value, integer_value, scalar_text};

/// `OpenAI` provider name.
pub const OPENAI: &str = "openai";
/// Azure `OpenAI` provider name.
pub const AZURE_OPENAI: &str = "azure_openai";
/// Anthropic provider name.
pub const ANTHROPIC: &str = "anthropic";

/// Temperature used when `llm_temperature` does not parse.
pub const DEFAULT_TEMPERATURE: f64 = 0.1;
/// Max tokens used when `llm_max_tokens` does not parse.
pub const DEFAULT_MAX_TOKENS: i64 = 256;
/// Port used when `vector_db_port` is not set.
pub const DEFAULT_PG_PORT: &str = "5432";
/// SSL mode used when `vector_db_sslmode` is not set.
pub const DEFAULT_PG_SSLMODE: &str = "disable";

/// Build the LLM block from `llm_*` fields.
///
/// Requires `llm_provider` and `llm_model`.
#[must_use]
pub fn build_llm_from_fields(
    credentials: &Credentials,
    azure_api_version: &str,
) -> Option<ProviderBlock> {
    let provider = credentials.text("llm_provider")?;

    let mut config = Map::new();
    insert_text(&mut config, "model", credentials, "llm_model");

    if let Some(raw) = present(credentials, "llm_temperature") {
        let temperature = float_value(raw).unwrap_or(DEFAULT_TEMPERATURE);
        config.insert("temperature".to_string(), Value::from(temperature));
    }
    if let Some(raw) = present(credentials, "llm_max_tokens") {
        let max_tokens = integer_value(raw).unwrap_or(DEFAULT_MAX_TOKENS);
        config.insert("max_tokens".to_string(), Value::from(max_tokens));
    }

    match provider.as_str() {
        OPENAI | ANTHROPIC => insert_text(&mut config, "api_key", credentials, "llm_api_key"),
        AZURE_OPENAI => {
            config.insert(
                "azure_kwargs".to_string(),
                azure_kwargs(credentials, "llm", azure_api_version),
            );
        }
        _ => {}
    }

    finish(provider, config, "model")
}

/// Build the embedder block from `embedder_*` fields.
///
/// Requires `embedder_provider` and `embedder_model`.
#[must_use]
pub fn build_embedder_from_fields(
    credentials: &Credentials,
    azure_api_version: &str,
) -> Option<ProviderBlock> {
    let provider = credentials.text("embedder_provider")?;

    let mut config = Map::new();
    insert_text(&mut config, "model", credentials, "embedder_model");

    match provider.as_str() {
        OPENAI => insert_text(&mut config, "api_key", credentials, "embedder_api_key"),
        AZURE_OPENAI => {
            config.insert(
                "azure_kwargs".to_string(),
                azure_kwargs(credentials, "embedder", azure_api_version),
            );
        }
        // huggingface and other local models need nothing beyond the model name
        _ => {}
    }

    finish(provider, config, "model")
}

/// Build a pgvector block from `vector_db_*` fields.
///
/// The provider defaults to `pgvector`; other providers cannot be built from
/// fields. Requires `vector_db_user`.
#[must_use]
pub fn build_vector_db_from_fields(credentials: &Credentials) -> Option<ProviderBlock> {
    let provider = credentials
        .text("vector_db_provider")
        .unwrap_or_else(|| PGVECTOR_PROVIDER.to_string());
    if provider != PGVECTOR_PROVIDER {
        debug!("Vector DB provider {provider} cannot be built from form fields");
        return None;
    }

    let mut config = Map::new();
    insert_text(&mut config, "host", credentials, "vector_db_host");
    insert_text(&mut config, "dbname", credentials, "vector_db_name");
    insert_text(&mut config, "user", credentials, "vector_db_user");
    insert_text(&mut config, "password", credentials, "vector_db_password");

    let port = credentials
        .text("vector_db_port")
        .unwrap_or_else(|| DEFAULT_PG_PORT.to_string());
    config.insert("port".to_string(), Value::String(port));

    let sslmode = credentials
        .text("vector_db_sslmode")
        .unwrap_or_else(|| DEFAULT_PG_SSLMODE.to_string());
    config.insert("sslmode".to_string(), Value::String(sslmode));

    finish(provider, config, "user")
}

/// Raw value of a numeric field that was filled in; whitespace still counts.
fn present<'a>(credentials: &'a Credentials, key: &str) -> Option<&'a Value> {
    credentials.get(key).filter(|raw| match raw {
        Value::String(text) => !text.is_empty(),
        other => scalar_text(other).is_some(),
    })
}

fn insert_text(
    config: &mut Map<String, Value>,
    key: &str,
    credentials: &Credentials,
    field: &str,
) {
    if let Some(text) = credentials.text(field) {
        config.insert(key.to_string(), Value::String(text));
    }
}

fn azure_kwargs(credentials: &Credentials, prefix: &str, api_version: &str) -> Value {
    let mut kwargs = Map::new();
    for key in ["api_key", "azure_endpoint", "azure_deployment"] {
        insert_text(&mut kwargs, key, credentials, &format!("{prefix}_{key}"));
    }
    kwargs.insert(
        "api_version".to_string(),
        Value::String(api_version.to_string()),
    );
    Value::Object(kwargs)
}

fn finish(provider: String, config: Map<String, Value>, required: &str) -> Option<ProviderBlock> {
    if !config.contains_key(required) {
        debug!("Form fields for {provider} lack {required}");
        return None;
    }
    Some(ProviderBlock::new(provider, config))
}
