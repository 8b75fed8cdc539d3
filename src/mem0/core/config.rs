//! Settings for the configuration assembler.

use serde::{Deserialize, Serialize};

use crate::mem0::core::errors::{ConfigResult, ConfigurationError};

/// Environment variable overriding the default pgvector minimum pool size.
pub const ENV_MIN_CONNECTIONS: &str = "MEM0_PGVECTOR_MIN_CONNECTIONS";
/// Environment variable overriding the default pgvector maximum pool size.
pub const ENV_MAX_CONNECTIONS: &str = "MEM0_PGVECTOR_MAX_CONNECTIONS";
/// Environment variable overriding the Azure `OpenAI` API version.
pub const ENV_AZURE_API_VERSION: &str = "MEM0_AZURE_API_VERSION";

/// Defaults applied while assembling a configuration.
///
/// Credentials can still override the pool sizes per build through
/// `pgvector_min_connections` / `pgvector_max_connections`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerSettings {
    /// Fallback `minconn` for pgvector pools.
    pub pgvector_min_connections: u32,
    /// Fallback `maxconn` for pgvector pools.
    pub pgvector_max_connections: u32,
    /// API version written into synthesized Azure `OpenAI` blocks.
    pub azure_api_version: String,
}

impl Default for AssemblerSettings {
    fn default() -> Self {
        Self {
            pgvector_min_connections: 1,
            pgvector_max_connections: 10,
            azure_api_version: "2024-10-21".to_string(),
        }
    }
}

impl AssemblerSettings {
    /// Defaults overridden by process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    ///
    /// Values that do not parse as positive integers are ignored.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        settings.pgvector_min_connections = pool_size(
            lookup(ENV_MIN_CONNECTIONS).as_deref(),
            ENV_MIN_CONNECTIONS,
            settings.pgvector_min_connections,
        );
        settings.pgvector_max_connections = pool_size(
            lookup(ENV_MAX_CONNECTIONS).as_deref(),
            ENV_MAX_CONNECTIONS,
            settings.pgvector_max_connections,
        );

        if let Some(value) = lookup(ENV_AZURE_API_VERSION) {
            let value = value.trim();
            if !value.is_empty() {
                settings.azure_api_version = value.to_string();
            }
        }

        settings
    }

    /// Validate settings invariants.
    ///
    /// # Errors
    /// Returns an error if a pool size is zero, the minimum exceeds the
    /// maximum, or the Azure API version is empty.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.pgvector_min_connections == 0 {
            return Err(ConfigurationError::InvalidSettings(
                "pgvector_min_connections must be > 0".to_string(),
            ));
        }

        if self.pgvector_max_connections == 0 {
            return Err(ConfigurationError::InvalidSettings(
                "pgvector_max_connections must be > 0".to_string(),
            ));
        }

        if self.pgvector_min_connections > self.pgvector_max_connections {
            return Err(ConfigurationError::InvalidSettings(format!(
                "pgvector_min_connections ({}) must not exceed pgvector_max_connections ({})",
                self.pgvector_min_connections, self.pgvector_max_connections
            )));
        }

        if self.azure_api_version.trim().is_empty() {
            return Err(ConfigurationError::InvalidSettings(
                "azure_api_version must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Positive pool size from an override, or `current` if unset or invalid.
fn pool_size(raw: Option<&str>, key: &str, current: u32) -> u32 {
    let Some(raw) = raw else {
        return current;
    };
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|size| *size > 0)
        .unwrap_or_else(|| {
            tracing::warn!("Ignoring invalid {key}: {raw}");
            current
        })
}
