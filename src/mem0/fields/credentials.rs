//! Credential map wrapper and typed field readers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::mem0::core::{ConfigResult, ConfigurationError};

/// Strings accepted as `true` by [`is_async_mode`].
const TRUTHY: [&str; 5] = ["true", "1", "yes", "y", "on"];
/// Strings accepted as `false` by [`is_async_mode`].
const FALSY: [&str; 5] = ["false", "0", "no", "n", "off"];

/// Read-only provider credentials keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(Map<String, Value>);

impl Credentials {
    /// Wrap an existing map.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from a JSON value.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidCredentials`] if `value` is not an object.
    pub fn from_json(value: Value) -> ConfigResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(ConfigurationError::InvalidCredentials),
        }
    }

    /// Raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Field value as trimmed text; blank, `null`, `false`, `0`, and
    /// containers count as absent.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }
}

impl From<Map<String, Value>> for Credentials {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Credentials {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Non-empty trimmed text of a scalar value.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => number.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Integer view of a value; floats truncate toward zero.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.is_finite() && n.abs() < 9.0e18)
                .map(|n| n.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Float view of a value.
pub(crate) fn float_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Read a positive integer credential.
///
/// Missing or empty fields fall back to `default` silently; non-numeric and
/// non-positive values fall back with a warning.
#[must_use]
pub fn int_credential(credentials: &Credentials, key: &str, default: u32) -> u32 {
    let raw = match credentials.get(key) {
        None | Some(Value::Null) => {
            debug!("{key} not set, using default: {default}");
            return default;
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            debug!("{key} is empty, using default: {default}");
            return default;
        }
        Some(raw) => raw,
    };

    match integer_value(raw) {
        None => {
            warn!("Invalid integer value for {key}: {raw}, using default: {default}");
            default
        }
        Some(value) if value <= 0 => {
            warn!("Non-positive value for {key}: {raw}, using default: {default}");
            default
        }
        Some(value) => u32::try_from(value).unwrap_or_else(|_| {
            warn!("Out of range value for {key}: {raw}, using default: {default}");
            default
        }),
    }
}

/// Whether Mem0 should run in async mode.
///
/// Booleans pass through. Strings are matched case-insensitively; anything
/// unrecognised, and absence, means `true`.
#[must_use]
pub fn is_async_mode(credentials: &Credentials) -> bool {
    match credentials.get("async_mode") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => {
            let text = text.trim().to_lowercase();
            if TRUTHY.contains(&text.as_str()) {
                true
            } else {
                !FALSY.contains(&text.as_str())
            }
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn creds(value: Value) -> Credentials {
        Credentials::from_json(value).unwrap_or_default()
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            Credentials::from_json(json!(["a"])),
            Err(ConfigurationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_text_reader() {
        let credentials = creds(json!({
            "a": "  value ",
            "b": "   ",
            "c": 5433,
            "d": 0,
            "e": null,
            "f": {"nested": true},
        }));
        assert_eq!(credentials.text("a"), Some("value".to_string()));
        assert_eq!(credentials.text("b"), None);
        assert_eq!(credentials.text("c"), Some("5433".to_string()));
        assert_eq!(credentials.text("d"), None);
        assert_eq!(credentials.text("e"), None);
        assert_eq!(credentials.text("f"), None);
        assert_eq!(credentials.text("missing"), None);
    }

    #[test]
    fn test_int_credential_accepts_numbers_and_strings() {
        let credentials = creds(json!({"a": 7, "b": " 12 ", "c": 3.9}));
        assert_eq!(int_credential(&credentials, "a", 1), 7);
        assert_eq!(int_credential(&credentials, "b", 1), 12);
        assert_eq!(int_credential(&credentials, "c", 1), 3);
    }

    #[test]
    fn test_int_credential_falls_back() {
        let credentials = creds(json!({
            "empty": "",
            "word": "ten",
            "zero": 0,
            "negative": "-4",
            "flag": true,
            "huge": 99_999_999_999_i64,
        }));
        for key in ["missing", "empty", "word", "zero", "negative", "flag", "huge"] {
            assert_eq!(int_credential(&credentials, key, 5), 5, "key {key}");
        }
    }

    #[test]
    fn test_async_mode() {
        assert!(is_async_mode(&creds(json!({}))));
        assert!(!is_async_mode(&creds(json!({"async_mode": "off"}))));
        assert!(is_async_mode(&creds(json!({"async_mode": true}))));
        assert!(!is_async_mode(&creds(json!({"async_mode": false}))));
        assert!(!is_async_mode(&creds(json!({"async_mode": " No "}))));
        assert!(is_async_mode(&creds(json!({"async_mode": "YES"}))));
        assert!(is_async_mode(&creds(json!({"async_mode": "maybe"}))));
        assert!(is_async_mode(&creds(json!({"async_mode": 0}))));
    }
}
