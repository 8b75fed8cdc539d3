//! Provider block decoding from credential values.

use serde_json::Value;
use tracing::debug;

use crate::mem0::core::{ConfigResult, ConfigurationError, ProviderBlock};
use crate::mem0::parse::literal::parse_literal;

const FENCE: &str = "```";

/// Remove a leading code fence line and, if present, a trailing one.
///
/// Text that does not start with a fence is only trimmed.
#[must_use]
pub fn strip_code_fence(text: &str) -> String {
    let text = text.trim();
    if !text.starts_with(FENCE) {
        return text.to_string();
    }

    let mut lines: Vec<&str> = text.lines().skip(1).collect();
    if lines
        .last()
        .is_some_and(|line| line.trim_start().starts_with(FENCE))
    {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}

/// Decode a credential value into a provider block.
///
/// Absent, `null` and blank values yield `Ok(None)`. Objects are used as-is;
/// strings are de-fenced and decoded as strict JSON first, then as a
/// Python-style literal.
///
/// # Errors
/// Returns a [`ConfigurationError`] naming `field` if the text decodes to
/// nothing, to a non-object, or to an object without `provider`/`config`.
pub fn parse_block(raw: Option<&Value>, field: &str) -> ConfigResult<Option<ProviderBlock>> {
    let object = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(object)) => object.clone(),
        Some(Value::String(text)) => {
            if text.trim().is_empty() {
                return Ok(None);
            }
            match decode(&strip_code_fence(text), field)? {
                Value::Object(object) => object,
                _ => return Err(ConfigurationError::not_an_object(field)),
            }
        }
        Some(_) => return Err(ConfigurationError::not_an_object(field)),
    };

    let block = ProviderBlock::from_object(field, object)?;
    debug!(
        "Successfully parsed {field} with provider: {}",
        block.provider
    );
    Ok(Some(block))
}

fn decode(text: &str, field: &str) -> ConfigResult<Value> {
    serde_json::from_str::<Value>(text).or_else(|json_err| {
        parse_literal(text).ok_or_else(|| {
            debug!("Failed to parse {field} as JSON or literal: {json_err}");
            ConfigurationError::invalid_syntax(field)
        })
    })
}
