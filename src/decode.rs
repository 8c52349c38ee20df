//! Tolerant decoding of JSON carried in HTML data attributes.
//!
//! Attribute text comes from server-rendered templates. Most of the time it is
//! plain JSON, but some rendering paths escape it twice, so the browser hands
//! us `{&quot;a&quot;:1}` instead of `{"a":1}`. The decoder:
//!
//! 1. treats absent, empty and `{}` input as "use the default"
//! 2. tries a strict parse
//! 3. reverses the usual entity escapes and tries once more
//!
//! `try_decode` reports which of these happened; `decode_or` collapses every
//! failure into the caller's fallback and never errors.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Ordered entity replacements. `&amp;` must stay last so `&amp;quot;`
/// becomes `&quot;` rather than `"`.
const ENTITY_REPLACEMENTS: [(&str, &str); 5] = [
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Why an attribute did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Absent, empty or `{}`: the expected "no data yet" signal.
    #[error("no data provided")]
    Empty,
    /// Neither the raw text nor its unescaped form parsed.
    #[error("malformed data: {strict}; after unescaping: {unescaped}")]
    Malformed { strict: String, unescaped: String },
}

/// Which parse attempt produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeSource {
    Strict,
    Unescaped,
}

impl DecodeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeSource::Strict => "strict",
            DecodeSource::Unescaped => "unescaped",
        }
    }
}

/// A successfully decoded value plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub source: DecodeSource,
}

/// Reverse the entity escapes applied by template renderers.
pub fn unescape_entities(raw: &str) -> String {
    ENTITY_REPLACEMENTS
        .iter()
        .fold(raw.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Decode `raw`, keeping the reason when no value could be produced.
pub fn try_decode<T: DeserializeOwned>(raw: Option<&str>) -> Result<Decoded<T>, DecodeError> {
    let raw = match raw {
        None => return Err(DecodeError::Empty),
        Some(s) if s.is_empty() || s == "{}" => return Err(DecodeError::Empty),
        Some(s) => s,
    };

    let strict = match serde_json::from_str::<T>(raw) {
        Ok(value) => {
            return Ok(Decoded {
                value,
                source: DecodeSource::Strict,
            });
        }
        Err(e) => e.to_string(),
    };

    let unescaped = unescape_entities(raw);
    match serde_json::from_str::<T>(&unescaped) {
        Ok(value) => Ok(Decoded {
            value,
            source: DecodeSource::Unescaped,
        }),
        Err(e) => Err(DecodeError::Malformed {
            strict,
            unescaped: e.to_string(),
        }),
    }
}

/// Decode `raw` or return `fallback`. Total over all inputs.
pub fn decode_or<T: DeserializeOwned>(raw: Option<&str>, fallback: T) -> T {
    match try_decode(raw) {
        Ok(decoded) => {
            tracing::debug!(source = decoded.source.as_str(), "decoded attribute data");
            decoded.value
        }
        Err(DecodeError::Empty) => {
            tracing::info!("empty attribute data, using default value");
            fallback
        }
        Err(err) => {
            tracing::warn!(error = %err, "error parsing attribute data, using default value");
            fallback
        }
    }
}
