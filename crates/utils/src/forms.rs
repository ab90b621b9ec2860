//! Lenient deserializers for form-shaped client input.
//!
//! Different clients submit the same registration forms with different value
//! shapes: booleans arrive as the string "yes", array fields arrive either as
//! real JSON arrays or as JSON-array-encoded strings. These adapters coerce
//! everything to one canonical shape at the DTO boundary so nothing downstream
//! has to inspect alternates.

use serde::{Deserialize, Deserializer};

/// Accepts a JSON bool, or a string where exactly `"yes"` means true and any
/// other text means false.
pub fn yes_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(value) => value,
        Raw::Text(text) => text == "yes",
    })
}

/// Accepts a JSON array of strings, a string containing a JSON array (which is
/// decoded), or a bare string (which becomes a single-element list).
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(items) => items,
        Raw::Text(text) => match serde_json::from_str::<Vec<String>>(&text) {
            Ok(items) => items,
            Err(_) => vec![text],
        },
    })
}
