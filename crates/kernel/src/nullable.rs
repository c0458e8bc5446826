//! Serde helpers for CMS query results.
//!
//! GROQ projections yield an explicit `null` for unset fields and for
//! references whose target was deleted or unpublished. These treat such
//! values like missing ones.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a possibly `null` array, dropping `null` entries.
pub(crate) fn present_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<Option<T>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Entry {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "present_entries")]
        tags: Vec<String>,
    }

    #[test]
    fn null_scalar_is_default() {
        let entry: Entry = serde_json::from_value(json!({ "name": null })).unwrap();
        assert_eq!(entry.name, "");
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn null_array_entries_are_dropped() {
        let entry: Entry =
            serde_json::from_value(json!({ "name": "a", "tags": [null, "x", null, "y"] }))
                .unwrap();
        assert_eq!(entry.tags, vec!["x", "y"]);
    }

    #[test]
    fn null_array_is_empty() {
        let entry: Entry = serde_json::from_value(json!({ "tags": null })).unwrap();
        assert!(entry.tags.is_empty());
    }
}
