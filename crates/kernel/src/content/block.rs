//! Content blocks as delivered by the CMS.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::nullable::null_as_default;

/// Free-form fields of a content block, minus its `_type` and `_key`.
pub type Payload = Map<String, Value>;

/// One entry of an ordered body sequence.
///
/// CMS documents tag every block with `_type` and give it a `_key` that is
/// stable across edits. Every other field is type-specific and kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "_type")]
    pub block_type: String,
    #[serde(rename = "_key", default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(flatten)]
    pub payload: Payload,
}

impl ContentBlock {
    pub fn new(block_type: &str, key: &str, payload: Payload) -> Self {
        Self {
            block_type: block_type.to_string(),
            key: key.to_string(),
            payload,
        }
    }

    /// Payload with `args` merged over it; args win on key collisions.
    pub fn merged_payload(&self, args: Option<&Payload>) -> Payload {
        let mut merged = self.payload.clone();
        if let Some(args) = args {
            for (k, v) in args {
                merged.insert(k.clone(), v.clone());
            }
        }
        merged
    }
}

/// String field of a payload, if present.
pub(crate) fn str_field<'a>(payload: &'a Payload, field: &str) -> Option<&'a str> {
    payload.get(field).and_then(|v| v.as_str())
}

/// `asset.url` of an image reference object.
pub(crate) fn asset_url(image: &Value) -> Option<&str> {
    image
        .get("asset")
        .and_then(|a| a.get("url"))
        .and_then(|u| u.as_str())
        .filter(|u| !u.is_empty())
}
