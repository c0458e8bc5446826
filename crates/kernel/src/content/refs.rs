//! Small reference shapes shared by CMS documents.

use serde::{Deserialize, Serialize};

/// A resolved image asset reference (`{ asset: { url } }`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub asset: Option<Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageRef {
    pub fn from_url(url: &str) -> Self {
        Self {
            asset: Some(Asset {
                url: Some(url.to_string()),
            }),
            alt: None,
        }
    }

    /// The asset URL, if present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .and_then(|a| a.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

/// A document slug.
///
/// Queries return either the slug object (`{ current }`) or its projected
/// string, depending on the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slug {
    Plain(String),
    Object {
        #[serde(default)]
        current: Option<String>,
    },
}

impl Slug {
    pub fn new(current: &str) -> Self {
        Slug::Object {
            current: Some(current.to_string()),
        }
    }

    /// The slug string, if present and non-empty.
    pub fn current(&self) -> Option<&str> {
        let current = match self {
            Slug::Plain(s) => Some(s.as_str()),
            Slug::Object { current } => current.as_deref(),
        };
        current.filter(|s| !s.is_empty())
    }
}

/// Author reference on an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
