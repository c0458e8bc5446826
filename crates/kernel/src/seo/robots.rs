//! Robots directives from CMS SEO settings.

use serde::{Deserialize, Serialize};

use crate::content::ImageRef;

/// SEO field group attached to CMS pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSettings {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_desc: Option<String>,
    #[serde(default)]
    pub share_graphic: Option<ImageRef>,
    #[serde(default)]
    pub allow_index: Option<bool>,
    #[serde(default)]
    pub advanced_robots: Option<AdvancedRobots>,
}

/// Fine-grained crawler permissions. Unset means allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedRobots {
    #[serde(default)]
    pub allow_follow: Option<bool>,
    #[serde(default)]
    pub allow_image_index: Option<bool>,
    #[serde(default)]
    pub allow_archive: Option<bool>,
}

/// Flattened robots directives. Only restrictions are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsDirectives {
    #[serde(skip_serializing_if = "is_false")]
    pub noindex: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub nofollow: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_directives: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A `<meta name content>` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

impl RobotsDirectives {
    /// True when the page carries no restriction at all.
    pub fn is_empty(&self) -> bool {
        !self.noindex && !self.nofollow && self.additional_directives.is_empty()
    }

    /// Extra robots meta tag for directives beyond index/follow.
    pub fn additional_meta_tag(&self) -> Option<MetaTag> {
        if self.additional_directives.is_empty() {
            return None;
        }
        Some(MetaTag {
            name: "robots".to_string(),
            content: self.additional_directives.join(", "),
        })
    }

    /// Content of a single robots meta tag carrying every directive.
    pub fn meta_content(&self) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();
        if self.noindex {
            parts.push("noindex");
        }
        if self.nofollow {
            parts.push("nofollow");
        }
        parts.extend(self.additional_directives.iter().map(String::as_str));
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Translate SEO settings into robots directives.
///
/// Each permission defaults to allowed; a directive is emitted only for an
/// explicit `false`. No settings means no restriction.
pub fn robots_directives(seo: Option<&SeoSettings>) -> RobotsDirectives {
    let Some(seo) = seo else {
        return RobotsDirectives::default();
    };

    let mut directives = RobotsDirectives {
        noindex: seo.allow_index == Some(false),
        ..RobotsDirectives::default()
    };

    if let Some(advanced) = &seo.advanced_robots {
        directives.nofollow = advanced.allow_follow == Some(false);
        if advanced.allow_image_index == Some(false) {
            directives.additional_directives.push("noimageindex".to_string());
        }
        if advanced.allow_archive == Some(false) {
            directives.additional_directives.push("noarchive".to_string());
        }
    }

    directives
}
