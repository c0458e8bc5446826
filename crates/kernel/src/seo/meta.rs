//! Head metadata for a rendered page.

use serde::Serialize;

use super::robots::SeoSettings;
use super::schema::DEFAULT_SHARE_IMAGE;
use crate::content::ImageRef;

pub const SHARE_IMAGE_WIDTH: u32 = 1200;
pub const SHARE_IMAGE_HEIGHT: u32 = 630;

/// Title, description, canonical link and Open Graph image of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub canonical_url: String,
    pub og_image: ShareImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

impl PageMeta {
    /// `fallback_title` applies when the SEO group has no meta title.
    pub fn new(
        fallback_title: &str,
        seo: Option<&SeoSettings>,
        hero_image: Option<&ImageRef>,
        site_url: &str,
        path: &str,
    ) -> Self {
        let title = seo
            .and_then(|s| s.meta_title.as_deref())
            .filter(|t| !t.is_empty())
            .unwrap_or(fallback_title)
            .to_string();
        let description = seo
            .and_then(|s| s.meta_desc.clone())
            .filter(|d| !d.is_empty());
        let image_url = seo
            .and_then(|s| s.share_graphic.as_ref())
            .and_then(ImageRef::url)
            .or_else(|| hero_image.and_then(ImageRef::url))
            .unwrap_or(DEFAULT_SHARE_IMAGE);

        Self {
            canonical_url: canonical_url(site_url, path),
            og_image: ShareImage {
                url: image_url.to_string(),
                width: SHARE_IMAGE_WIDTH,
                height: SHARE_IMAGE_HEIGHT,
                alt: title.clone(),
            },
            title,
            description,
        }
    }
}

/// Join the site URL and a request path with exactly one slash.
pub fn canonical_url(site_url: &str, path: &str) -> String {
    let base = site_url.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{base}/{}", path.trim_start_matches('/'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const SITE: &str = "https://www.weswwim.com";

    #[test]
    fn meta_title_overrides_page_title() {
        let seo = SeoSettings {
            meta_title: Some("Launch | Swwim".into()),
            meta_desc: Some("We launched.".into()),
            ..Default::default()
        };
        let meta = PageMeta::new("Launch", Some(&seo), None, SITE, "/news/launch");

        assert_eq!(meta.title, "Launch | Swwim");
        assert_eq!(meta.description.as_deref(), Some("We launched."));
        assert_eq!(meta.canonical_url, "https://www.weswwim.com/news/launch");
        assert_eq!(meta.og_image.alt, "Launch | Swwim");
    }

    #[test]
    fn share_image_precedence() {
        let hero = ImageRef::from_url("https://cdn.sanity.io/hero.jpg");
        let seo = SeoSettings {
            share_graphic: Some(ImageRef::from_url("https://cdn.sanity.io/share.jpg")),
            ..Default::default()
        };

        let with_share = PageMeta::new("x", Some(&seo), Some(&hero), SITE, "/");
        assert_eq!(with_share.og_image.url, "https://cdn.sanity.io/share.jpg");

        let hero_only = PageMeta::new("x", None, Some(&hero), SITE, "/");
        assert_eq!(hero_only.og_image.url, "https://cdn.sanity.io/hero.jpg");

        let neither = PageMeta::new("x", None, None, SITE, "/");
        assert_eq!(neither.og_image.url, DEFAULT_SHARE_IMAGE);
        assert_eq!(neither.title, "x");
        assert!(neither.description.is_none());
    }

    #[test]
    fn canonical_url_joins_once() {
        assert_eq!(canonical_url("https://a.com/", "/news"), "https://a.com/news");
        assert_eq!(canonical_url("https://a.com", "news"), "https://a.com/news");
        assert_eq!(canonical_url("https://a.com", "/"), "https://a.com/");
        assert_eq!(canonical_url("https://a.com", ""), "https://a.com");
    }
}
