//! Schema.org structured data builders.
//!
//! Every builder is a pure function of page data. Builders for optional
//! content return `None` when there is nothing to describe; missing fields
//! fall back to the site identity or are left out of the JSON entirely.

use std::ops::Index;

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::content::{AuthorRef, ImageRef, Slug};
use crate::nullable::null_as_default;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const ORGANIZATION_NAME: &str = "Swwim";
/// Base URL for absolute links, no trailing slash.
pub const SITE_BASE_URL: &str = "https://www.weswwim.com";
pub const ORGANIZATION_URL: &str = "https://www.weswwim.com/";
pub const DEFAULT_SHARE_IMAGE: &str = "https://weswwim.com/images/social-share.jpg";
pub const SOCIAL_PROFILES: [&str; 3] = [
    "https://twitter.com/weswwim",
    "https://www.instagram.com/weswwim",
    "https://www.linkedin.com/company/swimm-social",
];

/// One JSON-LD document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaObject(Map<String, Value>);

static NULL: Value = Value::Null;

impl SchemaObject {
    fn new(schema_type: &str) -> Self {
        let mut map = Map::new();
        map.insert("@context".into(), Value::String(SCHEMA_CONTEXT.into()));
        map.insert("@type".into(), Value::String(schema_type.into()));
        Self(map)
    }

    fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    fn set_opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// The `@type` of this document.
    pub fn schema_type(&self) -> &str {
        self.0.get("@type").and_then(|v| v.as_str()).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl Index<&str> for SchemaObject {
    type Output = Value;

    /// Missing keys index to `null`, like [`serde_json::Value`].
    fn index(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }
}

fn organization_ref() -> Value {
    organization_ref_with_logo(DEFAULT_SHARE_IMAGE)
}

fn organization_ref_with_logo(logo: &str) -> Value {
    json!({
        "@type": "Organization",
        "name": ORGANIZATION_NAME,
        "logo": { "@type": "ImageObject", "url": logo },
    })
}

/// Fields a caller may override on the organization identity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationOverrides {
    pub name: Option<String>,
    pub url: Option<String>,
    pub logo: Option<String>,
    pub social_profiles: Option<Vec<String>>,
    pub contact_point: Option<Value>,
}

/// Organization document: the site identity with `overrides` applied.
pub fn organization_schema(overrides: Option<&OrganizationOverrides>) -> SchemaObject {
    let overrides = overrides.cloned().unwrap_or_default();
    let social_profiles = overrides
        .social_profiles
        .unwrap_or_else(|| SOCIAL_PROFILES.iter().map(|s| s.to_string()).collect());

    SchemaObject::new("Organization")
        .set("name", overrides.name.unwrap_or_else(|| ORGANIZATION_NAME.into()))
        .set("url", overrides.url.unwrap_or_else(|| ORGANIZATION_URL.into()))
        .set("logo", overrides.logo.unwrap_or_else(|| DEFAULT_SHARE_IMAGE.into()))
        .set("sameAs", social_profiles)
        .set_opt("contactPoint", overrides.contact_point)
}

/// Article data gathered from a news page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetails {
    pub title: Option<String>,
    pub image: Option<String>,
    pub date: Option<String>,
    pub modified: Option<String>,
    pub author: Option<AuthorRef>,
    pub intro_text: Option<String>,
    pub url: Option<String>,
}

/// Article document, or `None` without an article.
pub fn article_schema(article: Option<&ArticleDetails>) -> Option<SchemaObject> {
    let article = article?;
    let author = article.author.clone().unwrap_or_default();

    Some(
        SchemaObject::new("Article")
            .set_opt("headline", article.title.clone())
            .set(
                "image",
                non_empty(article.image.as_deref()).unwrap_or(DEFAULT_SHARE_IMAGE),
            )
            .set_opt("datePublished", article.date.clone())
            .set_opt(
                "dateModified",
                article.modified.clone().or_else(|| article.date.clone()),
            )
            .set(
                "author",
                json!({
                    "@type": "Person",
                    "name": non_empty(author.first_name.as_deref()).unwrap_or(ORGANIZATION_NAME),
                    "url": non_empty(author.url.as_deref()).unwrap_or(ORGANIZATION_URL),
                }),
            )
            .set("publisher", organization_ref())
            .set(
                "description",
                article.intro_text.clone().unwrap_or_default(),
            )
            .set("mainEntityOfPage", web_page(article.url.as_deref())),
    )
}

fn web_page(id: Option<&str>) -> Value {
    let mut page = Map::new();
    page.insert("@type".into(), Value::String("WebPage".into()));
    if let Some(id) = id {
        page.insert("@id".into(), Value::String(id.into()));
    }
    Value::Object(page)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

impl Breadcrumb {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// BreadcrumbList document with 1-based positions in input order.
pub fn breadcrumbs_schema(breadcrumbs: &[Breadcrumb]) -> Option<SchemaObject> {
    if breadcrumbs.is_empty() {
        return None;
    }
    let items: Vec<Value> = breadcrumbs
        .iter()
        .enumerate()
        .map(|(index, crumb)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": crumb.name,
                "item": crumb.url,
            })
        })
        .collect();
    Some(SchemaObject::new("BreadcrumbList").set("itemListElement", items))
}

/// A question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
}

/// FAQPage document, questions in input order.
pub fn faq_schema(questions: &[FaqEntry]) -> Option<SchemaObject> {
    if questions.is_empty() {
        return None;
    }
    let entities: Vec<Value> = questions
        .iter()
        .map(|q| {
            json!({
                "@type": "Question",
                "name": q.question,
                "acceptedAnswer": { "@type": "Answer", "text": q.answer },
            })
        })
        .collect();
    Some(SchemaObject::new("FAQPage").set("mainEntity", entities))
}

/// A collection entry (news article, service, case study).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub hero_image: Option<ImageRef>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

impl ListingItem {
    /// Hero image URL, else generic image URL.
    pub fn image_url(&self) -> Option<&str> {
        self.hero_image
            .as_ref()
            .and_then(ImageRef::url)
            .or_else(|| self.image.as_ref().and_then(ImageRef::url))
    }
}

/// ItemList document for a collection page.
///
/// Item URLs are `{SITE_BASE_URL}/{collection}/{slug}`; items without a slug
/// have no URL.
pub fn item_list_schema(items: &[ListingItem], collection: &str) -> Option<SchemaObject> {
    if items.is_empty() {
        return None;
    }
    let list: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut entry = Map::new();
            entry.insert("@type".into(), json!("ListItem"));
            entry.insert("position".into(), json!(index + 1));
            if let Some(title) = &item.title {
                entry.insert("name".into(), json!(title));
            }
            if let Some(slug) = item.slug.as_ref().and_then(Slug::current) {
                entry.insert(
                    "url".into(),
                    json!(format!("{SITE_BASE_URL}/{collection}/{slug}")),
                );
            }
            if let Some(image) = item.image_url() {
                entry.insert("image".into(), json!(image));
            }
            Value::Object(entry)
        })
        .collect();

    Some(
        SchemaObject::new("ItemList")
            .set("itemListElement", list)
            .set("numberOfItems", items.len()),
    )
}

/// Where an event takes place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub online: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Event data gathered from an event page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub title: Option<String>,
    pub intro_text: Option<String>,
    pub image: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<EventLocation>,
}

/// Event document, or `None` without an event.
pub fn event_schema(event: Option<&EventDetails>) -> Option<SchemaObject> {
    let event = event?;
    let location = event.location.clone().unwrap_or_default();
    let online = location.online == Some(true);
    let start = event
        .date
        .as_deref()
        .map(|date| event_start(date, event.time.as_deref()));

    let mut place = Map::new();
    place.insert(
        "@type".into(),
        json!(if online { "VirtualLocation" } else { "Place" }),
    );
    place.insert("name".into(), json!(location.name.unwrap_or_default()));
    if online {
        if let Some(url) = location.url {
            place.insert("url".into(), json!(url));
        }
    } else {
        place.insert(
            "address".into(),
            json!({
                "@type": "PostalAddress",
                "streetAddress": location.address.unwrap_or_default(),
            }),
        );
    }

    Some(
        SchemaObject::new("Event")
            .set_opt("name", event.title.clone())
            .set("description", event.intro_text.clone().unwrap_or_default())
            .set(
                "image",
                non_empty(event.image.as_deref()).unwrap_or(DEFAULT_SHARE_IMAGE),
            )
            .set_opt("startDate", start.clone())
            .set_opt("endDate", start)
            .set("location", Value::Object(place))
            .set(
                "organizer",
                json!({
                    "@type": "Organization",
                    "name": ORGANIZATION_NAME,
                    "url": SITE_BASE_URL,
                }),
            )
            .set("eventStatus", "https://schema.org/EventScheduled")
            .set(
                "eventAttendanceMode",
                if online {
                    "https://schema.org/OnlineEventAttendanceMode"
                } else {
                    "https://schema.org/OfflineEventAttendanceMode"
                },
            ),
    )
}

const TIME_FORMATS: [&str; 5] = ["%H:%M", "%H:%M:%S", "%I:%M%p", "%I:%M %p", "%I%p"];

/// ISO 8601 start of an event from its CMS date and free-text time.
///
/// Full timestamps pass through normalised; a date with a recognised time
/// becomes a local date-time; anything unparseable is kept verbatim.
fn event_start(date: &str, time: Option<&str>) -> String {
    let date = date.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(date) {
        return timestamp.to_rfc3339();
    }
    let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return date.to_string();
    };
    let parsed_time = time.map(str::trim).and_then(|t| {
        TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(t, format).ok())
    });
    match parsed_time {
        Some(t) => day.and_time(t).format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => day.format("%Y-%m-%d").to_string(),
    }
}

/// Case study data gathered from a services page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyDetails {
    pub title: Option<String>,
    pub about: Option<String>,
    pub share_image: Option<String>,
    pub date_published: Option<String>,
    pub url: Option<String>,
}

/// Case study Article, authored and published by the organization.
pub fn case_study_schema(case_study: Option<&CaseStudyDetails>) -> Option<SchemaObject> {
    let case_study = case_study?;
    let image = non_empty(case_study.share_image.as_deref()).unwrap_or(DEFAULT_SHARE_IMAGE);

    Some(
        SchemaObject::new("Article")
            .set_opt("headline", case_study.title.clone())
            .set("image", image)
            .set_opt("datePublished", case_study.date_published.clone())
            .set("description", case_study.about.clone().unwrap_or_default())
            .set(
                "author",
                json!({
                    "@type": "Organization",
                    "name": ORGANIZATION_NAME,
                    "url": ORGANIZATION_URL,
                }),
            )
            .set("publisher", organization_ref_with_logo(image))
            .set("mainEntityOfPage", web_page(case_study.url.as_deref())),
    )
}

pub const NEWS_TITLE: &str = "Swwim News & Insights";
pub const NEWS_DESCRIPTION: &str = "Latest news, insights and industry updates from Swwim - Social, Digital & Content Creation Agency";

/// Blog document describing the news collection.
pub fn blog_schema() -> SchemaObject {
    SchemaObject::new("Blog")
        .set("url", format!("{SITE_BASE_URL}/news"))
        .set("name", NEWS_TITLE)
        .set("description", NEWS_DESCRIPTION)
        .set("publisher", organization_ref())
}
