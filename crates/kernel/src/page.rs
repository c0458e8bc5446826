//! Page composition.
//!
//! A [`PageComposer`] takes one fetched CMS document and produces everything a
//! page template needs: rendered body, resolved signup form, robots
//! directives, head metadata and JSON-LD scripts. Each part is computed
//! independently from the same document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swwim_render::RenderNode;
use tracing::debug;

use crate::config::Config;
use crate::content::{
    AuthorRef, BodyRenderer, ContentBlock, ImageRef, Slug, body_plain_text, reading_time_minutes,
};
use crate::error::ContentResult;
use crate::nullable::present_entries;
use crate::seo::schema::{NEWS_DESCRIPTION, NEWS_TITLE};
use crate::seo::{
    ArticleDetails, Breadcrumb, CaseStudyDetails, EventDetails, EventLocation, FaqEntry,
    ListingItem, PageMeta, RobotsDirectives, SchemaObject, SchemaScript, SeoSettings,
    article_schema, blog_schema, breadcrumbs_schema, case_study_schema, embed_schemas,
    event_schema, faq_schema, item_list_schema, organization_schema, robots_directives,
};
use crate::signup::{SignupEmbed, SignupForm, resolve};

/// A CMS document as returned by a page query.
///
/// Every field is optional; each page kind reads the fields it projects.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub seo: Option<SeoSettings>,
    #[serde(default)]
    pub content: Option<Vec<ContentBlock>>,
    #[serde(default)]
    pub intro_text: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<EventLocation>,
    #[serde(default)]
    pub hero_image: Option<ImageRef>,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(default, deserialize_with = "present_entries")]
    pub signup_forms: Vec<SignupForm>,
    /// Listing entries of a collection page.
    #[serde(default, alias = "news", deserialize_with = "present_entries")]
    pub items: Vec<ListingItem>,
    #[serde(default, deserialize_with = "present_entries")]
    pub faq: Vec<FaqEntry>,
}

impl PageDocument {
    pub fn from_json(json: &str) -> ContentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn slug(&self) -> Option<&str> {
        self.slug.as_ref().and_then(Slug::current)
    }
}

/// The kinds of page the site composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Home,
    News,
    NewsIndex,
    Event,
    CaseStudy,
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        PageKind::Home,
        PageKind::News,
        PageKind::NewsIndex,
        PageKind::Event,
        PageKind::CaseStudy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::News => "news",
            PageKind::NewsIndex => "news-index",
            PageKind::Event => "event",
            PageKind::CaseStudy => "case-study",
        }
    }

    /// Page type passed to the signup resolver. The news index has no form.
    pub fn signup_page_type(self) -> Option<&'static str> {
        match self {
            PageKind::Home => Some("home"),
            PageKind::News => Some("news"),
            PageKind::Event => Some("events"),
            PageKind::CaseStudy => Some("case-studies"),
            PageKind::NewsIndex => None,
        }
    }

    /// URL path segment of the collection this page belongs to.
    pub fn collection(self) -> Option<&'static str> {
        match self {
            PageKind::Home => None,
            PageKind::News | PageKind::NewsIndex => Some("news"),
            PageKind::Event => Some("events"),
            PageKind::CaseStudy => Some("case-studies"),
        }
    }

    fn section_name(self) -> Option<&'static str> {
        match self {
            PageKind::News => Some("News"),
            PageKind::Event => Some("Events"),
            PageKind::CaseStudy => Some("Case Studies"),
            PageKind::Home | PageKind::NewsIndex => None,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = PageKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown page kind '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// The signup form chosen for a page, with its embed pieces extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSignup {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    #[serde(flatten)]
    pub embed: SignupEmbed,
}

impl ResolvedSignup {
    pub fn from_form(form: &SignupForm) -> Self {
        Self {
            title: form.title.clone(),
            page_type: form.page_type.clone(),
            embed: SignupEmbed::extract(form.embed()),
        }
    }
}

/// Everything a page template consumes.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub kind: PageKind,
    pub meta: PageMeta,
    pub robots: RobotsDirectives,
    pub schemas: Vec<SchemaScript>,
    pub body: Vec<RenderNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup: Option<ResolvedSignup>,
    /// Reading time in minutes, for articles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<usize>,
}

/// Composes pages against one body renderer and site URL.
#[derive(Debug, Clone)]
pub struct PageComposer {
    body: BodyRenderer,
    site_url: String,
}

impl Default for PageComposer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl PageComposer {
    pub fn new(body: BodyRenderer, site_url: &str) -> Self {
        Self {
            body,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(BodyRenderer::default(), &config.site_url)
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Compose a page. Fails only when the body holds an unmapped block type.
    pub fn compose(&self, kind: PageKind, doc: &PageDocument, path: &str) -> ContentResult<Page> {
        let body = self.body.render(doc.content.as_deref())?;

        let signup = kind
            .signup_page_type()
            .map(|page_type| ResolvedSignup::from_form(resolve(&doc.signup_forms, page_type, &doc.id)));

        let mut meta = PageMeta::new(
            &page_title(kind, doc),
            doc.seo.as_ref(),
            doc.hero_image.as_ref(),
            &self.site_url,
            path,
        );
        if kind == PageKind::NewsIndex && meta.description.is_none() {
            meta.description = Some(NEWS_DESCRIPTION.to_string());
        }

        let reading_time = (kind == PageKind::News).then(|| {
            let plain = body_plain_text(doc.content.as_deref().unwrap_or_default());
            reading_time_minutes(&plain)
        });

        let schemas = embed_schemas(self.schemas(kind, doc, &meta.canonical_url));

        debug!(
            kind = %kind,
            id = %doc.id,
            blocks = body.len(),
            schemas = schemas.len(),
            "composed page"
        );

        Ok(Page {
            kind,
            robots: robots_directives(doc.seo.as_ref()),
            meta,
            schemas,
            body,
            signup,
            reading_time,
        })
    }

    fn schemas(
        &self,
        kind: PageKind,
        doc: &PageDocument,
        canonical_url: &str,
    ) -> Vec<Option<SchemaObject>> {
        let url = self.entity_url(kind, doc, canonical_url);
        let hero = doc.hero_image.as_ref().and_then(ImageRef::url).map(str::to_string);

        let mut schemas = match kind {
            PageKind::Home => vec![Some(organization_schema(None))],
            PageKind::NewsIndex => vec![item_list_schema(&doc.items, "news"), Some(blog_schema())],
            PageKind::News => vec![article_schema(Some(&ArticleDetails {
                title: doc.title.clone(),
                image: hero,
                date: doc.date.clone(),
                modified: doc.modified.clone(),
                author: doc.author.clone(),
                intro_text: doc.intro_text.clone(),
                url: Some(url.clone()),
            }))],
            PageKind::Event => vec![event_schema(Some(&EventDetails {
                title: doc.title.clone(),
                intro_text: doc.intro_text.clone(),
                image: hero,
                date: doc.date.clone(),
                time: doc.time.clone(),
                location: doc.location.clone(),
            }))],
            PageKind::CaseStudy => vec![case_study_schema(Some(&CaseStudyDetails {
                title: doc.title.clone(),
                about: doc.about.clone(),
                share_image: doc
                    .seo
                    .as_ref()
                    .and_then(|s| s.share_graphic.as_ref())
                    .and_then(ImageRef::url)
                    .map(str::to_string),
                date_published: doc.created_at.clone(),
                url: Some(url.clone()),
            }))],
        };

        schemas.push(self.breadcrumbs(kind, doc, &url));
        schemas.push(faq_schema(&doc.faq));
        schemas
    }

    /// Absolute URL of the document: collection and slug when both are
    /// known, else the canonical URL of the request.
    fn entity_url(&self, kind: PageKind, doc: &PageDocument, canonical_url: &str) -> String {
        match (kind.collection(), doc.slug()) {
            (Some(collection), Some(slug)) if kind != PageKind::NewsIndex => {
                format!("{}/{collection}/{slug}", self.site_url)
            }
            _ => canonical_url.to_string(),
        }
    }

    /// Home, section, page. Only detail pages have a trail.
    fn breadcrumbs(&self, kind: PageKind, doc: &PageDocument, url: &str) -> Option<SchemaObject> {
        let section = kind.section_name()?;
        let collection = kind.collection()?;
        breadcrumbs_schema(&[
            Breadcrumb::new("Home", &format!("{}/", self.site_url)),
            Breadcrumb::new(section, &format!("{}/{collection}", self.site_url)),
            Breadcrumb::new(doc.title.as_deref().unwrap_or_default(), url),
        ])
    }
}

fn page_title(kind: PageKind, doc: &PageDocument) -> String {
    match kind {
        PageKind::Home => "Homepage".to_string(),
        PageKind::NewsIndex => NEWS_TITLE.to_string(),
        _ => doc.title.clone().unwrap_or_default(),
    }
}
