//! Search engine metadata.
//!
//! This module provides:
//! - Robots directives from CMS SEO settings
//! - Schema.org JSON-LD builders and script embedding
//! - PageMeta: title, description, canonical URL and share image

pub mod embed;
pub mod meta;
pub mod robots;
pub mod schema;

pub use embed::{SchemaScript, embed_schemas, render_schema_scripts};
pub use meta::{PageMeta, ShareImage, canonical_url};
pub use robots::{AdvancedRobots, MetaTag, RobotsDirectives, SeoSettings, robots_directives};
pub use schema::{
    ArticleDetails, Breadcrumb, CaseStudyDetails, EventDetails, EventLocation, FaqEntry,
    ListingItem, OrganizationOverrides, SchemaObject, article_schema, blog_schema,
    breadcrumbs_schema, case_study_schema, event_schema, faq_schema, item_list_schema,
    organization_schema,
};
