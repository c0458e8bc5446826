//! Swwim content kernel.
//!
//! Resolves CMS documents into renderable pages: body blocks through the
//! serializer registry, newsletter signup forms, robots directives and
//! schema.org structured data. The `swwim` binary renders pages from
//! document files.

pub mod config;
pub mod content;
pub mod error;
mod nullable;
pub mod page;
pub mod seo;
pub mod signup;
pub mod theme;

pub use error::{ContentError, ContentResult};
pub use page::{Page, PageComposer, PageDocument, PageKind};
