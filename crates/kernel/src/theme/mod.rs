//! Theme engine and template rendering.
//!
//! Provides Tera-based page rendering and RenderNode to HTML conversion.

mod engine;
mod render;

pub use engine::{PAGE_TEMPLATE, ThemeEngine};
pub use render::{FILTERED_HTML, HtmlRenderer, html_escape};
