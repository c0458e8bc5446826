//! Theme engine with Tera templates.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use swwim_render::RenderNode;
use tera::{Context as TeraContext, Tera};
use tracing::debug;

use super::render::HtmlRenderer;
use crate::config::Config;
use crate::page::Page;
use crate::seo::render_schema_scripts;

/// Name of the full document template.
pub const PAGE_TEMPLATE: &str = "page.html";

const BUILTIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ page.meta.title }}</title>
{% if page.meta.description %}<meta name="description" content="{{ page.meta.description }}">
{% endif %}<link rel="canonical" href="{{ page.meta.canonical_url }}">
{% if robots %}<meta name="robots" content="{{ robots }}">
{% endif %}<meta property="og:url" content="{{ page.meta.canonical_url }}">
<meta property="og:title" content="{{ page.meta.title }}">
{% if page.meta.description %}<meta property="og:description" content="{{ page.meta.description }}">
{% endif %}<meta property="og:image" content="{{ page.meta.og_image.url }}">
<meta property="og:image:width" content="{{ page.meta.og_image.width }}">
<meta property="og:image:height" content="{{ page.meta.og_image.height }}">
<meta property="og:image:alt" content="{{ page.meta.og_image.alt }}">
{{ schema_scripts | safe }}
</head>
<body class="page page--{{ page.kind }}">
<main>
{% if page.reading_time %}<p class="reading-time">{{ page.reading_time | minutes }}</p>
{% endif %}{{ body | safe }}
</main>
{% if page.signup %}<section class="newsletter-signup">
<h2>{{ page.signup.title }}</h2>
<form action="{{ page.signup.action }}" method="post" target="_self" novalidate>
<label for="signup-email">Email address</label>
<input type="email" name="EMAIL" id="signup-email" required placeholder="Email Address">
{{ page.signup.hidden_fields | safe }}
{{ page.signup.honeypot | safe }}
<button type="submit">Subscribe</button>
</form>
</section>
{% endif %}</body>
</html>
"#;

/// Theme engine for rendering pages and render trees.
pub struct ThemeEngine {
    tera: Tera,
    renderer: HtmlRenderer,
}

impl ThemeEngine {
    /// Create a theme engine with only the built-in templates.
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        Self::add_builtins(&mut tera)?;
        Self::register_filters(&mut tera);
        Ok(Self {
            tera,
            renderer: HtmlRenderer::new(),
        })
    }

    /// Create a theme engine loading templates from the given directory.
    ///
    /// Templates in the directory take precedence over built-ins of the same
    /// name.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;

        let mut builtins = Tera::default();
        Self::add_builtins(&mut builtins)?;
        tera.extend(&builtins)
            .context("failed to merge built-in templates")?;

        Self::register_filters(&mut tera);

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), dir = %template_dir.display(), "loaded templates");

        Ok(Self {
            tera,
            renderer: HtmlRenderer::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.templates_dir {
            Some(dir) => Self::new(dir),
            None => Self::builtin(),
        }
    }

    fn add_builtins(tera: &mut Tera) -> Result<()> {
        tera.add_raw_template(PAGE_TEMPLATE, BUILTIN_PAGE)
            .context("failed to parse built-in page template")
    }

    fn register_filters(tera: &mut Tera) {
        // Reading time label, "1 min read"
        tera.register_filter(
            "minutes",
            |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let minutes = tera::try_get_value!("minutes", "value", u64, value);
                Ok(tera::Value::String(format!("{minutes} min read")))
            },
        );
    }

    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Render a sequence of nodes to an HTML fragment.
    pub fn render_nodes(&self, nodes: &[RenderNode]) -> Result<String> {
        self.renderer.render_all(&self.tera, nodes)
    }

    /// Render a composed page to a full HTML document.
    pub fn render_page(&self, page: &Page) -> Result<String> {
        let body = self.render_nodes(&page.body)?;

        let mut context = TeraContext::new();
        context.insert("page", page);
        context.insert("body", &body);
        context.insert("schema_scripts", &render_schema_scripts(&page.schemas));
        context.insert("robots", &page.robots.meta_content());

        self.tera
            .render(PAGE_TEMPLATE, &context)
            .with_context(|| format!("failed to render {PAGE_TEMPLATE} for {} page", page.kind))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::page::{PageComposer, PageDocument, PageKind};
    use serde_json::json;

    fn compose(kind: PageKind, doc: serde_json::Value, path: &str) -> Page {
        let doc: PageDocument = serde_json::from_value(doc).unwrap();
        PageComposer::default().compose(kind, &doc, path).unwrap()
    }

    #[test]
    fn builtin_engine_has_page_template() {
        let engine = ThemeEngine::builtin().unwrap();
        assert!(engine.tera().get_template(PAGE_TEMPLATE).is_ok());
    }

    #[test]
    fn page_head_carries_meta_and_schemas() {
        let page = compose(
            PageKind::News,
            json!({
                "_id": "n1",
                "title": "Launch",
                "slug": "launch",
                "seo": { "metaTitle": "Launch | Swwim", "allowIndex": false }
            }),
            "/news/launch",
        );
        let html = ThemeEngine::builtin().unwrap().render_page(&page).unwrap();

        assert!(html.contains("<title>Launch | Swwim</title>"));
        assert!(html.contains(r#"<meta name="robots" content="noindex">"#));
        assert_eq!(html.matches(r#"<script type="application/ld+json">"#).count(), 2);
        assert!(!html.contains("schema-0"));
        assert!(html.contains("page--news"));
        assert!(!html.contains("name=\"description\""));
    }

    #[test]
    fn page_body_and_signup_form() {
        let page = compose(
            PageKind::Home,
            json!({
                "_id": "home",
                "content": [{ "_type": "quote", "_key": "q1", "quote": "Make waves" }]
            }),
            "/",
        );
        let html = ThemeEngine::builtin().unwrap().render_page(&page).unwrap();

        assert!(html.contains("Make waves"));
        assert!(html.contains("newsletter-signup"));
        assert!(html.contains("list-manage.com"));
        assert!(html.contains(r#"<div aria-hidden="true""#));
        assert!(!html.contains("reading-time"));
    }

    #[test]
    fn news_index_has_no_signup_section() {
        let page = compose(PageKind::NewsIndex, json!({}), "/news");
        let html = ThemeEngine::builtin().unwrap().render_page(&page).unwrap();
        assert!(!html.contains("newsletter-signup"));
        assert!(html.contains("Swwim News &amp; Insights"));
    }

    #[test]
    fn minutes_filter_labels_reading_time() {
        let engine = ThemeEngine::builtin().unwrap();
        let mut tera = engine.tera().clone();
        tera.add_raw_template("t.html", "{{ n | minutes }}").unwrap();
        let mut context = TeraContext::new();
        context.insert("n", &3);
        assert_eq!(tera.render("t.html", &context).unwrap(), "3 min read");
    }
}
