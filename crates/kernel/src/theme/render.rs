//! Render tree to HTML conversion.

use std::fmt::Write;

use anyhow::{Context, Result};
use serde_json::Value;
use swwim_render::RenderNode;
use tera::{Context as TeraContext, Tera};

/// Text format whose values are sanitized rather than escaped.
pub const FILTERED_HTML: &str = "filtered_html";

const VOID_TAGS: [&str; 7] = ["area", "br", "hr", "img", "input", "link", "meta"];

/// Converts render node trees to HTML.
///
/// A node of type `t` renders through the template `elements/t.html` when the
/// Tera instance has one, else inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a sequence of sibling nodes in order.
    pub fn render_all(&self, tera: &Tera, nodes: &[RenderNode]) -> Result<String> {
        let mut html = String::new();
        for node in nodes {
            html.push_str(&self.render(tera, node)?);
        }
        Ok(html)
    }

    /// Render one node and its children.
    pub fn render(&self, tera: &Tera, node: &RenderNode) -> Result<String> {
        let children_html = self.render_all(tera, &node.children)?;

        let template_name = format!("elements/{}.html", node.element_type);
        if tera.get_template(&template_name).is_err() {
            return Ok(self.render_inline(node, &children_html));
        }

        let mut context = TeraContext::new();
        context.insert("element", node);
        context.insert("children", &children_html);
        context.insert("class", &node.class_string());
        if let Some(value) = &node.value {
            context.insert("value", &process_value(value, node.format.as_deref()));
        }
        tera.render(&template_name, &context)
            .with_context(|| format!("failed to render element type: {}", node.element_type))
    }

    fn render_inline(&self, node: &RenderNode, children: &str) -> String {
        match node.element_type.as_str() {
            "container" => match &node.tag {
                Some(tag) => format!("<{tag}{}>{children}</{tag}>", attributes(node)),
                None => children.to_string(),
            },
            "markup" => {
                let tag = node.tag.as_deref().unwrap_or("span");
                let value = node
                    .value
                    .as_deref()
                    .map(|v| process_value(v, node.format.as_deref()))
                    .unwrap_or_default();
                format!("<{tag}{}>{value}{children}</{tag}>", attributes(node))
            }
            "text" => node.value.as_deref().map(html_escape).unwrap_or_default(),
            "void" => {
                let tag = node.tag.as_deref().unwrap_or("br");
                if VOID_TAGS.contains(&tag) {
                    format!("<{tag}{} />", attributes(node))
                } else {
                    format!("<{tag}{}></{tag}>", attributes(node))
                }
            }
            "html" => node.value.clone().unwrap_or_default(),
            other => {
                let class = node.class_string();
                let mut out = format!("<div class=\"element element--{}", html_escape(other));
                if !class.is_empty() {
                    let _ = write!(out, " {}", html_escape(&class));
                }
                let _ = write!(out, "\">{children}</div>");
                out
            }
        }
    }
}

/// Format a node value for output.
///
/// `filtered_html` values are sanitized with ammonia; everything else is
/// treated as plain text.
fn process_value(value: &str, format: Option<&str>) -> String {
    match format {
        Some(FILTERED_HTML) => ammonia::clean(value),
        _ => html_escape(value),
    }
}

/// Attribute string for a node, class first, boolean `true` as a bare name.
fn attributes(node: &RenderNode) -> String {
    let mut out = String::new();
    let class = node.class_string();
    if !class.is_empty() {
        let _ = write!(out, " class=\"{}\"", html_escape(&class));
    }

    let Some(Value::Object(attrs)) = &node.attributes else {
        return out;
    };
    for (name, value) in attrs.iter().filter(|(k, _)| *k != "class") {
        match value {
            Value::String(s) => {
                let _ = write!(out, " {name}=\"{}\"", html_escape(s));
            }
            Value::Bool(true) => {
                let _ = write!(out, " {name}");
            }
            Value::Bool(false) | Value::Null => {}
            other => {
                let _ = write!(out, " {name}=\"{}\"", html_escape(&other.to_string()));
            }
        }
    }
    out
}

/// Escape text for HTML content and attribute values.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use swwim_render::{container, filtered_markup, fragment, html, link, markup, text, void};

    fn render(node: &RenderNode) -> String {
        HtmlRenderer::new().render(&Tera::default(), node).unwrap()
    }

    #[test]
    fn markup_escapes_value() {
        let node = markup("p", "<script>alert('xss')</script>").build();
        assert_eq!(
            render(&node),
            "<p>&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn container_renders_children_in_order() {
        let node = container("section")
            .class("mb-12 md:mb-16")
            .child(markup("h2", "One").build())
            .child(markup("p", "Two").build())
            .build();
        assert_eq!(
            render(&node),
            r#"<section class="mb-12 md:mb-16"><h2>One</h2><p>Two</p></section>"#
        );
    }

    #[test]
    fn fragment_has_no_tag() {
        let node = fragment()
            .child(text("a & b").build())
            .child(void("br").build())
            .build();
        assert_eq!(render(&node), "a &amp; b<br />");
    }

    #[test]
    fn attributes_are_escaped() {
        let node = link("/search?q=\"x\"&p=1", "Search").build();
        assert_eq!(
            render(&node),
            r#"<a href="/search?q=&quot;x&quot;&amp;p=1">Search</a>"#
        );
    }

    #[test]
    fn filtered_html_is_sanitized() {
        let node = filtered_markup("div", "<b>ok</b><script>bad()</script>", FILTERED_HTML).build();
        let out = render(&node);
        assert!(out.contains("<b>ok</b>"));
        assert!(!out.contains("script"));
    }

    #[test]
    fn html_nodes_are_verbatim() {
        let node = html("<iframe src=\"https://player.example.com\"></iframe>").build();
        assert_eq!(render(&node), "<iframe src=\"https://player.example.com\"></iframe>");
    }

    #[test]
    fn element_template_overrides_inline() {
        let mut tera = Tera::default();
        tera.add_raw_template(
            "elements/markup.html",
            "<{{ element['#tag'] }} data-t>{{ value | safe }}</{{ element['#tag'] }}>",
        )
        .unwrap();
        let out = HtmlRenderer::new()
            .render(&tera, &markup("p", "a<b").build())
            .unwrap();
        assert_eq!(out, "<p data-t>a&lt;b</p>");
    }

    #[test]
    fn html_escape_covers_special_characters() {
        assert_eq!(html_escape("<>&\"'"), "&lt;&gt;&amp;&quot;&#x27;");
    }
}
