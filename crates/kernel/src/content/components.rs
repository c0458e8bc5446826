//! Body components for the non-text block types.
//!
//! Each component reads its fields leniently: a missing field renders as an
//! empty element or is left out, never as an error.

use serde_json::Value;
use swwim_render::{RenderNode, container, markup, void};

use super::block::{Payload, asset_url, str_field};
use super::serializers::RenderContext;

/// Vertical rhythm shared by every body section.
pub const SECTION_CLASSES: &str = "mb-12 md:mb-16 xl:mb-24";

/// Frame a body block in a spaced section.
pub fn section_wrapper(node: RenderNode) -> RenderNode {
    container("div").class(SECTION_CLASSES).child(node).build()
}

/// Render a `statBlock`: an optional heading and a row of figures.
///
/// Fields: `title`, `stats: [{ stat, label }]`.
pub fn stat_block(payload: &Payload, _ctx: &RenderContext<'_>) -> RenderNode {
    let mut block = container("div").class("stat-block");

    if let Some(title) = str_field(payload, "title").filter(|t| !t.is_empty()) {
        block = block.child(markup("h3", title).class("stat-block__title").build());
    }

    let stats = payload
        .get("stats")
        .and_then(|v| v.as_array())
        .map(|items| items.iter().map(render_stat).collect::<Vec<_>>())
        .unwrap_or_default();

    block
        .child(container("dl").class("stat-block__items").children(stats).build())
        .build()
}

fn render_stat(stat: &Value) -> RenderNode {
    let figure = stat
        .get("stat")
        .map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
        .unwrap_or_default();
    let label = stat.get("label").and_then(|v| v.as_str()).unwrap_or("");

    let mut item = container("div").class("stat-block__item");
    if let Some(key) = stat.get("_key").and_then(|v| v.as_str()) {
        item = item.key(key);
    }
    item.child(markup("dt", &figure).class("stat-block__figure").build())
        .child(markup("dd", label).class("stat-block__label").build())
        .build()
}

/// Render a `quote`: the quotation with an optional attribution.
///
/// Fields: `quote`, `author`, `role`.
pub fn quote(payload: &Payload, _ctx: &RenderContext<'_>) -> RenderNode {
    let text = str_field(payload, "quote").unwrap_or("");
    let mut figure = container("figure")
        .class("quote")
        .child(container("blockquote").child(markup("p", text).build()).build());

    let author = str_field(payload, "author").filter(|a| !a.is_empty());
    let role = str_field(payload, "role").filter(|r| !r.is_empty());
    if author.is_some() || role.is_some() {
        let mut caption = container("figcaption").class("quote__attribution");
        if let Some(author) = author {
            caption = caption.child(markup("cite", author).build());
        }
        if let Some(role) = role {
            caption = caption.child(markup("span", role).class("quote__role").build());
        }
        figure = figure.child(caption.build());
    }

    figure.build()
}

/// Render an `imageCarousel`: one slide per image with a resolvable URL.
///
/// Fields: `images: [{ asset: { url }, alt, caption }]`.
pub fn image_carousel(payload: &Payload, _ctx: &RenderContext<'_>) -> RenderNode {
    let slides = payload
        .get("images")
        .and_then(|v| v.as_array())
        .map(|images| images.iter().filter_map(render_slide).collect::<Vec<_>>())
        .unwrap_or_default();

    container("div")
        .class("image-carousel")
        .attr("data-slides", &slides.len().to_string())
        .children(slides)
        .build()
}

fn render_slide(image: &Value) -> Option<RenderNode> {
    let url = asset_url(image)?;
    let alt = image.get("alt").and_then(|v| v.as_str()).unwrap_or("");

    let mut slide = container("figure")
        .class("image-carousel__slide")
        .child(void("img").attr("src", url).attr("alt", alt).attr("loading", "lazy").build());
    if let Some(key) = image.get("_key").and_then(|v| v.as_str()) {
        slide = slide.key(key);
    }
    if let Some(caption) = image
        .get("caption")
        .and_then(|v| v.as_str())
        .filter(|c| !c.is_empty())
    {
        slide = slide.child(markup("figcaption", caption).build());
    }
    Some(slide.build())
}
