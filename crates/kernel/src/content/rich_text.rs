//! Rich text (Portable Text) rendering.
//!
//! A rich text body block carries its content in `text`: an array of text
//! blocks (`_type: "block"`) with styled spans, plus custom objects such as
//! quotes or stat blocks embedded between paragraphs. Custom objects render
//! through the registry's inline serializers.

use serde_json::Value;
use swwim_render::{RenderNode, container, fragment, text, void};
use tracing::warn;

use super::block::{ContentBlock, Payload};
use super::serializers::{RICH_TEXT_TYPE, RenderContext};

/// Words per minute used for reading time estimates.
const WORDS_PER_MINUTE: usize = 200;

/// Render the `text` field of a rich text block.
///
/// The result is a tagless container: its children render directly into the
/// surrounding section.
pub fn render_rich_text(payload: &Payload, ctx: &RenderContext<'_>) -> RenderNode {
    let blocks = payload
        .get("text")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();
    fragment().children(render_portable_text(blocks, ctx)).build()
}

/// Render a Portable Text array, grouping consecutive list items into lists.
pub fn render_portable_text(blocks: &[Value], ctx: &RenderContext<'_>) -> Vec<RenderNode> {
    let mut nodes = Vec::with_capacity(blocks.len());
    let mut i = 0;
    while i < blocks.len() {
        if let Some(kind) = list_kind(&blocks[i]) {
            let start = i;
            while i < blocks.len() && list_kind(&blocks[i]) == Some(kind) {
                i += 1;
            }
            nodes.push(render_list(kind, &blocks[start..i], ctx));
            continue;
        }
        if let Some(node) = render_block(&blocks[i], ctx) {
            nodes.push(node);
        }
        i += 1;
    }
    nodes
}

fn list_kind(block: &Value) -> Option<&str> {
    if block_type(block) != Some(RICH_TEXT_TYPE) {
        return None;
    }
    block.get("listItem").and_then(|v| v.as_str())
}

fn block_type(block: &Value) -> Option<&str> {
    block.get("_type").and_then(|v| v.as_str())
}

fn render_list(kind: &str, items: &[Value], ctx: &RenderContext<'_>) -> RenderNode {
    let tag = if kind == "number" { "ol" } else { "ul" };
    let mut list = container(tag);
    if let Some(key) = items
        .first()
        .and_then(|b| b.get("_key"))
        .and_then(|v| v.as_str())
    {
        list = list.key(&format!("{key}-parent"));
    }
    let children = items.iter().map(|item| {
        let mut li = container("li").children(render_spans(item, ctx));
        if let Some(key) = item.get("_key").and_then(|v| v.as_str()) {
            li = li.key(key);
        }
        li.build()
    });
    list.children(children).build()
}

fn render_block(block: &Value, ctx: &RenderContext<'_>) -> Option<RenderNode> {
    match block_type(block) {
        Some(RICH_TEXT_TYPE) => {
            let tag = style_tag(block.get("style").and_then(|v| v.as_str()));
            let mut node = container(tag).children(render_spans(block, ctx));
            if let Some(key) = block.get("_key").and_then(|v| v.as_str()) {
                node = node.key(key);
            }
            Some(node.build())
        }
        Some(type_name) => {
            let rendered = ctx.render_inline(block);
            if rendered.is_none() {
                warn!(type_name, "no inline serializer for rich text object; skipping");
            }
            rendered.map(|node| match block.get("_key").and_then(|v| v.as_str()) {
                Some(key) => node.with_key(key),
                None => node,
            })
        }
        None => {
            warn!("rich text object without _type; skipping");
            None
        }
    }
}

fn style_tag(style: Option<&str>) -> &'static str {
    match style {
        Some("h1") => "h1",
        Some("h2") => "h2",
        Some("h3") => "h3",
        Some("h4") => "h4",
        Some("h5") => "h5",
        Some("h6") => "h6",
        Some("blockquote") => "blockquote",
        _ => "p",
    }
}

fn render_spans(block: &Value, ctx: &RenderContext<'_>) -> Vec<RenderNode> {
    let mark_defs = block
        .get("markDefs")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    let Some(children) = block.get("children").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    children
        .iter()
        .filter_map(|child| match block_type(child) {
            Some("span") => Some(render_span(child, mark_defs)),
            Some(type_name) => {
                let rendered = ctx.render_inline(child);
                if rendered.is_none() {
                    warn!(type_name, "no inline serializer for rich text span; skipping");
                }
                rendered
            }
            None => None,
        })
        .collect()
}

/// Render a span: its text (line breaks become `<br>`) wrapped in its marks,
/// first mark outermost.
fn render_span(span: &Value, mark_defs: &[Value]) -> RenderNode {
    let value = span.get("text").and_then(|v| v.as_str()).unwrap_or("");
    let mut node = span_text(value);

    let marks: Vec<&str> = span
        .get("marks")
        .and_then(|v| v.as_array())
        .map(|marks| marks.iter().filter_map(|m| m.as_str()).collect())
        .unwrap_or_default();

    for mark in marks.iter().rev() {
        node = apply_mark(mark, node, mark_defs);
    }
    node
}

fn span_text(value: &str) -> RenderNode {
    if !value.contains('\n') {
        return text(value).build();
    }
    let mut parts = fragment();
    for (i, line) in value.split('\n').enumerate() {
        if i > 0 {
            parts = parts.child(void("br").build());
        }
        if !line.is_empty() {
            parts = parts.child(text(line).build());
        }
    }
    parts.build()
}

fn apply_mark(mark: &str, node: RenderNode, mark_defs: &[Value]) -> RenderNode {
    let decorator = match mark {
        "strong" => Some("strong"),
        "em" => Some("em"),
        "code" => Some("code"),
        "underline" => Some("u"),
        "strike-through" => Some("del"),
        _ => None,
    };
    if let Some(tag) = decorator {
        return container(tag).child(node).build();
    }

    let Some(def) = mark_defs
        .iter()
        .find(|d| d.get("_key").and_then(|k| k.as_str()) == Some(mark))
    else {
        return node;
    };

    match block_type(def) {
        Some("link") => {
            let href = def.get("href").and_then(|v| v.as_str()).unwrap_or("");
            if !is_safe_href(href) {
                return node;
            }
            let mut anchor = container("a").attr("href", href.trim());
            if def.get("blank").and_then(|v| v.as_bool()) == Some(true) {
                anchor = anchor.attr("target", "_blank").attr("rel", "noopener noreferrer");
            }
            anchor.child(node).build()
        }
        _ => node,
    }
}

/// Allow web and mail links, site-relative paths and anchors.
fn is_safe_href(href: &str) -> bool {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lower = trimmed.to_ascii_lowercase();
    ["https://", "http://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
        || (trimmed.starts_with('/') && !trimmed.starts_with("//"))
        || trimmed.starts_with('#')
}

/// Plain text of a Portable Text array: text blocks only, separated by a
/// blank line.
pub fn to_plain_text(blocks: &[Value]) -> String {
    blocks
        .iter()
        .filter(|b| block_type(b) == Some(RICH_TEXT_TYPE))
        .map(|b| {
            b.get("children")
                .and_then(|v| v.as_array())
                .map(|spans| {
                    spans
                        .iter()
                        .filter_map(|s| s.get("text").and_then(|t| t.as_str()))
                        .collect::<String>()
                })
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Plain text of every rich text block in a body sequence.
pub fn body_plain_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter(|b| b.block_type == RICH_TEXT_TYPE)
        .filter_map(|b| b.payload.get("text").and_then(|v| v.as_array()))
        .map(|text| to_plain_text(text))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Estimated reading time in whole minutes, rounded up.
///
/// Empty text reads in zero minutes; anything else takes at least one.
pub fn reading_time_minutes(plain_text: &str) -> usize {
    let words = plain_text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE)
}
