//! Render node builder API.
//!
//! A node is one of five kinds:
//! - `container`: groups children, optionally inside a tag
//! - `markup`: a tag wrapping a text value (optionally in a text format)
//! - `text`: a bare text value
//! - `void`: a childless tag such as `img` or `hr`
//! - `html`: trusted markup emitted verbatim

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node in the render tree.
///
/// Children keep insertion order; nothing downstream reorders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    #[serde(rename = "#type")]
    pub element_type: String,
    /// Stable identity of the node among its siblings.
    #[serde(rename = "#key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "#tag", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "#value", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "#format", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "#attributes", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    #[serde(rename = "#children", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    /// Set the identity key, replacing any existing one.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Look up a string attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|attrs| attrs.get(name))
            .and_then(|v| v.as_str())
    }

    /// Class list as a space-separated string (empty when unset).
    pub fn class_string(&self) -> String {
        match self.attributes.as_ref().and_then(|attrs| attrs.get("class")) {
            Some(Value::Array(classes)) => classes
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if self.element_type != "html"
            && let Some(value) = &self.value
        {
            out.push_str(value);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Builder for constructing render nodes.
pub struct NodeBuilder {
    element_type: String,
    key: Option<String>,
    tag: Option<String>,
    value: Option<String>,
    format: Option<String>,
    classes: Vec<String>,
    attrs: Map<String, Value>,
    children: Vec<RenderNode>,
}

impl NodeBuilder {
    fn new(element_type: &str) -> Self {
        Self {
            element_type: element_type.into(),
            key: None,
            tag: None,
            value: None,
            format: None,
            classes: Vec::new(),
            attrs: Map::new(),
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.into(), Value::String(value.into()));
        self
    }

    pub fn child(mut self, node: RenderNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn build(self) -> RenderNode {
        let attributes = if self.classes.is_empty() && self.attrs.is_empty() {
            None
        } else {
            let mut map = self.attrs;
            if !self.classes.is_empty() {
                map.insert(
                    "class".into(),
                    Value::Array(self.classes.into_iter().map(Value::String).collect()),
                );
            }
            Some(Value::Object(map))
        };

        RenderNode {
            element_type: self.element_type,
            key: self.key,
            tag: self.tag,
            value: self.value,
            format: self.format,
            attributes,
            children: self.children,
        }
    }
}

/// Create a container wrapped in an HTML tag.
pub fn container(tag: &str) -> NodeBuilder {
    NodeBuilder::new("container").tag(tag)
}

/// Create a container with no tag of its own; only its children render.
pub fn fragment() -> NodeBuilder {
    NodeBuilder::new("container")
}

/// Create a markup element with an HTML tag and text value.
pub fn markup(tag: &str, value: &str) -> NodeBuilder {
    let mut b = NodeBuilder::new("markup");
    b.tag = Some(tag.into());
    b.value = Some(value.into());
    b
}

/// Create a markup element with a text format (for filtered HTML, etc.).
pub fn filtered_markup(tag: &str, value: &str, format: &str) -> NodeBuilder {
    let mut b = markup(tag, value);
    b.format = Some(format.into());
    b
}

/// Create a bare text node.
pub fn text(value: &str) -> NodeBuilder {
    let mut b = NodeBuilder::new("text");
    b.value = Some(value.into());
    b
}

/// Create a childless element (`img`, `hr`, `br`, ...).
pub fn void(tag: &str) -> NodeBuilder {
    NodeBuilder::new("void").tag(tag)
}

/// Create a node holding trusted markup that is emitted as-is.
pub fn html(value: &str) -> NodeBuilder {
    let mut b = NodeBuilder::new("html");
    b.value = Some(value.into());
    b
}

/// Create a link element.
pub fn link(href: &str, text: &str) -> NodeBuilder {
    markup("a", text).attr("href", href)
}
