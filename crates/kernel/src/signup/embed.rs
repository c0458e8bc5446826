//! Extraction of the pieces of a third-party signup embed.
//!
//! Newsletter embeds are full form snippets. The site renders its own styled
//! form and only re-injects three pieces of the embed: the submission URL,
//! the hidden inputs, and the anti-spam honeypot.

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use serde::Serialize;
use tracing::warn;

/// The re-injected pieces of a signup embed.
///
/// Each piece is extracted independently and is empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupEmbed {
    /// `action` attribute of the first `<form>`.
    pub action: String,
    /// Outer HTML of every `<input type="hidden">`, concatenated in document order.
    pub hidden_fields: String,
    /// Outer HTML of the first `<div aria-hidden="true">`.
    pub honeypot: String,
}

impl SignupEmbed {
    /// Parse an embed snippet and extract its pieces.
    pub fn extract(embed_code: &str) -> Self {
        if embed_code.trim().is_empty() {
            return Self::default();
        }

        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(embed_code);

        let mut elements = Vec::new();
        collect_elements(&dom.document, &mut elements);

        let action = elements
            .iter()
            .find(|node| is_element(node, "form"))
            .and_then(|form| attribute(form, "action"))
            .unwrap_or_default();

        let hidden_fields = elements
            .iter()
            .filter(|node| {
                is_element(node, "input")
                    && attribute(node, "type").is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
            })
            .map(outer_html)
            .collect::<String>();

        let honeypot = elements
            .iter()
            .find(|node| {
                is_element(node, "div") && attribute(node, "aria-hidden").as_deref() == Some("true")
            })
            .map(outer_html)
            .unwrap_or_default();

        Self {
            action,
            hidden_fields,
            honeypot,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.action.is_empty() && self.hidden_fields.is_empty() && self.honeypot.is_empty()
    }
}

/// Depth-first, document-order list of element nodes.
fn collect_elements(node: &Handle, out: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if matches!(child.data, NodeData::Element { .. }) {
            out.push(child.clone());
        }
        collect_elements(child, out);
    }
}

fn is_element(node: &Handle, tag: &str) -> bool {
    match &node.data {
        NodeData::Element { name, .. } => &*name.local == tag,
        _ => false,
    }
}

fn attribute(node: &Handle, attr_name: &str) -> Option<String> {
    let NodeData::Element { attrs, .. } = &node.data else {
        return None;
    };
    attrs
        .borrow()
        .iter()
        .find(|attr| &*attr.name.local == attr_name)
        .map(|attr| attr.value.to_string())
}

fn outer_html(node: &Handle) -> String {
    let mut buf = Vec::new();
    let handle = SerializableHandle::from(node.clone());
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    if let Err(e) = serialize(&mut buf, &handle, opts) {
        warn!(error = %e, "failed to serialize embed element");
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::signup::form::DEFAULT_SIGNUP_FORM;

    #[test]
    fn extracts_default_form_pieces() {
        let embed = SignupEmbed::extract(DEFAULT_SIGNUP_FORM.embed());

        // Entities in attribute values are decoded by the parser.
        assert_eq!(
            embed.action,
            "https://weswwim.us13.list-manage.com/subscribe/post?u=a15d6a11b0fb279a814280022&id=23124acf1f"
        );
        assert!(embed.hidden_fields.is_empty());
        assert!(embed.honeypot.starts_with("<div aria-hidden=\"true\""));
        assert!(embed.honeypot.contains("b_a15d6a11b0fb279a814280022_23124acf1f"));
        assert!(embed.honeypot.ends_with("</div>"));
    }

    #[test]
    fn concatenates_hidden_inputs_in_order() {
        let embed = SignupEmbed::extract(
            r#"<form action="https://list.example.com/post">
                 <input type="hidden" name="u" value="abc">
                 <input type="email" name="EMAIL">
                 <INPUT TYPE="HIDDEN" name="id" value="123">
               </form>"#,
        );

        assert_eq!(embed.action, "https://list.example.com/post");
        assert_eq!(
            embed.hidden_fields,
            r#"<input type="hidden" name="u" value="abc"><input type="HIDDEN" name="id" value="123">"#
        );
        assert!(embed.honeypot.is_empty());
    }

    #[test]
    fn first_form_and_first_honeypot_win() {
        let embed = SignupEmbed::extract(
            r#"<div aria-hidden="true" id="first"></div>
               <form action="/one"></form>
               <form action="/two"></form>
               <div aria-hidden="true" id="second"></div>"#,
        );
        assert_eq!(embed.action, "/one");
        assert_eq!(embed.honeypot, r#"<div aria-hidden="true" id="first"></div>"#);
    }

    #[test]
    fn aria_hidden_false_is_not_a_honeypot() {
        let embed = SignupEmbed::extract(r#"<div aria-hidden="false"><input type="text"></div>"#);
        assert!(embed.honeypot.is_empty());
    }

    #[test]
    fn missing_pieces_are_empty_strings() {
        let embed = SignupEmbed::extract("<p>Newsletter coming soon</p>");
        assert!(embed.is_empty());

        let embed = SignupEmbed::extract("<form method=\"post\"></form>");
        assert_eq!(embed.action, "");
    }

    #[test]
    fn empty_embed_is_empty() {
        assert_eq!(SignupEmbed::extract(""), SignupEmbed::default());
        assert_eq!(SignupEmbed::extract("   "), SignupEmbed::default());
    }

    #[test]
    fn unquoted_and_single_quoted_attributes() {
        let embed = SignupEmbed::extract(
            "<form action='https://list.example.com/a?x=1&y=2'><input type=hidden name=tok value=z></form>",
        );
        assert_eq!(embed.action, "https://list.example.com/a?x=1&y=2");
        assert_eq!(
            embed.hidden_fields,
            r#"<input type="hidden" name="tok" value="z">"#
        );
    }
}
