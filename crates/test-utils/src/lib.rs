//! Swwim test utilities.
//!
//! Fixture builders for CMS documents as a page query returns them: body
//! blocks, Portable Text, signup forms and whole page documents. Builders
//! produce JSON so tests exercise the same deserialization as real content.

use serde_json::{Value as JsonValue, json};

/// A signup embed with two hidden fields and a honeypot.
pub const SAMPLE_EMBED: &str = r#"<div id="mc_embed_shell">
  <form action="https://example.us1.list-manage.com/subscribe/post?u=abc&amp;id=123" method="post" id="mc-embedded-subscribe-form">
    <input type="email" name="EMAIL" id="mce-EMAIL" required />
    <input type="hidden" name="tags" value="42" />
    <div aria-hidden="true" style="position: absolute; left: -5000px;"><input type="text" name="b_abc_123" tabindex="-1" value="" /></div>
    <input type="hidden" name="source" value="site" />
  </form>
</div>"#;

/// Create a body block builder.
pub fn test_block(block_type: &str, key: &str) -> TestBlock {
    TestBlock {
        block_type: block_type.to_string(),
        key: key.to_string(),
        fields: json!({}),
    }
}

/// A body block builder.
#[derive(Debug, Clone)]
pub struct TestBlock {
    pub block_type: String,
    pub key: String,
    pub fields: JsonValue,
}

impl TestBlock {
    /// Add a single field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        if let Some(obj) = self.fields.as_object_mut() {
            obj.insert(name.to_string(), value);
        }
        self
    }

    pub fn build(self) -> JsonValue {
        let mut block = self.fields;
        if let Some(obj) = block.as_object_mut() {
            obj.insert("_type".to_string(), json!(self.block_type));
            obj.insert("_key".to_string(), json!(self.key));
        }
        block
    }
}

/// A Portable Text paragraph with a single unmarked span.
pub fn paragraph(key: &str, text: &str) -> JsonValue {
    json!({
        "_type": "block",
        "_key": key,
        "style": "normal",
        "markDefs": [],
        "children": [{ "_type": "span", "_key": format!("{key}-s"), "text": text, "marks": [] }]
    })
}

/// A rich text body block holding one paragraph per entry.
pub fn rich_text_block(key: &str, paragraphs: &[&str]) -> JsonValue {
    let text: Vec<JsonValue> = paragraphs
        .iter()
        .enumerate()
        .map(|(i, p)| paragraph(&format!("{key}-p{i}"), p))
        .collect();
    test_block("block", key).with_field("text", json!(text)).build()
}

/// Create a signup form builder with [`SAMPLE_EMBED`] and no page type.
pub fn test_form(title: &str) -> TestForm {
    TestForm {
        title: title.to_string(),
        embed_code: Some(SAMPLE_EMBED.to_string()),
        page_type: None,
        specific_page: Vec::new(),
    }
}

/// A signup form builder.
#[derive(Debug, Clone)]
pub struct TestForm {
    pub title: String,
    pub embed_code: Option<String>,
    pub page_type: Option<String>,
    pub specific_page: Vec<String>,
}

impl TestForm {
    /// Scope to a collection page type such as `all-news`.
    pub fn with_page_type(mut self, page_type: &str) -> Self {
        self.page_type = Some(page_type.to_string());
        self
    }

    /// Scope to explicit pages.
    pub fn for_pages(mut self, ids: &[&str]) -> Self {
        self.page_type = Some("single".to_string());
        self.specific_page = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_embed(mut self, embed_code: &str) -> Self {
        self.embed_code = Some(embed_code.to_string());
        self
    }

    /// Drop the embed code, as for a form left incomplete in the CMS.
    pub fn without_embed(mut self) -> Self {
        self.embed_code = None;
        self
    }

    pub fn build(self) -> JsonValue {
        let pages: Vec<JsonValue> = self
            .specific_page
            .iter()
            .map(|id| json!({ "_type": "page", "_id": id }))
            .collect();
        json!({
            "title": self.title,
            "embedCode": self.embed_code,
            "pageType": self.page_type,
            "specificPage": if pages.is_empty() { JsonValue::Null } else { json!(pages) },
        })
    }
}

/// Create a page document builder.
pub fn test_document(id: &str) -> TestDocument {
    TestDocument {
        fields: json!({ "_id": id }),
    }
}

/// A page document builder.
#[derive(Debug, Clone)]
pub struct TestDocument {
    pub fields: JsonValue,
}

impl TestDocument {
    /// Add a single field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        if let Some(obj) = self.fields.as_object_mut() {
            obj.insert(name.to_string(), value);
        }
        self
    }

    pub fn with_title(self, title: &str) -> Self {
        self.with_field("title", json!(title))
    }

    pub fn with_slug(self, slug: &str) -> Self {
        self.with_field("slug", json!({ "current": slug }))
    }

    pub fn with_blocks(self, blocks: Vec<JsonValue>) -> Self {
        self.with_field("content", JsonValue::Array(blocks))
    }

    pub fn with_forms(self, forms: Vec<JsonValue>) -> Self {
        self.with_field("signupForms", JsonValue::Array(forms))
    }

    pub fn with_seo(self, seo: JsonValue) -> Self {
        self.with_field("seo", seo)
    }

    pub fn build(self) -> JsonValue {
        self.fields
    }
}
