//! Newsletter signup form documents.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::nullable::{null_as_default, present_entries};

/// Page type of forms scoped to explicitly listed pages.
pub const SINGLE_PAGE_TYPE: &str = "single";

/// Page type carried by the built-in fallback form.
pub const DEFAULT_PAGE_TYPE: &str = "default";

/// Reference to a page document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

impl PageRef {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            doc_type: None,
        }
    }
}

/// A newsletter embed and the pages it applies to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub embed_code: Option<String>,
    #[serde(default)]
    pub page_type: Option<String>,
    /// Dereferenced pages; deleted or unpublished targets come back `null`.
    #[serde(default, deserialize_with = "present_entries")]
    pub specific_page: Vec<PageRef>,
}

impl SignupForm {
    /// Whether the form has usable embed markup.
    ///
    /// Whitespace-only embed code counts as missing.
    pub fn has_embed(&self) -> bool {
        self.embed_code
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty())
    }

    /// Embed markup, or an empty string.
    pub fn embed(&self) -> &str {
        self.embed_code.as_deref().unwrap_or_default()
    }

    /// Whether the form is scoped to explicit pages.
    pub fn is_single_page(&self) -> bool {
        self.page_type.as_deref() == Some(SINGLE_PAGE_TYPE)
    }

    /// Whether the page with `page_id` is one of the form's specific pages.
    pub fn targets_page(&self, page_id: &str) -> bool {
        !page_id.is_empty() && self.specific_page.iter().any(|page| page.id == page_id)
    }

    pub fn is_default(&self) -> bool {
        self.page_type.as_deref() == Some(DEFAULT_PAGE_TYPE)
    }
}

const DEFAULT_EMBED_CODE: &str = r#"<div id="mc_embed_shell">
    <div id="mc_embed_signup">
      <form action="https://weswwim.us13.list-manage.com/subscribe/post?u=a15d6a11b0fb279a814280022&amp;id=23124acf1f" method="post" id="mc-embedded-subscribe-form" name="mc-embedded-subscribe-form" class="validate" target="_self" novalidate>
        <div id="mc_embed_signup_scroll">
          <div class="mc-field-group">
            <input type="email" name="EMAIL" class="required email" id="mce-EMAIL" required placeholder="Email Address" />
          </div>
          <div aria-hidden="true" style="position: absolute; left: -5000px;">
            <input type="text" name="b_a15d6a11b0fb279a814280022_23124acf1f" tabindex="-1" value="" />
          </div>
        </div>
      </form>
    </div>
  </div>"#;

/// Fallback form used when no CMS form applies to a page.
pub static DEFAULT_SIGNUP_FORM: LazyLock<SignupForm> = LazyLock::new(|| SignupForm {
    title: "Default Newsletter Signup".to_string(),
    embed_code: Some(DEFAULT_EMBED_CODE.to_string()),
    page_type: Some(DEFAULT_PAGE_TYPE.to_string()),
    specific_page: Vec::new(),
});

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_cms_shape() {
        let form: SignupForm = serde_json::from_value(json!({
            "title": "Events signup",
            "embedCode": "<form action=\"/x\"></form>",
            "pageType": "single",
            "specificPage": [{ "_type": "events", "_id": "evt-1" }]
        }))
        .unwrap();

        assert_eq!(form.title, "Events signup");
        assert!(form.is_single_page());
        assert!(form.targets_page("evt-1"));
        assert!(!form.targets_page("evt-2"));
        assert_eq!(form.specific_page[0].doc_type.as_deref(), Some("events"));
    }

    #[test]
    fn null_fields_deserialize_as_missing() {
        let form: SignupForm = serde_json::from_value(json!({
            "title": "Draft",
            "embedCode": null,
            "pageType": null,
            "specificPage": null
        }))
        .unwrap();

        assert!(!form.has_embed());
        assert!(form.page_type.is_none());
        assert!(form.specific_page.is_empty());
    }

    #[test]
    fn null_title_and_dangling_page_refs() {
        let form: SignupForm = serde_json::from_value(json!({
            "title": null,
            "embedCode": "<form action=\"/x\"></form>",
            "pageType": "single",
            "specificPage": [null, { "_id": "p1" }, { "_id": null }]
        }))
        .unwrap();

        assert_eq!(form.title, "");
        assert_eq!(form.specific_page.len(), 2);
        assert!(form.targets_page("p1"));
        assert!(!form.targets_page("p2"));
        assert!(!form.targets_page(""));
    }

    #[test]
    fn whitespace_embed_is_not_usable() {
        let form = SignupForm {
            embed_code: Some("  \n ".to_string()),
            ..SignupForm::default()
        };
        assert!(!form.has_embed());
        assert_eq!(form.embed(), "  \n ");
    }

    #[test]
    fn default_form_has_one_form_element() {
        assert!(DEFAULT_SIGNUP_FORM.is_default());
        assert!(DEFAULT_SIGNUP_FORM.has_embed());
        assert_eq!(DEFAULT_SIGNUP_FORM.embed().matches("<form").count(), 1);
    }
}
