//! Signup form resolution for a page.
//!
//! Specific pages beat collections, collections beat the default form.

use tracing::debug;

use super::form::{DEFAULT_SIGNUP_FORM, SignupForm};

/// Collection page type a page type resolves against.
///
/// Page types outside the table have no collection form.
pub fn collection_page_type(page_type: &str) -> Option<&'static str> {
    match page_type {
        "case-studies" => Some("all-case-studies"),
        "events" => Some("all-events"),
        "guides" => Some("all-guides"),
        "legal" => Some("all-legal"),
        "news" => Some("all-news"),
        _ => None,
    }
}

/// Pick the signup form for the page `page_id` of type `page_type`.
///
/// 1. The first `single` form listing `page_id` with usable embed code.
/// 2. The first form whose page type is the collection of `page_type`, with
///    usable embed code.
/// 3. [`DEFAULT_SIGNUP_FORM`].
///
/// Ties resolve by input order. An empty `forms` slice yields the default.
pub fn resolve<'a>(forms: &'a [SignupForm], page_type: &str, page_id: &str) -> &'a SignupForm {
    if forms.is_empty() {
        return &*DEFAULT_SIGNUP_FORM;
    }

    if let Some(form) = forms
        .iter()
        .find(|f| f.is_single_page() && f.targets_page(page_id) && f.has_embed())
    {
        debug!(page_type, page_id, form = %form.title, "signup form matched page");
        return form;
    }

    if let Some(collection) = collection_page_type(page_type)
        && let Some(form) = forms
            .iter()
            .find(|f| f.page_type.as_deref() == Some(collection) && f.has_embed())
    {
        debug!(page_type, collection, form = %form.title, "signup form matched collection");
        return form;
    }

    debug!(page_type, page_id, "no signup form matched; using default");
    &*DEFAULT_SIGNUP_FORM
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::signup::form::PageRef;

    fn single(title: &str, pages: &[&str], embed: &str) -> SignupForm {
        SignupForm {
            title: title.to_string(),
            embed_code: Some(embed.to_string()),
            page_type: Some("single".to_string()),
            specific_page: pages.iter().map(|id| PageRef::new(id)).collect(),
        }
    }

    fn collection(title: &str, page_type: &str, embed: &str) -> SignupForm {
        SignupForm {
            title: title.to_string(),
            embed_code: Some(embed.to_string()),
            page_type: Some(page_type.to_string()),
            specific_page: Vec::new(),
        }
    }

    const EMBED: &str = "<form action=\"https://list.example.com\"></form>";

    #[test]
    fn empty_forms_yield_default() {
        for (page_type, page_id) in [("news", "p1"), ("events", ""), ("unknown", "x")] {
            assert!(resolve(&[], page_type, page_id).is_default());
        }
    }

    #[test]
    fn specific_page_beats_collection() {
        let forms = vec![
            collection("All news", "all-news", EMBED),
            single("Launch", &["p1"], EMBED),
        ];
        assert_eq!(resolve(&forms, "news", "p1").title, "Launch");
    }

    #[test]
    fn specific_page_matches_regardless_of_page_type() {
        let forms = vec![single("Launch", &["p1"], EMBED)];
        assert_eq!(resolve(&forms, "news", "p1").title, "Launch");
        assert_eq!(resolve(&forms, "home", "p1").title, "Launch");
    }

    #[test]
    fn collection_match() {
        let forms = vec![collection("All events", "all-events", EMBED)];
        assert_eq!(resolve(&forms, "events", "anything").title, "All events");
    }

    #[test]
    fn empty_specific_embed_falls_through_to_collection() {
        let forms = vec![
            single("Incomplete", &["p1"], ""),
            collection("All events", "all-events", EMBED),
        ];
        assert_eq!(resolve(&forms, "events", "p1").title, "All events");
    }

    #[test]
    fn later_complete_specific_form_wins_over_incomplete_one() {
        let forms = vec![
            single("Incomplete", &["p1"], " "),
            single("Complete", &["p1", "p2"], EMBED),
        ];
        assert_eq!(resolve(&forms, "news", "p1").title, "Complete");
    }

    #[test]
    fn empty_collection_embed_falls_through_to_default() {
        let forms = vec![collection("All events", "all-events", "")];
        assert!(resolve(&forms, "events", "p1").is_default());
    }

    #[test]
    fn first_collection_form_in_input_order_wins() {
        let forms = vec![
            collection("First", "all-news", EMBED),
            collection("Second", "all-news", EMBED),
        ];
        assert_eq!(resolve(&forms, "news", "p9").title, "First");
    }

    #[test]
    fn unmapped_page_type_skips_collection_tier() {
        let forms = vec![collection("All news", "all-news", EMBED)];
        assert!(resolve(&forms, "home", "p1").is_default());
        // The raw collection name is not a page type.
        assert!(resolve(&forms, "all-news", "p1").is_default());
    }

    #[test]
    fn specific_form_for_other_page_is_ignored() {
        let forms = vec![single("Other", &["p2"], EMBED)];
        assert!(resolve(&forms, "news", "p1").is_default());
    }

    #[test]
    fn collection_table() {
        assert_eq!(collection_page_type("news"), Some("all-news"));
        assert_eq!(collection_page_type("events"), Some("all-events"));
        assert_eq!(collection_page_type("case-studies"), Some("all-case-studies"));
        assert_eq!(collection_page_type("guides"), Some("all-guides"));
        assert_eq!(collection_page_type("legal"), Some("all-legal"));
        assert_eq!(collection_page_type("home"), None);
    }
}
