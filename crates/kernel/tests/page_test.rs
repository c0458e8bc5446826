#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Page composition tests.

use serde_json::{Value, json};
use swwim_kernel::content::BodyRenderer;
use swwim_kernel::page::{Page, PageComposer, PageDocument, PageKind};
use swwim_test_utils::{rich_text_block, test_block, test_document, test_form};

fn compose(kind: PageKind, doc: Value, path: &str) -> Page {
    let doc: PageDocument = serde_json::from_value(doc).unwrap();
    PageComposer::default().compose(kind, &doc, path).unwrap()
}

fn schema(page: &Page, index: usize) -> Value {
    serde_json::from_str(&page.schemas[index].content).unwrap()
}

#[test]
fn event_page_resolves_collection_form() {
    let doc = test_document("evt-1")
        .with_title("Social Summit")
        .with_slug("social-summit")
        .with_field("date", json!("2024-09-12"))
        .with_field("time", json!("18:30"))
        .with_field(
            "location",
            json!({ "name": "The Lido", "address": "1 Pool Lane" }),
        )
        .with_forms(vec![
            test_form("News").with_page_type("all-news").build(),
            test_form("Events").with_page_type("all-events").build(),
        ])
        .build();

    let page = compose(PageKind::Event, doc, "/events/social-summit");

    let signup = page.signup.as_ref().unwrap();
    assert_eq!(signup.title, "Events");
    assert_eq!(
        signup.embed.action,
        "https://example.us1.list-manage.com/subscribe/post?u=abc&id=123"
    );

    let event = schema(&page, 0);
    assert_eq!(event["@type"], "Event");
    assert_eq!(event["startDate"], "2024-09-12T18:30:00");
    assert_eq!(event["location"]["name"], "The Lido");

    let crumbs = schema(&page, 1);
    assert_eq!(crumbs["itemListElement"][1]["name"], "Events");
    assert_eq!(
        crumbs["itemListElement"][2]["item"],
        "https://www.weswwim.com/events/social-summit"
    );
}

#[test]
fn specific_page_form_applies_to_its_page_only() {
    let forms = vec![
        test_form("Launch only").for_pages(&["n1"]).build(),
        test_form("All news").with_page_type("all-news").build(),
    ];

    let launch = compose(
        PageKind::News,
        test_document("n1").with_forms(forms.clone()).build(),
        "/news/launch",
    );
    let other = compose(
        PageKind::News,
        test_document("n2").with_forms(forms).build(),
        "/news/other",
    );

    assert_eq!(launch.signup.unwrap().title, "Launch only");
    assert_eq!(other.signup.unwrap().title, "All news");
}

#[test]
fn case_study_schema_uses_share_graphic_and_created_at() {
    let doc = test_document("cs-1")
        .with_title("Pool Party")
        .with_slug("pool-party")
        .with_field("_createdAt", json!("2023-03-01T10:00:00Z"))
        .with_field("about", json!("A splash campaign."))
        .with_seo(json!({
            "metaTitle": "Pool Party case study",
            "shareGraphic": { "asset": { "url": "https://cdn.sanity.io/share.jpg" } }
        }))
        .build();

    let page = compose(PageKind::CaseStudy, doc, "/case-studies/pool-party");

    let article = schema(&page, 0);
    assert_eq!(article["@type"], "Article");
    assert_eq!(article["datePublished"], "2023-03-01T10:00:00Z");
    assert_eq!(article["description"], "A splash campaign.");
    assert_eq!(
        article["mainEntityOfPage"]["@id"],
        "https://www.weswwim.com/case-studies/pool-party"
    );
    assert_eq!(page.meta.title, "Pool Party case study");
    assert_eq!(page.meta.og_image.url, "https://cdn.sanity.io/share.jpg");
}

#[test]
fn news_reading_time_counts_rich_text_only() {
    let long = vec!["word"; 450].join(" ");
    let doc = test_document("n1")
        .with_title("Long read")
        .with_blocks(vec![
            rich_text_block("b1", &[long.as_str()]),
            test_block("quote", "q1")
                .with_field("quote", json!("these words do not count"))
                .build(),
        ])
        .build();

    let page = compose(PageKind::News, doc, "/news/long-read");
    assert_eq!(page.reading_time, Some(3));
    assert_eq!(page.body.len(), 2);
}

#[test]
fn robots_follow_seo_settings() {
    let doc = test_document("n1")
        .with_seo(json!({ "allowIndex": false, "advancedRobots": { "allowFollow": false } }))
        .build();
    let page = compose(PageKind::News, doc, "/news/hidden");
    assert!(page.robots.noindex);
    assert!(page.robots.nofollow);
}

#[test]
fn page_serializes_for_templates() {
    let page = compose(
        PageKind::Home,
        test_document("home")
            .with_blocks(vec![test_block("quote", "q1").with_field("quote", json!("Hi")).build()])
            .build(),
        "/",
    );
    let value = serde_json::to_value(&page).unwrap();

    assert_eq!(value["kind"], "home");
    assert_eq!(value["body"][0]["#key"], "q1");
    assert_eq!(value["schemas"][0]["type"], "application/ld+json");
    assert_eq!(value["signup"]["title"], "Default Newsletter Signup");
    assert!(value["signup"]["hidden_fields"].is_string());
    assert!(value.get("reading_time").is_none());
}

#[test]
fn unmapped_block_fails_the_page() {
    let composer = PageComposer::new(BodyRenderer::default(), "http://localhost:3000");
    let doc: PageDocument = serde_json::from_value(
        test_document("home")
            .with_blocks(vec![test_block("unknown", "u").build()])
            .build(),
    )
    .unwrap();

    let err = composer.compose(PageKind::Home, &doc, "/").unwrap_err();
    assert_eq!(err.type_name(), Some("unknown"));
}

#[test]
fn explicit_nulls_in_cms_fields_do_not_fail_the_page() {
    let json = r#"{
        "_id": "p1",
        "title": "Launch",
        "content": [{ "_type": "quote", "_key": null, "quote": "Hi" }],
        "signupForms": [
            { "title": null, "embedCode": "<form action=\"/all\"></form>", "pageType": "all-news" },
            {
                "title": "Launch only",
                "embedCode": "<form action=\"/launch\"></form>",
                "pageType": "single",
                "specificPage": [null, { "_id": "p1" }]
            }
        ],
        "faq": [{ "question": "Q", "answer": null }, null]
    }"#;
    let doc = PageDocument::from_json(json).unwrap();
    assert_eq!(doc.signup_forms[0].title, "");
    assert_eq!(doc.faq.len(), 1);

    let page = PageComposer::default()
        .compose(PageKind::News, &doc, "/news/launch")
        .unwrap();

    let signup = page.signup.unwrap();
    assert_eq!(signup.title, "Launch only");
    assert_eq!(signup.embed.action, "/launch");
    assert_eq!(page.body[0].key.as_deref(), Some(""));

    let faq = page
        .schemas
        .iter()
        .map(|s| serde_json::from_str::<Value>(&s.content).unwrap())
        .find(|s| s["@type"] == "FAQPage")
        .unwrap();
    assert_eq!(faq["mainEntity"][0]["acceptedAnswer"]["text"], "");
}
