use folio_core::{
    split_comma_list, suggest_slug, BlogDraft, BlogStatus, CategoryDraft, ContentType, LoginForm,
    MagazineDraft, ValidationErrors,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn message_for<'a>(errors: &'a ValidationErrors, field: &str) -> Option<&'a str> {
    errors
        .errors()
        .iter()
        .find(|err| err.field == field)
        .map(|err| err.message.as_str())
}

fn valid_blog() -> BlogDraft {
    BlogDraft {
        title: "Designing for small spaces".to_string(),
        content: "<p>".to_string() + &"Light, storage and flexible furniture. ".repeat(3) + "</p>",
        featured_image: "https://cdn.example.com/hero.jpg".to_string(),
        author: "Jane Doe".to_string(),
        ..BlogDraft::default()
    }
}

#[test]
fn comma_lists_are_split_trimmed_and_filtered() {
    assert_eq!(split_comma_list("a, b ,c"), vec!["a", "b", "c"]);
    assert_eq!(split_comma_list(" , ,"), Vec::<String>::new());
    assert_eq!(split_comma_list(""), Vec::<String>::new());
}

#[test]
fn blog_update_sends_tags_as_array() {
    let draft = BlogDraft {
        tags: "a, b ,c".to_string(),
        ..valid_blog()
    };
    let payload = draft.validate().expect("valid draft");
    let body = serde_json::to_value(&payload).unwrap();

    assert_eq!(body["tags"], json!(["a", "b", "c"]));
    assert_eq!(body["status"], json!("draft"));
    assert_eq!(body["contentType"], json!("html"));
    assert_eq!(body["likesCount"], json!(0));
    assert!(body.get("excerpt").is_none());
    assert!(body.get("category").is_none());
}

#[test]
fn blog_draft_reports_every_failing_field() {
    let draft = BlogDraft {
        title: "x".repeat(101),
        content: "too short".to_string(),
        excerpt: "e".repeat(301),
        status: "deleted".to_string(),
        likes_count: "-1".to_string(),
        saves_count: "many".to_string(),
        ..BlogDraft::default()
    };
    let errors = draft.validate().unwrap_err();
    let fields: Vec<_> = errors.errors().iter().map(|err| err.field).collect();

    assert_eq!(
        fields,
        vec![
            "title",
            "content",
            "excerpt",
            "featuredImage",
            "status",
            "author",
            "likesCount",
            "savesCount",
        ]
    );
    assert_eq!(message_for(&errors, "likesCount"), Some("Likes must be 0 or more"));
    assert!(errors.summary().starts_with("Validation error: "));
    assert!(errors.to_string().contains("Author is required"));
}

#[test]
fn blog_draft_parses_enums_and_counts() {
    let draft = BlogDraft {
        status: "Published".to_string(),
        content_type: "markdown".to_string(),
        likes_count: " 12 ".to_string(),
        category: "64f0c2".to_string(),
        excerpt: "  Short teaser ".to_string(),
        ..valid_blog()
    };
    let payload = draft.validate().unwrap();

    assert_eq!(payload.status, BlogStatus::Published);
    assert_eq!(payload.content_type, ContentType::Markdown);
    assert_eq!(payload.likes_count, 12);
    assert_eq!(payload.saves_count, 0);
    assert_eq!(payload.category.as_deref(), Some("64f0c2"));
    assert_eq!(payload.excerpt.as_deref(), Some("Short teaser"));
}

#[test]
fn magazine_slug_must_be_lowercase_dashes() {
    let draft = MagazineDraft {
        title: "Modern Living".to_string(),
        slug: "Modern Living".to_string(),
        date_of_publish: "2025-06-01".to_string(),
        author: "Jane Doe".to_string(),
        publisher: "Living Media".to_string(),
        keywords: "Design, Architecture,,".to_string(),
        ..MagazineDraft::default()
    };
    let errors = draft.validate().unwrap_err();
    assert_eq!(
        message_for(&errors, "slug"),
        Some("Use lowercase, numbers and dashes only")
    );

    let slug = suggest_slug(&draft.title);
    let payload = MagazineDraft { slug, ..draft }
    .validate()
    .unwrap();
    assert_eq!(payload.slug, "modern-living");
    assert_eq!(payload.keywords, vec!["Design", "Architecture"]);
    assert_eq!(
        serde_json::to_value(&payload).unwrap()["dateOfPublish"],
        json!("2025-06-01")
    );
}

#[test]
fn magazine_requires_core_fields() {
    let errors = MagazineDraft::default().validate().unwrap_err();
    let fields: Vec<_> = errors.errors().iter().map(|err| err.field).collect();
    assert_eq!(
        fields,
        vec!["title", "slug", "dateOfPublish", "author", "publisher"]
    );
}

#[test]
fn slug_suggestion_strips_symbols() {
    assert_eq!(suggest_slug("Summer Issue 2025!"), "summer-issue-2025");
    assert_eq!(suggest_slug("  Café  & Co-op  "), "caf-co-op");
    assert_eq!(suggest_slug("???"), "");
}

#[test]
fn login_form_checks_email_and_password() {
    let ok = LoginForm {
        email: " admin@example.com ".to_string(),
        password: "secret".to_string(),
    }
    .validate()
    .unwrap();
    assert_eq!(ok.email, "admin@example.com");
    assert!(!format!("{ok:?}").contains("secret"));

    let errors = LoginForm {
        email: "admin@localhost".to_string(),
        password: String::new(),
    }
    .validate()
    .unwrap_err();
    assert_eq!(message_for(&errors, "email"), Some("Invalid email"));
    assert_eq!(message_for(&errors, "password"), Some("Password is required"));
}

#[test]
fn category_requires_name() {
    assert!(CategoryDraft::default().validate().is_err());
    let payload = CategoryDraft {
        name: " Interiors ".to_string(),
        color: "#ea580c".to_string(),
        ..CategoryDraft::default()
    }
    .validate()
    .unwrap();
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({ "name": "Interiors", "color": "#ea580c" })
    );
}
