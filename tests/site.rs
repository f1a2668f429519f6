//! Router-level integration tests
//!
//! Exercises the full router against in-memory fixture content. Upstream
//! services (GitHub, helpdesk) are unreachable here; the tests cover the
//! paths that never leave the process plus the degrade behavior.

use axum_test::TestServer;
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;

use docsite::config::{RateLimitConfig, SiteConfig, SupportSettings};
use docsite::content::{
    Category, CategoryGroup, Contributor, Framework, LeafItem, Repository, SiteSettings, Template,
};
use docsite::handlers;
use docsite::state::SiteState;

fn fixture_tree() -> Vec<CategoryGroup> {
    vec![
        CategoryGroup {
            category: "root".to_string(),
            slug: "faq".to_string(),
            title: "FAQ".to_string(),
            list: vec![],
        },
        CategoryGroup {
            category: "guides".to_string(),
            slug: "guides".to_string(),
            title: "Guides".to_string(),
            list: vec![
                LeafItem {
                    slug: "guides".to_string(),
                    title: "Overview".to_string(),
                    index: true,
                },
                LeafItem {
                    slug: "deploy".to_string(),
                    title: "Deploying a Site".to_string(),
                    index: false,
                },
            ],
        },
    ]
}

fn fixture_templates() -> Vec<Template> {
    vec![
        Template {
            id: "t1".to_string(),
            name: "Astro Minimal Blog".to_string(),
            description: "A minimal markdown blog".to_string(),
            slug: "astro-minimal-blog".to_string(),
            banner: "/images/astro-minimal-blog.png".to_string(),
            demo_url: None,
            framework: Framework {
                name: "Astro".to_string(),
                avatar: "/svg/astro.svg".to_string(),
            },
            category: Category {
                name: "Blog".to_string(),
            },
            repository: Some(Repository {
                owner: "acme-templates".to_string(),
                slug: "astro-minimal-blog".to_string(),
                html_url: "https://github.com/acme-templates/astro-minimal-blog".to_string(),
                contributors: vec![Contributor {
                    name: "jdoe".to_string(),
                    avatar_url: "https://avatars.example.com/jdoe.png".to_string(),
                }],
            }),
        },
        Template {
            id: "t2".to_string(),
            name: "Next.js Starter".to_string(),
            description: "Opinionated starter".to_string(),
            slug: "nextjs-starter".to_string(),
            banner: "/images/nextjs-starter.png".to_string(),
            demo_url: None,
            framework: Framework {
                name: "Next.js".to_string(),
                avatar: "/svg/nextjs.svg".to_string(),
            },
            category: Category {
                name: "Boilerplate".to_string(),
            },
            repository: None,
        },
    ]
}

fn test_config() -> SiteConfig {
    SiteConfig {
        support: SupportSettings {
            zendesk_email: "support@example.com".to_string(),
            zendesk_api_key: "secret".to_string(),
            // Unresolvable on purpose; forwarding must fail with a generic 500.
            zendesk_hostname: "docsite-test-invalid".to_string(),
            allow_origins: vec!["https://example.com".to_string()],
        },
        rate_limit: RateLimitConfig {
            enabled: true,
            max_requests: 5,
            window_secs: 3600,
        },
        ..SiteConfig::default()
    }
}

fn server() -> TestServer {
    let state = SiteState::from_parts(
        test_config(),
        fixture_tree(),
        fixture_templates(),
        SiteSettings {
            title: "Templates".to_string(),
            sub_title: "Jumpstart your next project".to_string(),
            description: "Browse templates".to_string(),
            cta_label: "Submit a template".to_string(),
            cta_target_url: "https://example.com".to_string(),
        },
    );
    TestServer::new(handlers::router(state)).unwrap()
}

fn real_ip(value: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-real-ip"),
        HeaderValue::from_static(value),
    )
}

#[tokio::test]
async fn health_reports_ok_with_uptime() {
    let server = server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "OK");
    assert!(body["uptime"].as_str().unwrap().contains("Seconds"));
}

#[tokio::test]
async fn docs_page_marks_active_item() {
    let server = server();

    let response = server.get("/docs/guides/deploy").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.text();
    assert!(body.contains("Deploying a Site"));
    assert!(body.contains("active-menu-item"));
    assert!(body.contains("menu-deploy"));
}

#[tokio::test]
async fn docs_root_is_home() {
    let server = server();

    let response = server.get("/docs").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Getting started"));
}

#[tokio::test]
async fn index_leaf_links_to_category_url() {
    let server = server();

    let body = server.get("/docs").await.text();
    assert!(body.contains(r#"href="/docs/guides""#));
    assert!(body.contains(r#"href="/docs/guides/deploy""#));
}

#[tokio::test]
async fn gallery_lists_all_templates_without_filters() {
    let server = server();

    let response = server.get("/templates").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.text();
    assert!(body.contains("Astro Minimal Blog"));
    assert!(body.contains("Next.js Starter"));
    assert!(body.contains("Jumpstart your next project"));
}

#[tokio::test]
async fn gallery_framework_filter_narrows_grid() {
    let server = server();

    let body = server
        .get("/templates")
        .add_query_param("framework", "Astro")
        .await
        .text();

    assert!(body.contains("Astro Minimal Blog"));
    assert!(!body.contains("Next.js Starter"));
}

#[tokio::test]
async fn gallery_search_matches_case_insensitively() {
    let server = server();

    let body = server
        .get("/templates")
        .add_query_param("q", "STARTER")
        .await
        .text();

    assert!(body.contains("Next.js Starter"));
    assert!(!body.contains("Astro Minimal Blog"));
}

#[tokio::test]
async fn gallery_htmx_request_gets_grid_partial() {
    let server = server();

    let response = server
        .get("/templates")
        .add_header(
            HeaderName::from_static("hx-request"),
            HeaderValue::from_static("true"),
        )
        .await;

    let body = response.text();
    assert!(body.contains("template-grid"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn template_detail_shows_attribution() {
    let server = server();

    let response = server.get("/templates/astro-minimal-blog").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.text();
    assert!(body.contains("Added by"));
    assert!(body.contains("jdoe"));
    assert!(body.contains("acme-templates"));
}

#[tokio::test]
async fn unknown_template_is_404() {
    let server = server();

    let response = server.get("/templates/does-not-exist").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ticket_with_short_comment_is_rejected_before_forwarding() {
    let server = server();

    let response = server
        .post("/api/ticket")
        .add_header(real_ip("10.0.0.1").0, real_ip("10.0.0.1").1)
        .form(&[
            ("email", "user@example.com"),
            ("subject", "Help"),
            ("comment", "too short"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn ticket_with_invalid_email_is_rejected() {
    let server = server();

    let response = server
        .post("/api/ticket")
        .add_header(real_ip("10.0.0.2").0, real_ip("10.0.0.2").1)
        .form(&[
            ("email", "not-an-email"),
            ("subject", "Help"),
            ("comment", "This comment is certainly longer than thirty characters."),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn sixth_ticket_request_in_window_is_rate_limited() {
    let server = server();
    let (name, value) = real_ip("10.0.0.3");

    for _ in 0..5 {
        let response = server
            .post("/api/ticket")
            .add_header(name.clone(), value.clone())
            .form(&[("email", "bad"), ("subject", "s"), ("comment", "short")])
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    let response = server
        .post("/api/ticket")
        .add_header(name, value)
        .form(&[("email", "bad"), ("subject", "s"), ("comment", "short")])
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn rate_limit_tracks_clients_independently() {
    let server = server();

    // A different client is unaffected by another client's exhausted window.
    let (name_a, value_a) = real_ip("10.0.0.4");
    for _ in 0..6 {
        server
            .post("/api/ticket")
            .add_header(name_a.clone(), value_a.clone())
            .form(&[("email", "bad"), ("subject", "s"), ("comment", "short")])
            .await;
    }

    let (name_b, value_b) = real_ip("10.0.0.5");
    let response = server
        .post("/api/ticket")
        .add_header(name_b, value_b)
        .form(&[("email", "bad"), ("subject", "s"), ("comment", "short")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn root_redirects_to_docs() {
    let server = server();

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.header("location"), "/docs");
}
