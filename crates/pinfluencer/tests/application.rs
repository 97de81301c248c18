//! The facade wired over in-memory collaborators.

use http::StatusCode;
use pinfluencer::prelude::*;
use pinfluencer_test::{EventBuilder, InMemoryBackend, TestResponse};
use serde_json::json;

const CDN: &str = "https://cdn.example.com";

fn collaborators(backend: &InMemoryBackend) -> Collaborators {
    Collaborators {
        brands: backend.brands.clone(),
        influencers: backend.influencers.clone(),
        campaigns: backend.campaigns.clone(),
        notifications: backend.notifications.clone(),
        audience_ages: backend.audience_ages.clone(),
        audience_genders: backend.audience_genders.clone(),
        images: backend.images.clone(),
        auth_users: backend.auth_users.clone(),
        data_manager: backend.data_manager.clone(),
    }
}

fn application(backend: &InMemoryBackend) -> Application {
    let loader = ConfigLoader::new()
        .with_string(
            &format!("[images]\nbucket_url = \"{CDN}\"\n\n[logging]\nlevel = \"off\"\n"),
            "toml",
        )
        .unwrap();
    Application::from_loader(loader, &collaborators(backend)).unwrap()
}

#[test]
fn test_configured_bucket_url_prefixes_images() {
    let backend = InMemoryBackend::new();
    let app = application(&backend);
    assert_eq!(app.config().images.bucket_url, CDN);

    TestResponse::new(
        app.handle(
            EventBuilder::new("POST /influencers/me")
                .username("grace")
                .json(&json!({
                    "firstName": "grace",
                    "lastName": "hopper",
                    "email": "grace@example.com",
                    "website": "https://grace.example.com",
                    "bio": "compilers",
                    "address": "arlington",
                    "instaHandle": "@grace",
                    "values": ["value3"],
                    "categories": ["category1"]
                }))
                .build(),
        ),
    )
    .assert_status(StatusCode::CREATED);

    let response = TestResponse::new(
        app.handle(
            EventBuilder::new("POST /influencers/me/images/{image_field}")
                .username("grace")
                .path("image_field", "image")
                .json(&json!({"imageBytes": "aGVsbG8="}))
                .build(),
        ),
    );

    response.assert_status(StatusCode::OK);
    let image = response.json().unwrap()["image"].as_str().unwrap().to_string();
    assert!(image.starts_with(&format!("{CDN}/influencers/grace/")));
}

#[test]
fn test_raw_gateway_event() {
    let backend = InMemoryBackend::new();
    let app = application(&backend);

    let raw = json!({
        "routeKey": "GET /influencers/me",
        "requestContext": {"authorizer": {"jwt": {"claims": {"username": "nobody"}}}}
    })
    .to_string();

    TestResponse::new(app.handle_json(&raw)).assert_status(StatusCode::NOT_FOUND);
    assert_eq!(backend.data_manager.cleanups(), 1);
}

#[test]
fn test_unknown_route_through_facade() {
    let backend = InMemoryBackend::new();
    let app = application(&backend);

    TestResponse::new(app.handle(ApiGatewayEvent::new("PUT /brands/me")))
        .assert_message(StatusCode::NOT_FOUND, "route: PUT /brands/me not found");
}

#[test]
fn test_invalid_level_rejected() {
    let backend = InMemoryBackend::new();
    let loader = ConfigLoader::new()
        .with_string("[logging]\nlevel = \"pinfluencer=loud\"\n", "toml")
        .unwrap();

    let result = Application::from_loader(loader, &collaborators(&backend));
    assert!(matches!(result, Err(ApplicationError::Config(_))));
}
