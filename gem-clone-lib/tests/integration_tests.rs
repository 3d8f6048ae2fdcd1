//! Integration tests for the registry lookup.
//!
//! A local mock registry stands in for RubyGems.org. The blocking HTTP client must not run on the
//! async runtime's threads, so each lookup happens inside `spawn_blocking`.

use gem_clone::{Error, PackageMetadata, Registry, RepositoryUrl};
use serde_json::json;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn registry_with(gem: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/gems/{gem}.json")))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

async fn fetch(base_url: String, gem: &'static str) -> Result<PackageMetadata, Error> {
    tokio::task::spawn_blocking(move || Registry::new(base_url)?.fetch(gem))
        .await
        .expect("lookup task panicked")
}

async fn repository_url(base_url: String, gem: &'static str) -> Result<RepositoryUrl, Error> {
    tokio::task::spawn_blocking(move || Registry::new(base_url)?.repository_url(gem))
        .await
        .expect("lookup task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_returns_metadata() {
    let server = registry_with(
        "rails",
        ResponseTemplate::new(200).set_body_json(json!({
            "name": "rails",
            "source_code_uri": "https://github.com/rails/rails/tree/v8.0.2",
            "homepage_uri": "https://rubyonrails.org",
        })),
    )
    .await;

    let metadata = fetch(server.uri(), "rails").await.expect("lookup failed");
    assert_eq!(
        metadata.source_code_uri(),
        Some("https://github.com/rails/rails/tree/v8.0.2")
    );
    assert_eq!(metadata.homepage_uri(), Some("https://rubyonrails.org"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gems/rack.json"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(fetch(server.uri(), "rack").await.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_missing_gem_is_lookup_failure() {
    let server = registry_with(
        "no-such-gem",
        ResponseTemplate::new(404).set_body_string("This rubygem could not be found."),
    )
    .await;

    let result = fetch(server.uri(), "no-such-gem").await;
    assert!(matches!(
        result,
        Err(Error::LookupFailed { package }) if package == "no-such-gem"
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_server_error_is_lookup_failure() {
    let server = registry_with("rails", ResponseTemplate::new(500)).await;
    let result = fetch(server.uri(), "rails").await;
    assert!(matches!(result, Err(Error::LookupFailed { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_malformed_json_is_lookup_failure() {
    let server = registry_with(
        "rails",
        ResponseTemplate::new(200).set_body_string("{ this is not json"),
    )
    .await;
    let result = fetch(server.uri(), "rails").await;
    assert!(matches!(result, Err(Error::LookupFailed { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_non_object_json_is_lookup_failure() {
    let server = registry_with(
        "rails",
        ResponseTemplate::new(200).set_body_json(json!(["rails"])),
    )
    .await;
    let result = fetch(server.uri(), "rails").await;
    assert!(matches!(result, Err(Error::LookupFailed { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_unreachable_registry_is_lookup_failure() {
    // Nothing listens on port 1.
    let result = fetch("http://127.0.0.1:1".to_string(), "rails").await;
    assert!(matches!(result, Err(Error::LookupFailed { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repository_url_is_normalized() {
    let server = registry_with(
        "rails",
        ResponseTemplate::new(200).set_body_json(json!({
            "source_code_uri": "https://github.com/rails/rails/tree/v8.0.2",
        })),
    )
    .await;

    let url = repository_url(server.uri(), "rails").await.unwrap();
    assert_eq!(url.as_str(), "https://github.com/rails/rails");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repository_url_from_homepage() {
    let server = registry_with(
        "sinatra",
        ResponseTemplate::new(200).set_body_json(json!({
            "source_code_uri": null,
            "homepage_uri": "https://github.com/sinatra/sinatra/",
        })),
    )
    .await;

    let url = repository_url(server.uri(), "sinatra").await.unwrap();
    assert_eq!(url.as_str(), "https://github.com/sinatra/sinatra");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repository_url_missing() {
    let server = registry_with(
        "pkg",
        ResponseTemplate::new(200).set_body_json(json!({
            "homepage_uri": "https://example.com/pkg",
        })),
    )
    .await;

    let result = repository_url(server.uri(), "pkg").await;
    assert!(matches!(
        result,
        Err(Error::NoRepositoryUrl { package }) if package == "pkg"
    ));
}
