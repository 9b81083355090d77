//! HTTP-level tests for the reqwest transport, against a wiremock server.

use std::time::Duration;

use issue_sync::{Credential, GitHubClient, Method, Transport, TransportError};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, credential: Credential) -> GitHubClient {
    GitHubClient::new(
        credential,
        Url::parse(&server.uri()).unwrap(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn attaches_auth_and_media_type_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/vnd.github+json"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, Credential::token("test-token"));
    let response = client.send(Method::Get, "user", None).await.unwrap();
    assert_eq!(response["login"], json!("octocat"));
}

#[tokio::test]
async fn credential_resolver_is_consulted_per_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer minted-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server, Credential::from_fn(|| "minted-token".to_string()));
    client.send(Method::Get, "user", None).await.unwrap();
    client.send(Method::Get, "user", None).await.unwrap();
}

#[tokio::test]
async fn serializes_body_on_post() {
    let server = MockServer::start().await;
    let payload = json!({"title": "Ship widgets", "labels": ["release"]});
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"number": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, Credential::token("t"));
    let response = client
        .send(Method::Post, "repos/acme/widgets/issues", Some(&payload))
        .await
        .unwrap();
    assert_eq!(response["number"], json!(42));
}

#[tokio::test]
async fn error_status_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"message": "Validation Failed", "errors": []})),
        )
        .mount(&server)
        .await;

    let client = client(&server, Credential::token("t"));
    let err = client
        .send(Method::Post, "repos/acme/widgets/issues", Some(&json!({})))
        .await
        .unwrap_err();

    match err {
        TransportError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Validation Failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn error_without_message_field_yields_empty_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server, Credential::token("t"));
    let err = client.send(Method::Get, "user", None).await.unwrap_err();

    match err {
        TransportError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn get_requests_carry_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(wiremock::matchers::body_string(String::new()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, Credential::token("t"));
    client.send(Method::Get, "user", None).await.unwrap();
}

#[tokio::test]
async fn base_url_with_path_prefix_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/api/v3", server.uri())).unwrap();
    let client = GitHubClient::new(Credential::token("t"), base, Duration::from_secs(5)).unwrap();
    client.send(Method::Get, "user", None).await.unwrap();
}
