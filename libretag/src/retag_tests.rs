use super::*;
use crate::error::RetagError;
use crate::resolver::resolve;
use mockito::Matcher;

const HEX: &str = "00000000aaaaaaaa11111111bbbbbbbb22222222cccccccc33333333dddddddd";
const MANIFEST: &str = r#"{"schemaVersion":2,"layers":[]}"#;

fn retagger_for(server: &mockito::Server) -> Retagger {
    let url = server.url();
    let client = Client::new(&url, &format!("{}/token", url), "registry.docker.io").unwrap();
    Retagger::new(client)
}

fn creds() -> Credentials {
    Credentials::basic("user", "pass")
}

async fn mock_token(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("GET", "/token")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"token":"t0k3n"}"#)
        .create_async()
        .await
}

#[tokio::test]
async fn test_retag_copies_manifest_to_target() {
    let mut server = mockito::Server::new_async().await;
    let token = mock_token(&mut server).await;
    let pull = server
        .mock("GET", "/v2/org/example/manifests/1.2.3")
        .match_header("authorization", "Bearer t0k3n")
        .with_status(200)
        .with_body(MANIFEST)
        .create_async()
        .await;
    let push = server
        .mock("PUT", "/v2/org/example/manifests/4.5.6")
        .match_header("authorization", "Bearer t0k3n")
        .match_body(MANIFEST)
        .with_status(201)
        .create_async()
        .await;

    let op = resolve(&["org/example:1.2.3", ":4.5.6"]).unwrap();
    let retagged = retagger_for(&server).retag(&op, &creds()).await.unwrap();

    token.assert_async().await;
    pull.assert_async().await;
    push.assert_async().await;

    assert_eq!(retagged.digest, Digest::of_bytes(MANIFEST.as_bytes()));
    assert_eq!(
        retagged.to_string(),
        "Retagged org/example:1.2.3 as org/example:4.5.6"
    );
}

#[tokio::test]
async fn test_retag_from_digest_uses_at_separator() {
    let mut server = mockito::Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let path = format!("/v2/org/example/manifests/sha256:{}", HEX);
    let _pull = server
        .mock("GET", path.as_str())
        .with_status(200)
        .with_body(MANIFEST)
        .create_async()
        .await;
    let _push = server
        .mock("PUT", "/v2/org/example/manifests/stable")
        .with_status(201)
        .create_async()
        .await;

    let combined = format!("org/example@{}", HEX);
    let op = resolve(&[combined.as_str(), "stable"]).unwrap();
    let retagged = retagger_for(&server).retag(&op, &creds()).await.unwrap();

    assert_eq!(
        retagged.to_string(),
        format!("Retagged org/example@sha256:{} as org/example:stable", HEX)
    );
}

#[tokio::test]
async fn test_retag_stops_after_failed_authentication() {
    let mut server = mockito::Server::new_async().await;
    let _token = server
        .mock("GET", "/token")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;
    let pull = server
        .mock("GET", Matcher::Regex("^/v2/".to_string()))
        .expect(0)
        .create_async()
        .await;

    let op = resolve(&["org/example", "1.2.3", "4.5.6"]).unwrap();
    let err = retagger_for(&server).retag(&op, &creds()).await.unwrap_err();

    pull.assert_async().await;
    assert!(matches!(err, RetagError::AuthenticationFailed { .. }));
}

#[tokio::test]
async fn test_retag_stops_after_failed_fetch() {
    let mut server = mockito::Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _pull = server
        .mock("GET", "/v2/org/example/manifests/1.2.3")
        .with_status(404)
        .create_async()
        .await;
    let push = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let op = resolve(&["org/example", "1.2.3", "4.5.6"]).unwrap();
    let err = retagger_for(&server).retag(&op, &creds()).await.unwrap_err();

    push.assert_async().await;
    assert_eq!(err.to_string(), "failed to pull manifest: 404 Not Found");
}

#[tokio::test]
async fn test_retag_reports_failed_publish() {
    let mut server = mockito::Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _pull = server
        .mock("GET", "/v2/library/example/manifests/latest")
        .with_status(200)
        .with_body(MANIFEST)
        .create_async()
        .await;
    let _push = server
        .mock("PUT", "/v2/library/example/manifests/next")
        .with_status(400)
        .create_async()
        .await;

    let op = resolve(&["example", "next"]).unwrap();
    let err = retagger_for(&server).retag(&op, &creds()).await.unwrap_err();

    assert!(matches!(err, RetagError::ManifestPublishFailed { .. }));
    assert_eq!(err.to_string(), "failed to push manifest: 400 Bad Request");
}

#[test]
fn test_retagger_from_default_config() {
    let retagger = Retagger::from_config(&Config::default()).unwrap();
    assert_eq!(retagger.client().registry_url(), "https://index.docker.io");
}

#[test]
fn test_retagged_serializes_canonical_strings() {
    let op = resolve(&["org/example", "1.2.3", "4.5.6"]).unwrap();
    let retagged = Retagged {
        name: op.name,
        source: op.source,
        target: op.target,
        digest: Digest::of_bytes(b""),
    };

    let json = serde_json::to_value(&retagged).unwrap();
    assert_eq!(json["name"], "org/example");
    assert_eq!(json["source"], "1.2.3");
    assert_eq!(json["target"], "4.5.6");
    assert_eq!(
        json["digest"],
        "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
