//! Shared harness for gateway end-to-end tests.
//!
//! Each test builds a real registry (tempdir-backed secret store), points
//! the real notifier at a wiremock downstream, and drives the router
//! directly with `tower::ServiceExt::oneshot`; no listening socket is needed.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use hmac::{Hmac, Mac};
use hook_relay_core::{DirectorySecretStore, Endpoint, Fingerprint, HookRegistry, SourceKind};
use hook_relay_gateway::notifier::HttpNotifier;
use hook_relay_gateway::{create_router, AppState};
use sha2::Sha512;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A gateway wired to one registered hook.
pub struct TestGateway {
    pub router: Router,
    pub fingerprint: Fingerprint,
    _secrets: TempDir,
}

/// Build a gateway with a single endpoint of the given kind, its secret
/// stored on disk, and the notifier pointed at `downstream_url`.
pub fn gateway_for(source: SourceKind, key: &[u8], downstream_url: &str) -> TestGateway {
    let secrets = TempDir::new().unwrap();
    std::fs::write(secrets.path().join("hook_key"), key).unwrap();

    let store = DirectorySecretStore::new(secrets.path());
    let mut registry = HookRegistry::new();
    let fingerprint = registry
        .register(Endpoint::new(source, "hook_key"), &store)
        .unwrap();

    let notifier = HttpNotifier::new(downstream_url, Duration::from_secs(5)).unwrap();
    let state = AppState::new(Arc::new(registry), Arc::new(notifier));

    TestGateway {
        router: create_router(state),
        fingerprint,
        _secrets: secrets,
    }
}

/// Downstream that requires exactly one notify call with this exact body.
pub async fn downstream_expecting(expected_body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v11/notify"))
        .and(body_string(expected_body.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status": "OK"}"#))
        .expect(1)
        .mount(&server)
        .await;
    server
}

/// Downstream that must not be called at all.
pub async fn downstream_expecting_nothing() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    server
}

/// POST a hook delivery through the router and return the response status.
pub async fn post_hook(
    router: &Router,
    fingerprint: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> StatusCode {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/hook/{fingerprint}"));
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::from(body.to_vec())).unwrap();

    router.clone().oneshot(request).await.unwrap().status()
}

/// `X-Hub-Signature` value for a body and key, as GitHub and Bitbucket
/// Server compute it.
pub fn x_hub_signature(key: &[u8], body: &[u8]) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).unwrap();
    mac.update(body);
    format!("sha512={}", hex::encode(mac.finalize().into_bytes()))
}
