//! End-to-end tests of the config bridge over a real socket.

use std::sync::Arc;

use config_bridge::backend::{initialize_backend_client, Environment, FirebaseConnector};
use config_bridge::loader::{ConfigLoadError, ConfigLoader, HttpConfigSource};
use serde_json::{json, Value};

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_bridge_serves_config_to_loader() {
    let (url, shutdown) = common::start_bridge(Environment::from_pairs([
        ("VITE_FIREBASE_API_KEY", "AIzaIntegration"),
        ("VITE_FIREBASE_PROJECT_ID", "spa-booking"),
        ("VITE_FIREBASE_STORAGE_BUCKET", "spa-booking.appspot.com"),
    ]))
    .await;

    let source = HttpConfigSource::with_client(client(), url.parse().unwrap());
    let loader = ConfigLoader::new(source);

    let config = loader.load().await.expect("bridge should serve config");
    assert_eq!(config.api_key, "AIzaIntegration");
    assert_eq!(config.project_id, "spa-booking");
    assert_eq!(config.storage_bucket.as_deref(), Some("spa-booking.appspot.com"));

    let backend = initialize_backend_client(&loader, &FirebaseConnector::default())
        .await
        .unwrap();
    assert!(Arc::ptr_eq(&backend.config, &config));

    shutdown.trigger();
}

#[tokio::test]
async fn test_bridge_without_env_fails_loader_with_500() {
    let (url, shutdown) = common::start_bridge(Environment::empty()).await;

    let loader = ConfigLoader::new(HttpConfigSource::with_client(client(), url.parse().unwrap()));
    let err = loader.load().await.unwrap_err();

    assert!(matches!(
        err,
        ConfigLoadError::Transport { status: Some(500), .. }
    ));
    assert!(loader.cached().is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn test_bridge_rejects_post() {
    let (url, shutdown) = common::start_bridge(Environment::from_pairs([
        ("FIREBASE_API_KEY", "AIzaIntegration"),
        ("FIREBASE_PROJECT_ID", "spa-booking"),
    ]))
    .await;

    let res = client()
        .post(&url)
        .body("anything at all")
        .send()
        .await
        .expect("bridge unreachable");

    assert_eq!(res.status(), 405);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "Method not allowed"}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_bridge_success_headers() {
    let (url, shutdown) = common::start_bridge(Environment::from_pairs([
        ("FIREBASE_API_KEY", "AIzaIntegration"),
        ("FIREBASE_PROJECT_ID", "spa-booking"),
    ]))
    .await;

    let res = client().get(&url).send().await.expect("bridge unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["cache-control"], "public, max-age=3600");
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert!(res.headers().contains_key("x-request-id"));

    shutdown.trigger();
}
