mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;
use spotme_config::{AnyOrArray, CorsConfig};

const ENDPOINTS: [&str; 6] = [
    "check-safesearch",
    "create-upload-token",
    "generate-image",
    "generate-image-background",
    "generate-tts",
    "random-prompt",
];

fn header<'a>(resp: &'a reqwest::Response, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn preflight_succeeds_on_every_endpoint() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    for endpoint in ENDPOINTS {
        let resp = server
            .client()
            .request(reqwest::Method::OPTIONS, server.url(&format!("/api/{endpoint}")))
            .header("Origin", "https://spotme.app")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200, "{endpoint}");
        assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"), "{endpoint}");
        assert_eq!(header(&resp, "access-control-allow-methods"), Some("POST, OPTIONS"));
        assert_eq!(header(&resp, "access-control-allow-headers"), Some("Content-Type"));
        assert!(resp.text().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn wrong_method_is_rejected_with_cors_headers() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    for endpoint in &ENDPOINTS[..5] {
        let resp = server
            .client()
            .get(server.url(&format!("/api/{endpoint}")))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 405, "{endpoint}");
        assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
        assert_eq!(header(&resp, "content-type"), Some("application/json"));

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    for endpoint in ENDPOINTS {
        let resp = server
            .client()
            .post(server.url(&format!("/api/{endpoint}")))
            .header("Content-Type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400, "{endpoint}");
        assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Invalid JSON body", "{endpoint}");
    }
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let text = "a".repeat(1024 * 1024 + 1024);
    let resp = server
        .client()
        .post(server.url("/api/generate-tts"))
        .json(&serde_json::json!({ "text": text }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 413);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn unknown_path_is_json_not_found() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server.client().post(server.url("/api/does-not-exist")).send().await.unwrap();

    assert_eq!(resp.status(), 404);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn custom_base_path() {
    let server = TestServer::start(ConfigBuilder::new().with_base_path("/v2").build())
        .await
        .unwrap();

    let resp = server.client().post(server.url("/v2/random-prompt")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = server.client().post(server.url("/api/random-prompt")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn cors_echoes_listed_origin_only() {
    let config = ConfigBuilder::new()
        .with_cors(CorsConfig {
            origins: AnyOrArray::List(vec!["https://spotme.app".to_owned()]),
            max_age: Some(3600),
            ..CorsConfig::default()
        })
        .build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/random-prompt"))
        .header("Origin", "https://spotme.app")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "access-control-allow-origin"), Some("https://spotme.app"));
    assert_eq!(header(&resp, "access-control-max-age"), Some("3600"));
    assert_eq!(header(&resp, "vary"), Some("Origin"));

    let resp = server
        .client()
        .post(server.url("/api/random-prompt"))
        .header("Origin", "https://elsewhere.example")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}
