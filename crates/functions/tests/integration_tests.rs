use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use folio_functions::{FunctionsClient, PageAnalysis, Priority};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_invoke_posts_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/hello"))
        .and(header("apikey", "fake-key"))
        .and(body_partial_json(json!({ "name": "folio" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "greeting": "hi folio" })))
        .mount(&mock_server)
        .await;

    let client = FunctionsClient::new(&mock_server.uri(), "fake-key", reqwest::Client::new());

    let result = client
        .invoke("hello", Some(json!({ "name": "folio" })), None)
        .await;

    assert!(result.is_ok(), "invoke failed: {:?}", result.err());
    assert_eq!(result.unwrap()["greeting"], "hi folio");
}

#[tokio::test]
async fn test_invoke_error_body_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/hello"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model unavailable"))
        .mount(&mock_server)
        .await;

    let client = FunctionsClient::new(&mock_server.uri(), "fake-key", reqwest::Client::new());

    let result = client
        .invoke("hello", Some(json!({})), None)
        .await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("model unavailable"));
}

#[tokio::test]
async fn test_seo_recommendations_contract() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/seo-recommendations"))
        .and(body_partial_json(json!({
            "url": "https://example.com/blog/first-post",
            "keyword": "rust portfolio"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "priority": "high",
                "category": "content",
                "recommendation": "Use the target keyword in the first paragraph",
                "impact": "Improves topical relevance"
            },
            {
                "priority": "low",
                "category": "images",
                "recommendation": "Add alt text to 3 images",
                "impact": "Accessibility and image search"
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = FunctionsClient::new(&mock_server.uri(), "fake-key", reqwest::Client::new());

    let analysis = PageAnalysis {
        word_count: 840,
        title: Some("First post".to_string()),
        h1_count: 1,
        images_missing_alt: 3,
        keyword_occurrences: 2,
        ..Default::default()
    };

    let result = client
        .seo_recommendations("https://example.com/blog/first-post", "rust portfolio", &analysis)
        .await;

    assert!(result.is_ok(), "seo call failed: {:?}", result.err());
    let recommendations = result.unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0].priority, Priority::High);
    assert_eq!(recommendations[1].category, "images");
}

#[tokio::test]
async fn test_remove_background_decodes_cutout() {
    let mock_server = MockServer::start().await;

    // 2x1 RGBA image: one opaque red pixel, one transparent pixel.
    let rgba: Vec<u8> = vec![255, 0, 0, 255, 0, 0, 0, 0];

    Mock::given(method("POST"))
        .and(path("/functions/v1/remove-background"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "width": 2,
            "height": 1,
            "rgba": BASE64.encode(&rgba)
        })))
        .mount(&mock_server)
        .await;

    let client = FunctionsClient::new(&mock_server.uri(), "fake-key", reqwest::Client::new());

    let result = client.remove_background(b"fake-image-bytes").await;

    assert!(result.is_ok(), "remove_background failed: {:?}", result.err());
    let cutout = result.unwrap();
    assert_eq!((cutout.width, cutout.height), (2, 1));
    assert_eq!(cutout.rgba, rgba);
}

#[tokio::test]
async fn test_remove_background_rejects_truncated_cutout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/remove-background"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "width": 4,
            "height": 4,
            "rgba": BASE64.encode([0u8; 8])
        })))
        .mount(&mock_server)
        .await;

    let client = FunctionsClient::new(&mock_server.uri(), "fake-key", reqwest::Client::new());

    let result = client.remove_background(b"fake-image-bytes").await;

    assert!(result.is_err());
}
