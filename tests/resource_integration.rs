//! End-to-end tests for the generic resource controller against a mocked
//! table service.

use std::time::Duration;

use folio::prelude::*;
use folio::resource::{BlogPost, Product};
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn post_row(id: &str, title: &str, slug: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": slug,
        "content": "body",
        "published": false,
        "created_at": "2024-05-01T10:00:00Z"
    })
}

#[tokio::test]
async fn list_populates_the_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_row("b2", "Second", "second"),
            post_row("b1", "First", "first"),
        ])))
        .mount(&mock_server)
        .await;

    let folio = Folio::new(&mock_server.uri(), "anon-key");
    let controller = folio.controller::<BlogPost>();

    let rows = controller.list().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].slug, "second");
    assert_eq!(controller.rows().len(), 2);
}

#[tokio::test]
async fn list_failure_keeps_previous_rows_and_notifies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_row("b1", "First", "first"),
        ])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("storage down"))
        .mount(&mock_server)
        .await;

    let folio = Folio::new(&mock_server.uri(), "anon-key");
    let notifier = folio.notifier();
    let controller = folio.controller::<BlogPost>();

    controller.list().await.unwrap();
    assert_eq!(controller.rows().len(), 1);

    let result = controller.list().await;

    assert!(result.is_err());
    assert_eq!(controller.rows().len(), 1);
    let notices = notifier.drain();
    assert!(notices
        .iter()
        .any(|n| n.level == NoticeLevel::Error && n.message.contains("blog_posts")));
}

#[tokio::test]
async fn create_derives_slug_and_refreshes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/blog_posts"))
        .and(body_partial_json(json!({
            "title": "My First Post!",
            "slug": "my-first-post"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([post_row("b1", "My First Post!", "my-first-post")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_row("b1", "My First Post!", "my-first-post"),
        ])))
        .mount(&mock_server)
        .await;

    let folio = Folio::new(&mock_server.uri(), "anon-key");
    let notifier = folio.notifier();
    let controller = folio.controller::<BlogPost>();

    let stored = controller
        .create(fields(&[
            ("title", json!("My First Post!")),
            ("content", json!("body")),
        ]))
        .await
        .unwrap();

    assert_eq!(stored[0]["slug"], "my-first-post");
    assert_eq!(controller.rows().len(), 1);
    assert!(notifier
        .drain()
        .iter()
        .any(|n| n.level == NoticeLevel::Success));
}

#[tokio::test]
async fn create_with_missing_required_field_never_hits_the_network() {
    let mock_server = MockServer::start().await;
    // No mocks mounted: any request would 404 and the asserts below would
    // see a Table error instead of a Validation error.

    let folio = Folio::new(&mock_server.uri(), "anon-key");
    let notifier = folio.notifier();
    let controller = folio.controller::<BlogPost>();

    let result = controller
        .create(fields(&[("title", json!("   "))]))
        .await;

    match result {
        Err(Error::Validation(message)) => assert!(message.contains("title")),
        other => panic!("expected validation error, got {:?}", other.err()),
    }

    let notices = notifier.drain();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].blocking);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn update_keeps_slug_when_policy_is_on_create() {
    let mock_server = MockServer::start().await;

    // The patch body must carry the new title but no recomputed slug.
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/blog_posts"))
        .and(query_param("id", "eq.b1"))
        .and(body_partial_json(json!({ "title": "Renamed Post" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([post_row("b1", "Renamed Post", "my-first-post")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_row("b1", "Renamed Post", "my-first-post"),
        ])))
        .mount(&mock_server)
        .await;

    let folio = Folio::new(&mock_server.uri(), "anon-key");
    let controller = folio.controller::<BlogPost>();

    controller
        .update(
            "b1",
            fields(&[
                ("title", json!("Renamed Post")),
                ("content", json!("body")),
            ]),
        )
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let patch = requests
        .iter()
        .find(|r| r.method.to_string() == "PATCH")
        .expect("patch request");
    let body: Value = serde_json::from_slice(&patch.body).unwrap();
    assert!(body.get("slug").is_none(), "slug must not be recomputed");
}

#[tokio::test]
async fn update_recomputes_slug_when_policy_is_on_every_write() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.p1"))
        .and(body_partial_json(json!({
            "title": "Sticker Pack v2",
            "slug": "sticker-pack-v2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p1",
            "title": "Sticker Pack v2",
            "slug": "sticker-pack-v2"
        }])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p1",
            "title": "Sticker Pack v2",
            "slug": "sticker-pack-v2"
        }])))
        .mount(&mock_server)
        .await;

    let folio = Folio::new(&mock_server.uri(), "anon-key");
    let controller = folio.controller::<Product>();

    let stored = controller
        .update("p1", fields(&[("title", json!("Sticker Pack v2"))]))
        .await
        .unwrap();

    assert_eq!(stored[0]["slug"], "sticker-pack-v2");
}

#[tokio::test]
async fn delete_refreshes_the_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/blog_posts"))
        .and(query_param("id", "eq.b1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let folio = Folio::new(&mock_server.uri(), "anon-key");
    let controller = folio.controller::<BlogPost>();

    controller.delete("b1").await.unwrap();

    assert!(controller.rows().is_empty());
}

#[tokio::test]
async fn duplicate_slug_candidates_are_not_guarded_client_side() {
    // The store in front of this test accepts duplicate slugs; the client
    // performs no pre-check, so two records end up sharing one slug.
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/blog_posts"))
        .and(body_partial_json(json!({ "slug": "launch-week" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            post_row("b1", "Launch Week", "launch-week"),
        ])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/blog_posts"))
        .and(body_partial_json(json!({ "slug": "launch-week" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            post_row("b2", "Launch week?", "launch-week"),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_row("b2", "Launch week?", "launch-week"),
            post_row("b1", "Launch Week", "launch-week"),
        ])))
        .mount(&mock_server)
        .await;

    let folio = Folio::new(&mock_server.uri(), "anon-key");
    let controller = folio.controller::<BlogPost>();

    controller
        .create(fields(&[
            ("title", json!("Launch Week")),
            ("content", json!("a")),
        ]))
        .await
        .unwrap();
    controller
        .create(fields(&[
            ("title", json!("Launch week?")),
            ("content", json!("b")),
        ]))
        .await
        .unwrap();

    let rows = controller.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].slug, rows[1].slug);
    assert_ne!(rows[0].id, rows[1].id);
}

#[tokio::test]
async fn stale_list_response_cannot_overwrite_newer_state() {
    let mock_server = MockServer::start().await;

    // The first request hangs for a while and answers with stale rows; the
    // second answers immediately with fresh rows.
    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([post_row("b1", "Stale", "stale")]))
                .set_delay(Duration::from_millis(400)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_row("b2", "Fresh", "fresh"),
            post_row("b1", "Stale", "stale"),
        ])))
        .mount(&mock_server)
        .await;

    let folio = Folio::new(&mock_server.uri(), "anon-key");
    let controller = folio.controller::<BlogPost>();

    let slow = controller.list();
    let fast = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.list().await
    };

    let (slow_result, fast_result) = tokio::join!(slow, fast);

    assert_eq!(slow_result.unwrap().len(), 1);
    assert_eq!(fast_result.unwrap().len(), 2);
    // The slow response resolved last but must not win the cache.
    assert_eq!(controller.rows().len(), 2);
}
