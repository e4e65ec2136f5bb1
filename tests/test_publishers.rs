mod common;

use common::serve_once;
use marketbrief::domain::error::PublishError;
use marketbrief::domain::ports::publisher::{PublishOutcome, Publisher};
use marketbrief::domain::values::publish_target::{ParentContainer, StructuredPageTarget};
use marketbrief::infrastructure::publishers::notion::{NotionPublisher, NOTION_VERSION};
use reqwest::Client;

fn page_target() -> StructuredPageTarget {
    StructuredPageTarget {
        parent: ParentContainer::Page {
            id: Some("page-1".into()),
        },
        token: Some("secret_abc".into()),
    }
}

#[tokio::test]
async fn test_notion_page_created() {
    let (base_url, request) =
        serve_once(200, r#"{"object":"page","url":"https://www.notion.so/abc"}"#).await;
    let publisher = NotionPublisher::new(page_target(), Some(base_url), Client::new());

    let outcome = publisher.publish("2026-10-19 市場サマリー", "本文").await.unwrap();

    assert_eq!(
        outcome,
        PublishOutcome::Published {
            location: Some("https://www.notion.so/abc".into())
        }
    );
    let request = request.await.unwrap();
    let lower = request.to_lowercase();
    assert!(request.starts_with("POST /v1/pages "));
    assert!(lower.contains(&format!("notion-version: {NOTION_VERSION}")));
    assert!(lower.contains("authorization: bearer secret_abc"));
    assert!(request.contains(r#""page_id":"page-1""#));
}

#[tokio::test]
async fn test_notion_unshared_parent() {
    let (base_url, _request) = serve_once(
        404,
        r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find page with ID: page-1."}"#,
    )
    .await;
    let publisher = NotionPublisher::new(page_target(), Some(base_url), Client::new());

    let err = publisher.publish("t", "b").await.unwrap_err();

    assert!(matches!(err, PublishError::NotShared(_)));
    assert!(err.hint().unwrap().contains("Connections"));
}
