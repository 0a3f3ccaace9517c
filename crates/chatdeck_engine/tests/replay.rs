use std::fs;

use chatdeck_engine::{FeedConnector, FeedError, FeedItem, ReplayConnector};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[tokio::test]
async fn replays_each_line_as_a_batch() {
    let temp = TempDir::new().unwrap();
    let lines = concat!(
        r#"[{"timestamp_usec": 1000000, "author": "a1", "message": "m1"}]"#,
        "\n\n",
        r#"[{"timestamp_usec": 2000000, "author": "a2", "message": "m2"}, {"timestamp_usec": 3000000, "author": "a3", "message": "m3"}]"#,
        "\n",
    );
    fs::write(temp.path().join("abc123.jsonl"), lines).unwrap();

    let connector = ReplayConnector::new(temp.path());
    let mut feed = connector.connect("abc123").await.unwrap();

    assert!(feed.is_alive());
    assert_eq!(
        feed.next_batch().await.unwrap(),
        vec![FeedItem::new(1_000_000, "a1", "m1")]
    );
    assert!(feed.is_alive());
    assert_eq!(feed.next_batch().await.unwrap().len(), 2);
    assert!(!feed.is_alive());
    assert!(feed.next_batch().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_recording_is_not_found() {
    let temp = TempDir::new().unwrap();
    let connector = ReplayConnector::new(temp.path());

    let err = connector.connect("missing").await.err().unwrap();
    assert_eq!(err, FeedError::NotFound("missing".to_string()));
}

#[tokio::test]
async fn path_like_ids_are_refused() {
    let temp = TempDir::new().unwrap();
    let connector = ReplayConnector::new(temp.path());

    for id in ["../escape", "a/b", ".."] {
        let err = connector.connect(id).await.err().unwrap();
        assert_eq!(err, FeedError::NotFound(id.to_string()));
    }
}

#[tokio::test]
async fn malformed_line_reports_its_number() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.jsonl"), "[]\n{oops\n").unwrap();

    let connector = ReplayConnector::new(temp.path());
    let err = connector.connect("bad").await.err().unwrap();

    match err {
        FeedError::Decode(text) => assert!(text.starts_with("line 2:"), "{text}"),
        other => panic!("unexpected error {other:?}"),
    }
}
