//! Integration tests for the live event stream.

mod helpers;

use std::time::Duration;

use http::StatusCode;
use serde_json::{Value, json};

use wordgrid_core::types::SessionId;

use helpers::Next;

const SHORT: Duration = Duration::from_secs(1);

async fn new_game(app: &helpers::TestApp) -> String {
    let game = app.create_game("").await;
    game["id"].as_str().unwrap().to_string()
}

#[tokio::test(start_paused = true)]
async fn test_subscribe_unknown_game() {
    let app = helpers::TestApp::new();

    let (status, _, _) = app.subscribe("fffffff").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.engine.stats().hubs, 0);
}

#[tokio::test(start_paused = true)]
async fn test_reveal_is_streamed() {
    let app = helpers::TestApp::new();
    let id = new_game(&app).await;

    let (status, content_type, mut stream) = app.subscribe(&id).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/event-stream"));

    app.open(&id, 5).await;

    let event = stream.next_within(SHORT).await.event();
    assert_eq!(event.id, Some(1));
    assert_eq!(event.event, "opened");
    assert_eq!(event.json(), json!([5]));
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_reveal_is_not_streamed() {
    let app = helpers::TestApp::new();
    let id = new_game(&app).await;
    let (_, _, mut stream) = app.subscribe(&id).await;

    app.open(&id, 5).await;
    app.open(&id, 5).await;
    app.open(&id, 8).await;

    let first = stream.next_within(SHORT).await.event();
    let second = stream.next_within(SHORT).await.event();
    assert_eq!((first.id, first.json()), (Some(1), json!([5])));
    assert_eq!((second.id, second.json()), (Some(2), json!([5, 8])));
    assert_eq!(stream.next_within(SHORT).await, Next::Timeout);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_reveal_is_not_streamed() {
    let app = helpers::TestApp::new();
    let id = new_game(&app).await;
    let (_, _, mut stream) = app.subscribe(&id).await;

    let response = app.open(&id, 99).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(stream.next_within(SHORT).await, Next::Timeout);
}

#[tokio::test(start_paused = true)]
async fn test_all_subscribers_see_same_order() {
    let app = helpers::TestApp::new();
    let id = new_game(&app).await;
    let (_, _, mut a) = app.subscribe(&id).await;
    let (_, _, mut b) = app.subscribe(&id).await;
    assert_eq!(app.engine.subscriber_count(&SessionId::from(id.as_str())), 2);

    for idx in [3, 1, 4, 0, 9] {
        app.open(&id, idx).await;
    }

    let mut seen: Vec<Vec<(Option<u64>, Value)>> = Vec::new();
    for stream in [&mut a, &mut b] {
        let mut events = Vec::new();
        for _ in 0..5 {
            let event = stream.next_within(SHORT).await.event();
            events.push((event.id, event.json()));
        }
        seen.push(events);
    }

    assert_eq!(seen[0], seen[1]);
    let ids: Vec<Option<u64>> = seen[0].iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, (1..=5).map(Some).collect::<Vec<_>>());
    assert_eq!(seen[0][4].1, json!([3, 1, 4, 0, 9]));
}

#[tokio::test(start_paused = true)]
async fn test_late_subscriber_starts_after_join() {
    let app = helpers::TestApp::new();
    let id = new_game(&app).await;
    let (_, _, mut early) = app.subscribe(&id).await;

    app.open(&id, 1).await;
    let (_, _, mut late) = app.subscribe(&id).await;
    app.open(&id, 2).await;

    assert_eq!(early.next_within(SHORT).await.event().id, Some(1));
    assert_eq!(early.next_within(SHORT).await.event().id, Some(2));

    let event = late.next_within(SHORT).await.event();
    assert_eq!(event.id, Some(2));
    assert_eq!(event.json(), json!([1, 2]));
}

#[tokio::test(start_paused = true)]
async fn test_keepalive_ping() {
    let app = helpers::TestApp::new();
    let id = new_game(&app).await;
    let (_, _, mut stream) = app.subscribe(&id).await;

    let event = stream.next_within(Duration::from_secs(25)).await.event();
    assert_eq!(event.event, "ping");
    assert_eq!(event.data, "null");
    assert_eq!(event.id, Some(1));

    app.open(&id, 0).await;
    let event = stream.next_within(SHORT).await.event();
    assert_eq!((event.event.as_str(), event.id), ("opened", Some(2)));
}

#[tokio::test(start_paused = true)]
async fn test_closing_stream_unsubscribes() {
    let app = helpers::TestApp::new();
    let id = new_game(&app).await;
    let session_id = SessionId::from(id.as_str());

    let (_, _, stream) = app.subscribe(&id).await;
    assert_eq!(app.engine.subscriber_count(&session_id), 1);

    drop(stream);
    assert_eq!(app.engine.subscriber_count(&session_id), 0);
    assert_eq!(app.engine.stats().active_hubs, 0);

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(app.engine.stats().events.keepalives_emitted, 0);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_ends_streams() {
    let app = helpers::TestApp::new();
    let id = new_game(&app).await;
    let (_, _, mut stream) = app.subscribe(&id).await;

    app.engine.shutdown();
    assert_eq!(stream.next_within(SHORT).await, Next::Ended);
}
