//! Integration tests for game creation, lookup, and reveals.

mod helpers;

use std::collections::HashSet;

use http::StatusCode;
use serde_json::{Value, json};

fn team_sizes(game: &Value) -> Vec<usize> {
    let mut sizes: Vec<usize> = game["teamWords"]
        .as_array()
        .unwrap()
        .iter()
        .map(|team| team.as_array().unwrap().len())
        .collect();
    sizes.sort_unstable();
    sizes
}

fn indices(value: &Value) -> Vec<u64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_game_defaults() {
    let app = helpers::TestApp::new();
    let game = app.create_game("").await;

    let id = game["id"].as_str().unwrap();
    assert_eq!(id.len(), 7);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

    let words = game["words"].as_array().unwrap();
    assert_eq!(words.len(), 25);
    let unique: HashSet<_> = words.iter().map(|w| w.as_str().unwrap()).collect();
    assert_eq!(unique.len(), 25);

    assert_eq!(team_sizes(&game), vec![8, 9]);
    assert_eq!(game["opened"], json!([]));

    let fail = game["fail"].as_u64().unwrap();
    assert!(fail < 25);
    let mut seen = HashSet::new();
    for team in game["teamWords"].as_array().unwrap() {
        for idx in indices(team) {
            assert!(idx < 25);
            assert_ne!(idx, fail);
            assert!(seen.insert(idx));
        }
    }
}

#[tokio::test]
async fn test_create_game_with_shape() {
    let app = helpers::TestApp::new();

    let game = app.create_game("?wordCount=30&teamCount=3").await;
    assert_eq!(game["words"].as_array().unwrap().len(), 30);
    assert_eq!(team_sizes(&game).len(), 3);

    let game = app.create_game("?size=40&teams=2").await;
    assert_eq!(game["words"].as_array().unwrap().len(), 40);
    assert_eq!(team_sizes(&game), vec![13, 14]);
}

#[tokio::test]
async fn test_create_game_bad_input_falls_back() {
    let app = helpers::TestApp::new();

    for query in ["?wordCount=100&teamCount=9", "?size=abc&teams=", "?wordCount=-3", "?size=24"] {
        let game = app.create_game(query).await;
        assert_eq!(game["words"].as_array().unwrap().len(), 25, "{query}");
        assert_eq!(team_sizes(&game).len(), 2, "{query}");
    }
}

#[tokio::test]
async fn test_get_game() {
    let app = helpers::TestApp::new();
    let game = app.create_game("").await;
    let id = game["id"].as_str().unwrap();

    let response = app.request("GET", &format!("/api/game/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, game);
}

#[tokio::test]
async fn test_get_unknown_game() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/game/fffffff", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert!(response.body["message"].as_str().unwrap().contains("fffffff"));
}

#[tokio::test]
async fn test_open_words() {
    let app = helpers::TestApp::new();
    let game = app.create_game("").await;
    let id = game["id"].as_str().unwrap();

    let response = app.open(id, 5).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "opened": [5] }));

    let response = app.open(id, 5).await;
    assert_eq!(response.body, json!({ "opened": [5] }));

    let response = app.open(id, 2).await;
    assert_eq!(response.body, json!({ "opened": [5, 2] }));

    let response = app.request("GET", &format!("/api/game/{id}"), None).await;
    assert_eq!(response.body["opened"], json!([5, 2]));
}

#[tokio::test]
async fn test_open_out_of_range() {
    let app = helpers::TestApp::new();
    let game = app.create_game("").await;
    let id = game["id"].as_str().unwrap();

    for idx in [25, -1] {
        let response = app.open(id, idx).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "idx {idx}");
        assert_eq!(response.body["error"], "INVALID_ARGUMENT");
    }

    let response = app.request("GET", &format!("/api/game/{id}"), None).await;
    assert_eq!(response.body["opened"], json!([]));
}

#[tokio::test]
async fn test_open_malformed_body() {
    let app = helpers::TestApp::new();
    let game = app.create_game("").await;
    let id = game["id"].as_str().unwrap();

    let response = app
        .request_raw("POST", &format!("/api/game/{id}/open"), "{\"index\": 3}".to_string())
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_open_unknown_game() {
    let app = helpers::TestApp::new();

    let response = app.open("0000000", 1).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.open("0000000", -1).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_games_are_independent() {
    let app = helpers::TestApp::new();
    let a = app.create_game("").await;
    let b = app.create_game("").await;
    assert_ne!(a["id"], b["id"]);

    app.open(a["id"].as_str().unwrap(), 3).await;

    let response = app
        .request("GET", &format!("/api/game/{}", b["id"].as_str().unwrap()), None)
        .await;
    assert_eq!(response.body["opened"], json!([]));
}

#[tokio::test]
async fn test_health_check() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_detailed_health_check() {
    let app = helpers::TestApp::new();
    app.create_game("").await;
    app.create_game("").await;

    let response = app.request("GET", "/api/health/detailed", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["engine"]["sessions"], 2);
    assert_eq!(response.body["data"]["engine"]["active_hubs"], 0);
}
