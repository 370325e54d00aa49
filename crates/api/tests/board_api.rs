//! HTTP-level integration tests for the `/boards` endpoints.
//!
//! Every mutation is persisted; several tests reopen the board file to
//! check that what the API answered is what landed on disk.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, patch_json, post_json, TestApp};
use scrumboard_core::board::store::BoardStore;
use serde_json::{json, Value};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Percent-encode the spaces in a path segment.
fn seg(name: &str) -> String {
    name.replace(' ', "%20")
}

async fn seed_board(test: &TestApp, board: &str, lists: &[&str]) {
    let response = post_json(test.app(), "/boards", json!({ "name": board })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    for list in lists {
        let response = post_json(
            test.app(),
            &format!("/boards/{}/lists", seg(board)),
            json!({ "name": list }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

async fn add_card(test: &TestApp, board: &str, list: &str, body: Value) -> Value {
    let response = post_json(
        test.app(),
        &format!("/boards/{}/lists/{}/cards", seg(board), seg(list)),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn reopened(test: &TestApp) -> BoardStore {
    BoardStore::open(test.boards.path()).await.unwrap()
}

fn card_titles(board: &Value, list: &str) -> Vec<String> {
    board["lists"][list]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Boards and lists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn boards_and_lists_keep_insertion_order(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint 2", &["To Do", "In Progress", "Done"]).await;
    seed_board(&test, "Backlog", &[]).await;

    let index = body_json(get(test.app(), "/boards").await).await;
    assert_eq!(
        index,
        json!([
            { "name": "Sprint 2", "lists": ["To Do", "In Progress", "Done"], "cards": 0 },
            { "name": "Backlog", "lists": [], "cards": 0 }
        ])
    );

    let board = body_json(get(test.app(), "/boards/Sprint%202").await).await;
    assert_eq!(board["name"], "Sprint 2");
    let lists: Vec<&String> = board["lists"].as_object().unwrap().keys().collect();
    assert_eq!(lists, ["To Do", "In Progress", "Done"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_board_or_list_is_409(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint", &["To Do"]).await;

    let response = post_json(test.app(), "/boards", json!({ "name": " Sprint " })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(test.app(), "/boards/Sprint/lists", json!({ "name": "To Do" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_board_name_is_rejected(pool: SqlitePool) {
    let test = build_test_app(pool).await;

    let response = post_json(test.app(), "/boards", json!({ "name": "  " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_board_is_404(pool: SqlitePool) {
    let test = build_test_app(pool).await;

    assert_eq!(get(test.app(), "/boards/nope").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete(test.app(), "/boards/nope").await.status(), StatusCode::NOT_FOUND);

    let response = post_json(test.app(), "/boards/nope/lists", json!({ "name": "A" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_board_removes_it_from_disk(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Viejo", &["To Do"]).await;
    add_card(&test, "Viejo", "To Do", json!({ "title": "Tarea" })).await;

    let response = delete(test.app(), "/boards/Viejo").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let store = reopened(&test).await;
    assert!(store.read(|doc| doc.boards.is_empty()).await);
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn add_card_with_details_and_persist(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint", &["To Do"]).await;

    let card = add_card(
        &test,
        "Sprint",
        "To Do",
        json!({
            "title": "Login",
            "description": "OAuth",
            "due_date": "2025-07-01",
            "labels": [" backend ", "", "backend", "urgente"]
        }),
    )
    .await;

    assert_eq!(card["title"], "Login");
    assert_eq!(card["description"], "OAuth");
    assert_eq!(card["due_date"], "2025-07-01");
    assert_eq!(card["labels"], json!(["backend", "urgente"]));
    assert_eq!(card["checklist"], json!([]));
    assert_eq!(card["comments"], json!([]));

    let id: uuid::Uuid = card["id"].as_str().unwrap().parse().unwrap();
    let store = reopened(&test).await;
    let (list, title) = store
        .read(|doc| {
            doc.find_card("Sprint", id)
                .map(|(list, c)| (list.to_string(), c.title.clone()))
        })
        .await
        .unwrap();
    assert_eq!(list, "To Do");
    assert_eq!(title, "Login");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_card_creates_missing_list(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint", &[]).await;

    add_card(&test, "Sprint", "Ideas", json!({ "title": "Dark mode" })).await;

    let board = body_json(get(test.app(), "/boards/Sprint").await).await;
    assert_eq!(card_titles(&board, "Ideas"), ["Dark mode"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_card_title_is_rejected_and_nothing_is_written(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint", &["To Do"]).await;

    let response = post_json(
        test.app(),
        "/boards/Sprint/lists/To%20Do/cards",
        json!({ "title": " " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let store = reopened(&test).await;
    assert_eq!(store.read(|doc| doc.card_count()).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_card_updates_only_supplied_fields(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint", &["To Do"]).await;
    let card = add_card(
        &test,
        "Sprint",
        "To Do",
        json!({ "title": "Login", "due_date": "2025-07-01" }),
    )
    .await;
    let id = card["id"].as_str().unwrap();

    let response = patch_json(
        test.app(),
        &format!("/boards/Sprint/cards/{id}"),
        json!({
            "checklist": [{ "text": "Diseño", "done": true }, { "text": "Tests" }],
            "comments": ["Revisar con QA"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Login");
    assert_eq!(updated["due_date"], "2025-07-01");
    assert_eq!(
        updated["checklist"],
        json!([{ "text": "Diseño", "done": true }, { "text": "Tests", "done": false }])
    );
    assert_eq!(updated["comments"], json!(["Revisar con QA"]));

    // An explicit null clears the due date.
    let response = patch_json(
        test.app(),
        &format!("/boards/Sprint/cards/{id}"),
        json!({ "due_date": null }),
    )
    .await;
    assert_eq!(body_json(response).await["due_date"], Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn move_card_between_lists(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint", &["To Do", "Done"]).await;
    add_card(&test, "Sprint", "Done", json!({ "title": "Setup" })).await;
    let card = add_card(&test, "Sprint", "To Do", json!({ "title": "Login" })).await;
    let id = card["id"].as_str().unwrap();

    let response = post_json(
        test.app(),
        &format!("/boards/Sprint/cards/{id}/move"),
        json!({ "to_list": "Done" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, card);

    let board = body_json(get(test.app(), "/boards/Sprint").await).await;
    assert!(card_titles(&board, "To Do").is_empty());
    assert_eq!(card_titles(&board, "Done"), ["Setup", "Login"]);

    // Moving to the current list changes nothing.
    let response = post_json(
        test.app(),
        &format!("/boards/Sprint/cards/{id}/move"),
        json!({ "to_list": "Done" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let again = body_json(get(test.app(), "/boards/Sprint").await).await;
    assert_eq!(again, board);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn move_to_unknown_list_is_404_and_card_stays(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint", &["To Do"]).await;
    let card = add_card(&test, "Sprint", "To Do", json!({ "title": "Login" })).await;
    let id = card["id"].as_str().unwrap();

    let response = post_json(
        test.app(),
        &format!("/boards/Sprint/cards/{id}/move"),
        json!({ "to_list": "Archivo" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let board = body_json(get(test.app(), "/boards/Sprint").await).await;
    assert_eq!(card_titles(&board, "To Do"), ["Login"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_card_then_404(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint", &["To Do"]).await;
    let card = add_card(&test, "Sprint", "To Do", json!({ "title": "Login" })).await;
    let uri = format!("/boards/Sprint/cards/{}", card["id"].as_str().unwrap());

    assert_eq!(delete(test.app(), &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete(test.app(), &uri).await.status(), StatusCode::NOT_FOUND);

    let response = patch_json(test.app(), &uri, json!({ "title": "X" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_card_id_is_400(pool: SqlitePool) {
    let test = build_test_app(pool).await;
    seed_board(&test, "Sprint", &["To Do"]).await;

    let response = delete(test.app(), "/boards/Sprint/cards/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = patch_json(test.app(), "/boards/Sprint/cards/123", json!({ "title": "X" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = post_json(
        test.app(),
        "/boards/Sprint/cards/zzz/move",
        json!({ "to_list": "To Do" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
