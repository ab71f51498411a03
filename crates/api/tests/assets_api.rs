//! HTTP-level integration tests for asset CRUD and the recent feed.

mod common;

use axum::http::{header, StatusCode};
use axum::routing::get as get_route;
use axum::Router;
use common::{
    body_bytes, body_json, build_offline_app, build_test_app, build_test_app_with_config, delete,
    get, post_json, put_json, test_config,
};
use moodasset_core::workspace::WorkspaceKey;
use moodasset_db::repositories::WorkspaceRepo;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn workspace_id(pool: &PgPool, key: WorkspaceKey) -> Uuid {
    WorkspaceRepo::find_by_key(pool, key)
        .await
        .unwrap()
        .expect("seeded workspace")
        .id
}

async fn create_asset(pool: &PgPool, workspace: Uuid, name: &str) -> serde_json::Value {
    create_asset_with_url(pool, workspace, name, "http://x/y.png").await
}

async fn create_asset_with_url(
    pool: &PgPool,
    workspace: Uuid,
    name: &str,
    image_url: &str,
) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/assets",
        json!({
            "workspace_id": workspace,
            "name": name,
            "prompt": "a cat",
            "image_url": image_url,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-body";

/// Serve `PNG_BYTES` from a local listener and return the image URL.
async fn spawn_image_host() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route(
        "/neon.png",
        get_route(|| async { ([(header::CONTENT_TYPE, "image/png")], PNG_BYTES) }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/neon.png")
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_echoes_input(pool: PgPool) {
    let ws = workspace_id(&pool, WorkspaceKey::Analog).await;
    let json = create_asset(&pool, ws, "Test").await;

    assert_eq!(json["name"], "Test");
    assert_eq!(json["prompt"], "a cat");
    assert_eq!(json["image_url"], "http://x/y.png");
    assert_eq!(json["status"], "done");
    assert_eq!(json["metadata"], json!({}));
    assert!(json["id"].is_string());
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());

    let listed = body_json(get(build_test_app(pool), "/api/workspaces/analog/assets").await).await;
    assert_eq!(listed[0]["id"], json["id"]);
}

#[tokio::test]
async fn test_create_missing_fields_returns_400() {
    let response = post_json(
        build_offline_app(),
        "/api/assets",
        json!({ "workspace_id": Uuid::new_v4(), "name": "", "prompt": "a cat" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required fields");
    assert_eq!(json["details"], json!(["name", "image_url"]));
}

#[tokio::test]
async fn test_create_reports_failed_operation_when_database_unavailable() {
    let response = post_json(
        build_offline_app(),
        "/api/assets",
        json!({
            "workspace_id": Uuid::new_v4(),
            "name": "Test",
            "prompt": "a cat",
            "image_url": "http://x/y.png",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to create asset");
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_recent_reports_failed_operation_when_database_unavailable() {
    let response = get(build_offline_app(), "/api/assets").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to fetch assets");
}

#[tokio::test]
async fn test_create_with_non_object_metadata_returns_400() {
    let response = post_json(
        build_offline_app(),
        "/api/assets",
        json!({
            "workspace_id": Uuid::new_v4(),
            "name": "Bad",
            "prompt": "a cat",
            "image_url": "http://x/y.png",
            "metadata": [1, 2],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_for_unknown_workspace_returns_400(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/assets",
        json!({
            "workspace_id": Uuid::new_v4(),
            "name": "Orphan",
            "prompt": "a cat",
            "image_url": "http://x/y.png",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Read / update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_unknown_asset_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), &format!("/api/assets/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_merges_metadata_and_stamps_updated_at(pool: PgPool) {
    let ws = workspace_id(&pool, WorkspaceKey::Metal).await;
    let created = create_asset(&pool, ws, "Before").await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/assets/{id}"),
        json!({ "name": "After", "metadata": { "tag": "hero" } }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "After");
    assert_eq!(json["prompt"], "a cat");
    assert_eq!(json["metadata"]["tag"], "hero");
    assert!(json["metadata"]["updated_at"].is_string());

    let fetched = body_json(get(build_test_app(pool), &format!("/api/assets/{id}")).await).await;
    assert_eq!(fetched["name"], "After");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_blank_name_returns_400(pool: PgPool) {
    let ws = workspace_id(&pool, WorkspaceKey::Metal).await;
    let created = create_asset(&pool, ws, "Keep").await;
    let id = created["id"].as_str().unwrap();

    let response = put_json(
        build_test_app(pool),
        &format!("/api/assets/{id}"),
        json!({ "name": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_unknown_asset_returns_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        &format!("/api/assets/{}", Uuid::new_v4()),
        json!({ "name": "Ghost" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_then_get_returns_404(pool: PgPool) {
    let ws = workspace_id(&pool, WorkspaceKey::Vintage).await;
    let created = create_asset(&pool, ws, "Gone").await;
    let uri = format!("/api/assets/{}", created["id"].as_str().unwrap());

    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Recent feed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_recent_assets_newest_first_with_limit(pool: PgPool) {
    let ws = workspace_id(&pool, WorkspaceKey::Analog).await;
    for name in ["one", "two", "three"] {
        create_asset(&pool, ws, name).await;
    }

    let json = body_json(get(build_test_app(pool), "/api/assets?limit=2").await).await;
    let items = json.as_array().unwrap();
    let names: Vec<&str> = items.iter().map(|a| a["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["three", "two"]);
    assert!(items.iter().all(|a| a["workspace_name"] == "Analog Workspace"));
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_export_streams_image_as_attachment(pool: PgPool) {
    let image_url = spawn_image_host().await;
    let ws = workspace_id(&pool, WorkspaceKey::Metal).await;
    let created = create_asset_with_url(&pool, ws, "Neon Sign", &image_url).await;

    let mut config = test_config();
    config.export_allow_private_hosts = true;
    let response = get(
        build_test_app_with_config(pool, config),
        &format!("/api/assets/{}/export", created["id"].as_str().unwrap()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Neon Sign.png\""
    );
    assert_eq!(body_bytes(response).await, PNG_BYTES);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_export_refuses_loopback_host(pool: PgPool) {
    let ws = workspace_id(&pool, WorkspaceKey::Metal).await;
    let created = create_asset_with_url(&pool, ws, "Internal", "http://127.0.0.1:9/x").await;

    let response = get(
        build_test_app(pool),
        &format!("/api/assets/{}/export", created["id"].as_str().unwrap()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_export_refuses_non_http_scheme(pool: PgPool) {
    let ws = workspace_id(&pool, WorkspaceKey::Metal).await;
    let created = create_asset_with_url(&pool, ws, "Local", "file:///etc/passwd").await;

    let response = get(
        build_test_app(pool),
        &format!("/api/assets/{}/export", created["id"].as_str().unwrap()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_export_stops_at_size_limit(pool: PgPool) {
    let image_url = spawn_image_host().await;
    let ws = workspace_id(&pool, WorkspaceKey::Vintage).await;
    let created = create_asset_with_url(&pool, ws, "Big", &image_url).await;

    let mut config = test_config();
    config.export_allow_private_hosts = true;
    config.export_max_bytes = 4;
    let response = get(
        build_test_app_with_config(pool, config),
        &format!("/api/assets/{}/export", created["id"].as_str().unwrap()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to export asset");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_export_unknown_asset_returns_404(pool: PgPool) {
    let response = get(
        build_test_app(pool),
        &format!("/api/assets/{}/export", Uuid::new_v4()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
