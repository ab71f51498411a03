//! HTTP-level tests for image generation.
//!
//! The test app uses a placeholder-only generator, so generated images are
//! deterministic picsum URLs and nothing reaches the network.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_offline_app, build_test_app, get, post_json};
use moodasset_core::workspace::WorkspaceKey;
use moodasset_db::repositories::WorkspaceRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Validation (no database)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_generate_without_asset_name_returns_400() {
    let response = post_json(
        build_offline_app(),
        "/api/generate-image",
        json!({ "prompt": "a cat", "workspaceId": "00000000-0000-0000-0000-000000000000" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Missing required fields: prompt, workspaceId, assetName"
    );
    assert_eq!(json["details"], json!(["assetName"]));
}

#[tokio::test]
async fn test_generate_with_empty_prompt_returns_400() {
    let response = post_json(
        build_offline_app(),
        "/api/generate-image",
        json!({ "prompt": "", "workspaceId": "x", "assetName": "Poster" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"], json!(["prompt"]));
}

#[tokio::test]
async fn test_generate_with_malformed_workspace_id_returns_400() {
    let response = post_json(
        build_offline_app(),
        "/api/generate-image",
        json!({ "prompt": "a cat", "workspaceId": "not-a-uuid", "assetName": "Poster" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_preview_returns_placeholder_without_persisting() {
    let response = post_json(
        build_offline_app(),
        "/api/generate-image/preview",
        json!({ "prompt": "a cat", "style": "metal" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let url = json["imageUrl"].as_str().unwrap();
    assert!(url.starts_with("https://picsum.photos/id/"));
    assert!(url.ends_with("?grayscale"));
    assert_eq!(json["realImageGenerated"], false);
    assert_eq!(json["metadata"]["source"], "placeholder");
    assert_eq!(json["metadata"]["style"], "metal");
    assert!(json["enhancedPrompt"]
        .as_str()
        .unwrap()
        .ends_with("high quality, detailed, professional"));
}

#[tokio::test]
async fn test_preview_is_deterministic_and_unknown_style_is_realistic() {
    let preview = |style: &'static str| async move {
        let response = post_json(
            build_offline_app(),
            "/api/generate-image/preview",
            json!({ "prompt": "a lighthouse", "style": style }),
        )
        .await;
        body_json(response).await
    };

    let unknown = preview("watercolor").await;
    let realistic = preview("realistic").await;
    assert_eq!(unknown["imageUrl"], realistic["imageUrl"]);
    assert_eq!(unknown["metadata"]["style"], "realistic");
}

#[tokio::test]
async fn test_preview_without_prompt_returns_400() {
    let response = post_json(
        build_offline_app(),
        "/api/generate-image/preview",
        json!({ "style": "analog" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Missing required fields: prompt");
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_stores_asset_in_workspace(pool: PgPool) {
    let workspace = WorkspaceRepo::find_by_key(&pool, WorkspaceKey::Vintage)
        .await
        .unwrap()
        .unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/generate-image",
        json!({
            "prompt": "an old radio",
            "style": "vintage",
            "workspaceId": workspace.id,
            "assetName": "Radio",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["asset"]["name"], "Radio");
    assert_eq!(json["asset"]["workspace_id"], workspace.id.to_string());
    assert_eq!(json["asset"]["image_url"], json["imageGeneration"]["imageUrl"]);
    assert_eq!(json["asset"]["metadata"]["original_prompt"], "an old radio");
    assert_eq!(json["asset"]["metadata"]["real_image"], false);
    assert!(json["imageGeneration"]["imageUrl"]
        .as_str()
        .unwrap()
        .ends_with("?blur=2"));

    let listed = body_json(get(build_test_app(pool), "/api/workspaces/vintage/assets").await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Radio");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_for_unknown_workspace_returns_400(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/generate-image",
        json!({
            "prompt": "a cat",
            "workspaceId": "00000000-0000-0000-0000-000000000000",
            "assetName": "Orphan",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
