//! Integration tests for the `/api/v1/cards` resource.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, create_card, get, post_empty, post_json, put_json, StubLogo};
use giftigo_core::brand_color::resolve_brand_color;
use serde_json::json;
use uuid::Uuid;

fn card(offer: &str, brand: &str, sector: &str) -> serde_json::Value {
    json!({ "offer_name": offer, "brand_name": brand, "sector": sector })
}

// ---------------------------------------------------------------------------
// Owner identity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_owner_header_is_unauthorized() {
    let app = common::build_test_app();
    let response = get(&app.router, "/api/v1/cards", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_owner_header_is_unauthorized() {
    let app = common::build_test_app();
    let request = axum::http::Request::builder()
        .uri("/api/v1/cards")
        .header("x-owner-id", "not-a-uuid")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = common::send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_collection_shows_sample_cards() {
    let app = common::build_test_app();
    let response = get(&app.router, "/api/v1/cards", Some(Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let view = &body_json(response).await["data"];
    assert_eq!(view["is_onboarding"], true);
    assert_eq!(view["heading"], "All Cards");
    let tiles = view["cards"].as_array().unwrap();
    assert_eq!(tiles.len(), 4);
    assert!(tiles.iter().all(|t| t["is_sample"] == true && t["can_favorite"] == false));
    assert!(tiles.iter().all(|t| t["id"].is_null()));
}

#[tokio::test]
async fn empty_favorites_view_shows_message_not_samples() {
    let app = common::build_test_app();
    let response = get(&app.router, "/api/v1/cards?view=favorites", Some(Uuid::new_v4())).await;

    let view = &body_json(response).await["data"];
    assert_eq!(view["is_onboarding"], false);
    assert_eq!(view["cards"].as_array().unwrap().len(), 0);
    assert_eq!(view["empty_message"], "No favorite cards yet");
}

#[tokio::test]
async fn search_filters_by_brand_offer_or_sector() {
    let app = common::build_test_app();
    let owner = Uuid::new_v4();
    create_card(&app.router, owner, card("iPhone credit", "Apple", "Technology")).await;
    create_card(&app.router, owner, card("Coffee", "Starbucks", "Food & Dining")).await;

    let response = get(&app.router, "/api/v1/cards?q=APPLE", Some(owner)).await;
    let tiles = body_json(response).await["data"]["cards"].clone();
    assert_eq!(tiles.as_array().unwrap().len(), 1);
    assert_eq!(tiles[0]["brand_name"], "Apple");

    let response = get(&app.router, "/api/v1/cards?q=dining", Some(owner)).await;
    let tiles = body_json(response).await["data"]["cards"].clone();
    assert_eq!(tiles[0]["brand_name"], "Starbucks");

    let response = get(&app.router, "/api/v1/cards?q=zzz", Some(owner)).await;
    let view = body_json(response).await["data"].clone();
    assert_eq!(view["empty_message"], "No cards match your search");
}

#[tokio::test]
async fn expiring_soon_view_uses_seven_day_window() {
    let app = common::build_test_app();
    let owner = Uuid::new_v4();

    let mut soon = card("Soon", "Zara", "Fashion & Clothing");
    soon["expires_at"] = json!((Utc::now() + Duration::days(3)).to_rfc3339());
    let mut later = card("Later", "Nike", "Sports & Fitness");
    later["expires_at"] = json!((Utc::now() + Duration::days(30)).to_rfc3339());
    create_card(&app.router, owner, soon).await;
    create_card(&app.router, owner, later).await;
    create_card(&app.router, owner, card("Never", "Gap", "Fashion & Clothing")).await;

    let response = get(&app.router, "/api/v1/cards?view=expiring_soon", Some(owner)).await;
    let view = body_json(response).await["data"].clone();
    let tiles = view["cards"].as_array().unwrap();
    assert_eq!(view["heading"], "Expiring Soon");
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0]["offer_name"], "Soon");
}

#[tokio::test]
async fn unknown_view_is_rejected() {
    let app = common::build_test_app();
    let response = get(&app.router, "/api/v1/cards?view=archived", Some(Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn date_picker_expiry_is_accepted() {
    let app = common::build_test_app();
    let mut body = card("Winter sale", "Zara", "Fashion & Clothing");
    body["expires_at"] = json!("2024-01-05");

    let created = create_card(&app.router, Uuid::new_v4(), body).await;
    assert_eq!(created["expires_at"], "2024-01-05T00:00:00Z");
    assert_eq!(created["expiry_date_label"], "January 5, 2024");
    assert_eq!(created["expiry_label"], "Expired");
}

#[tokio::test]
async fn malformed_expiry_is_rejected() {
    let app = common::build_test_app();
    let mut body = card("Gift", "Zara", "Fashion & Clothing");
    body["expires_at"] = json!("05/01/2024");

    let response = post_json(&app.router, "/api/v1/cards", Uuid::new_v4(), &body).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let app = common::build_test_app();
    let owner = Uuid::new_v4();

    let mut body = card("Summer sale", "Spotify", "Entertainment");
    body["value"] = json!(499.0);
    body["redeem_code"] = json!("SPOT-1234-ABCD");
    let created = create_card(&app.router, owner, body).await;

    assert_eq!(created["brand_color"], resolve_brand_color("Spotify"));
    assert_eq!(created["is_used"], false);
    assert_eq!(created["is_favorite"], false);
    assert_eq!(created["sector"], "Entertainment");
    assert_eq!(created["value_label"], "₹499");

    let response = get(&app.router, "/api/v1/cards", Some(owner)).await;
    let view = body_json(response).await["data"].clone();
    assert_eq!(view["is_onboarding"], false);
    assert_eq!(view["cards"][0]["id"], created["id"]);
    assert_eq!(view["cards"][0]["redeem_code_suffix"], "ABCD");
}

#[tokio::test]
async fn invalid_card_is_rejected_before_store() {
    let app = common::build_test_app();
    let owner = Uuid::new_v4();

    let response = post_json(
        &app.router,
        "/api/v1/cards",
        owner,
        &json!({ "offer_name": "Gift", "brand_name": "  ", "sector": "Technology" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(
        &app.router,
        "/api/v1/cards",
        owner,
        &json!({ "offer_name": "Gift", "brand_name": "Nike", "sector": "Groceries" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&app.router, "/api/v1/cards", Some(owner)).await;
    assert_eq!(body_json(response).await["data"]["is_onboarding"], true);
}

#[tokio::test]
async fn logo_search_fills_missing_logo() {
    let app = common::build_test_app_with_logo(Arc::new(StubLogo::Found("https://cdn.test/nike.png")));
    let mut body = card("Shoes", "Nike", "Sports & Fitness");
    body["search_logo"] = json!(true);

    let created = create_card(&app.router, Uuid::new_v4(), body).await;
    assert_eq!(created["brand_logo_url"], "https://cdn.test/nike.png");
    assert_eq!(created["brand_mark"]["kind"], "logo");
}

#[tokio::test]
async fn logo_failure_never_blocks_creation() {
    let app = common::build_test_app_with_logo(Arc::new(StubLogo::Broken));
    let mut body = card("Shoes", "Nike", "Sports & Fitness");
    body["search_logo"] = json!(true);

    let created = create_card(&app.router, Uuid::new_v4(), body).await;
    assert!(created["brand_logo_url"].is_null());
    assert_eq!(created["brand_mark"]["kind"], "monogram");
    assert_eq!(created["brand_mark"]["letter"], "N");
    assert_eq!(created["brand_color"], resolve_brand_color("Nike"));
}

// ---------------------------------------------------------------------------
// Detail, favorite, mark used
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detail_is_owner_scoped() {
    let app = common::build_test_app();
    let owner = Uuid::new_v4();
    let created = create_card(&app.router, owner, card("Gift", "Apple", "Technology")).await;
    let uri = format!("/api/v1/cards/{}", created["id"]);

    let response = get(&app.router, &uri, Some(owner)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["can_mark_used"], true);
    assert!(detail["value_label"].is_null());

    let response = get(&app.router, &uri, Some(Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn favorite_toggle_shows_in_favorites_view() {
    let app = common::build_test_app();
    let owner = Uuid::new_v4();
    let created = create_card(&app.router, owner, card("Gift", "Apple", "Technology")).await;
    create_card(&app.router, owner, card("Gift", "Google", "Technology")).await;

    let uri = format!("/api/v1/cards/{}/favorite", created["id"]);
    let response = put_json(&app.router, &uri, owner, &json!({ "is_favorite": true })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_favorite"], true);

    let response = get(&app.router, "/api/v1/cards?view=favorites", Some(owner)).await;
    let tiles = body_json(response).await["data"]["cards"].clone();
    assert_eq!(tiles.as_array().unwrap().len(), 1);
    assert_eq!(tiles[0]["brand_name"], "Apple");
}

#[tokio::test]
async fn mark_used_is_one_way() {
    let app = common::build_test_app();
    let owner = Uuid::new_v4();
    let created = create_card(&app.router, owner, card("Gift", "Apple", "Technology")).await;
    let uri = format!("/api/v1/cards/{}/use", created["id"]);

    let response = post_empty(&app.router, &uri, owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    let used = body_json(response).await["data"].clone();
    assert_eq!(used["is_used"], true);
    assert_eq!(used["can_mark_used"], false);
    let used_at = used["used_at"].clone();
    assert!(used_at.is_string());

    let response = post_empty(&app.router, &uri, owner).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let detail_uri = format!("/api/v1/cards/{}", created["id"]);
    let detail = body_json(get(&app.router, &detail_uri, Some(owner)).await).await;
    assert_eq!(detail["data"]["used_at"], used_at);

    // Gone from the grid, but the collection is not empty: no samples.
    let view = body_json(get(&app.router, "/api/v1/cards", Some(owner)).await).await;
    assert_eq!(view["data"]["is_onboarding"], false);
    assert_eq!(view["data"]["cards"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn missing_card_is_not_found() {
    let app = common::build_test_app();
    let response = post_empty(&app.router, "/api/v1/cards/999/use", Uuid::new_v4()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Backend failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn offline_store_is_service_unavailable() {
    let app = common::build_test_app();
    let owner = Uuid::new_v4();
    let created = create_card(&app.router, owner, card("Gift", "Apple", "Technology")).await;

    app.store.set_available(false);
    let response = get(&app.router, "/api/v1/cards", Some(owner)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "SERVICE_UNAVAILABLE");

    let uri = format!("/api/v1/cards/{}/favorite", created["id"]);
    let response = put_json(&app.router, &uri, owner, &json!({ "is_favorite": true })).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    app.store.set_available(true);
    let detail_uri = format!("/api/v1/cards/{}", created["id"]);
    let detail = body_json(get(&app.router, &detail_uri, Some(owner)).await).await;
    assert_eq!(detail["data"]["is_favorite"], false);
}
