use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use chrono::{DateTime, Utc};
use integration_tests::{memory_state, state_over};
use serde_json::json;
use sf_api::configure_routes;
use sf_core::{MockSubmissionClient, SponsorRecord, Tier};
use sf_storage_file::FileKeyValueStore;

fn assert_newest_first(records: &[SponsorRecord]) {
    assert!(records.windows(2).all(|w| w[0].date_since >= w[1].date_since));
}

#[actix_web::test]
async fn list_is_empty_before_seeding() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state(MockSubmissionClient::new()))
            .configure(configure_routes),
    )
    .await;

    let list: Vec<SponsorRecord> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/sponsors").to_request()).await;
    assert!(list.is_empty());
}

#[actix_web::test]
async fn landing_visit_seeds_the_json_list() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state(MockSubmissionClient::new()))
            .configure(configure_routes),
    )
    .await;

    test::call_service(&app, test::TestRequest::get().uri("/sponsorship").to_request()).await;
    let list: Vec<SponsorRecord> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/sponsors").to_request()).await;

    assert_eq!(list.len(), 5);
    assert_eq!(list[0].company, "Galle Surf Co.");
    assert_newest_first(&list);
}

#[actix_web::test]
async fn added_sponsor_appears_in_sorted_position() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state(MockSubmissionClient::new()))
            .configure(configure_routes),
    )
    .await;
    test::call_service(&app, test::TestRequest::get().uri("/sponsorship").to_request()).await;

    let req = test::TestRequest::post()
        .uri("/api/sponsors")
        .set_json(json!({
            "company": "Mid Year Ltd",
            "tier": "Gold",
            "amountLKR": 75000,
            "dateSince": "2024-07-01T00:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: SponsorRecord = test::read_body_json(resp).await;
    assert_eq!(created.tier, Tier::Gold);
    assert_eq!(created.date_since, "2024-07-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());

    let list: Vec<SponsorRecord> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/sponsors").to_request()).await;
    assert_eq!(list.len(), 6);
    assert_newest_first(&list);
    // Between Colombo (2024-09-05) and Lanka Beverages (2024-06-01).
    assert_eq!(list[2].id, created.id);
}

#[actix_web::test]
async fn identical_adds_get_distinct_ids() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state(MockSubmissionClient::new()))
            .configure(configure_routes),
    )
    .await;

    let body = json!({ "company": "Twin", "tier": "Silver", "amountLKR": 50000 });
    let a: SponsorRecord = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/sponsors").set_json(&body).to_request(),
    )
    .await;
    let b: SponsorRecord = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/sponsors").set_json(&body).to_request(),
    )
    .await;
    assert_ne!(a.id, b.id);
}

#[actix_web::test]
async fn blank_company_is_unprocessable() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state(MockSubmissionClient::new()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/sponsors")
        .set_json(json!({ "company": " ", "tier": "Gold", "amountLKR": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn unknown_tier_is_a_bad_request() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state(MockSubmissionClient::new()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/sponsors")
        .set_json(json!({ "company": "Bronze Co", "tier": "Bronze", "amountLKR": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn malformed_slot_on_disk_still_renders_landing() {
    let dir = std::env::temp_dir().join(format!("sf-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("sportify_sponsors.json"), "{ definitely not json").unwrap();

    let state = state_over(Arc::new(FileKeyValueStore::new(dir.clone())), MockSubmissionClient::new());
    let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/sponsorship").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: Vec<SponsorRecord> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/sponsors").to_request()).await;
    assert!(list.is_empty());

    let _ = std::fs::remove_dir_all(dir);
}
