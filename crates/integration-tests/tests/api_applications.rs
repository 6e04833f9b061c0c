use actix_web::http::StatusCode;
use actix_web::{test, App};
use integration_tests::{accepting_client, failing_client, memory_state, platinum_json};
use serde_json::{json, Value};
use sf_api::configure_routes;
use sf_core::{MockSubmissionClient, SponsorRecord, Tier};

#[actix_web::test]
async fn platinum_application_is_accepted_with_fixed_amount() {
    let mut client = MockSubmissionClient::new();
    client
        .expect_submit()
        .withf(|p| {
            p.sponsorship_level == Tier::Platinum
                && p.amount_lkr == 100_000
                && p.contact_number == "+94 712345678"
                && p.contact_person_first_name == "Nimal"
        })
        .times(1)
        .returning(|_| Ok(()));
    let app = test::init_service(App::new().app_data(memory_state(client)).configure(configure_routes)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/applications")
            .set_json(platinum_json())
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["receipt"]["amountLKR"], 100_000);
    assert_eq!(body["receipt"]["payload"]["contactPersonLastName"], "Perera");
    assert!(body["receipt"]["submittedAt"].is_string());
    assert!(body.get("attachment").is_none());
}

#[actix_web::test]
async fn other_without_amount_is_rejected_on_other_amount() {
    let mut client = MockSubmissionClient::new();
    client.expect_submit().never();
    let app = test::init_service(App::new().app_data(memory_state(client)).configure(configure_routes)).await;

    let mut body = platinum_json();
    body["level"] = json!("Other");
    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/applications").set_json(body).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["otherAmount"], "Please enter amount for Other");
    assert_eq!(body["errors"].as_object().unwrap().len(), 1);
}

#[actix_web::test]
async fn other_amount_becomes_the_amount() {
    let mut client = MockSubmissionClient::new();
    client
        .expect_submit()
        .withf(|p| p.amount_lkr == 33_000 && p.other_amount.as_deref() == Some("33000"))
        .times(1)
        .returning(|_| Ok(()));
    let app = test::init_service(App::new().app_data(memory_state(client)).configure(configure_routes)).await;

    let mut body = platinum_json();
    body["level"] = json!("Other");
    body["otherAmount"] = json!("33000");
    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/applications").set_json(body).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn collaborator_failure_is_bad_gateway_and_adds_nothing() {
    let state = memory_state(failing_client());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/applications")
            .set_json(platinum_json())
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
    assert!(state.store.list().await.is_empty());
}

#[actix_web::test]
async fn dropped_letter_uses_the_same_type_rule() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state(accepting_client(2)))
            .configure(configure_routes),
    )
    .await;

    let mut ok = platinum_json();
    ok["letterFilename"] = json!("Letter.PDF");
    ok["letterSource"] = json!("drop");
    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/applications").set_json(ok).to_request(),
    )
    .await;
    assert_eq!(body["receipt"]["payload"]["companyLetterFilename"], "Letter.PDF");

    let mut bad = platinum_json();
    bad["letterFilename"] = json!("letter.docx");
    bad["letterSource"] = json!("drop");
    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/applications").set_json(bad).to_request(),
    )
    .await;
    assert!(body["receipt"]["payload"]["companyLetterFilename"].is_null());
    assert!(body["attachment"].as_str().unwrap().contains("letter.docx"));
}

#[actix_web::test]
async fn accepted_application_invalidates_the_cached_list() {
    let state = memory_state(accepting_client(1));
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

    let _: Vec<SponsorRecord> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/sponsors").to_request()).await;
    assert!(state.cache.is_warm());

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/applications")
            .set_json(platinum_json())
            .to_request(),
    )
    .await;
    assert!(!state.cache.is_warm());
}

#[actix_web::test]
async fn numeric_amount_and_phone_are_accepted() {
    let mut client = MockSubmissionClient::new();
    client
        .expect_submit()
        .withf(|p| p.amount_lkr == 30_000 && p.contact_number == "+94 712345678")
        .times(1)
        .returning(|_| Ok(()));
    let app = test::init_service(App::new().app_data(memory_state(client)).configure(configure_routes)).await;

    let mut body = platinum_json();
    body["level"] = json!("Other");
    body["otherAmount"] = json!(30000);
    body["contactNumber"] = json!(712345678);
    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/applications").set_json(body).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}
