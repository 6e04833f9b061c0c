//! # sf-api Handlers
//!
//! This module coordinates the flow between HTTP requests, the sponsor store
//! and the application form.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use askama::Template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sf_core::{
    validate, AppError, AttachmentSource, FieldErrors, FormState, FormValues, NewSponsor,
    SponsorEvents, SponsorStore, SponsorshipForm, SubmissionClient, SubmissionReceipt,
};
use sf_ui::{
    sponsor_cards, ConfirmationTemplate, IndexTemplate, LandingTemplate, PackagesTemplate,
    BENEFITS, SITE_NAME,
};

use crate::cache::SponsorListCache;
use crate::error::ApiError;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub store: SponsorStore,
    pub submitter: Arc<dyn SubmissionClient>,
    pub events: SponsorEvents,
    pub cache: SponsorListCache,
}

impl AppState {
    pub fn new(store: SponsorStore, submitter: Arc<dyn SubmissionClient>) -> Self {
        let events = SponsorEvents::new();
        let cache = SponsorListCache::new(&events);
        Self { store, submitter, events, cache }
    }
}

fn html<T: Template>(status: StatusCode, page: &T) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(page.render()?))
}

/// Seeds on first visit. A storage failure only costs the demo data.
async fn ensure_seeded(data: &AppState) {
    match data.store.seed_if_empty().await {
        Ok(true) => data.cache.invalidate(),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "could not seed sponsor store"),
    }
}

/// `GET /`
pub async fn index() -> Result<HttpResponse, ApiError> {
    let title = format!("Welcome to {SITE_NAME}");
    html(StatusCode::OK, &IndexTemplate { title: &title })
}

/// `GET /sponsorship`
pub async fn landing(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    ensure_seeded(&data).await;
    let sponsors = data.cache.get_or_load(&data.store).await;
    let title = format!("Sponsorship | {SITE_NAME}");
    html(
        StatusCode::OK,
        &LandingTemplate { title: &title, benefits: &BENEFITS, cards: sponsor_cards(&sponsors) },
    )
}

fn packages_title() -> String {
    format!("Sponsorship Packages | {SITE_NAME}")
}

/// `GET /sponsorship/packages`, also the target of "Clear form".
pub async fn packages_form() -> Result<HttpResponse, ApiError> {
    let values = FormValues::default();
    let title = packages_title();
    let page = PackagesTemplate::new(&title, &values, &validate(&values), 0, false, Vec::new());
    html(StatusCode::OK, &page)
}

/// `POST /sponsorship/packages`
///
/// Re-renders the form with every field error (422) or with a failure notice
/// and the user's input intact (502); shows the confirmation on success.
pub async fn submit_packages(
    data: web::Data<AppState>,
    values: web::Form<FormValues>,
) -> Result<HttpResponse, ApiError> {
    let (mut form, rejected) = SponsorshipForm::from_values(values.into_inner(), AttachmentSource::Picker);
    let mut notices: Vec<String> = rejected.iter().map(ToString::to_string).collect();
    let title = packages_title();

    match form.submit(&*data.submitter, &data.events).await {
        Ok(receipt) => html(StatusCode::OK, &ConfirmationTemplate::new(&title, &receipt, notices)),
        Err(AppError::ValidationError(_)) => {
            let page = PackagesTemplate::new(&title, form.values(), form.errors(), form.amount(), true, notices);
            html(StatusCode::UNPROCESSABLE_ENTITY, &page)
        }
        Err(AppError::Submission(_)) => {
            if let FormState::SubmitFailed { notice } = form.state() {
                notices.push(notice.clone());
            }
            let page = PackagesTemplate::new(&title, form.values(), form.errors(), form.amount(), true, notices);
            html(StatusCode::BAD_GATEWAY, &page)
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /api/sponsors`
pub async fn list_sponsors(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.cache.get_or_load(&data.store).await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSponsorRequest {
    #[serde(flatten)]
    pub sponsor: NewSponsor,
    #[serde(default)]
    pub date_since: Option<DateTime<Utc>>,
}

/// `POST /api/sponsors`
pub async fn add_sponsor(
    data: web::Data<AppState>,
    body: web::Json<AddSponsorRequest>,
) -> Result<HttpResponse, ApiError> {
    let AddSponsorRequest { sponsor, date_since } = body.into_inner();
    let record = data.store.add(sponsor, date_since).await?;
    data.cache.invalidate();
    Ok(HttpResponse::Created().json(record))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    #[serde(flatten)]
    pub values: FormValues,
    /// How the letter was attached; the picker when omitted.
    #[serde(default)]
    pub letter_source: Option<AttachmentSource>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRejected {
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAccepted {
    pub receipt: SubmissionReceipt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

/// `POST /api/applications`
///
/// Field values are strings; `otherAmount` and `contactNumber` may also be
/// JSON numbers.
pub async fn submit_application(
    data: web::Data<AppState>,
    body: web::Json<ApplicationRequest>,
) -> Result<HttpResponse, ApiError> {
    let ApplicationRequest { values, letter_source } = body.into_inner();
    let (mut form, rejected) =
        SponsorshipForm::from_values(values, letter_source.unwrap_or(AttachmentSource::Picker));
    let attachment = rejected.map(|r| r.to_string());

    match form.submit(&*data.submitter, &data.events).await {
        Ok(receipt) => Ok(HttpResponse::Created().json(ApplicationAccepted { receipt, attachment })),
        Err(AppError::ValidationError(_)) => Ok(HttpResponse::UnprocessableEntity().json(
            ApplicationRejected { errors: form.errors().clone(), attachment },
        )),
        Err(e) => Err(e.into()),
    }
}
