use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::classification::{classify_listed, TierThresholdTable};
use super::domain::{AthleteId, Evaluation, Event, Gender, Tier};
use super::impact::ImpactScore;
use super::repository::{AlertPublisher, AthleteRepository};
use super::scholarship::{dollars_to_percentage, percentage_to_dollars, recommend_amount};
use super::service::{NewAthlete, RosterService, RosterServiceError};
use crate::error::AppError;

type SharedService<R, A> = Arc<RosterService<R, A>>;

/// Router builder exposing stateless scoring calls and roster maintenance endpoints.
pub fn roster_router<R, A>(service: SharedService<R, A>) -> Router
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/scoring/classify", post(classify_handler::<R, A>))
        .route("/api/v1/scoring/impact", post(impact_handler::<R, A>))
        .route("/api/v1/scoring/convert", post(convert_handler))
        .route(
            "/api/v1/roster/athletes",
            post(enroll_handler::<R, A>).get(list_handler::<R, A>),
        )
        .route(
            "/api/v1/roster/athletes/:athlete_id",
            get(scorecard_handler::<R, A>).delete(archive_handler::<R, A>),
        )
        .route(
            "/api/v1/roster/athletes/:athlete_id/evaluation",
            put(evaluation_handler::<R, A>),
        )
        .route(
            "/api/v1/roster/athletes/:athlete_id/tier",
            put(tier_handler::<R, A>),
        )
        .route(
            "/api/v1/roster/athletes/:athlete_id/result",
            put(result_handler::<R, A>),
        )
        .route(
            "/api/v1/roster/athletes/:athlete_id/scholarship",
            put(scholarship_handler::<R, A>),
        )
        .route("/api/v1/roster/budget", get(budget_handler::<R, A>))
        .route("/api/v1/roster/report", get(report_handler::<R, A>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyRequest {
    /// Display name; blank or unknown names classify as prospect.
    #[serde(default)]
    pub(crate) event: String,
    #[serde(default)]
    pub(crate) result: String,
    pub(crate) gender: Gender,
    /// Edited threshold copy; the configured table is used when absent.
    #[serde(default)]
    pub(crate) thresholds: Option<TierThresholdTable>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyResponse {
    pub(crate) event: Option<Event>,
    pub(crate) tier: Tier,
    pub(crate) tier_label: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImpactRequest {
    #[serde(default)]
    pub(crate) evaluation: Option<Evaluation>,
    pub(crate) tier: Tier,
    #[serde(default)]
    pub(crate) max_scholarship: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImpactResponse {
    pub(crate) impact: ImpactScore,
    pub(crate) display_percent: u8,
    pub(crate) recommended_amount: f64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub(crate) enum ConvertRequest {
    ToDollars { percentage: f64, budget: f64 },
    ToPercentage { amount: f64, budget: f64 },
}

#[derive(Debug, Deserialize)]
pub(crate) struct TierRequest {
    /// `null` resets the athlete to auto-classification.
    pub(crate) tier: Option<Tier>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultRequest {
    pub(crate) personal_best: String,
    #[serde(default)]
    pub(crate) event: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScholarshipRequest {
    pub(crate) amount: f64,
}

pub(crate) async fn classify_handler<R, A>(
    State(service): State<SharedService<R, A>>,
    Json(request): Json<ClassifyRequest>,
) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    let thresholds = request
        .thresholds
        .as_ref()
        .unwrap_or(&service.config().thresholds);
    let tier = classify_listed(&request.event, &request.result, request.gender, thresholds);
    let body = ClassifyResponse {
        event: Event::parse(&request.event),
        tier,
        tier_label: tier.label(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn impact_handler<R, A>(
    State(service): State<SharedService<R, A>>,
    Json(request): Json<ImpactRequest>,
) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    let impact = service
        .scorer()
        .score(request.evaluation.as_ref(), request.tier);
    let max_scholarship = request
        .max_scholarship
        .unwrap_or(service.config().max_scholarship);
    let body = ImpactResponse {
        display_percent: impact.display_percent(),
        recommended_amount: recommend_amount(impact.total, max_scholarship),
        impact,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn convert_handler(Json(request): Json<ConvertRequest>) -> Response {
    let outcome = match request {
        ConvertRequest::ToDollars { percentage, budget } => Ok(json!({
            "amount": percentage_to_dollars(percentage, budget),
        })),
        ConvertRequest::ToPercentage { amount, budget } => {
            dollars_to_percentage(amount, budget).map(|percentage| json!({ "percentage": percentage }))
        }
    };

    match outcome {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn enroll_handler<R, A>(
    State(service): State<SharedService<R, A>>,
    Json(intake): Json<NewAthlete>,
) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.enroll(intake) {
        Ok(athlete) => (StatusCode::CREATED, Json(athlete)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn list_handler<R, A>(State(service): State<SharedService<R, A>>) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.list() {
        Ok(athletes) => (StatusCode::OK, Json(athletes)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn scorecard_handler<R, A>(
    State(service): State<SharedService<R, A>>,
    Path(athlete_id): Path<String>,
) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    let id = AthleteId(athlete_id);
    let outcome = service
        .get(&id)
        .and_then(|athlete| service.scorecard(&id).map(|card| (athlete, card)));
    match outcome {
        Ok((athlete, scorecard)) => (
            StatusCode::OK,
            Json(json!({ "athlete": athlete, "scorecard": scorecard })),
        )
            .into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn archive_handler<R, A>(
    State(service): State<SharedService<R, A>>,
    Path(athlete_id): Path<String>,
) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.archive(&AthleteId(athlete_id)) {
        Ok(athlete) => (StatusCode::OK, Json(athlete)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn evaluation_handler<R, A>(
    State(service): State<SharedService<R, A>>,
    Path(athlete_id): Path<String>,
    Json(evaluation): Json<Evaluation>,
) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.record_evaluation(&AthleteId(athlete_id), evaluation) {
        Ok(scorecard) => (StatusCode::OK, Json(scorecard)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn tier_handler<R, A>(
    State(service): State<SharedService<R, A>>,
    Path(athlete_id): Path<String>,
    Json(request): Json<TierRequest>,
) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    let id = AthleteId(athlete_id);
    let outcome = match request.tier {
        Some(tier) => service.override_tier(&id, tier),
        None => service.reset_tier(&id),
    };
    match outcome {
        Ok(athlete) => (StatusCode::OK, Json(athlete)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn result_handler<R, A>(
    State(service): State<SharedService<R, A>>,
    Path(athlete_id): Path<String>,
    Json(request): Json<ResultRequest>,
) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.update_result(&AthleteId(athlete_id), request.personal_best, request.event) {
        Ok(athlete) => (StatusCode::OK, Json(athlete)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn scholarship_handler<R, A>(
    State(service): State<SharedService<R, A>>,
    Path(athlete_id): Path<String>,
    Json(request): Json<ScholarshipRequest>,
) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.set_scholarship(&AthleteId(athlete_id), request.amount) {
        Ok(budget) => (StatusCode::OK, Json(budget)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn budget_handler<R, A>(State(service): State<SharedService<R, A>>) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    let budgets: Result<Vec<_>, _> = Gender::ordered()
        .into_iter()
        .map(|gender| service.budget(gender))
        .collect();
    match budgets {
        Ok(budgets) => (StatusCode::OK, Json(budgets)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn report_handler<R, A>(State(service): State<SharedService<R, A>>) -> Response
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    let today: NaiveDate = Local::now().date_naive();
    match service.report(today) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: RosterServiceError) -> Response {
    AppError::from(error).into_response()
}
