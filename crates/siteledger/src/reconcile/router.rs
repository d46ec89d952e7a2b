use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::config::EngineConfig;
use super::indicators::{generate_status_indicators, Indicator};
use super::records::{build_snapshot, normalize_job, SkippedRecord};
use super::report::views::{ClientFinancialSummary, InvoiceStateView, JobFinancialState};
use super::report::{reconcile_client, reconcile_job};

/// Router exposing the reconciliation pipeline over raw, heterogeneous
/// records. All I/O and clock resolution happens here; the engine itself
/// only ever sees a normalized snapshot and an explicit date.
pub fn reconcile_router(config: Arc<EngineConfig>) -> Router {
    Router::new()
        .route("/api/v1/reconcile/job", post(reconcile_job_handler))
        .route("/api/v1/reconcile/client", post(reconcile_client_handler))
        .with_state(config)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReconcileJobRequest {
    pub(crate) job: Value,
    #[serde(default)]
    pub(crate) invoices: Vec<Value>,
    #[serde(default)]
    pub(crate) payments: Vec<Value>,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReconcileJobResponse {
    pub(crate) today: NaiveDate,
    pub(crate) job: JobFinancialState,
    pub(crate) invoices: Vec<InvoiceStateView>,
    pub(crate) indicators: Vec<Indicator>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) skipped: Vec<SkippedRecord>,
}

pub(crate) async fn reconcile_job_handler(
    State(config): State<Arc<EngineConfig>>,
    Json(payload): Json<ReconcileJobRequest>,
) -> Response {
    let ReconcileJobRequest {
        job,
        invoices,
        payments,
        today,
    } = payload;

    let job = match normalize_job(&job) {
        Ok(job) => job,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };

    let (snapshot, skipped) = build_snapshot(None, &[], &invoices, &payments);
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let reconciliation =
        reconcile_job(&job, &snapshot.invoices, &snapshot.payments, today, &config);

    let response = ReconcileJobResponse {
        today,
        job: reconciliation.state(),
        invoices: reconciliation.invoice_views(),
        indicators: generate_status_indicators(std::slice::from_ref(&reconciliation)),
        skipped,
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReconcileClientRequest {
    #[serde(default)]
    pub(crate) client: Option<Value>,
    #[serde(default)]
    pub(crate) jobs: Vec<Value>,
    #[serde(default)]
    pub(crate) invoices: Vec<Value>,
    #[serde(default)]
    pub(crate) payments: Vec<Value>,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReconcileClientResponse {
    pub(crate) today: NaiveDate,
    pub(crate) summary: ClientFinancialSummary,
    pub(crate) jobs: Vec<JobFinancialState>,
    pub(crate) indicators: Vec<Indicator>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) skipped: Vec<SkippedRecord>,
}

pub(crate) async fn reconcile_client_handler(
    State(config): State<Arc<EngineConfig>>,
    Json(payload): Json<ReconcileClientRequest>,
) -> Response {
    let ReconcileClientRequest {
        client,
        jobs,
        invoices,
        payments,
        today,
    } = payload;

    let (snapshot, skipped) = build_snapshot(client.as_ref(), &jobs, &invoices, &payments);
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let reconciliation = reconcile_client(
        snapshot.client.as_ref(),
        &snapshot.jobs,
        &snapshot.invoices,
        &snapshot.payments,
        today,
        &config,
    );

    let response = ReconcileClientResponse {
        today,
        summary: reconciliation.summary.clone(),
        jobs: reconciliation.jobs.iter().map(|job| job.state()).collect(),
        indicators: generate_status_indicators(&reconciliation.jobs),
        skipped,
    };

    (StatusCode::OK, Json(response)).into_response()
}
