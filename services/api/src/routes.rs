use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::infra::AppState;
use siteledger::reconcile::{
    build_snapshot, generate_status_indicators, reconcile_client, reconcile_router,
    ClientFinancialSummary, Indicator, JobFinancialState, SkippedRecord, SummaryFidelity,
};

pub(crate) fn with_reconcile_routes(state: &AppState) -> axum::Router {
    reconcile_router(state.engine.clone())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/clients/summary",
            axum::routing::post(client_summary_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClientSummaryRequest {
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
pub(crate) struct ClientSummaryResponse {
    pub(crate) today: NaiveDate,
    /// True when the aggregation budget was exceeded and the zeroed
    /// fallback is being shown. The UI must present this as degraded
    /// confidence, not as an authoritative zero balance.
    pub(crate) timed_out: bool,
    pub(crate) summary: ClientFinancialSummary,
    pub(crate) jobs: Vec<JobFinancialState>,
    pub(crate) indicators: Vec<Indicator>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) skipped: Vec<SkippedRecord>,
}

/// Client overview endpoint. The reconciliation itself is pure and fast,
/// but snapshot sizes are caller-controlled, so the whole computation runs
/// under the configured budget with a zeroed fallback when it fires.
pub(crate) async fn client_summary_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ClientSummaryRequest>,
) -> Json<ClientSummaryResponse> {
    let today = payload.today.unwrap_or_else(|| Local::now().date_naive());
    let engine = state.engine.clone();

    let work = move || {
        let ClientSummaryRequest {
            client,
            jobs,
            invoices,
            payments,
            ..
        } = payload;

        let (snapshot, skipped) = build_snapshot(client.as_ref(), &jobs, &invoices, &payments);
        let result = reconcile_client(
            snapshot.client.as_ref(),
            &snapshot.jobs,
            &snapshot.invoices,
            &snapshot.payments,
            today,
            &engine,
        );
        let indicators = generate_status_indicators(&result.jobs);
        let jobs = result.jobs.iter().map(|job| job.state()).collect();

        ClientSummaryResponse {
            today,
            timed_out: false,
            summary: result.summary,
            jobs,
            indicators,
            skipped,
        }
    };

    let outcome = if state.aggregation_timeout.is_zero() {
        // A zero budget disables aggregation outright.
        None
    } else {
        match tokio::time::timeout(state.aggregation_timeout, tokio::task::spawn_blocking(work))
            .await
        {
            Ok(Ok(response)) => Some(response),
            Ok(Err(join_error)) => {
                warn!(%join_error, "client summary worker failed");
                None
            }
            Err(_) => None,
        }
    };

    match outcome {
        Some(response) => Json(response),
        None => {
            warn!("client summary budget exceeded, returning zeroed fallback");
            Json(ClientSummaryResponse {
                today,
                timed_out: true,
                summary: ClientFinancialSummary::zeroed(SummaryFidelity::Simplified),
                jobs: Vec::new(),
                indicators: Vec::new(),
                skipped: Vec::new(),
            })
        }
    }
}
