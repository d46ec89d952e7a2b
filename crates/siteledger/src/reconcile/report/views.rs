use chrono::NaiveDate;
use serde::Serialize;

use super::super::classify::InvoiceKind;
use super::super::domain::{InvoiceId, JobId, JobLifecycle};
use super::super::status::JobStatus;

/// Flat, serializable settlement view of one invoice, consumed by UI
/// screens and document export.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceStateView {
    pub invoice_id: InvoiceId,
    pub kind: InvoiceKind,
    pub kind_label: &'static str,
    pub amount_paid: i64,
    pub outstanding: i64,
    pub is_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub overdue: bool,
}

/// Flat, serializable financial state of one job.
#[derive(Debug, Clone, Serialize)]
pub struct JobFinancialState {
    pub job_id: JobId,
    pub title: String,
    pub lifecycle: JobLifecycle,
    pub status: JobStatus,
    pub status_label: &'static str,
    pub outstanding: i64,
    pub total_paid: i64,
    pub total_value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_due: Option<i64>,
}

/// Whether a client summary was computed with the full per-job breakdown or
/// the simplified large-snapshot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryFidelity {
    Full,
    Simplified,
}

impl SummaryFidelity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Simplified => "Simplified",
        }
    }

    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::Simplified)
    }
}

/// Client-level financial rollup. `total_paid` is summed from payment
/// records directly; `total_outstanding` is summed from per-invoice
/// outstanding, never derived by subtraction.
#[derive(Debug, Clone, Serialize)]
pub struct ClientFinancialSummary {
    pub total_outstanding: i64,
    pub total_paid: i64,
    pub total_value: i64,
    pub job_count: usize,
    pub active_jobs_with_balance: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<NaiveDate>,
    pub fidelity: SummaryFidelity,
}

impl ClientFinancialSummary {
    /// Fallback shape callers present when a timeout or upstream failure
    /// prevents real aggregation. Explicitly zeroed rather than absent so
    /// render code never branches on missing fields.
    pub fn zeroed(fidelity: SummaryFidelity) -> Self {
        Self {
            total_outstanding: 0,
            total_paid: 0,
            total_value: 0,
            job_count: 0,
            active_jobs_with_balance: 0,
            last_payment_date: None,
            fidelity,
        }
    }
}
