use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::allocation::{total_outstanding, InvoiceFinancialState};
use super::config::EngineConfig;
use super::domain::{Invoice, InvoiceId};

/// Payment status of a job, derived fresh from the current snapshot on
/// every call. There is no stored state machine to drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    NotInvoiced,
    Pending,
    DueSoon,
    Overdue,
    DepositPaid,
    PartiallyPaid,
    FullyPaid,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotInvoiced => "Not Invoiced",
            Self::Pending => "Pending",
            Self::DueSoon => "Due Soon",
            Self::Overdue => "Overdue",
            Self::DepositPaid => "Deposit Paid",
            Self::PartiallyPaid => "Partially Paid",
            Self::FullyPaid => "Fully Paid",
        }
    }
}

/// Derive a job's payment status.
///
/// `total_paid` is the raw sum of the job's payments; per-invoice settlement
/// comes from the allocator. A zero contract value short-circuits to
/// `NotInvoiced` so no downstream ratio can degenerate.
pub fn derive_job_status(
    contract_value: i64,
    invoices: &[Invoice],
    states: &BTreeMap<InvoiceId, InvoiceFinancialState>,
    total_paid: i64,
    today: NaiveDate,
    config: &EngineConfig,
) -> JobStatus {
    if invoices.is_empty() || contract_value <= 0 {
        return JobStatus::NotInvoiced;
    }

    let outstanding = total_outstanding(states);

    if total_paid >= contract_value {
        return JobStatus::FullyPaid;
    }

    if total_paid > 0 {
        return if outstanding == 0 {
            // Payments cover everything issued so far, but the contract
            // value has not been fully invoiced yet.
            JobStatus::DepositPaid
        } else {
            JobStatus::PartiallyPaid
        };
    }

    if outstanding > 0 {
        return match nearest_unpaid_due_date(invoices, states) {
            Some(due) if due < today => JobStatus::Overdue,
            Some(due) if (due - today).num_days() <= config.due_soon_days => JobStatus::DueSoon,
            _ => JobStatus::Pending,
        };
    }

    JobStatus::Pending
}

/// Earliest due date among invoices that still carry an outstanding balance.
pub fn nearest_unpaid_due_date(
    invoices: &[Invoice],
    states: &BTreeMap<InvoiceId, InvoiceFinancialState>,
) -> Option<NaiveDate> {
    invoices
        .iter()
        .filter(|invoice| {
            states
                .get(&invoice.id)
                .map(|state| state.outstanding > 0)
                .unwrap_or(false)
        })
        .filter_map(|invoice| invoice.due_date)
        .min()
}
