use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// Identifier wrapper for jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for invoices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InvoiceId(pub String);

/// Identifier wrapper for payments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaymentId(pub String);

/// Canonical client record after normalization. Read-only input to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Lifecycle of the work itself, independent of payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobLifecycle {
    QuotePending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Unknown,
}

impl JobLifecycle {
    pub const fn label(self) -> &'static str {
        match self {
            Self::QuotePending => "Quote Pending",
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }
}

/// Canonical job record. `contract_value` is in minor units (pence) and has
/// already been resolved through the historical field priority chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub client_id: Option<ClientId>,
    pub title: String,
    pub contract_value: i64,
    pub lifecycle: JobLifecycle,
}

/// Explicit invoice tag carried by some historical records. Unreliable; the
/// classifier treats it as one signal among several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillType {
    Deposit,
    Remaining,
    Full,
}

impl BillType {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "deposit" => Some(Self::Deposit),
            "remaining" | "remainder" => Some(Self::Remaining),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// Canonical invoice record. `total` is in minor units and never changes
/// after creation; corrections are issued as new invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub job_id: Option<JobId>,
    pub total: i64,
    pub bill_type: Option<BillType>,
    pub number: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_at: Option<NaiveDateTime>,
}

impl Invoice {
    /// Ordering key for payment allocation: creation time ascending, invoice
    /// id as the deterministic tie-break. Invoices without a creation
    /// timestamp sort first so legacy records are settled before newer ones.
    pub(crate) fn allocation_key(&self) -> (NaiveDateTime, &str) {
        (
            self.created_at.unwrap_or(NaiveDateTime::MIN),
            self.id.0.as_str(),
        )
    }
}

/// Canonical payment record. `amount` is in minor units and is always
/// positive; non-positive amounts are rejected during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub invoice_id: Option<InvoiceId>,
    pub job_id: Option<JobId>,
    pub amount: i64,
    pub date: Option<NaiveDate>,
}
