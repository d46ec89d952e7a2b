mod fields;
pub mod statement;

use serde_json::Value;
use tracing::warn;

use super::domain::{
    BillType, Client, ClientId, Invoice, InvoiceId, Job, JobId, JobLifecycle, Payment, PaymentId,
};

pub(crate) use fields::{parse_datetime, parse_money_str};

/// Raised when a raw record cannot be mapped onto its canonical type. A
/// failed record is excluded from the snapshot rather than failing the
/// whole computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    #[error("{entity} record is missing required field '{field}'")]
    MissingRequiredField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity} record has a non-positive amount")]
    InvalidAmount { entity: &'static str },
}

/// One excluded raw record, reported alongside the snapshot so callers can
/// surface degraded confidence instead of silently dropping data.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SkippedRecord {
    pub entity: &'static str,
    pub index: usize,
    pub reason: String,
}

/// A consistent, fully-typed view of the four record collections. Built once
/// per call; the engine never mutates or caches it.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub client: Option<Client>,
    pub jobs: Vec<Job>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
}

pub fn normalize_client(raw: &Value) -> Result<Client, NormalizationError> {
    let id = required_id(raw, "client")?;
    let name = fields::string_field(raw, &["name", "fullName", "full_name", "companyName"])
        .unwrap_or_default();

    Ok(Client {
        id: ClientId(id),
        name,
        email: fields::string_field(raw, &["email", "emailAddress", "email_address"]),
        phone: fields::string_field(raw, &["phone", "phoneNumber", "phone_number", "mobile"]),
    })
}

pub fn normalize_job(raw: &Value) -> Result<Job, NormalizationError> {
    let id = required_id(raw, "job")?;

    Ok(Job {
        id: JobId(id),
        client_id: fields::string_field(raw, fields::CLIENT_REF_FIELDS).map(ClientId),
        title: fields::string_field(raw, &["title", "name", "jobTitle", "job_title"])
            .unwrap_or_else(|| "Untitled Job".to_string()),
        contract_value: resolve_contract_value(raw),
        lifecycle: parse_lifecycle(raw),
    })
}

pub fn normalize_invoice(raw: &Value) -> Result<Invoice, NormalizationError> {
    let id = required_id(raw, "invoice")?;

    Ok(Invoice {
        id: InvoiceId(id),
        job_id: fields::string_field(raw, fields::JOB_REF_FIELDS).map(JobId),
        total: fields::money_field(raw, &["total", "amount", "grandTotal", "grand_total"])
            .unwrap_or(0),
        bill_type: fields::string_field(raw, &["billType", "bill_type", "type", "kind"])
            .as_deref()
            .and_then(BillType::parse),
        number: fields::string_field(raw, &["number", "invoiceNumber", "invoice_number", "ref"]),
        description: fields::string_field(raw, &["description", "title", "summary"]),
        notes: fields::string_field(raw, &["notes", "note", "memo"]),
        due_date: fields::date_field(raw, &["dueDate", "due_date", "due"]),
        created_at: fields::datetime_field(
            raw,
            &["createdAt", "created_at", "issuedAt", "issued_at", "date"],
        ),
    })
}

pub fn normalize_payment(raw: &Value) -> Result<Payment, NormalizationError> {
    let id = required_id(raw, "payment")?;
    let amount = fields::money_field(raw, &["amount", "value", "paid"]).ok_or(
        NormalizationError::MissingRequiredField {
            entity: "payment",
            field: "amount",
        },
    )?;

    if amount <= 0 {
        return Err(NormalizationError::InvalidAmount { entity: "payment" });
    }

    Ok(Payment {
        id: PaymentId(id),
        invoice_id: fields::string_field(raw, fields::INVOICE_REF_FIELDS).map(InvoiceId),
        job_id: fields::string_field(raw, fields::JOB_REF_FIELDS).map(JobId),
        amount,
        date: fields::date_field(raw, &["date", "paidAt", "paid_at", "paymentDate", "payment_date"]),
    })
}

/// Walk the contract-value priority chain. The first field present with a
/// non-zero monetary value wins; a job with no usable candidate is valued
/// at zero and will report as not invoiced.
fn resolve_contract_value(raw: &Value) -> i64 {
    for candidates in fields::CONTRACT_VALUE_FIELDS {
        if let Some(value) = fields::money_field(raw, candidates) {
            if value != 0 {
                return value;
            }
        }
    }
    0
}

fn parse_lifecycle(raw: &Value) -> JobLifecycle {
    let tag = match fields::string_field(raw, &["status", "lifecycle", "stage", "state"]) {
        Some(tag) => tag,
        None => return JobLifecycle::Unknown,
    };

    match tag.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
        "quote_pending" | "quoted" | "quote" => JobLifecycle::QuotePending,
        "scheduled" | "booked" => JobLifecycle::Scheduled,
        "in_progress" | "started" | "active" => JobLifecycle::InProgress,
        "completed" | "complete" | "done" => JobLifecycle::Completed,
        "cancelled" | "canceled" => JobLifecycle::Cancelled,
        _ => JobLifecycle::Unknown,
    }
}

fn required_id(raw: &Value, entity: &'static str) -> Result<String, NormalizationError> {
    fields::string_field(raw, fields::ID_FIELDS).ok_or(NormalizationError::MissingRequiredField {
        entity,
        field: "id",
    })
}

/// Normalize the four raw collections into a snapshot, excluding records
/// that fail and reporting each exclusion.
pub fn build_snapshot(
    client: Option<&Value>,
    jobs: &[Value],
    invoices: &[Value],
    payments: &[Value],
) -> (Snapshot, Vec<SkippedRecord>) {
    let mut skipped = Vec::new();
    let mut snapshot = Snapshot::default();

    if let Some(raw) = client {
        match normalize_client(raw) {
            Ok(client) => snapshot.client = Some(client),
            Err(err) => push_skip(&mut skipped, "client", 0, err),
        }
    }

    for (index, raw) in jobs.iter().enumerate() {
        match normalize_job(raw) {
            Ok(job) => snapshot.jobs.push(job),
            Err(err) => push_skip(&mut skipped, "job", index, err),
        }
    }

    for (index, raw) in invoices.iter().enumerate() {
        match normalize_invoice(raw) {
            Ok(invoice) => snapshot.invoices.push(invoice),
            Err(err) => push_skip(&mut skipped, "invoice", index, err),
        }
    }

    for (index, raw) in payments.iter().enumerate() {
        match normalize_payment(raw) {
            Ok(payment) => snapshot.payments.push(payment),
            Err(err) => push_skip(&mut skipped, "payment", index, err),
        }
    }

    (snapshot, skipped)
}

fn push_skip(
    skipped: &mut Vec<SkippedRecord>,
    entity: &'static str,
    index: usize,
    err: NormalizationError,
) {
    warn!(entity, index, %err, "excluding record from snapshot");
    skipped.push(SkippedRecord {
        entity,
        index,
        reason: err.to_string(),
    });
}
