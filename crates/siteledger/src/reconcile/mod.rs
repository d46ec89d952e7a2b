//! Payment reconciliation and financial-status pipeline.
//!
//! The stages run strictly downstream over an in-memory snapshot: record
//! normalization, payment allocation, invoice classification, status
//! derivation, client aggregation, and indicator generation. No stage
//! performs I/O or holds state between calls, so every invocation is
//! referentially transparent given its snapshot and reporting date.

pub mod allocation;
pub mod classify;
pub mod config;
pub mod domain;
pub mod indicators;
pub mod records;
pub mod report;
pub mod router;
pub mod status;

#[cfg(test)]
mod tests;

pub use allocation::{allocate, InvoiceFinancialState};
pub use classify::{classify_invoice, InvoiceKind};
pub use config::EngineConfig;
pub use domain::{
    BillType, Client, ClientId, Invoice, InvoiceId, Job, JobId, JobLifecycle, Payment, PaymentId,
};
pub use indicators::{generate_status_indicators, Indicator, IndicatorKind, IndicatorSeverity};
pub use records::{
    build_snapshot, normalize_client, normalize_invoice, normalize_job, normalize_payment,
    statement::{StatementImportError, StatementImporter},
    NormalizationError, SkippedRecord, Snapshot,
};
pub use report::views::{
    ClientFinancialSummary, InvoiceStateView, JobFinancialState, SummaryFidelity,
};
pub use report::{
    compute_client_financial_summary, compute_job_financial_state, reconcile_client, reconcile_job,
    ClientReconciliation, InvoiceReconciliation, JobReconciliation,
};
pub use router::reconcile_router;
pub use status::{derive_job_status, JobStatus};
