mod summary;
pub mod views;

use chrono::NaiveDate;

use super::allocation::{allocate, total_paid, InvoiceFinancialState};
use super::classify::{classify_invoice, InvoiceKind};
use super::config::EngineConfig;
use super::domain::{Client, Invoice, Job, Payment};
use super::status::{derive_job_status, nearest_unpaid_due_date, JobStatus};
use views::{InvoiceStateView, JobFinancialState};

pub use summary::{reconcile_client, ClientReconciliation};

/// One invoice's allocation result together with its classification and
/// due-date standing.
#[derive(Debug, Clone)]
pub struct InvoiceReconciliation {
    pub kind: InvoiceKind,
    pub state: InvoiceFinancialState,
    pub due_date: Option<NaiveDate>,
    pub overdue: bool,
}

impl InvoiceReconciliation {
    pub fn to_view(&self) -> InvoiceStateView {
        InvoiceStateView {
            invoice_id: self.state.invoice_id.clone(),
            kind: self.kind,
            kind_label: self.kind.label(),
            amount_paid: self.state.amount_paid,
            outstanding: self.state.outstanding,
            is_paid: self.state.is_paid,
            due_date: self.due_date,
            overdue: self.overdue,
        }
    }
}

/// Full reconciliation of a single job: allocation, classification, and
/// derived status. Built from a snapshot and discarded after use.
#[derive(Debug, Clone)]
pub struct JobReconciliation {
    pub job: Job,
    pub status: JobStatus,
    pub total_paid: i64,
    pub outstanding: i64,
    pub due_date: Option<NaiveDate>,
    pub days_until_due: Option<i64>,
    pub invoices: Vec<InvoiceReconciliation>,
}

impl JobReconciliation {
    pub fn state(&self) -> JobFinancialState {
        JobFinancialState {
            job_id: self.job.id.clone(),
            title: self.job.title.clone(),
            lifecycle: self.job.lifecycle,
            status: self.status,
            status_label: self.status.label(),
            outstanding: self.outstanding,
            total_paid: self.total_paid,
            total_value: self.job.contract_value,
            due_date: self.due_date,
            days_until_due: self.days_until_due,
        }
    }

    pub fn invoice_views(&self) -> Vec<InvoiceStateView> {
        self.invoices
            .iter()
            .map(InvoiceReconciliation::to_view)
            .collect()
    }
}

/// Reconcile one job. `invoices` may be the client-wide set; anything
/// referencing a different job is ignored. `payments` must already be
/// scoped to this job by the caller.
pub fn reconcile_job(
    job: &Job,
    invoices: &[Invoice],
    payments: &[Payment],
    today: NaiveDate,
    config: &EngineConfig,
) -> JobReconciliation {
    let own_invoices: Vec<Invoice> = invoices
        .iter()
        .filter(|invoice| {
            invoice
                .job_id
                .as_ref()
                .map(|id| *id == job.id)
                .unwrap_or(true)
        })
        .cloned()
        .collect();

    let states = allocate(&own_invoices, payments);
    let paid = total_paid(payments);
    let status = derive_job_status(
        job.contract_value,
        &own_invoices,
        &states,
        paid,
        today,
        config,
    );

    let due_date = nearest_unpaid_due_date(&own_invoices, &states);
    let days_until_due = due_date.map(|due| (due - today).num_days());

    let mut reconciled = Vec::with_capacity(own_invoices.len());
    let mut outstanding = 0;
    for invoice in &own_invoices {
        let state = match states.get(&invoice.id) {
            Some(state) => state.clone(),
            None => continue,
        };
        outstanding += state.outstanding;

        let overdue = invoice
            .due_date
            .map(|due| due < today && state.outstanding > 0)
            .unwrap_or(false);

        reconciled.push(InvoiceReconciliation {
            kind: classify_invoice(invoice, &own_invoices, job.contract_value, config),
            state,
            due_date: invoice.due_date,
            overdue,
        });
    }

    JobReconciliation {
        job: job.clone(),
        status,
        total_paid: paid,
        outstanding,
        due_date,
        days_until_due,
        invoices: reconciled,
    }
}

/// Convenience wrapper returning only the flat job view the job screen
/// renders from.
pub fn compute_job_financial_state(
    job: &Job,
    invoices: &[Invoice],
    payments: &[Payment],
    today: NaiveDate,
    config: &EngineConfig,
) -> JobFinancialState {
    reconcile_job(job, invoices, payments, today, config).state()
}

/// Convenience wrapper returning only the client summary.
pub fn compute_client_financial_summary(
    client: Option<&Client>,
    jobs: &[Job],
    invoices: &[Invoice],
    payments: &[Payment],
    today: NaiveDate,
    config: &EngineConfig,
) -> views::ClientFinancialSummary {
    reconcile_client(client, jobs, invoices, payments, today, config).summary
}
