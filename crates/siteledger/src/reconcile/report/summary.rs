use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;

use super::super::allocation::{allocate, total_paid};
use super::super::config::EngineConfig;
use super::super::domain::{Client, Invoice, InvoiceId, Job, JobId, Payment};
use super::views::{ClientFinancialSummary, SummaryFidelity};
use super::{reconcile_job, JobReconciliation};

/// Client-level reconciliation. On the simplified path `jobs` is empty and
/// the summary is marked accordingly; totals are identical either way.
#[derive(Debug, Clone)]
pub struct ClientReconciliation {
    pub client: Option<Client>,
    pub summary: ClientFinancialSummary,
    pub jobs: Vec<JobReconciliation>,
}

/// Roll a client's jobs, invoices, and payments into a financial summary.
///
/// Snapshots above the configured size thresholds take a simplified path
/// that skips classification, status derivation, and per-job views to bound
/// latency; the totals are computed from the same allocation either way, so
/// they never diverge between the two paths.
pub fn reconcile_client(
    client: Option<&Client>,
    jobs: &[Job],
    invoices: &[Invoice],
    payments: &[Payment],
    today: NaiveDate,
    config: &EngineConfig,
) -> ClientReconciliation {
    let jobs: Vec<&Job> = jobs
        .iter()
        .filter(|job| match (client, job.client_id.as_ref()) {
            (Some(client), Some(owner)) => *owner == client.id,
            _ => true,
        })
        .collect();

    let invoices_by_job = group_invoices(&jobs, invoices);
    let payments_by_job = group_payments(&jobs, invoices, payments);
    let empty_invoices: Vec<Invoice> = Vec::new();
    let empty_payments: Vec<Payment> = Vec::new();

    let simplified =
        jobs.len() > config.detail_max_jobs || invoices.len() > config.detail_max_invoices;
    if simplified {
        warn!(
            jobs = jobs.len(),
            invoices = invoices.len(),
            "snapshot above detail thresholds, using simplified aggregation"
        );
    }

    let mut total_outstanding = 0;
    let mut total_value = 0;
    let mut active_jobs_with_balance = 0;
    let mut paid_invoices: HashMap<InvoiceId, bool> = HashMap::new();
    let mut reconciled_jobs = Vec::new();

    for job in &jobs {
        let job_invoices = invoices_by_job.get(&job.id).unwrap_or(&empty_invoices);
        let job_payments = payments_by_job.get(&job.id).unwrap_or(&empty_payments);
        total_value += job.contract_value;

        let job_outstanding = if simplified {
            let states = allocate(job_invoices, job_payments);
            for state in states.values() {
                paid_invoices.insert(state.invoice_id.clone(), state.is_paid);
            }
            states.values().map(|state| state.outstanding).sum()
        } else {
            let reconciliation = reconcile_job(job, job_invoices, job_payments, today, config);
            for entry in &reconciliation.invoices {
                paid_invoices.insert(entry.state.invoice_id.clone(), entry.state.is_paid);
            }
            let outstanding = reconciliation.outstanding;
            reconciled_jobs.push(reconciliation);
            outstanding
        };

        total_outstanding += job_outstanding;
        if job_outstanding > 0 {
            active_jobs_with_balance += 1;
        }
    }

    let last_payment_date = payments
        .iter()
        .filter(|payment| {
            payment
                .invoice_id
                .as_ref()
                .and_then(|id| paid_invoices.get(id))
                .copied()
                .unwrap_or(false)
        })
        .filter_map(|payment| payment.date)
        .max();

    let summary = ClientFinancialSummary {
        total_outstanding,
        total_paid: total_paid(payments),
        total_value,
        job_count: jobs.len(),
        active_jobs_with_balance,
        last_payment_date,
        fidelity: if simplified {
            SummaryFidelity::Simplified
        } else {
            SummaryFidelity::Full
        },
    };

    ClientReconciliation {
        client: client.cloned(),
        summary,
        jobs: reconciled_jobs,
    }
}

fn group_invoices(jobs: &[&Job], invoices: &[Invoice]) -> HashMap<JobId, Vec<Invoice>> {
    let mut grouped: HashMap<JobId, Vec<Invoice>> = HashMap::new();
    for invoice in invoices {
        match &invoice.job_id {
            Some(job_id) if jobs.iter().any(|job| job.id == *job_id) => {
                grouped.entry(job_id.clone()).or_default().push(invoice.clone());
            }
            _ => {
                // An invoice that references no known job is unreachable
                // from any job rollup and would break the per-job sum
                // invariant, so it is excluded rather than guessed at.
                warn!(invoice = %invoice.id.0, "invoice has no resolvable job, excluding");
            }
        }
    }
    grouped
}

/// Attribute payments to jobs: an explicit job reference wins, then the
/// linked invoice's job. Unattributable payments still count toward the
/// client's paid total but join no job's allocation pool.
fn group_payments(
    jobs: &[&Job],
    invoices: &[Invoice],
    payments: &[Payment],
) -> HashMap<JobId, Vec<Payment>> {
    let invoice_jobs: HashMap<&InvoiceId, &JobId> = invoices
        .iter()
        .filter_map(|invoice| invoice.job_id.as_ref().map(|job_id| (&invoice.id, job_id)))
        .collect();

    let mut grouped: HashMap<JobId, Vec<Payment>> = HashMap::new();
    for payment in payments {
        let target = payment
            .job_id
            .as_ref()
            .filter(|job_id| jobs.iter().any(|job| job.id == **job_id))
            .or_else(|| {
                payment
                    .invoice_id
                    .as_ref()
                    .and_then(|id| invoice_jobs.get(id).copied())
            });

        match target {
            Some(job_id) => grouped.entry(job_id.clone()).or_default().push(payment.clone()),
            None => {
                warn!(payment = %payment.id.0, "payment has no resolvable job, pool skipped");
            }
        }
    }
    grouped
}
