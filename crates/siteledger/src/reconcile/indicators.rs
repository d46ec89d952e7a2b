use serde::Serialize;

use super::classify::InvoiceKind;
use super::domain::{InvoiceId, JobId};
use super::report::JobReconciliation;
use super::status::JobStatus;

/// Indicator kinds in urgency order. The variant order IS the sort order
/// the UI relies on; new kinds must be inserted at the right urgency, not
/// appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Overdue,
    DepositOverdue,
    RemainingOverdue,
    FullUnpaid,
    DepositSent,
    RemainingSent,
    DepositPaid,
    FullyPaid,
}

impl IndicatorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::DepositOverdue => "Deposit Overdue",
            Self::RemainingOverdue => "Remaining Balance Overdue",
            Self::FullUnpaid => "Invoice Unpaid",
            Self::DepositSent => "Deposit Sent",
            Self::RemainingSent => "Remaining Balance Sent",
            Self::DepositPaid => "Deposit Paid",
            Self::FullyPaid => "Fully Paid",
        }
    }

    pub const fn severity(self) -> IndicatorSeverity {
        match self {
            Self::Overdue | Self::DepositOverdue | Self::RemainingOverdue => {
                IndicatorSeverity::Critical
            }
            Self::FullUnpaid | Self::DepositSent | Self::RemainingSent => {
                IndicatorSeverity::Warning
            }
            Self::DepositPaid => IndicatorSeverity::Info,
            Self::FullyPaid => IndicatorSeverity::Positive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorSeverity {
    Critical,
    Warning,
    Info,
    Positive,
}

impl IndicatorSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Info => "Info",
            Self::Positive => "Positive",
        }
    }
}

/// One actionable "needs attention" entry for the client overview. At most
/// one indicator is emitted per job.
#[derive(Debug, Clone, Serialize)]
pub struct Indicator {
    pub job_id: JobId,
    pub kind: IndicatorKind,
    pub text: String,
    pub severity: IndicatorSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_invoice_id: Option<InvoiceId>,
}

/// Generate the prioritized indicator list for a set of reconciled jobs.
///
/// Sorted most urgent first by kind, ties broken by job title ascending,
/// case-sensitive, so the UI can always show the top entry without
/// re-deriving priority.
pub fn generate_status_indicators(jobs: &[JobReconciliation]) -> Vec<Indicator> {
    let mut entries: Vec<(String, Indicator)> = jobs
        .iter()
        .filter_map(|job| {
            indicator_for(job).map(|(kind, target_invoice_id)| {
                let indicator = Indicator {
                    job_id: job.job.id.clone(),
                    kind,
                    text: format!("{}: {}", job.job.title, kind.label()),
                    severity: kind.severity(),
                    target_invoice_id,
                };
                (job.job.title.clone(), indicator)
            })
        })
        .collect();

    entries.sort_by(|(title_a, a), (title_b, b)| {
        a.kind.cmp(&b.kind).then_with(|| title_a.cmp(title_b))
    });
    entries.into_iter().map(|(_, indicator)| indicator).collect()
}

/// Pick the single kind that best represents a job's actionability.
fn indicator_for(job: &JobReconciliation) -> Option<(IndicatorKind, Option<InvoiceId>)> {
    if job.invoices.is_empty() {
        return None;
    }

    if job.status == JobStatus::FullyPaid {
        return Some((IndicatorKind::FullyPaid, None));
    }

    let mut best: Option<(IndicatorKind, Option<InvoiceId>)> = None;
    for entry in &job.invoices {
        if entry.state.is_paid {
            continue;
        }

        let kind = match (entry.kind, entry.overdue) {
            (InvoiceKind::Full, true) => IndicatorKind::Overdue,
            (InvoiceKind::Deposit, true) => IndicatorKind::DepositOverdue,
            (InvoiceKind::Remaining | InvoiceKind::Custom, true) => {
                IndicatorKind::RemainingOverdue
            }
            (InvoiceKind::Full, false) => IndicatorKind::FullUnpaid,
            (InvoiceKind::Deposit, false) => IndicatorKind::DepositSent,
            (InvoiceKind::Remaining | InvoiceKind::Custom, false) => IndicatorKind::RemainingSent,
        };

        let candidate = (kind, Some(entry.state.invoice_id.clone()));
        match &best {
            Some((current, _)) if *current <= kind => {}
            _ => best = Some(candidate),
        }
    }

    if best.is_none() && job.status == JobStatus::DepositPaid {
        let deposit = job
            .invoices
            .iter()
            .find(|entry| entry.kind == InvoiceKind::Deposit && entry.state.is_paid);
        return Some((
            IndicatorKind::DepositPaid,
            deposit.map(|entry| entry.state.invoice_id.clone()),
        ));
    }

    best
}
