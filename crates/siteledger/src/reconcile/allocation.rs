use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::domain::{Invoice, InvoiceId, Payment};

/// Derived per-invoice settlement figures. Recomputed on every call and
/// safe to hand to export collaborators as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceFinancialState {
    pub invoice_id: InvoiceId,
    pub amount_paid: i64,
    pub outstanding: i64,
    pub is_paid: bool,
}

/// Allocate a job's payments to its invoices.
///
/// Payments carrying an `invoice_id` that matches one of the invoices are
/// credited to that invoice directly. Everything else forms a pooled amount
/// consumed against the invoices in creation order, earliest first, so the
/// answer is deterministic even when linkage is missing or stale. A direct
/// overpayment never spills into the pool; the invoice simply reports as
/// settled at its full total.
pub fn allocate(
    invoices: &[Invoice],
    payments: &[Payment],
) -> BTreeMap<InvoiceId, InvoiceFinancialState> {
    let mut states = BTreeMap::new();
    if invoices.is_empty() {
        return states;
    }

    let mut ordered: Vec<&Invoice> = invoices.iter().collect();
    ordered.sort_by(|a, b| a.allocation_key().cmp(&b.allocation_key()));

    let mut direct: HashMap<&InvoiceId, i64> = HashMap::new();
    let mut pool: i64 = 0;
    for payment in payments {
        match payment
            .invoice_id
            .as_ref()
            .and_then(|id| invoices.iter().find(|invoice| &invoice.id == id))
        {
            Some(invoice) => *direct.entry(&invoice.id).or_default() += payment.amount,
            None => pool += payment.amount,
        }
    }

    for invoice in ordered {
        let credited = direct.get(&invoice.id).copied().unwrap_or(0);
        let unmet = (invoice.total - credited).max(0);
        let consumed = unmet.min(pool);
        pool -= consumed;

        let amount_paid = (credited + consumed).min(invoice.total);
        let outstanding = (invoice.total - amount_paid).max(0);

        states.insert(
            invoice.id.clone(),
            InvoiceFinancialState {
                invoice_id: invoice.id.clone(),
                amount_paid,
                outstanding,
                is_paid: outstanding == 0,
            },
        );
    }

    states
}

/// Sum of a job's payments, the source of truth for "how much has been
/// paid". Never derived by subtraction from allocation figures.
pub fn total_paid(payments: &[Payment]) -> i64 {
    payments.iter().map(|payment| payment.amount).sum()
}

/// Sum of outstanding across a set of invoice states.
pub fn total_outstanding(states: &BTreeMap<InvoiceId, InvoiceFinancialState>) -> i64 {
    states.values().map(|state| state.outstanding).sum()
}
