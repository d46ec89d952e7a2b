use super::common::{date, datetime, due_invoice, invoice, job, payment, tagged_invoice};
use crate::reconcile::config::EngineConfig;
use crate::reconcile::domain::BillType;
use crate::reconcile::indicators::{
    generate_status_indicators, IndicatorKind, IndicatorSeverity,
};
use crate::reconcile::report::{reconcile_job, JobReconciliation};

fn reconciled(
    job_title: &str,
    job_id: &str,
    contract_value: i64,
    invoices: Vec<crate::reconcile::domain::Invoice>,
    payments: Vec<crate::reconcile::domain::Payment>,
) -> JobReconciliation {
    reconcile_job(
        &job(job_id, job_title, contract_value),
        &invoices,
        &payments,
        date(2025, 5, 12),
        &EngineConfig::default(),
    )
}

#[test]
fn fully_paid_job_emits_exactly_one_indicator() {
    let entry = reconciled(
        "Kitchen Fit",
        "j-1",
        100_000,
        vec![
            invoice("inv-1", "j-1", 30_000, datetime(2025, 5, 1)),
            invoice("inv-2", "j-1", 70_000, datetime(2025, 5, 2)),
        ],
        vec![payment("p-1", None, 100_000, date(2025, 5, 10))],
    );

    let indicators = generate_status_indicators(&[entry]);
    assert_eq!(indicators.len(), 1);
    assert_eq!(indicators[0].kind, IndicatorKind::FullyPaid);
    assert_eq!(indicators[0].severity, IndicatorSeverity::Positive);
    assert_eq!(indicators[0].text, "Kitchen Fit: Fully Paid");
    assert!(indicators[0].target_invoice_id.is_none());
}

#[test]
fn job_without_invoices_emits_nothing() {
    let entry = reconciled("Survey", "j-1", 50_000, vec![], vec![]);
    assert!(generate_status_indicators(&[entry]).is_empty());
}

#[test]
fn overdue_deposit_beats_an_open_remaining_invoice() {
    let deposit = {
        let mut inv = tagged_invoice("inv-1", "j-1", 30_000, datetime(2025, 5, 1), BillType::Deposit);
        inv.due_date = Some(date(2025, 5, 5));
        inv
    };
    let remaining = tagged_invoice("inv-2", "j-1", 70_000, datetime(2025, 5, 2), BillType::Remaining);

    let entry = reconciled("Loft Conversion", "j-1", 100_000, vec![deposit, remaining], vec![]);
    let indicators = generate_status_indicators(&[entry]);

    assert_eq!(indicators.len(), 1);
    assert_eq!(indicators[0].kind, IndicatorKind::DepositOverdue);
    assert_eq!(indicators[0].severity, IndicatorSeverity::Critical);
    assert_eq!(
        indicators[0].target_invoice_id.as_ref().map(|id| id.0.as_str()),
        Some("inv-1")
    );
}

#[test]
fn settled_deposit_with_nothing_else_issued_reads_deposit_paid() {
    let deposit = tagged_invoice("inv-1", "j-1", 30_000, datetime(2025, 5, 1), BillType::Deposit);
    let entry = reconciled(
        "Garden Wall",
        "j-1",
        100_000,
        vec![deposit],
        vec![payment("p-1", Some("inv-1"), 30_000, date(2025, 5, 3))],
    );

    let indicators = generate_status_indicators(&[entry]);
    assert_eq!(indicators.len(), 1);
    assert_eq!(indicators[0].kind, IndicatorKind::DepositPaid);
    assert_eq!(indicators[0].severity, IndicatorSeverity::Info);
    assert_eq!(
        indicators[0].target_invoice_id.as_ref().map(|id| id.0.as_str()),
        Some("inv-1")
    );
}

#[test]
fn list_is_sorted_by_urgency_then_title() {
    let fully_paid = reconciled(
        "Annex",
        "j-3",
        50_000,
        vec![invoice("inv-5", "j-3", 50_000, datetime(2025, 5, 1))],
        vec![payment("p-5", Some("inv-5"), 50_000, date(2025, 5, 2))],
    );
    let overdue_full = reconciled(
        "Bathroom Refurb",
        "j-1",
        50_000,
        vec![due_invoice("inv-1", "j-1", 45_000, datetime(2025, 5, 1), date(2025, 5, 2))],
        vec![],
    );
    let deposit_sent = reconciled(
        "Kitchen Fit",
        "j-2",
        100_000,
        vec![tagged_invoice("inv-3", "j-2", 30_000, datetime(2025, 5, 1), BillType::Deposit)],
        vec![],
    );
    let overdue_full_later_title = reconciled(
        "Conservatory",
        "j-4",
        50_000,
        vec![due_invoice("inv-7", "j-4", 45_000, datetime(2025, 5, 1), date(2025, 5, 2))],
        vec![],
    );

    let indicators = generate_status_indicators(&[
        fully_paid,
        deposit_sent,
        overdue_full_later_title,
        overdue_full,
    ]);

    let kinds: Vec<_> = indicators.iter().map(|entry| entry.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IndicatorKind::Overdue,
            IndicatorKind::Overdue,
            IndicatorKind::DepositSent,
            IndicatorKind::FullyPaid,
        ]
    );
    assert_eq!(indicators[0].text, "Bathroom Refurb: Overdue");
    assert_eq!(indicators[1].text, "Conservatory: Overdue");
}

#[test]
fn kind_order_is_the_documented_urgency_contract() {
    let mut kinds = vec![
        IndicatorKind::FullyPaid,
        IndicatorKind::DepositSent,
        IndicatorKind::Overdue,
        IndicatorKind::RemainingSent,
        IndicatorKind::DepositPaid,
        IndicatorKind::RemainingOverdue,
        IndicatorKind::FullUnpaid,
        IndicatorKind::DepositOverdue,
    ];
    kinds.sort();
    assert_eq!(
        kinds,
        vec![
            IndicatorKind::Overdue,
            IndicatorKind::DepositOverdue,
            IndicatorKind::RemainingOverdue,
            IndicatorKind::FullUnpaid,
            IndicatorKind::DepositSent,
            IndicatorKind::RemainingSent,
            IndicatorKind::DepositPaid,
            IndicatorKind::FullyPaid,
        ]
    );
}
