use chrono::NaiveDate;
use serde_json::json;
use siteledger::reconcile::{
    build_snapshot, compute_client_financial_summary, compute_job_financial_state,
    generate_status_indicators, reconcile_client, reconcile_job, EngineConfig, IndicatorKind,
    JobStatus, SummaryFidelity,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn engine() -> EngineConfig {
    EngineConfig::default()
}

#[test]
fn single_invoice_paid_in_full_reports_fully_paid() {
    let (snapshot, skipped) = build_snapshot(
        None,
        &[json!({ "id": "j-1", "title": "Kitchen Fit", "total": 1000 })],
        &[json!({
            "id": "inv-1", "jobId": "j-1", "total": 1000,
            "createdAt": "2025-05-01",
        })],
        &[json!({ "id": "p-1", "invoiceId": "inv-1", "amount": 1000, "date": "2025-05-10" })],
    );
    assert!(skipped.is_empty());

    let state = compute_job_financial_state(
        &snapshot.jobs[0],
        &snapshot.invoices,
        &snapshot.payments,
        day(2025, 5, 12),
        &engine(),
    );

    assert_eq!(state.status, JobStatus::FullyPaid);
    assert_eq!(state.outstanding, 0);
    assert_eq!(state.total_paid, 100_000);
}

#[test]
fn paid_deposit_with_open_remaining_balance_is_partially_paid() {
    let (snapshot, _) = build_snapshot(
        None,
        &[json!({ "id": "j-1", "title": "Kitchen Fit", "total": 1000 })],
        &[
            json!({
                "id": "inv-dep", "jobId": "j-1", "total": 300,
                "billType": "deposit", "createdAt": "2025-05-01",
            }),
            json!({
                "id": "inv-rem", "jobId": "j-1", "total": 700,
                "billType": "remaining", "createdAt": "2025-05-02",
            }),
        ],
        &[json!({ "id": "p-1", "invoiceId": "inv-dep", "amount": 300, "date": "2025-05-05" })],
    );

    let reconciliation = reconcile_job(
        &snapshot.jobs[0],
        &snapshot.invoices,
        &snapshot.payments,
        day(2025, 5, 12),
        &engine(),
    );

    let deposit = reconciliation
        .invoices
        .iter()
        .find(|entry| entry.state.invoice_id.0 == "inv-dep")
        .expect("deposit reconciled");
    assert!(deposit.state.is_paid);
    assert_eq!(deposit.state.outstanding, 0);

    let remaining = reconciliation
        .invoices
        .iter()
        .find(|entry| entry.state.invoice_id.0 == "inv-rem")
        .expect("remaining reconciled");
    assert!(!remaining.state.is_paid);
    assert_eq!(remaining.state.outstanding, 70_000);

    assert_eq!(reconciliation.status, JobStatus::PartiallyPaid);
}

#[test]
fn unpaid_invoice_due_yesterday_is_overdue() {
    let (snapshot, _) = build_snapshot(
        None,
        &[json!({ "id": "j-1", "title": "Garden Wall", "total": 500 })],
        &[json!({
            "id": "inv-1", "jobId": "j-1", "total": 500,
            "createdAt": "2025-05-01", "dueDate": "2025-05-11",
        })],
        &[],
    );

    let state = compute_job_financial_state(
        &snapshot.jobs[0],
        &snapshot.invoices,
        &snapshot.payments,
        day(2025, 5, 12),
        &engine(),
    );

    assert_eq!(state.status, JobStatus::Overdue);
    assert_eq!(state.days_until_due, Some(-1));
}

#[test]
fn unpaid_invoice_due_in_three_days_is_due_soon() {
    let (snapshot, _) = build_snapshot(
        None,
        &[json!({ "id": "j-1", "title": "Garden Wall", "total": 500 })],
        &[json!({
            "id": "inv-1", "jobId": "j-1", "total": 500,
            "createdAt": "2025-05-01", "dueDate": "2025-05-15",
        })],
        &[],
    );

    let state = compute_job_financial_state(
        &snapshot.jobs[0],
        &snapshot.invoices,
        &snapshot.payments,
        day(2025, 5, 12),
        &engine(),
    );

    assert_eq!(state.status, JobStatus::DueSoon);
    assert_eq!(state.days_until_due, Some(3));
}

#[test]
fn client_summary_counts_jobs_with_balances() {
    let (snapshot, _) = build_snapshot(
        Some(&json!({ "id": "c-1", "name": "B. Hargreaves" })),
        &[
            json!({ "id": "j-1", "clientId": "c-1", "title": "Kitchen Fit", "total": 10 }),
            json!({ "id": "j-2", "clientId": "c-1", "title": "Bathroom", "total": 5 }),
            json!({ "id": "j-3", "clientId": "c-1", "title": "Garden Wall", "total": 10 }),
        ],
        &[
            json!({ "id": "inv-1", "jobId": "j-1", "total": 10, "createdAt": "2025-05-01" }),
            json!({ "id": "inv-2", "jobId": "j-2", "total": 5, "createdAt": "2025-05-01" }),
            json!({ "id": "inv-3", "jobId": "j-3", "total": 10, "createdAt": "2025-05-01" }),
        ],
        &[
            json!({ "id": "p-1", "invoiceId": "inv-1", "amount": 9, "date": "2025-05-10" }),
            json!({ "id": "p-2", "invoiceId": "inv-2", "amount": 5, "date": "2025-05-11" }),
            json!({ "id": "p-3", "invoiceId": "inv-3", "amount": 7.50, "date": "2025-05-12" }),
        ],
    );

    let summary = compute_client_financial_summary(
        snapshot.client.as_ref(),
        &snapshot.jobs,
        &snapshot.invoices,
        &snapshot.payments,
        day(2025, 5, 15),
        &engine(),
    );

    // Outstanding £1 + £0 + £2.50 in minor units.
    assert_eq!(summary.total_outstanding, 350);
    assert_eq!(summary.active_jobs_with_balance, 2);
    assert_eq!(summary.job_count, 3);
    assert_eq!(summary.last_payment_date, Some(day(2025, 5, 11)));
}

#[test]
fn oversized_snapshot_degrades_without_changing_totals() {
    let mut jobs = Vec::new();
    let mut invoices = Vec::new();
    let mut payments = Vec::new();
    for n in 0..60 {
        jobs.push(json!({ "id": format!("j-{n}"), "title": format!("Job {n}"), "total": 100 }));
        for i in 0..5 {
            invoices.push(json!({
                "id": format!("inv-{n}-{i}"), "jobId": format!("j-{n}"),
                "total": 20, "createdAt": "2025-05-01",
            }));
        }
        payments.push(json!({
            "id": format!("p-{n}"), "jobId": format!("j-{n}"),
            "amount": 30, "date": "2025-05-10",
        }));
    }

    let (snapshot, skipped) = build_snapshot(None, &jobs, &invoices, &payments);
    assert!(skipped.is_empty());
    assert_eq!(snapshot.invoices.len(), 300);

    let result = reconcile_client(
        None,
        &snapshot.jobs,
        &snapshot.invoices,
        &snapshot.payments,
        day(2025, 5, 15),
        &engine(),
    );

    assert_eq!(result.summary.fidelity, SummaryFidelity::Simplified);
    assert!(result.jobs.is_empty());
    // Each job: £30 pooled against five £20 invoices leaves £70 open.
    assert_eq!(result.summary.total_outstanding, 60 * 7_000);
    assert_eq!(result.summary.total_paid, 60 * 3_000);
    assert_eq!(result.summary.active_jobs_with_balance, 60);
}

#[test]
fn fully_paid_client_emits_a_single_positive_indicator_per_job() {
    let (snapshot, _) = build_snapshot(
        None,
        &[json!({ "id": "j-1", "title": "Kitchen Fit", "total": 1000 })],
        &[
            json!({ "id": "inv-1", "jobId": "j-1", "total": 300, "createdAt": "2025-05-01" }),
            json!({ "id": "inv-2", "jobId": "j-1", "total": 700, "createdAt": "2025-05-02" }),
        ],
        &[json!({ "id": "p-1", "jobId": "j-1", "amount": 1000, "date": "2025-05-10" })],
    );

    let result = reconcile_client(
        None,
        &snapshot.jobs,
        &snapshot.invoices,
        &snapshot.payments,
        day(2025, 5, 12),
        &engine(),
    );

    let indicators = generate_status_indicators(&result.jobs);
    assert_eq!(indicators.len(), 1);
    assert_eq!(indicators[0].kind, IndicatorKind::FullyPaid);
    assert_eq!(indicators[0].text, "Kitchen Fit: Fully Paid");
}
