use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use serde_json::json;

use siteledger::error::AppError;
use siteledger::reconcile::{
    build_snapshot, generate_status_indicators, reconcile_client, EngineConfig,
    StatementImporter,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct StatementArgs {
    /// Path to a payment-statement CSV export
    pub(crate) path: PathBuf,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let issued = today - Duration::days(14);
    let due_past = today - Duration::days(1);
    let due_soon = today + Duration::days(3);

    let client = json!({ "id": "c-100", "name": "B. Hargreaves" });
    let jobs = vec![
        json!({ "id": "j-1", "clientId": "c-100", "title": "Kitchen Fit", "total": 12_000 }),
        json!({ "id": "j-2", "clientId": "c-100", "title": "Bathroom Refurb", "total": 4_500 }),
        json!({ "id": "j-3", "clientId": "c-100", "title": "Garden Wall", "total": 1_800 }),
    ];
    let invoices = vec![
        json!({
            "id": "inv-10", "jobId": "j-1", "total": 3_600, "billType": "deposit",
            "createdAt": issued.format("%Y-%m-%d").to_string(),
        }),
        json!({
            "id": "inv-11", "jobId": "j-1", "total": 8_400, "billType": "remaining",
            "createdAt": issued.format("%Y-%m-%d").to_string(),
            "dueDate": due_soon.format("%Y-%m-%d").to_string(),
        }),
        json!({
            "id": "inv-20", "jobId": "j-2", "total": 4_500,
            "createdAt": issued.format("%Y-%m-%d").to_string(),
            "dueDate": due_past.format("%Y-%m-%d").to_string(),
        }),
        json!({
            "id": "inv-30", "jobId": "j-3", "total": 1_800,
            "createdAt": issued.format("%Y-%m-%d").to_string(),
        }),
    ];
    let payments = vec![
        json!({
            "id": "p-1", "invoiceId": "inv-10", "amount": 3_600,
            "date": issued.format("%Y-%m-%d").to_string(),
        }),
        json!({
            "id": "p-2", "invoiceId": "inv-30", "amount": 1_800,
            "date": issued.format("%Y-%m-%d").to_string(),
        }),
    ];

    let (snapshot, skipped) = build_snapshot(Some(&client), &jobs, &invoices, &payments);
    let result = reconcile_client(
        snapshot.client.as_ref(),
        &snapshot.jobs,
        &snapshot.invoices,
        &snapshot.payments,
        today,
        &EngineConfig::default(),
    );

    println!("Client financial summary ({today})");
    println!(
        "  outstanding {}  paid {}  contract value {}",
        pounds(result.summary.total_outstanding),
        pounds(result.summary.total_paid),
        pounds(result.summary.total_value),
    );
    println!(
        "  jobs {}  with open balance {}  fidelity {}",
        result.summary.job_count,
        result.summary.active_jobs_with_balance,
        result.summary.fidelity.label(),
    );
    if let Some(last) = result.summary.last_payment_date {
        println!("  last payment received {last}");
    }

    println!("\nJobs");
    for job in &result.jobs {
        let state = job.state();
        println!(
            "  {:<16} {:<14} outstanding {}",
            state.title,
            state.status_label,
            pounds(state.outstanding),
        );
    }

    println!("\nNeeds attention");
    for indicator in generate_status_indicators(&result.jobs) {
        println!("  [{}] {}", indicator.severity.label(), indicator.text);
    }

    if !skipped.is_empty() {
        println!("\nSkipped {} record(s) during normalization", skipped.len());
    }

    Ok(())
}

pub(crate) fn run_statement_import(args: StatementArgs) -> Result<(), AppError> {
    let payments = StatementImporter::from_path(&args.path)?;

    println!("Imported {} payment(s) from {}", payments.len(), args.path.display());
    let mut total = 0;
    for payment in &payments {
        total += payment.amount;
        let linkage = payment
            .invoice_id
            .as_ref()
            .map(|id| id.0.as_str())
            .unwrap_or("unlinked");
        let on = payment
            .date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "undated".to_string());
        println!(
            "  {:<12} {:>12}  {}  invoice: {}",
            payment.id.0,
            pounds(payment.amount),
            on,
            linkage,
        );
    }
    println!("Total {}", pounds(total));

    Ok(())
}

fn pounds(pence: i64) -> String {
    format!("£{}.{:02}", pence / 100, (pence % 100).abs())
}
