use chrono::{NaiveDate, NaiveDateTime};

use crate::reconcile::domain::{
    BillType, Client, ClientId, Invoice, InvoiceId, Job, JobId, JobLifecycle, Payment, PaymentId,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(9, 0, 0).expect("valid time")
}

pub(super) fn client(id: &str, name: &str) -> Client {
    Client {
        id: ClientId(id.to_string()),
        name: name.to_string(),
        email: None,
        phone: None,
    }
}

pub(super) fn job(id: &str, title: &str, contract_value: i64) -> Job {
    Job {
        id: JobId(id.to_string()),
        client_id: Some(ClientId("c-1".to_string())),
        title: title.to_string(),
        contract_value,
        lifecycle: JobLifecycle::InProgress,
    }
}

pub(super) fn invoice(id: &str, job_id: &str, total: i64, created: NaiveDateTime) -> Invoice {
    Invoice {
        id: InvoiceId(id.to_string()),
        job_id: Some(JobId(job_id.to_string())),
        total,
        bill_type: None,
        number: None,
        description: None,
        notes: None,
        due_date: None,
        created_at: Some(created),
    }
}

pub(super) fn tagged_invoice(
    id: &str,
    job_id: &str,
    total: i64,
    created: NaiveDateTime,
    bill_type: BillType,
) -> Invoice {
    Invoice {
        bill_type: Some(bill_type),
        ..invoice(id, job_id, total, created)
    }
}

pub(super) fn due_invoice(
    id: &str,
    job_id: &str,
    total: i64,
    created: NaiveDateTime,
    due: NaiveDate,
) -> Invoice {
    Invoice {
        due_date: Some(due),
        ..invoice(id, job_id, total, created)
    }
}

pub(super) fn payment(id: &str, invoice_id: Option<&str>, amount: i64, on: NaiveDate) -> Payment {
    Payment {
        id: PaymentId(id.to_string()),
        invoice_id: invoice_id.map(|raw| InvoiceId(raw.to_string())),
        job_id: None,
        amount,
        date: Some(on),
    }
}
