use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Accepted spellings for each canonical field, in lookup order. The data
/// layer has gone through several schema generations, so every entity
/// tolerates camelCase, snake_case, and a handful of legacy aliases.
pub(crate) const ID_FIELDS: &[&str] = &["id", "_id", "uuid"];
pub(crate) const CLIENT_REF_FIELDS: &[&str] =
    &["clientId", "client_id", "customerId", "customer_id"];
pub(crate) const JOB_REF_FIELDS: &[&str] = &["jobId", "job_id", "projectId", "project_id"];
pub(crate) const INVOICE_REF_FIELDS: &[&str] = &["invoiceId", "invoice_id", "invoiceRef"];

/// Priority chain for a job's canonical contract value. VAT-inclusive totals
/// must win over pre-VAT estimates, so the order is a hard contract: the
/// first non-null, non-zero candidate is taken. Each camelCase spelling is
/// tried together with its snake_case twin at the same priority.
pub(crate) const CONTRACT_VALUE_FIELDS: &[&[&str]] = &[
    &["total"],
    &["estimatedValue", "estimated_value"],
    &["value"],
    &["amount"],
    &["quoteTotal", "quote_total"],
    &["budget"],
];

pub(crate) fn raw_field<'a>(record: &'a Value, names: &[&str]) -> Option<&'a Value> {
    let map = record.as_object()?;
    names
        .iter()
        .find_map(|name| map.get(*name))
        .filter(|value| !value.is_null())
}

pub(crate) fn string_field(record: &Value, names: &[&str]) -> Option<String> {
    match raw_field(record, names)? {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Monetary values arrive as JSON numbers (pounds, possibly fractional) or
/// display strings ("£1,250.00"). Both are converted to integer minor units,
/// rounding half away from zero at the second decimal.
pub(crate) fn money_field(record: &Value, names: &[&str]) -> Option<i64> {
    parse_money(raw_field(record, names)?)
}

pub(crate) fn parse_money(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_f64().map(pounds_to_pence),
        Value::String(text) => parse_money_str(text),
        _ => None,
    }
}

pub(crate) fn parse_money_str(text: &str) -> Option<i64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '£' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().map(pounds_to_pence)
}

fn pounds_to_pence(pounds: f64) -> i64 {
    (pounds * 100.0).round() as i64
}

pub(crate) fn date_field(record: &Value, names: &[&str]) -> Option<NaiveDate> {
    string_field(record, names)
        .as_deref()
        .and_then(parse_datetime)
        .map(|dt| dt.date())
}

pub(crate) fn datetime_field(record: &Value, names: &[&str]) -> Option<NaiveDateTime> {
    string_field(record, names).as_deref().and_then(parse_datetime)
}

pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}
