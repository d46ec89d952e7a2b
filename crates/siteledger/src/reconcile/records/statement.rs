use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Deserializer;

use super::super::domain::{InvoiceId, JobId, Payment, PaymentId};
use super::{parse_datetime, parse_money_str};

/// Importer for payment statements exported from banking or card-terminal
/// software. Column names vary by provider; the serde aliases below cover
/// the exports seen in the field.
pub struct StatementImporter;

#[derive(Debug)]
pub enum StatementImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: usize, reason: String },
}

impl std::fmt::Display for StatementImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementImportError::Io(err) => write!(f, "failed to read statement: {}", err),
            StatementImportError::Csv(err) => write!(f, "invalid statement CSV data: {}", err),
            StatementImportError::Row { line, reason } => {
                write!(f, "statement row {} could not be imported: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for StatementImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatementImportError::Io(err) => Some(err),
            StatementImportError::Csv(err) => Some(err),
            StatementImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for StatementImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for StatementImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl StatementImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Payment>, StatementImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Payment>, StatementImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut payments = Vec::new();

        for (index, record) in csv_reader.deserialize::<StatementRow>().enumerate() {
            let line = index + 2;
            let row = record?;
            payments.push(row.into_payment(line)?);
        }

        Ok(payments)
    }
}

#[derive(Debug, Deserialize)]
struct StatementRow {
    #[serde(
        rename = "Reference",
        alias = "Transaction ID",
        alias = "Payment ID",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    reference: Option<String>,
    #[serde(
        rename = "Amount",
        alias = "Paid",
        alias = "Credit",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    amount: Option<String>,
    #[serde(
        rename = "Date",
        alias = "Payment Date",
        alias = "Settled On",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    date: Option<String>,
    #[serde(
        rename = "Invoice",
        alias = "Invoice Ref",
        alias = "Invoice Number",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    invoice: Option<String>,
    #[serde(
        rename = "Job",
        alias = "Job Ref",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    job: Option<String>,
}

impl StatementRow {
    fn into_payment(self, line: usize) -> Result<Payment, StatementImportError> {
        let amount = self
            .amount
            .as_deref()
            .and_then(parse_money_str)
            .ok_or_else(|| StatementImportError::Row {
                line,
                reason: "missing or unparseable amount".to_string(),
            })?;

        if amount <= 0 {
            return Err(StatementImportError::Row {
                line,
                reason: "amount must be positive".to_string(),
            });
        }

        let id = self
            .reference
            .unwrap_or_else(|| format!("statement-row-{line}"));

        Ok(Payment {
            id: PaymentId(id),
            invoice_id: self.invoice.map(InvoiceId),
            job_id: self.job.map(JobId),
            amount,
            date: self.date.as_deref().and_then(parse_datetime).map(|dt| dt.date()),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
