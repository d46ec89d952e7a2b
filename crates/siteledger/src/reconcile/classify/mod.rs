mod rules;

use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::domain::Invoice;
use rules::{RuleContext, RULES};

/// Categorical label for an invoice, used for status-indicator wording and
/// urgency ordering, never for financial totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    Deposit,
    Remaining,
    Full,
    Custom,
}

impl InvoiceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Remaining => "Remaining Balance",
            Self::Full => "Full Invoice",
            Self::Custom => "Custom",
        }
    }

    /// `Custom` carries no special urgency semantics, so the status rollup
    /// treats it like a remaining-balance invoice.
    pub const fn rollup(self) -> Self {
        match self {
            Self::Custom => Self::Remaining,
            other => other,
        }
    }
}

/// Classify an invoice against its siblings (all invoices on the same job,
/// including the invoice itself).
///
/// The heuristics run in a fixed priority order, first match wins. The
/// order is historical contract: invoices with unusual relative amounts or
/// jobs with three-plus invoices can be misclassified, and changing the
/// order would silently re-label existing records.
pub fn classify_invoice(
    invoice: &Invoice,
    siblings: &[Invoice],
    contract_value: i64,
    config: &EngineConfig,
) -> InvoiceKind {
    let ctx = RuleContext {
        invoice,
        siblings,
        contract_value,
        config,
    };

    for (_, rule) in RULES {
        if let Some(kind) = rule(&ctx) {
            return kind;
        }
    }

    InvoiceKind::Custom
}

/// Names of the classification rules in evaluation order, exposed so the
/// priority chain stays a visible, testable artifact.
pub fn rule_order() -> Vec<&'static str> {
    RULES.iter().map(|(name, _)| *name).collect()
}
