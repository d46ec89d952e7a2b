use super::super::config::EngineConfig;
use super::super::domain::{BillType, Invoice};
use super::InvoiceKind;

pub(crate) struct RuleContext<'a> {
    pub(crate) invoice: &'a Invoice,
    pub(crate) siblings: &'a [Invoice],
    pub(crate) contract_value: i64,
    pub(crate) config: &'a EngineConfig,
}

type Rule = fn(&RuleContext<'_>) -> Option<InvoiceKind>;

/// The heuristic chain, evaluated top to bottom. Do not reorder.
pub(crate) const RULES: &[(&str, Rule)] = &[
    ("explicit_full", explicit_full),
    ("dominant_single", dominant_single),
    ("deposit_tag_or_text", deposit_tag_or_text),
    ("remaining_tag_or_text", remaining_tag_or_text),
    ("untagged_pair_split", untagged_pair_split),
];

fn explicit_full(ctx: &RuleContext<'_>) -> Option<InvoiceKind> {
    (ctx.invoice.bill_type == Some(BillType::Full)).then_some(InvoiceKind::Full)
}

/// A lone untagged invoice covering most of the contract value is treated
/// as the full bill.
fn dominant_single(ctx: &RuleContext<'_>) -> Option<InvoiceKind> {
    if ctx.siblings.len() != 1 || ctx.contract_value <= 0 {
        return None;
    }
    if ctx.invoice.bill_type.is_some() || mentions_deposit(ctx.invoice) {
        return None;
    }

    let threshold = ctx.contract_value as f64 * ctx.config.dominant_invoice_ratio;
    (ctx.invoice.total as f64 >= threshold).then_some(InvoiceKind::Full)
}

fn deposit_tag_or_text(ctx: &RuleContext<'_>) -> Option<InvoiceKind> {
    if ctx.invoice.bill_type == Some(BillType::Deposit) || mentions_deposit(ctx.invoice) {
        return Some(InvoiceKind::Deposit);
    }
    None
}

fn remaining_tag_or_text(ctx: &RuleContext<'_>) -> Option<InvoiceKind> {
    if ctx.invoice.bill_type == Some(BillType::Remaining) {
        return Some(InvoiceKind::Remaining);
    }

    let description = ctx.invoice.description.as_deref().unwrap_or_default();
    if contains_ignore_case(description, "remaining") || contains_ignore_case(description, "balance")
    {
        return Some(InvoiceKind::Remaining);
    }
    None
}

/// Exactly two untagged invoices on a job: the smaller is the deposit, the
/// larger the remaining balance. Equal amounts fall back to the
/// lexicographically lower id so repeated runs agree.
fn untagged_pair_split(ctx: &RuleContext<'_>) -> Option<InvoiceKind> {
    if ctx.siblings.len() != 2 {
        return None;
    }
    if ctx.siblings.iter().any(|sibling| sibling.bill_type.is_some()) {
        return None;
    }

    let other = ctx
        .siblings
        .iter()
        .find(|sibling| sibling.id != ctx.invoice.id)?;

    let kind = match ctx.invoice.total.cmp(&other.total) {
        std::cmp::Ordering::Less => InvoiceKind::Deposit,
        std::cmp::Ordering::Greater => InvoiceKind::Remaining,
        std::cmp::Ordering::Equal => {
            if ctx.invoice.id.0 < other.id.0 {
                InvoiceKind::Deposit
            } else {
                InvoiceKind::Remaining
            }
        }
    };

    Some(kind)
}

fn mentions_deposit(invoice: &Invoice) -> bool {
    [&invoice.description, &invoice.notes, &invoice.number]
        .into_iter()
        .flatten()
        .any(|text| contains_ignore_case(text, "deposit"))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(needle)
}
