/// Tunable thresholds for classification, status derivation, and the
/// aggregation degradation policy.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Window, in days, within which an unpaid due date reports as due soon.
    pub due_soon_days: i64,
    /// Fraction of contract value a lone untagged invoice must reach to be
    /// classified as the full bill.
    pub dominant_invoice_ratio: f64,
    /// Above this many jobs the client aggregate takes the simplified path.
    pub detail_max_jobs: usize,
    /// Above this many invoices the client aggregate takes the simplified path.
    pub detail_max_invoices: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            due_soon_days: 7,
            dominant_invoice_ratio: 0.8,
            detail_max_jobs: 50,
            detail_max_invoices: 200,
        }
    }
}
