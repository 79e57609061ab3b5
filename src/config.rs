use serde::{Deserialize, Serialize};

/// how the key resolver treats unparseable charge dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateFallback {
    /// place the charge in the current system month, keeping the view
    /// available when old store data is malformed
    #[default]
    CurrentMonth,
    /// surface `InvoiceError::InvalidDate` to the caller
    Strict,
}

/// engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub date_fallback: DateFallback,
    /// category assigned to the expense recorded when an invoice is paid
    pub settlement_category: String,
    /// window used by the due-soon presentation helper, in days
    pub due_soon_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            date_fallback: DateFallback::CurrentMonth,
            settlement_category: "credit card payment".to_string(),
            due_soon_days: 3,
        }
    }
}

impl EngineConfig {
    /// strict date validation for callers that need correctness guarantees
    pub fn strict() -> Self {
        Self {
            date_fallback: DateFallback::Strict,
            ..Self::default()
        }
    }
}
