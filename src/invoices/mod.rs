pub mod aggregate;
pub mod consolidate;
pub mod status;

pub use aggregate::{aggregate_invoices, card_debt, invoice_for, Invoice};
pub use consolidate::{consolidate, CardSummary, ConsolidatedView};
pub use status::{derive_status, derive_view, InvoiceStatus, InvoiceView};
