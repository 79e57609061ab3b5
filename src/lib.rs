pub mod config;
pub mod cycle;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod invoices;
pub mod payments;
pub mod types;

// re-export key types
pub use config::{DateFallback, EngineConfig};
pub use cycle::{cycle_dates, resolve_key, resolve_key_or, CycleDates, InvoiceKey};
pub use decimal::Money;
pub use engine::InvoiceEngine;
pub use errors::{InvoiceError, Result};
pub use events::{Event, EventStore};
pub use invoices::{
    aggregate_invoices, card_debt, consolidate, derive_status, derive_view, CardSummary,
    ConsolidatedView, Invoice, InvoiceStatus, InvoiceView,
};
pub use payments::{pay_invoice, Settlement};
pub use types::{
    Account, AccountId, CardId, CreditCard, Installment, Transaction, TransactionId,
    TransactionKind,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
