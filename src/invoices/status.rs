use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::cycle::{cycle_dates, InvoiceKey};
use crate::errors::{InvoiceError, Result};
use crate::invoices::aggregate::{invoice_for, Invoice};
use crate::types::{CreditCard, Transaction};

/// invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// nothing billed and nothing carried into this cycle
    NoInvoice,
    /// open and not yet past its due date
    Pending,
    /// every billed charge settled
    Paid,
    /// open amount remains past the due date
    Overdue,
}

/// derive an invoice's status relative to "today".
///
/// Precedence: an empty invoice is never overdue regardless of its due
/// date, and a fully paid one is never overdue either.
pub fn derive_status(invoice: &Invoice, due_date: NaiveDate, today: NaiveDate) -> InvoiceStatus {
    if !invoice.has_items() && invoice.total.is_zero() {
        return InvoiceStatus::NoInvoice;
    }
    if invoice.is_fully_paid {
        return InvoiceStatus::Paid;
    }
    if due_date < today && invoice.total.is_positive() {
        return InvoiceStatus::Overdue;
    }
    InvoiceStatus::Pending
}

/// everything the presentation layer needs for one card and one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceView {
    pub invoice: Invoice,
    pub status: InvoiceStatus,
    pub closing_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl InvoiceView {
    /// pending and due within the next `days` days, for "due soon"
    /// reminders
    pub fn due_within(&self, days: u32, today: NaiveDate) -> bool {
        if self.status != InvoiceStatus::Pending {
            return false;
        }
        let remaining = (self.due_date - today).num_days();
        remaining >= 0 && remaining <= i64::from(days)
    }

    /// `due_within` with the window taken from the engine configuration
    pub fn due_soon(&self, today: NaiveDate, config: &EngineConfig) -> bool {
        self.due_within(config.due_soon_days, today)
    }
}

/// pure `(transactions, cards, target key, today) -> view model` function.
/// The caller owns all navigation state (selected card and cycle).
pub fn derive_view(
    transactions: &[Transaction],
    cards: &[CreditCard],
    card_id: &str,
    key: InvoiceKey,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<InvoiceView> {
    let card = cards
        .iter()
        .find(|c| c.id == card_id)
        .ok_or_else(|| InvoiceError::CardNotFound {
            card_id: card_id.to_string(),
        })?;

    let invoice = invoice_for(transactions, cards, card_id, key, today, config)?;
    let dates = cycle_dates(key, card);
    let status = derive_status(&invoice, dates.due_date, today);

    Ok(InvoiceView {
        invoice,
        status,
        closing_date: dates.closing_date,
        due_date: dates.due_date,
    })
}
