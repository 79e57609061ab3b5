use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{DateFallback, EngineConfig};
use crate::cycle::{resolve_key, resolve_key_or, InvoiceKey};
use crate::decimal::Money;
use crate::errors::{InvoiceError, Result};
use crate::types::{CardId, CreditCard, Transaction};

/// one card's charges for one billing cycle. Derived, never persisted:
/// the transaction list is the single source of truth and invoices are
/// recomputed from scratch on every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub card_id: CardId,
    pub key: InvoiceKey,
    /// charges billed to this cycle, plus forward-rolled older open
    /// charges when the cycle itself is still open
    pub items: Vec<Transaction>,
    /// open amount: unpaid items only
    pub total: Money,
    /// settled amount among the charges originally billed to this cycle
    pub total_paid: Money,
    pub is_fully_paid: bool,
}

impl Invoice {
    fn empty(card_id: CardId, key: InvoiceKey) -> Self {
        Self {
            card_id,
            key,
            items: Vec::new(),
            total: Money::ZERO,
            total_paid: Money::ZERO,
            is_fully_paid: false,
        }
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

/// resolve the key a charge bills to, honoring the configured fallback
pub(crate) fn charge_key(
    tx: &Transaction,
    closing_day: u8,
    fallback: InvoiceKey,
    config: &EngineConfig,
) -> Result<InvoiceKey> {
    match config.date_fallback {
        DateFallback::Strict => resolve_key(&tx.date, closing_day),
        DateFallback::CurrentMonth => Ok(resolve_key_or(&tx.date, closing_day, fallback)),
    }
}

/// group a snapshot of transactions into per-card, per-cycle invoices.
///
/// Charges referencing a card that no longer exists are skipped. After
/// bucketing, every cycle that is not fully paid absorbs the card's older
/// open charges into its item list and open total (forward-roll), so
/// unpaid debt keeps appearing in later cycles until it is settled.
pub fn aggregate_invoices(
    transactions: &[Transaction],
    cards: &[CreditCard],
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<BTreeMap<(CardId, InvoiceKey), Invoice>> {
    let by_id: HashMap<&str, &CreditCard> = cards.iter().map(|c| (c.id.as_str(), c)).collect();
    let fallback = InvoiceKey::from_date(today);

    let mut invoices: BTreeMap<(CardId, InvoiceKey), Invoice> = BTreeMap::new();
    let mut charges: Vec<(CardId, InvoiceKey, &Transaction)> = Vec::new();

    for tx in transactions.iter().filter(|t| t.is_card_charge()) {
        let Some(card) = tx.card_id.as_deref().and_then(|id| by_id.get(id)) else {
            continue;
        };
        let key = charge_key(tx, card.closing_day, fallback, config)?;

        let invoice = invoices
            .entry((card.id.clone(), key))
            .or_insert_with(|| Invoice::empty(card.id.clone(), key));
        if tx.is_paid {
            invoice.total_paid += tx.amount;
        } else {
            invoice.total += tx.amount;
        }
        invoice.items.push(tx.clone());
        charges.push((card.id.clone(), key, tx));
    }

    for invoice in invoices.values_mut() {
        invoice.is_fully_paid = invoice.has_items() && invoice.items.iter().all(|t| t.is_paid);
    }

    // forward-roll: older open charges fold into every later open cycle
    for ((card_id, key), invoice) in invoices.iter_mut() {
        if invoice.is_fully_paid {
            continue;
        }
        for (charge_card, charge_key, tx) in &charges {
            if charge_card == card_id
                && charge_key < key
                && !tx.is_paid
                && !invoice.items.iter().any(|it| it.id == tx.id)
            {
                invoice.total += tx.amount;
                invoice.items.push((*tx).clone());
            }
        }
    }

    Ok(invoices)
}

/// single-cycle view of one card, synthesizing an invoice when the target
/// period has no charges of its own but older open debt carries into it
pub fn invoice_for(
    transactions: &[Transaction],
    cards: &[CreditCard],
    card_id: &str,
    key: InvoiceKey,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<Invoice> {
    let card = cards
        .iter()
        .find(|c| c.id == card_id)
        .ok_or_else(|| InvoiceError::CardNotFound {
            card_id: card_id.to_string(),
        })?;
    let fallback = InvoiceKey::from_date(today);

    let mut own: Vec<Transaction> = Vec::new();
    let mut older: Vec<Transaction> = Vec::new();

    for tx in transactions
        .iter()
        .filter(|t| t.is_card_charge() && t.card_id.as_deref() == Some(card_id))
    {
        let resolved = charge_key(tx, card.closing_day, fallback, config)?;
        if resolved == key {
            own.push(tx.clone());
        } else if resolved < key && !tx.is_paid {
            older.push(tx.clone());
        }
    }

    let total_paid: Money = own.iter().filter(|t| t.is_paid).map(|t| t.amount).sum();
    let mut total: Money = own.iter().filter(|t| !t.is_paid).map(|t| t.amount).sum();
    let is_fully_paid = !own.is_empty() && own.iter().all(|t| t.is_paid);

    let mut items = own;
    if !is_fully_paid {
        for tx in older {
            total += tx.amount;
            items.push(tx);
        }
    }

    Ok(Invoice {
        card_id: card_id.to_string(),
        key,
        items,
        total,
        total_paid,
        is_fully_paid,
    })
}

/// one card's full open debt, across every cycle
pub fn card_debt(transactions: &[Transaction], card_id: &str) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_open_charge() && t.card_id.as_deref() == Some(card_id))
        .map(|t| t.amount)
        .sum()
}
