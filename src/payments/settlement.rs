use std::collections::HashSet;

use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::cycle::InvoiceKey;
use crate::decimal::Money;
use crate::errors::{InvoiceError, Result};
use crate::events::{Event, EventStore};
use crate::invoices::aggregate::charge_key;
use crate::types::{Account, CreditCard, Transaction, TransactionId, TransactionKind};

/// outcome of a payment application: the full updated transaction list
/// plus the settlement expense appended to it. Produced whole or not at
/// all, so the caller can apply it as one state replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub transactions: Vec<Transaction>,
    /// the cash-flow side: one expense drawn from the card's bank account
    pub expense: Transaction,
    pub settled_ids: Vec<TransactionId>,
    pub amount: Money,
}

/// apply a payment against one card's invoice.
///
/// With `selected` ids this is a selective settlement of exactly those
/// charges. Without, it is a full-invoice payment sweeping every open
/// charge billed up to and including the target cycle, carried-over debt
/// included. A cycle with nothing open settles as a no-op (`Ok(None)`):
/// no flags flip and no expense is recorded.
#[allow(clippy::too_many_arguments)]
pub fn pay_invoice(
    transactions: &[Transaction],
    cards: &[CreditCard],
    accounts: &[Account],
    card_id: &str,
    key: InvoiceKey,
    selected: Option<&[TransactionId]>,
    time: &SafeTimeProvider,
    config: &EngineConfig,
    events: &mut EventStore,
) -> Result<Option<Settlement>> {
    let card = cards
        .iter()
        .find(|c| c.id == card_id)
        .ok_or_else(|| InvoiceError::CardNotFound {
            card_id: card_id.to_string(),
        })?;

    let now = time.now();
    let today = now.date_naive();
    let fallback = InvoiceKey::from_date(today);

    let mut settled_ids: Vec<TransactionId> = Vec::new();
    let mut amount = Money::ZERO;

    for tx in transactions
        .iter()
        .filter(|t| t.is_open_charge() && t.card_id.as_deref() == Some(card_id))
    {
        let settle = match selected {
            Some(ids) => ids.contains(&tx.id),
            None => charge_key(tx, card.closing_day, fallback, config)? <= key,
        };
        if settle {
            settled_ids.push(tx.id.clone());
            amount += tx.amount;
        }
    }

    if settled_ids.is_empty() || amount.is_zero() {
        return Ok(None);
    }

    let account_id = card
        .account_id
        .clone()
        .or_else(|| accounts.first().map(|a| a.id.clone()))
        .ok_or(InvoiceError::NoSettlementAccount)?;

    let expense = Transaction {
        id: uuid::Uuid::new_v4().to_string(),
        date: today.format("%Y-%m-%d").to_string(),
        amount,
        kind: TransactionKind::Expense,
        card_id: None,
        account_id: Some(account_id.clone()),
        category: Some(config.settlement_category.clone()),
        description: format!("{} invoice {}", card.name, key),
        is_paid: true,
        installment: None,
    };

    let settle_set: HashSet<&str> = settled_ids.iter().map(String::as_str).collect();
    let mut updated: Vec<Transaction> = transactions
        .iter()
        .map(|tx| {
            let mut tx = tx.clone();
            if settle_set.contains(tx.id.as_str()) {
                tx.is_paid = true;
                events.emit(Event::ChargeSettled {
                    transaction_id: tx.id.clone(),
                    card_id: card.id.clone(),
                    amount: tx.amount,
                    timestamp: now,
                });
            }
            tx
        })
        .collect();
    updated.push(expense.clone());

    events.emit(Event::InvoiceSettled {
        card_id: card.id.clone(),
        key,
        amount,
        charge_count: settled_ids.len(),
        timestamp: now,
    });
    events.emit(Event::SettlementRecorded {
        transaction_id: expense.id.clone(),
        account_id,
        amount,
        date: today,
    });

    Ok(Some(Settlement {
        transactions: updated,
        expense,
        settled_ids,
        amount,
    }))
}
