use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::cycle::InvoiceKey;
use crate::decimal::Money;
use crate::errors::Result;
use crate::invoices::aggregate::card_debt;
use crate::invoices::status::{derive_view, InvoiceStatus};
use crate::types::{CardId, CreditCard, Transaction};

/// one card's line in the "all cards" view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub card_id: CardId,
    pub name: String,
    /// open amount of the target cycle, carried debt included
    pub open_total: Money,
    /// full open debt across every cycle
    pub total_debt: Money,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    /// whether this card contributes to the consolidated sums
    pub included: bool,
}

/// "all cards" aggregate for one target cycle. No single status is
/// computed across heterogeneous cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedView {
    pub key: InvoiceKey,
    /// sum of included cards' target-cycle open amounts
    pub open_total: Money,
    /// sum of included cards' full open debt
    pub total_debt: Money,
    pub cards: Vec<CardSummary>,
}

/// consolidate every card's target-cycle invoice into one view.
///
/// Cards with `include_in_total = false` contribute nothing to the
/// consolidated sums but still report their own figures; hidden cards
/// are left out of the summary list entirely.
pub fn consolidate(
    transactions: &[Transaction],
    cards: &[CreditCard],
    key: InvoiceKey,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<ConsolidatedView> {
    let mut open_total = Money::ZERO;
    let mut total_debt = Money::ZERO;
    let mut summaries = Vec::new();

    for card in cards {
        let view = derive_view(transactions, cards, &card.id, key, today, config)?;
        let debt = card_debt(transactions, &card.id);

        if card.include_in_total {
            open_total += view.invoice.total;
            total_debt += debt;
        }

        if card.is_visible {
            summaries.push(CardSummary {
                card_id: card.id.clone(),
                name: card.name.clone(),
                open_total: view.invoice.total,
                total_debt: debt,
                status: view.status,
                due_date: view.due_date,
                included: card.include_in_total,
            });
        }
    }

    Ok(ConsolidatedView {
        key,
        open_total,
        total_debt,
        cards: summaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;

    fn charge(id: &str, card: &str, date: &str, amount: i64, paid: bool) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            amount: Money::from_major(amount),
            kind: TransactionKind::CreditCard,
            card_id: Some(card.to_string()),
            account_id: None,
            category: None,
            description: String::new(),
            is_paid: paid,
            installment: None,
        }
    }

    fn key(year: i32, month: u32) -> InvoiceKey {
        InvoiceKey::new(year, month).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_consolidation_sums_match_per_card_totals() {
        let cards = vec![
            CreditCard::new("visa", "visa", 25, 10).unwrap(),
            CreditCard::new("amex", "amex", 20, 5).unwrap(),
        ];
        let txs = vec![
            charge("a", "visa", "2024-03-10", 100, false),
            charge("b", "amex", "2024-03-10", 40, false),
            charge("c", "amex", "2024-01-10", 10, true),
        ];
        let config = EngineConfig::default();

        let view = consolidate(&txs, &cards, key(2024, 3), today(), &config).unwrap();
        assert_eq!(view.open_total, Money::from_major(140));
        assert_eq!(view.total_debt, Money::from_major(140));
        assert_eq!(view.cards.len(), 2);

        let per_card_open: Money = view.cards.iter().map(|c| c.open_total).sum();
        assert_eq!(per_card_open, view.open_total);
    }

    #[test]
    fn test_excluded_card_keeps_its_own_figures() {
        let mut excluded = CreditCard::new("amex", "amex", 20, 5).unwrap();
        excluded.include_in_total = false;
        let cards = vec![CreditCard::new("visa", "visa", 25, 10).unwrap(), excluded];

        let txs = vec![
            charge("a", "visa", "2024-03-10", 100, false),
            charge("b", "amex", "2024-03-10", 40, false),
        ];
        let config = EngineConfig::default();

        let view = consolidate(&txs, &cards, key(2024, 3), today(), &config).unwrap();
        // consolidated sums skip the excluded card
        assert_eq!(view.open_total, Money::from_major(100));
        assert_eq!(view.total_debt, Money::from_major(100));

        // but its own summary is unaffected
        let amex = view.cards.iter().find(|c| c.card_id == "amex").unwrap();
        assert_eq!(amex.open_total, Money::from_major(40));
        assert_eq!(amex.total_debt, Money::from_major(40));
        assert!(!amex.included);
    }

    #[test]
    fn test_hidden_card_not_listed() {
        let mut hidden = CreditCard::new("amex", "amex", 20, 5).unwrap();
        hidden.is_visible = false;
        let cards = vec![CreditCard::new("visa", "visa", 25, 10).unwrap(), hidden];
        let txs = vec![charge("b", "amex", "2024-03-10", 40, false)];
        let config = EngineConfig::default();

        let view = consolidate(&txs, &cards, key(2024, 3), today(), &config).unwrap();
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].card_id, "visa");
        // a hidden card still counts toward the sums it is included in
        assert_eq!(view.open_total, Money::from_major(40));
    }
}
