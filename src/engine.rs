use hourglass_rs::SafeTimeProvider;

use crate::config::EngineConfig;
use crate::cycle::InvoiceKey;
use crate::decimal::Money;
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::invoices::{card_debt, consolidate, derive_view, ConsolidatedView, InvoiceView};
use crate::payments::{pay_invoice, Settlement};
use crate::types::{Account, CreditCard, Transaction};

/// convenience facade over the pure functions for callers that hold a
/// card/account snapshot and inject time once instead of threading
/// "today" through every call
pub struct InvoiceEngine {
    cards: Vec<CreditCard>,
    accounts: Vec<Account>,
    config: EngineConfig,
    events: EventStore,
}

impl InvoiceEngine {
    pub fn new(cards: Vec<CreditCard>, accounts: Vec<Account>) -> Self {
        Self::with_config(cards, accounts, EngineConfig::default())
    }

    pub fn with_config(cards: Vec<CreditCard>, accounts: Vec<Account>, config: EngineConfig) -> Self {
        Self {
            cards,
            accounts,
            config,
            events: EventStore::new(),
        }
    }

    pub fn cards(&self) -> &[CreditCard] {
        &self.cards
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// drain events collected since the last call
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// key of the billing cycle the current month belongs to
    pub fn current_key(&self, time: &SafeTimeProvider) -> InvoiceKey {
        InvoiceKey::from_date(time.now().date_naive())
    }

    /// view model for one card and one cycle
    pub fn view(
        &self,
        transactions: &[Transaction],
        card_id: &str,
        key: InvoiceKey,
        time: &SafeTimeProvider,
    ) -> Result<InvoiceView> {
        derive_view(
            transactions,
            &self.cards,
            card_id,
            key,
            time.now().date_naive(),
            &self.config,
        )
    }

    /// "all cards" view for one cycle
    pub fn consolidated(
        &self,
        transactions: &[Transaction],
        key: InvoiceKey,
        time: &SafeTimeProvider,
    ) -> Result<ConsolidatedView> {
        consolidate(
            transactions,
            &self.cards,
            key,
            time.now().date_naive(),
            &self.config,
        )
    }

    /// one card's full open debt
    pub fn card_debt(&self, transactions: &[Transaction], card_id: &str) -> Money {
        card_debt(transactions, card_id)
    }

    /// apply a payment; see [`crate::payments::pay_invoice`]
    pub fn pay_invoice(
        &mut self,
        transactions: &[Transaction],
        card_id: &str,
        key: InvoiceKey,
        selected: Option<&[String]>,
        time: &SafeTimeProvider,
    ) -> Result<Option<Settlement>> {
        pay_invoice(
            transactions,
            &self.cards,
            &self.accounts,
            card_id,
            key,
            selected,
            time,
            &self.config,
            &mut self.events,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoices::InvoiceStatus;
    use crate::types::TransactionKind;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn charge(id: &str, date: &str, amount: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            amount: Money::from_major(amount),
            kind: TransactionKind::CreditCard,
            card_id: Some("visa".to_string()),
            account_id: None,
            category: None,
            description: String::new(),
            is_paid: false,
            installment: None,
        }
    }

    fn engine() -> InvoiceEngine {
        InvoiceEngine::new(
            vec![CreditCard::new("visa", "visa", 25, 10)
                .unwrap()
                .with_account("checking")],
            vec![Account {
                id: "checking".to_string(),
                name: "checking".to_string(),
            }],
        )
    }

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 4, 5, 12, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_engine_flow() {
        let mut engine = engine();
        let time = test_time();
        let txs = vec![charge("a", "2024-03-20", 100), charge("b", "2024-03-28", 50)];

        let current = engine.current_key(&time);
        assert_eq!(current.to_string(), "2024-04");

        // navigate back one month and inspect
        let view = engine.view(&txs, "visa", current.prev(), &time).unwrap();
        assert_eq!(view.status, InvoiceStatus::Overdue); // due 2024-03-10
        assert_eq!(view.invoice.total, Money::from_major(100));

        let consolidated = engine.consolidated(&txs, current, &time).unwrap();
        assert_eq!(consolidated.open_total, Money::from_major(150));
        assert_eq!(engine.card_debt(&txs, "visa"), Money::from_major(150));

        // settle march, then the carried debt is gone from april
        let settlement = engine
            .pay_invoice(&txs, "visa", current.prev(), None, &time)
            .unwrap()
            .expect("settlement");
        assert_eq!(settlement.amount, Money::from_major(100));

        let view = engine
            .view(&settlement.transactions, "visa", current, &time)
            .unwrap();
        assert_eq!(view.invoice.total, Money::from_major(50));

        assert_eq!(engine.take_events().len(), 3);
        assert!(engine.take_events().is_empty());
    }
}
