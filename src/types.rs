use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{InvoiceError, Result};

/// unique identifier for a transaction
pub type TransactionId = String;
/// unique identifier for a credit card
pub type CardId = String;
/// unique identifier for a bank account
pub type AccountId = String;

/// transaction kinds as stored by the surrounding application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
    CreditCard,
}

/// position of a charge within a pre-expanded installment purchase.
///
/// Installments are materialized at creation time as N sibling charges,
/// one per future month; this crate only consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub current: u32,
    pub total: u32,
}

/// a single income/expense/card charge record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    /// ISO `YYYY-MM-DD`; may be malformed in old store data, so it is
    /// carried verbatim and parsed only at key resolution
    pub date: String,
    #[serde(deserialize_with = "crate::decimal::lenient::deserialize", default)]
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub card_id: Option<CardId>,
    #[serde(default)]
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub installment: Option<Installment>,
}

impl Transaction {
    /// charge that participates in the invoice engine
    pub fn is_card_charge(&self) -> bool {
        self.kind == TransactionKind::CreditCard && self.card_id.is_some()
    }

    /// unsettled charge
    pub fn is_open_charge(&self) -> bool {
        self.is_card_charge() && !self.is_paid
    }

    /// "2/10" style label for installment siblings
    pub fn installment_label(&self) -> Option<String> {
        self.installment.map(|i| format!("{}/{}", i.current, i.total))
    }
}

/// credit card billing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: CardId,
    pub name: String,
    /// day-of-month the billing cycle closes; charges after it belong to
    /// the next cycle
    pub closing_day: u8,
    /// day-of-month payment for a cycle is due
    pub due_day: u8,
    /// bank account settlements are drawn from
    #[serde(default)]
    pub account_id: Option<AccountId>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default = "default_true")]
    pub include_in_total: bool,
}

fn default_true() -> bool {
    true
}

impl CreditCard {
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, closing_day: u8, due_day: u8) -> Result<Self> {
        if !(1..=31).contains(&closing_day) {
            return Err(InvoiceError::InvalidCycleDay { day: closing_day });
        }
        if !(1..=31).contains(&due_day) {
            return Err(InvoiceError::InvalidCycleDay { day: due_day });
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            closing_day,
            due_day,
            account_id: None,
            is_visible: true,
            include_in_total: true,
        })
    }

    /// attach the bank account settlements are drawn from
    pub fn with_account(mut self, account_id: impl Into<AccountId>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }
}

/// bank account, needed only to attribute settlement expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charge(id: &str, date: &str, amount: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            amount: Money::from_major(amount),
            kind: TransactionKind::CreditCard,
            card_id: Some("card-1".to_string()),
            account_id: None,
            category: None,
            description: String::new(),
            is_paid: false,
            installment: None,
        }
    }

    #[test]
    fn test_card_charge_predicates() {
        let tx = charge("t1", "2024-03-20", 100);
        assert!(tx.is_card_charge());
        assert!(tx.is_open_charge());

        let mut paid = tx.clone();
        paid.is_paid = true;
        assert!(paid.is_card_charge());
        assert!(!paid.is_open_charge());

        let mut orphan = tx;
        orphan.card_id = None;
        assert!(!orphan.is_card_charge());
    }

    #[test]
    fn test_card_day_validation() {
        assert!(CreditCard::new("c1", "visa", 25, 10).is_ok());
        assert!(CreditCard::new("c1", "visa", 0, 10).is_err());
        assert!(CreditCard::new("c1", "visa", 25, 32).is_err());
        assert!(CreditCard::new("c1", "visa", 31, 1).is_ok());
    }

    #[test]
    fn test_installment_label() {
        let mut tx = charge("t1", "2024-03-20", 100);
        assert_eq!(tx.installment_label(), None);
        tx.installment = Some(Installment { current: 2, total: 10 });
        assert_eq!(tx.installment_label().as_deref(), Some("2/10"));
    }

    #[test]
    fn test_store_shape_deserialization() {
        // records as the key-value store actually holds them
        let json = r#"{
            "id": "abc",
            "date": "2024-03-20",
            "amount": "55.90",
            "type": "CREDIT_CARD",
            "cardId": "card-1",
            "isPaid": false
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::CreditCard);
        assert_eq!(tx.card_id.as_deref(), Some("card-1"));
        assert_eq!(tx.amount, Money::from_str_exact("55.90").unwrap());
        assert!(!tx.is_paid);

        let json = r#"{"id": "c", "name": "visa", "closingDay": 25, "dueDay": 10}"#;
        let card: CreditCard = serde_json::from_str(json).unwrap();
        assert!(card.is_visible);
        assert!(card.include_in_total);
    }
}
