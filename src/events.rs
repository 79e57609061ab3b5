use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::InvoiceKey;
use crate::decimal::Money;
use crate::types::{AccountId, CardId, TransactionId};

/// all events that can be emitted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// one charge was marked paid
    ChargeSettled {
        transaction_id: TransactionId,
        card_id: CardId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    /// an invoice payment completed (selective or full sweep)
    InvoiceSettled {
        card_id: CardId,
        key: InvoiceKey,
        amount: Money,
        charge_count: usize,
        timestamp: DateTime<Utc>,
    },
    /// the cash-flow side of an invoice payment was recorded
    SettlementRecorded {
        transaction_id: TransactionId,
        account_id: AccountId,
        amount: Money,
        date: NaiveDate,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
