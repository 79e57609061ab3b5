use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("invalid date: {value}")]
    InvalidDate {
        value: String,
    },

    #[error("invalid invoice key: {value}")]
    InvalidKey {
        value: String,
    },

    #[error("invalid cycle day: {day} (must be 1-31)")]
    InvalidCycleDay {
        day: u8,
    },

    #[error("card not found: {card_id}")]
    CardNotFound {
        card_id: String,
    },

    #[error("no account available to record the settlement")]
    NoSettlementAccount,
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
