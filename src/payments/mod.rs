pub mod settlement;

pub use settlement::{pay_invoice, Settlement};
