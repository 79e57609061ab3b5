pub mod calendar;
pub mod key;

pub use calendar::{clamped_date, cycle_dates, CycleDates};
pub use key::{resolve_key, resolve_key_or, InvoiceKey};
