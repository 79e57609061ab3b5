use chrono::NaiveDate;

use crate::cycle::InvoiceKey;
use crate::types::CreditCard;

/// closing and due calendar dates of one invoice, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDates {
    pub closing_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// build a date from a day-of-month, clamping past-the-end days (29-31)
/// to the month's last day
pub fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| {
            (28..=31)
                .rev()
                .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        })
        // unreachable for validated keys; months 1-12 always have a day 28
        .unwrap_or(NaiveDate::MIN)
}

/// derive an invoice's closing and due dates.
///
/// The due date is the due day within the key's own month. The closing
/// event happened in the prior calendar month whenever the closing day
/// number is >= the due day number (the common configuration where the
/// due date rolls into the month after closing).
pub fn cycle_dates(key: InvoiceKey, card: &CreditCard) -> CycleDates {
    let due_date = clamped_date(key.year, key.month, u32::from(card.due_day));

    let closing_date = if card.closing_day >= card.due_day {
        let prev = key.prev();
        clamped_date(prev.year, prev.month, u32::from(card.closing_day))
    } else {
        clamped_date(key.year, key.month, u32::from(card.closing_day))
    };

    CycleDates { closing_date, due_date }
}
