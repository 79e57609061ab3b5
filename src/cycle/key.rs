use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{InvoiceError, Result};

/// one billing cycle of one card, the `YYYY-MM` period a charge bills to.
///
/// Keys are always recomputed from a charge's date and the card's current
/// closing day; they are never stored. Changing a card's closing day
/// therefore reshuffles historical groupings, which is accepted behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceKey {
    pub year: i32,
    pub month: u32,
}

impl InvoiceKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(InvoiceError::InvalidKey {
                value: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// key of the calendar month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// following month, rolling the year past December
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// preceding month, rolling the year before January
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }
}

impl fmt::Display for InvoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for InvoiceKey {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || InvoiceError::InvalidKey { value: s.to_string() };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        InvoiceKey::new(year, month)
    }
}

impl TryFrom<String> for InvoiceKey {
    type Error = InvoiceError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<InvoiceKey> for String {
    fn from(key: InvoiceKey) -> String {
        key.to_string()
    }
}

/// map a charge date to the invoice it bills to.
///
/// Charges dated after the card's closing day fall into the next cycle;
/// a charge dated exactly on the closing day stays in the current one.
/// The comparison is purely numeric, so closing days 29-31 work against
/// short months without constructing any dates.
pub fn resolve_key(date: &str, closing_day: u8) -> Result<InvoiceKey> {
    let parsed = parse_charge_date(date).ok_or_else(|| InvoiceError::InvalidDate {
        value: date.to_string(),
    })?;

    let key = InvoiceKey::from_date(parsed);
    if parsed.day() > u32::from(closing_day) {
        Ok(key.next())
    } else {
        Ok(key)
    }
}

/// soft-mode resolution: unparseable dates fall back to the supplied key
/// (callers pass the current system month) instead of erroring
pub fn resolve_key_or(date: &str, closing_day: u8, fallback: InvoiceKey) -> InvoiceKey {
    resolve_key(date, closing_day).unwrap_or(fallback)
}

/// parse the date portion of a store value, ignoring any time-of-day
/// suffix so timezone boundaries cannot shift the billing day
fn parse_charge_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(year: i32, month: u32) -> InvoiceKey {
        InvoiceKey::new(year, month).unwrap()
    }

    #[test]
    fn test_key_parse_and_display() {
        let k: InvoiceKey = "2024-03".parse().unwrap();
        assert_eq!(k, key(2024, 3));
        assert_eq!(k.to_string(), "2024-03");

        assert!("2024-13".parse::<InvoiceKey>().is_err());
        assert!("2024".parse::<InvoiceKey>().is_err());
        assert!("march".parse::<InvoiceKey>().is_err());
    }

    #[test]
    fn test_key_ordering() {
        assert!(key(2023, 12) < key(2024, 1));
        assert!(key(2024, 3) < key(2024, 4));
    }

    #[test]
    fn test_month_navigation() {
        assert_eq!(key(2024, 12).next(), key(2025, 1));
        assert_eq!(key(2024, 1).prev(), key(2023, 12));
        assert_eq!(key(2024, 6).next().prev(), key(2024, 6));
    }

    #[test]
    fn test_closing_day_boundary() {
        // on the closing day stays in the current cycle
        assert_eq!(resolve_key("2024-03-25", 25).unwrap(), key(2024, 3));
        // one day past it bills to the next cycle
        assert_eq!(resolve_key("2024-03-26", 25).unwrap(), key(2024, 4));
        assert_eq!(resolve_key("2024-03-20", 25).unwrap(), key(2024, 3));
    }

    #[test]
    fn test_year_rollover() {
        assert_eq!(resolve_key("2024-12-28", 25).unwrap(), key(2025, 1));
        assert_eq!(resolve_key("2024-12-25", 25).unwrap(), key(2024, 12));
    }

    #[test]
    fn test_short_month_closing_days() {
        // numeric comparison, no date construction for the closing day
        assert_eq!(resolve_key("2024-02-29", 31).unwrap(), key(2024, 2));
        assert_eq!(resolve_key("2024-02-29", 28).unwrap(), key(2024, 3));
        assert_eq!(resolve_key("2023-04-30", 30).unwrap(), key(2023, 4));
    }

    #[test]
    fn test_datetime_suffix_ignored() {
        assert_eq!(resolve_key("2024-03-26T23:30:00Z", 25).unwrap(), key(2024, 4));
    }

    #[test]
    fn test_invalid_dates() {
        assert!(resolve_key("not-a-date", 25).is_err());
        assert!(resolve_key("2024-02-30", 25).is_err());
        assert!(resolve_key("", 25).is_err());

        let fallback = key(2024, 6);
        assert_eq!(resolve_key_or("not-a-date", 25, fallback), fallback);
        assert_eq!(resolve_key_or("2024-03-20", 25, fallback), key(2024, 3));
    }
}
