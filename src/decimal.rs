use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Money type with 2 decimal places precision for cent-level accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(2))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(2)))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents)
    pub fn from_minor(amount: i64) -> Self {
        Money((Decimal::from(amount) / Decimal::from(100)).round_dp(2))
    }

    /// create from untrusted input, coercing anything unparseable to zero
    pub fn from_raw_str(s: &str) -> Self {
        Decimal::from_str(s.trim())
            .map(Money::from_decimal)
            .unwrap_or(Money::ZERO)
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(2))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(2);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(2))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp(2);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// lenient deserialization for amounts coming out of the key-value store.
///
/// The store holds loosely-typed JSON: an amount may arrive as a number,
/// a numeric string, null, or garbage. Anything unparseable becomes zero
/// so one corrupt record cannot poison a whole invoice sum.
pub mod lenient {
    use super::Money;
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal::Decimal;
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a monetary amount as number, string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            Ok(Decimal::from_f64(v)
                .map(Money::from_decimal)
                .unwrap_or(Money::ZERO))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            Ok(Money::from_major(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            Ok(Decimal::from_u64(v)
                .map(Money::from_decimal)
                .unwrap_or(Money::ZERO))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
            Ok(Money::from_raw_str(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Money, E> {
            Ok(Money::ZERO)
        }

        fn visit_none<E: de::Error>(self) -> Result<Money, E> {
            Ok(Money::ZERO)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Money, D::Error> {
            d.deserialize_any(LenientVisitor)
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_any(LenientVisitor)
    }
}
