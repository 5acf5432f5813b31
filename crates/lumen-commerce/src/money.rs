//! Money type for representing monetary values.
//!
//! Amounts are integer pence. Conversion to pounds happens only when a value
//! is rendered, and is done with integer division so no floating-point
//! rounding can creep into totals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Symbol prefixed to displayed amounts.
pub const CURRENCY_SYMBOL: &str = "\u{00a3}";

/// Minor units per major unit.
const PENCE_PER_POUND: i64 = 100;

/// A monetary value in pence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in pence.
    pub amount_pence: i64,
}

impl Money {
    /// Create a new Money value from pence.
    pub const fn new(amount_pence: i64) -> Self {
        Self { amount_pence }
    }

    /// Zero pence.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_pence == 0
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money::new(self.amount_pence.saturating_mul(i64::from(quantity)))
    }

    /// Add another amount, saturating at the numeric bounds.
    pub fn saturating_add(&self, other: Money) -> Money {
        Money::new(self.amount_pence.saturating_add(other.amount_pence))
    }

    /// Format without symbol, fixed to two decimal places (e.g., "10.00").
    ///
    /// ```
    /// use lumen_commerce::Money;
    /// assert_eq!(Money::new(1000).display_amount(), "10.00");
    /// assert_eq!(Money::new(5).display_amount(), "0.05");
    /// ```
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_pence < 0 { "-" } else { "" };
        let abs = self.amount_pence.unsigned_abs();
        let per = PENCE_PER_POUND.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / per, abs % per)
    }

    /// Format as a display string (e.g., "£10.00").
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        match amount.strip_prefix('-') {
            Some(rest) => format!("-{}{}", CURRENCY_SYMBOL, rest),
            None => format!("{}{}", CURRENCY_SYMBOL, amount),
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(other)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        self.multiply(quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_amount() {
        assert_eq!(Money::new(1000).display_amount(), "10.00");
        assert_eq!(Money::new(1299).display_amount(), "12.99");
        assert_eq!(Money::new(7).display_amount(), "0.07");
        assert_eq!(Money::zero().display_amount(), "0.00");
    }

    #[test]
    fn test_display_with_symbol() {
        assert_eq!(Money::new(2499).display(), "£24.99");
        assert_eq!(Money::new(-250).display(), "-£2.50");
    }

    #[test]
    fn test_multiply() {
        let m = Money::new(1299);
        assert_eq!((m * 3).amount_pence, 3897);
        assert_eq!(m.multiply(0), Money::zero());
        assert!(m.multiply(0).is_zero());
        assert!(!m.is_zero());
    }

    #[test]
    fn test_multiply_saturates() {
        let m = Money::new(i64::MAX / 2);
        assert_eq!(m.multiply(4).amount_pence, i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::new(100), Money::new(250), Money::new(1)]
            .into_iter()
            .sum();
        assert_eq!(total.amount_pence, 351);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Money::new(1299)).unwrap();
        assert_eq!(json, "1299");
        let back: Money = serde_json::from_str("2499").unwrap();
        assert_eq!(back, Money::new(2499));
    }
}
