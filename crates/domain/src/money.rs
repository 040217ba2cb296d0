//! Monetary amounts.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An amount in whole rupiah.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupiah(i64);

impl Rupiah {
    /// Creates an amount from whole rupiah.
    pub fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Creates an amount that must be greater than zero.
    pub fn try_new(amount: i64) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount { amount });
        }
        Ok(Self(amount))
    }

    /// Returns the amount in whole rupiah.
    pub fn amount(&self) -> i64 {
        self.0
    }
}

/// Formats as `Rp1.500.000`, grouping thousands with dots.
impl std::fmt::Display for Rupiah {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-Rp{grouped}")
        } else {
            write!(f, "Rp{grouped}")
        }
    }
}
