//! Quantity value object for item management

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Stored quantity of an item.
///
/// No lower bound is enforced here: zero and negative values are stored as
/// given, the way the remote document holds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// Amount used by `add` when the caller does not give one.
    pub const DEFAULT: Quantity = Quantity(1);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Additive merge of an added amount into an existing quantity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` if the sum does not fit in an `i64`.
    pub fn merge(self, added: Quantity) -> Result<Quantity, DomainError> {
        self.0
            .checked_add(added.0)
            .map(Quantity)
            .ok_or_else(|| {
                DomainError::constraint(format!(
                    "Quantity overflow: {} + {}",
                    self.0, added.0
                ))
            })
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Quantity> for i64 {
    fn from(quantity: Quantity) -> i64 {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
