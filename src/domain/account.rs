use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub, SubAssign};

pub type AccountId = i64;
pub type Phone = String;

/// A signed amount of money counted in minor currency units.
///
/// Displayed in major units with two decimal places, so `Money(12345)` prints
/// as `123.45`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub fn new(minor_units: i64) -> Self {
        Self(minor_units)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Two's-complement addition used by the aggregation engine.
    ///
    /// Wrapping keeps totals identical whatever order partitions are merged in.
    pub fn wrapping_add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }

    /// Addition for balances, `None` when the result does not fit.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Value in major currency units.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::wrapping_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A registered wallet account.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    /// Sequential identifier, starting at 1.
    pub id: AccountId,
    /// Unique phone number the account was registered with.
    pub phone: Phone,
    /// Funds available for payments.
    pub balance: Money,
}

impl Account {
    pub fn new(id: AccountId, phone: Phone) -> Self {
        Self {
            id,
            phone,
            balance: Money::ZERO,
        }
    }

    /// Adds funds to the balance.
    pub fn deposit(&mut self, amount: Money) -> Result<(), LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::AmountMustBePositive);
        }
        self.credit(amount)
    }

    /// Debits the balance if it covers `amount`.
    pub fn withdraw(&mut self, amount: Money) -> Result<(), LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::AmountMustBePositive);
        }
        if self.balance < amount {
            return Err(LedgerError::NotEnoughBalance);
        }
        self.balance -= amount;
        Ok(())
    }

    /// Returns a previously debited amount.
    pub fn refund(&mut self, amount: Money) -> Result<(), LedgerError> {
        self.credit(amount)
    }

    fn credit(&mut self, amount: Money) -> Result<(), LedgerError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        Ok(())
    }
}
