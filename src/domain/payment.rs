use super::account::{AccountId, Money};
use serde::{Deserialize, Serialize};

pub type PaymentId = String;
pub type PaymentCategory = String;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    InProgress,
    Fail,
}

/// A payment made from an account.
///
/// Field order matches the on-disk record layout.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Payment {
    pub id: PaymentId,
    pub account_id: AccountId,
    pub amount: Money,
    pub category: PaymentCategory,
    pub status: PaymentStatus,
}

impl Payment {
    /// Creates an in-progress payment with a fresh random identifier.
    pub fn new(account_id: AccountId, amount: Money, category: PaymentCategory) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id,
            amount,
            category,
            status: PaymentStatus::InProgress,
        }
    }

    /// Marks the payment as failed and zeroes its amount.
    pub fn reject(&mut self) {
        self.amount = Money::ZERO;
        self.status = PaymentStatus::Fail;
    }
}
