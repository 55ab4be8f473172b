use super::account::{AccountId, Money};
use super::payment::{Payment, PaymentCategory};
use serde::{Deserialize, Serialize};

/// A named payment template saved from an earlier payment.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Favorite {
    pub id: String,
    pub account_id: AccountId,
    pub name: String,
    pub amount: Money,
    pub category: PaymentCategory,
}

impl Favorite {
    pub fn from_payment(payment: &Payment, name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: payment.account_id,
            name,
            amount: payment.amount,
            category: payment.category.clone(),
        }
    }
}
