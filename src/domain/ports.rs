use super::account::{Account, AccountId, Phone};
use super::favorite::Favorite;
use super::payment::Payment;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Reserves the next sequential account id.
    async fn next_id(&self) -> Result<AccountId>;
    /// Inserts the account, or replaces the one with the same id in place.
    async fn store(&self, account: Account) -> Result<()>;
    async fn get(&self, id: AccountId) -> Result<Option<Account>>;
    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<Account>>;
    async fn get_all(&self) -> Result<Vec<Account>>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Appends new payments in order, without checking for existing ids.
    async fn append(&self, payments: Vec<Payment>) -> Result<()>;
    /// Replaces the payment with the same id in place, or appends it.
    async fn store(&self, payment: Payment) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Payment>>;
    /// The ordered payment collection as of this call.
    ///
    /// Later mutations of the store must not be visible through the returned
    /// snapshot.
    async fn snapshot(&self) -> Result<Arc<Vec<Payment>>>;
}

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn store(&self, favorite: Favorite) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Favorite>>;
}

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type FavoriteStoreBox = Box<dyn FavoriteStore>;
