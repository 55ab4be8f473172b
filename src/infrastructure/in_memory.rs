use crate::domain::account::{Account, AccountId, Phone};
use crate::domain::favorite::Favorite;
use crate::domain::payment::Payment;
use crate::domain::ports::{AccountStore, FavoriteStore, PaymentStore};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// A thread-safe in-memory store for accounts.
///
/// Accounts are kept in registration order in an unindexed `Vec`; lookups are
/// linear scans.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<Vec<Account>>>,
    last_id: Arc<AtomicI64>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn next_id(&self) -> Result<AccountId> {
        Ok(self.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn store(&self, account: Account) -> Result<()> {
        // Keep the sequence ahead of restored ids.
        self.last_id.fetch_max(account.id, Ordering::SeqCst);

        let mut accounts = self.accounts.write().await;
        match accounts.iter_mut().find(|a| a.id == account.id) {
            Some(existing) => *existing = account,
            None => accounts.push(account),
        }
        Ok(())
    }

    async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| &a.phone == phone).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.clone())
    }
}

/// A thread-safe in-memory store for payments.
///
/// The collection lives behind a copy-on-write `Arc<Vec<_>>`: snapshots are a
/// reference-count bump, and a write only clones the vector while a snapshot
/// taken before it is still alive.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<Arc<Vec<Payment>>>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn append(&self, payments: Vec<Payment>) -> Result<()> {
        let mut guard = self.payments.write().await;
        Arc::make_mut(&mut *guard).extend(payments);
        Ok(())
    }

    async fn store(&self, payment: Payment) -> Result<()> {
        let mut guard = self.payments.write().await;
        let payments = Arc::make_mut(&mut *guard);
        match payments.iter_mut().find(|p| p.id == payment.id) {
            Some(existing) => *existing = payment,
            None => payments.push(payment),
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.iter().find(|p| p.id == id).cloned())
    }

    async fn snapshot(&self) -> Result<Arc<Vec<Payment>>> {
        let payments = self.payments.read().await;
        Ok(Arc::clone(&*payments))
    }
}

/// A thread-safe in-memory store for favorite payment templates.
#[derive(Default, Clone)]
pub struct InMemoryFavoriteStore {
    favorites: Arc<RwLock<Vec<Favorite>>>,
}

impl InMemoryFavoriteStore {
    /// Creates a new, empty in-memory favorite store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteStore for InMemoryFavoriteStore {
    async fn store(&self, favorite: Favorite) -> Result<()> {
        let mut favorites = self.favorites.write().await;
        match favorites.iter_mut().find(|f| f.id == favorite.id) {
            Some(existing) => *existing = favorite,
            None => favorites.push(favorite),
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Favorite>> {
        let favorites = self.favorites.read().await;
        Ok(favorites.iter().find(|f| f.id == id).cloned())
    }
}
