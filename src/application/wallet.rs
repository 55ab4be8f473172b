use super::aggregate::{AggregationConfig, Aggregator};
use super::progress::ProgressStream;
use crate::domain::account::{Account, AccountId, Money, Phone};
use crate::domain::favorite::Favorite;
use crate::domain::payment::{Payment, PaymentCategory};
use crate::domain::ports::{AccountStoreBox, FavoriteStoreBox, PaymentStoreBox};
use crate::error::{LedgerError, Result};
use std::sync::Arc;
use tracing::info;

/// The wallet service: account and payment bookkeeping plus parallel
/// aggregate queries over the payment collection.
///
/// `Wallet` owns its storage backends and is passed around explicitly; there
/// is no global instance. Aggregations run over a snapshot taken from the
/// payment store at call time, so they never observe mutations made while
/// they are in flight.
pub struct Wallet {
    accounts: AccountStoreBox,
    payments: PaymentStoreBox,
    favorites: FavoriteStoreBox,
    aggregator: Aggregator,
}

impl Wallet {
    /// Creates a wallet over the given stores with the default aggregation
    /// settings.
    pub fn new(
        accounts: AccountStoreBox,
        payments: PaymentStoreBox,
        favorites: FavoriteStoreBox,
    ) -> Self {
        Self::with_config(accounts, payments, favorites, AggregationConfig::default())
    }

    pub fn with_config(
        accounts: AccountStoreBox,
        payments: PaymentStoreBox,
        favorites: FavoriteStoreBox,
        config: AggregationConfig,
    ) -> Self {
        Self {
            accounts,
            payments,
            favorites,
            aggregator: Aggregator::new(config),
        }
    }

    /// Registers a new account with a zero balance.
    ///
    /// Fails with [`LedgerError::PhoneRegistered`] if the phone is taken.
    pub async fn register_account(&self, phone: Phone) -> Result<Account> {
        if self.accounts.find_by_phone(&phone).await?.is_some() {
            return Err(LedgerError::PhoneRegistered);
        }

        let account = Account::new(self.accounts.next_id().await?, phone);
        self.accounts.store(account.clone()).await?;
        info!(account = account.id, "account registered");
        Ok(account)
    }

    pub async fn deposit(&self, account_id: AccountId, amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(LedgerError::AmountMustBePositive);
        }

        let mut account = self.find_account_by_id(account_id).await?;
        account.deposit(amount)?;
        self.accounts.store(account).await?;
        info!(account = account_id, %amount, "deposit");
        Ok(())
    }

    /// Debits the account and records a new in-progress payment.
    pub async fn pay(
        &self,
        account_id: AccountId,
        amount: Money,
        category: PaymentCategory,
    ) -> Result<Payment> {
        if !amount.is_positive() {
            return Err(LedgerError::AmountMustBePositive);
        }

        let mut account = self.find_account_by_id(account_id).await?;
        account.withdraw(amount)?;
        self.accounts.store(account).await?;

        let payment = Payment::new(account_id, amount, category);
        self.payments.append(vec![payment.clone()]).await?;
        info!(account = account_id, payment = %payment.id, %amount, "payment");
        Ok(payment)
    }

    pub async fn find_account_by_id(&self, account_id: AccountId) -> Result<Account> {
        self.accounts
            .get(account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    pub async fn find_payment_by_id(&self, payment_id: &str) -> Result<Payment> {
        self.payments
            .get(payment_id)
            .await?
            .ok_or(LedgerError::PaymentNotFound)
    }

    /// Fails the payment: its amount goes back to the account and the payment
    /// is kept with a zero amount and `FAIL` status.
    pub async fn reject(&self, payment_id: &str) -> Result<()> {
        let mut payment = self.find_payment_by_id(payment_id).await?;
        let mut account = self.find_account_by_id(payment.account_id).await?;

        account.refund(payment.amount)?;
        payment.reject();

        self.accounts.store(account).await?;
        self.payments.store(payment).await?;
        info!(payment = payment_id, "payment rejected");
        Ok(())
    }

    /// Makes a new payment with the same account, amount and category.
    pub async fn repeat(&self, payment_id: &str) -> Result<Payment> {
        let payment = self.find_payment_by_id(payment_id).await?;
        self.pay(payment.account_id, payment.amount, payment.category).await
    }

    pub async fn favorite_payment(&self, payment_id: &str, name: String) -> Result<Favorite> {
        let payment = self.find_payment_by_id(payment_id).await?;
        let favorite = Favorite::from_payment(&payment, name);
        self.favorites.store(favorite.clone()).await?;
        Ok(favorite)
    }

    pub async fn pay_from_favorite(&self, favorite_id: &str) -> Result<Payment> {
        let favorite = self
            .favorites
            .get(favorite_id)
            .await?
            .ok_or(LedgerError::FavoriteNotFound)?;
        self.pay(favorite.account_id, favorite.amount, favorite.category).await
    }

    /// All accounts in registration order.
    pub async fn accounts(&self) -> Result<Vec<Account>> {
        self.accounts.get_all().await
    }

    /// Snapshot of all payments in insertion order.
    pub async fn payments(&self) -> Result<Arc<Vec<Payment>>> {
        self.payments.snapshot().await
    }

    /// Restores an account record as-is, e.g. from an exported file.
    pub async fn import_account(&self, account: Account) -> Result<()> {
        self.accounts.store(account).await
    }

    /// Restores payment records as-is, in order, without touching any balance.
    pub async fn import_payments(&self, payments: Vec<Payment>) -> Result<()> {
        self.payments.append(payments).await
    }

    /// Total of all payment amounts, split across `workers` parallel workers.
    ///
    /// `0` and `1` both mean a single worker.
    pub async fn sum_payments(&self, workers: usize) -> Result<Money> {
        let snapshot = self.payments.snapshot().await?;
        self.aggregator.sum(snapshot, workers).await
    }

    /// Payments of one account, split across `workers` parallel workers.
    ///
    /// Unlike [`Wallet::filter_payments_by_fn`], an empty result is an error:
    /// [`LedgerError::PaymentNotFound`].
    pub async fn filter_payments(
        &self,
        account_id: AccountId,
        workers: usize,
    ) -> Result<Vec<Payment>> {
        let matches = self
            .filter_payments_by_fn(move |p| p.account_id == account_id, workers)
            .await?;
        if matches.is_empty() {
            return Err(LedgerError::PaymentNotFound);
        }
        Ok(matches)
    }

    /// Payments matching `predicate`, split across `workers` parallel workers.
    ///
    /// A worker count of `0` runs one worker over the whole collection. The
    /// result may be empty. Order across partitions is not guaranteed.
    pub async fn filter_payments_by_fn<P>(
        &self,
        predicate: P,
        workers: usize,
    ) -> Result<Vec<Payment>>
    where
        P: Fn(&Payment) -> bool + Send + Sync + 'static,
    {
        let snapshot = self.payments.snapshot().await?;
        self.aggregator.filter(snapshot, predicate, workers).await
    }

    /// Starts a progress-reporting sum and returns its stream.
    ///
    /// Each call gets its own stream; store the handles separately when
    /// running several at once.
    pub async fn sum_payments_with_progress(&self) -> Result<ProgressStream> {
        let snapshot = self.payments.snapshot().await?;
        Ok(self.aggregator.sum_with_progress(snapshot))
    }
}
