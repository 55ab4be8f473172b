use crate::domain::account::AccountId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("phone already registered")]
    PhoneRegistered,
    #[error("amount must be greater than 0")]
    AmountMustBePositive,
    #[error("account {0} not found")]
    AccountNotFound(AccountId),
    #[error("payment not found")]
    PaymentNotFound,
    #[error("account balance less than amount")]
    NotEnoughBalance,
    #[error("account balance would overflow")]
    BalanceOverflow,
    #[error("favorite payment not found")]
    FavoriteNotFound,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Worker task failed: {0}")]
    WorkerError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
