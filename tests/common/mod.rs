#![allow(dead_code)]

use std::fs::File;
use std::io::Error;
use std::path::Path;
use wallet::application::aggregate::AggregationConfig;
use wallet::application::wallet::Wallet;
use wallet::domain::account::{AccountId, Money};
use wallet::domain::payment::{Payment, PaymentStatus};
use wallet::infrastructure::in_memory::{
    InMemoryAccountStore, InMemoryFavoriteStore, InMemoryPaymentStore,
};

pub fn in_memory_wallet() -> Wallet {
    with_config(AggregationConfig::default())
}

pub fn with_config(config: AggregationConfig) -> Wallet {
    Wallet::with_config(
        Box::new(InMemoryAccountStore::new()),
        Box::new(InMemoryPaymentStore::new()),
        Box::new(InMemoryFavoriteStore::new()),
        config,
    )
}

pub fn payment(index: usize, account_id: AccountId, amount: i64, category: &str) -> Payment {
    Payment {
        id: format!("payment-{index}"),
        account_id,
        amount: Money::new(amount),
        category: category.to_string(),
        status: PaymentStatus::InProgress,
    }
}

/// `count` payments of amount 1 for one account.
pub fn unit_payments(count: usize, account_id: AccountId) -> Vec<Payment> {
    (0..count)
        .map(|i| payment(i, account_id, 1, "Cafe"))
        .collect()
}

/// Writes `rows` payments of amount 1 for account 1 in the wallet file layout.
pub fn generate_payments_file(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'|'))
        .from_writer(file);

    for i in 1..=rows {
        wtr.write_record([
            format!("payment-{i}").as_str(),
            "1",
            "1",
            if i % 2 == 0 { "Cafe" } else { "Auto" },
            "INPROGRESS",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
