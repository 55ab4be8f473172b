use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wallet::application::aggregate::{AggregationConfig, DEFAULT_PROGRESS_PARTITION_SIZE};
use wallet::application::wallet::Wallet;
use wallet::domain::account::Money;
use wallet::infrastructure::in_memory::{
    InMemoryAccountStore, InMemoryFavoriteStore, InMemoryPaymentStore,
};
use wallet::interfaces::csv::account_file::AccountWriter;
use wallet::interfaces::csv::payment_file::{PaymentReader, PaymentWriter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register an account, fund it and make a series of payments, then export them
    Simulate {
        /// Phone number of the simulated account
        #[arg(long, default_value = "+992000000001")]
        phone: String,

        /// Initial deposit in minor units. Defaults to exactly what the payments need.
        #[arg(long)]
        deposit: Option<i64>,

        /// Number of payments to make, with amounts 1, 2, ..., N
        #[arg(long, default_value_t = 1000)]
        payments: i64,

        /// Category recorded on every payment
        #[arg(long, default_value = "Cafe")]
        category: String,

        /// Where to write the payments file
        #[arg(long)]
        output: PathBuf,

        /// Where to write the accounts file (optional)
        #[arg(long)]
        accounts_output: Option<PathBuf>,
    },

    /// Sum all payment amounts in parallel
    Sum {
        /// Payments file
        input: PathBuf,

        /// Number of parallel workers (0 and 1 both mean one)
        #[arg(long, default_value_t = 1)]
        workers: usize,
    },

    /// List payments matching a criterion, scanned in parallel
    Filter {
        /// Payments file
        input: PathBuf,

        #[command(flatten)]
        criterion: Criterion,

        /// Number of parallel workers (0 means one)
        #[arg(long, default_value_t = 1)]
        workers: usize,

        /// Print matches as JSON instead of payment records
        #[arg(long)]
        json: bool,
    },

    /// Sum payments partition by partition, printing each result as it arrives
    Progress {
        /// Payments file
        input: PathBuf,

        /// Payments per partition
        #[arg(long, default_value_t = DEFAULT_PROGRESS_PARTITION_SIZE)]
        partition_size: usize,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Criterion {
    /// Payments of this account; fails if there are none
    #[arg(long)]
    account: Option<i64>,

    /// Payments with this category; may print nothing
    #[arg(long)]
    category: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            phone,
            deposit,
            payments,
            category,
            output,
            accounts_output,
        } => {
            let wallet = in_memory_wallet(AggregationConfig::default());
            let account = wallet.register_account(phone).await.into_diagnostic()?;

            let deposit = match deposit {
                Some(deposit) => Money::new(deposit),
                None => {
                    let n = payments.max(0);
                    let needed = n
                        .checked_add(1)
                        .and_then(|next| n.checked_mul(next))
                        .ok_or_else(|| {
                            miette!("{} payments need more than a balance can hold", n)
                        })?;
                    Money::new(needed / 2)
                }
            };
            if deposit.is_positive() {
                wallet.deposit(account.id, deposit).await.into_diagnostic()?;
            }

            let mut made = 0;
            for amount in 1..=payments {
                match wallet
                    .pay(account.id, Money::new(amount), category.clone())
                    .await
                {
                    Ok(_) => made += 1,
                    Err(e) => eprintln!("Error making payment: {}", e),
                }
            }

            let snapshot = wallet.payments().await.into_diagnostic()?;
            let file = File::create(&output).into_diagnostic()?;
            PaymentWriter::new(file)
                .write_payments(snapshot.iter())
                .into_diagnostic()?;

            if let Some(path) = accounts_output {
                let file = File::create(path).into_diagnostic()?;
                AccountWriter::new(file)
                    .write_accounts(wallet.accounts().await.into_diagnostic()?)
                    .into_diagnostic()?;
            }

            println!("payments: {}", made);
        }
        Command::Sum { input, workers } => {
            let wallet = load_wallet(&input, AggregationConfig::default()).await?;
            let total = wallet.sum_payments(workers).await.into_diagnostic()?;
            println!("total: {}", total);
        }
        Command::Filter {
            input,
            criterion,
            workers,
            json,
        } => {
            let wallet = load_wallet(&input, AggregationConfig::default()).await?;
            let matches = match (criterion.account, criterion.category) {
                (Some(account_id), _) => wallet
                    .filter_payments(account_id, workers)
                    .await
                    .into_diagnostic()?,
                (None, Some(category)) => wallet
                    .filter_payments_by_fn(move |p| p.category == category, workers)
                    .await
                    .into_diagnostic()?,
                (None, None) => Vec::new(),
            };

            if json {
                let out = serde_json::to_string_pretty(&matches).into_diagnostic()?;
                println!("{}", out);
            } else {
                let stdout = io::stdout();
                PaymentWriter::new(stdout.lock())
                    .write_payments(&matches)
                    .into_diagnostic()?;
                println!();
            }
        }
        Command::Progress {
            input,
            partition_size,
        } => {
            let config = AggregationConfig {
                progress_partition_size: partition_size,
            };
            let wallet = load_wallet(&input, config).await?;
            let mut stream = wallet
                .sum_payments_with_progress()
                .await
                .into_diagnostic()?;

            let mut count = 0;
            let mut total = Money::ZERO;
            while let Some(result) = stream.recv().await {
                println!("partition: count={} sum={}", result.count, result.sum);
                count += result.count;
                total = total.wrapping_add(result.sum);
            }
            println!("count: {}", count);
            println!("total: {}", total);
        }
    }

    Ok(())
}

fn in_memory_wallet(config: AggregationConfig) -> Wallet {
    Wallet::with_config(
        Box::new(InMemoryAccountStore::new()),
        Box::new(InMemoryPaymentStore::new()),
        Box::new(InMemoryFavoriteStore::new()),
        config,
    )
}

/// Builds an in-memory wallet holding every readable payment in `path`.
async fn load_wallet(path: &Path, config: AggregationConfig) -> Result<Wallet> {
    let wallet = in_memory_wallet(config);
    let file = File::open(path).into_diagnostic()?;

    let mut payments = Vec::new();
    for record in PaymentReader::new(file).payments() {
        match record {
            Ok(payment) => payments.push(payment),
            Err(e) => {
                warn!(error = %e, "skipping payment record");
                eprintln!("Error reading payment: {}", e);
            }
        }
    }

    wallet.import_payments(payments).await.into_diagnostic()?;
    Ok(wallet)
}
