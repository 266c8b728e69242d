use clap::Parser;
use miette::{IntoDiagnostic, Result};
use samebank::application::handler::TransferHandler;
use samebank::domain::ports::{AccountStore, AccountStoreBox};
use samebank::domain::transaction::TransferRequest;
use samebank::error::PaymentError;
use samebank::infrastructure::in_memory::InMemoryAccountStore;
use samebank::interfaces::csv::account_reader::AccountReader;
use samebank::interfaces::csv::account_writer::AccountWriter;
use samebank::interfaces::csv::transfer_reader::TransferReader;
use samebank::interfaces::json;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transfer requests: a CSV file, or a JSON array if the file ends in `.json`
    transfers: PathBuf,

    /// Accounts CSV (accountNo,userName,payId,accountBalance) loaded before processing
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Log filter applied when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> Result<AccountStoreBox> {
    use samebank::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => {
            info!(path = %path.display(), "using RocksDB account store");
            Ok(Box::new(RocksDBStore::open(path).into_diagnostic()?))
        }
        None => Ok(Box::new(InMemoryAccountStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> Result<AccountStoreBox> {
    if db_path.is_some() {
        warn!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Box::new(InMemoryAccountStore::new()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let store = open_store(cli.db_path)?;

    if let Some(path) = cli.accounts {
        let file = File::open(path).into_diagnostic()?;
        for account in AccountReader::new(file).accounts() {
            match account {
                Ok(account) => store.save(account).await.into_diagnostic()?,
                Err(e) => error!("Error reading account: {}", e),
            }
        }
    }

    let file = File::open(&cli.transfers).into_diagnostic()?;
    let requests: Box<dyn Iterator<Item = samebank::error::Result<TransferRequest>>> =
        if is_json(&cli.transfers) {
            let requests = json::read_transfers(file).into_diagnostic()?;
            Box::new(requests.into_iter().map(Ok::<_, PaymentError>))
        } else {
            Box::new(TransferReader::new(file).requests())
        };

    let handler = TransferHandler::new(store);
    for (index, request) in requests.enumerate() {
        let request_no = index + 1;
        match request {
            Ok(request) => match handler.transfer(&request).await {
                Ok(outcome) => info!(request = request_no, "{}", outcome),
                Err(e) if e.is_rejection() => warn!(request = request_no, "{}", e),
                Err(e) => error!(request = request_no, "Error processing transfer: {}", e),
            },
            Err(e) => error!(request = request_no, "Error reading transfer: {}", e),
        }
    }

    let accounts = handler.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(accounts).into_diagnostic()?;

    Ok(())
}
