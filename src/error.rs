use thiserror::Error;

/// Errors raised while processing a transfer.
///
/// `InvalidInput` and `NotFound` carry the exact message reported back to the
/// caller. `AmountOutOfRange` and `BalanceOutOfRange` mark values a `Decimal`
/// cannot hold exactly. The remaining variants come from storage and I/O
/// adapters.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Amount {0} exceeds the supported range")]
    AmountOutOfRange(String),
    #[error("Balance of account {0} cannot hold the transfer result exactly")]
    BalanceOutOfRange(String),
    #[error("Storage error: {0}")]
    StorageError(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PaymentError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Whether the error stems from the request itself rather than the
    /// infrastructure behind it.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::NotFound(_)
                | Self::AmountOutOfRange(_)
                | Self::BalanceOutOfRange(_)
        )
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PaymentError {
    fn from(err: rocksdb::Error) -> Self {
        Self::StorageError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
