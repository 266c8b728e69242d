use crate::domain::transaction::TransferRequest;
use crate::error::{PaymentError, Result};
use std::io::Read;

/// Reads transfer requests from a CSV source.
///
/// Expects the header `senderAccountNo,transactionType,receiverAccountInfo,transactionAmount`.
/// Fields are trimmed and short records are accepted; missing columns read as
/// empty strings and are left for the processor to reject.
pub struct TransferReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransferReader<R> {
    /// Creates a new `TransferReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<TransferRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
