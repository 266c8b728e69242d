use crate::domain::transaction::TransferRequest;
use crate::error::Result;
use std::io::Read;

/// Reads a JSON array of transfer requests, the same shape the transfer
/// endpoint accepts as a body.
pub fn read_transfers<R: Read>(source: R) -> Result<Vec<TransferRequest>> {
    Ok(serde_json::from_reader(source)?)
}
