use super::processor::TransferProcessor;
use crate::domain::account::UserAccount;
use crate::domain::ports::{AccountStore, AccountStoreBox};
use crate::domain::transaction::{TransferOutcome, TransferRequest};
use crate::error::Result;
use tracing::{info, warn};

/// Entry point used by the boundary layer to run one transfer end to end.
///
/// Runs sender resolution, receiver resolution, amount validation and
/// settlement in that order. Validation and lookup failures come back as the
/// `Err` produced by the failing step, untouched. An insufficient balance is
/// reported as [`TransferOutcome::InsufficientBalance`] and leaves both
/// accounts unchanged.
pub struct TransferHandler {
    processor: TransferProcessor,
}

impl TransferHandler {
    pub fn new(account_store: AccountStoreBox) -> Self {
        Self {
            processor: TransferProcessor::new(account_store),
        }
    }

    pub async fn transfer(&self, request: &TransferRequest) -> Result<TransferOutcome> {
        let mut sender = self.processor.resolve_sender(request).await?;
        let mut receiver = self.processor.resolve_receiver(request).await?;

        if !self.processor.validate_amount(request, &sender)? {
            warn!(
                sender = %sender.account_no,
                amount = %request.transaction_amount,
                "insufficient balance"
            );
            return Ok(TransferOutcome::InsufficientBalance);
        }

        self.processor
            .settle(request, &mut sender, &mut receiver)
            .await?;
        info!(
            sender = %sender.account_no,
            receiver = %receiver.account_no,
            amount = %request.transaction_amount,
            "transfer completed"
        );
        Ok(TransferOutcome::Completed)
    }

    /// Consumes the handler and returns the final state of all accounts.
    pub async fn into_results(self) -> Result<Vec<UserAccount>> {
        self.processor.store().all_accounts().await
    }
}
