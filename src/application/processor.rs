use crate::domain::account::{Amount, UserAccount};
use crate::domain::ports::{AccountStore, AccountStoreBox};
use crate::domain::transaction::{TransactionType, TransferRequest};
use crate::error::{PaymentError, Result};
use tracing::debug;

/// Validates transfer requests against the account store and settles them.
///
/// Each step is exposed on its own so a caller can drive the sequence
/// resolve sender → resolve receiver → validate amount → settle, stopping at
/// the first failure. See [`TransferHandler`](super::handler::TransferHandler)
/// for that sequence.
///
/// Nothing here serializes access to an account: two transfers touching the
/// same account at once may both validate against the same balance.
pub struct TransferProcessor {
    account_store: AccountStoreBox,
}

impl TransferProcessor {
    /// Creates a processor backed by `account_store`.
    pub fn new(account_store: AccountStoreBox) -> Self {
        Self { account_store }
    }

    pub fn store(&self) -> &dyn AccountStore {
        self.account_store.as_ref()
    }

    /// Looks up the sending account by its account number.
    pub async fn resolve_sender(&self, request: &TransferRequest) -> Result<UserAccount> {
        let account_no = &request.sender_account_no;
        if is_blank(account_no) {
            return Err(PaymentError::invalid_input(
                "Invalid sender account information",
            ));
        }

        let sender = self
            .account_store
            .find_by_account_number(account_no)
            .await?
            .ok_or_else(|| PaymentError::not_found("Sender account not registered with bank"))?;

        debug!(account_no = %sender.account_no, "resolved sender");
        Ok(sender)
    }

    /// Looks up the receiving account, by account number or pay id depending
    /// on the request's transaction type.
    pub async fn resolve_receiver(&self, request: &TransferRequest) -> Result<UserAccount> {
        let transaction_type: TransactionType = request.transaction_type.parse()?;
        let receiver_info = &request.receiver_account_info;
        if is_blank(receiver_info) {
            return Err(PaymentError::invalid_input(
                "Invalid receiver account information",
            ));
        }

        let receiver = match transaction_type {
            TransactionType::BankAccount => {
                self.account_store
                    .find_by_account_number(receiver_info)
                    .await?
            }
            TransactionType::PayId => self.account_store.find_by_pay_id(receiver_info).await?,
        }
        .ok_or_else(|| {
            PaymentError::not_found(format!("Receiver {transaction_type} not registered with bank"))
        })?;

        debug!(
            account_no = %receiver.account_no,
            %transaction_type,
            "resolved receiver"
        );
        Ok(receiver)
    }

    /// Checks that the requested amount is a positive decimal the sender can cover.
    ///
    /// Returns `Ok(false)` when the balance is too low; that is an expected
    /// outcome, not an error. The account is not modified.
    pub fn validate_amount(&self, request: &TransferRequest, sender: &UserAccount) -> Result<bool> {
        match Amount::parse(&request.transaction_amount) {
            Ok(amount) => Ok(sender.can_send(amount)),
            // No balance can cover an amount beyond the decimal range.
            Err(PaymentError::AmountOutOfRange(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Moves the requested amount from `sender` to `receiver` and saves both.
    ///
    /// The amount is parsed again from the request and the sender's balance is
    /// not re-checked; call [`validate_amount`](Self::validate_amount) first.
    /// Both new balances are computed before anything is written; a result
    /// that would overflow or need rounding fails with `BalanceOutOfRange` and
    /// leaves both accounts untouched. The two saves are independent writes.
    /// If the second one fails the sender stays debited.
    ///
    /// When both sides are the same account, the debit and the credit land on
    /// the same record one after the other and both copies end up identical.
    pub async fn settle(
        &self,
        request: &TransferRequest,
        sender: &mut UserAccount,
        receiver: &mut UserAccount,
    ) -> Result<()> {
        let amount = Amount::parse(&request.transaction_amount)?;
        let same_account = sender.account_no == receiver.account_no;

        let debited = sender
            .account_balance
            .checked_debit(amount)
            .ok_or_else(|| out_of_range(sender))?;
        let credit_base = if same_account {
            debited
        } else {
            receiver.account_balance
        };
        let credited = credit_base
            .checked_credit(amount)
            .ok_or_else(|| out_of_range(receiver))?;

        sender.account_balance = debited;
        self.account_store.save(sender.clone()).await?;

        if same_account {
            *receiver = sender.clone();
        }
        receiver.account_balance = credited;
        self.account_store.save(receiver.clone()).await?;

        if same_account {
            *sender = receiver.clone();
        }

        debug!(
            sender = %sender.account_no,
            receiver = %receiver.account_no,
            %amount,
            "settled transfer"
        );
        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn out_of_range(account: &UserAccount) -> PaymentError {
    PaymentError::BalanceOutOfRange(account.account_no.clone())
}
