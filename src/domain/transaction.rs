use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the receiver of a transfer is identified.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// `receiverAccountInfo` is an account number.
    BankAccount,
    /// `receiverAccountInfo` is a pay id.
    PayId,
}

impl TransactionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionType::BankAccount => "BANK_ACCOUNT",
            TransactionType::PayId => "PAY_ID",
        }
    }
}

impl FromStr for TransactionType {
    type Err = PaymentError;

    /// Exact, case-sensitive match on the literal spelling.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "BANK_ACCOUNT" => Ok(TransactionType::BankAccount),
            "PAY_ID" => Ok(TransactionType::PayId),
            _ => Err(PaymentError::invalid_input(format!(
                "Unknown transaction type: {raw}"
            ))),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transfer as submitted by a client.
///
/// Every field is kept as the raw string received; nothing is validated until
/// the request reaches the processor. Missing fields read as empty strings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferRequest {
    pub sender_account_no: String,
    pub transaction_type: String,
    pub receiver_account_info: String,
    pub transaction_amount: String,
}

impl TransferRequest {
    pub fn new(
        sender_account_no: impl Into<String>,
        transaction_type: impl Into<String>,
        receiver_account_info: impl Into<String>,
        transaction_amount: impl Into<String>,
    ) -> Self {
        Self {
            sender_account_no: sender_account_no.into(),
            transaction_type: transaction_type.into(),
            receiver_account_info: receiver_account_info.into(),
            transaction_amount: transaction_amount.into(),
        }
    }
}

/// Result of a transfer that passed validation of both parties and the amount.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransferOutcome {
    /// Funds were moved.
    Completed,
    /// The sender cannot cover the amount. Nothing was changed.
    InsufficientBalance,
}

impl TransferOutcome {
    pub const fn message(&self) -> &'static str {
        match self {
            TransferOutcome::Completed => "Transaction Successful!!",
            TransferOutcome::InsufficientBalance => "Insufficient account balance",
        }
    }

    pub fn is_completed(&self) -> bool {
        *self == TransferOutcome::Completed
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
