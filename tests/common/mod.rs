#![allow(dead_code)]

use rust_decimal::Decimal;
use samebank::domain::account::{Balance, UserAccount};
use samebank::infrastructure::in_memory::InMemoryAccountStore;
use std::io::Write;
use tempfile::NamedTempFile;

pub const SENDER_ACCOUNT: &str = "12400111111111";
pub const RECEIVER_ACCOUNT: &str = "12400133333333";
pub const RECEIVER_PAY_ID: &str = "0411000111";

pub const ACCOUNTS_HEADER: &str = "accountNo,userName,payId,accountBalance";
pub const TRANSFERS_HEADER: &str =
    "senderAccountNo,transactionType,receiverAccountInfo,transactionAmount";

/// A store holding the sender and receiver accounts used across the tests.
pub fn store_with(sender_balance: Decimal, receiver_balance: Decimal) -> InMemoryAccountStore {
    InMemoryAccountStore::with_accounts([
        UserAccount::new(
            SENDER_ACCOUNT,
            "alice",
            "0400000111",
            Balance::new(sender_balance),
        ),
        UserAccount::new(
            RECEIVER_ACCOUNT,
            "bob",
            RECEIVER_PAY_ID,
            Balance::new(receiver_balance),
        ),
    ])
}

/// Writes `header` followed by `rows` to a temporary file.
pub fn csv_file(header: &str, rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}
