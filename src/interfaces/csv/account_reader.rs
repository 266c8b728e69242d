use crate::domain::account::{Balance, UserAccount};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of an account seed file, before the balance is parsed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    account_no: String,
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    pay_id: String,
    account_balance: String,
}

impl AccountRecord {
    fn into_account(self) -> Result<UserAccount> {
        if self.account_no.is_empty() {
            return Err(PaymentError::invalid_input("Account number is required"));
        }
        // Parsed from the raw text so the balance never goes through f64.
        let balance = Decimal::from_str_exact(&self.account_balance).map_err(|_| {
            PaymentError::invalid_input(format!(
                "Invalid balance for account {}: {}",
                self.account_no, self.account_balance
            ))
        })?;
        Ok(UserAccount::new(
            self.account_no,
            self.user_name,
            self.pay_id,
            Balance::new(balance),
        ))
    }
}

/// Reads the accounts a store is provisioned with from a CSV source.
///
/// Expects the header `accountNo,userName,payId,accountBalance`.
pub struct AccountReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn accounts(self) -> impl Iterator<Item = Result<UserAccount>> {
        self.reader.into_deserialize().map(|result| {
            let record: AccountRecord = result?;
            record.into_account()
        })
    }
}
