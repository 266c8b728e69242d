use crate::domain::account::UserAccount;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountRow<'a> {
    account_no: &'a str,
    user_name: &'a str,
    pay_id: &'a str,
    account_balance: String,
}

/// Writes account state as CSV, one row per account.
///
/// Balances are printed in normalized form (`90`, not `90.00`).
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts(&mut self, accounts: impl IntoIterator<Item = UserAccount>) -> Result<()> {
        for account in accounts {
            self.writer.serialize(AccountRow {
                account_no: &account.account_no,
                user_name: &account.user_name,
                pay_id: &account.pay_id,
                account_balance: account.account_balance.to_string(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
