use crate::domain::account::UserAccount;
use crate::domain::ports::AccountStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing account records, keyed by account number.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family mapping a pay id to the account number that owns it.
pub const CF_PAY_IDS: &str = "pay_ids";

/// A persistent account store backed by RocksDB.
///
/// Records are stored as JSON in the `accounts` column family. The `pay_ids`
/// column family is a secondary index kept up to date in the same write batch
/// as the record. Pay ids are not unique: the index keeps pointing at the
/// first account registered with a given pay id for as long as that account
/// still holds it.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("accounts" and "pay_ids") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_pay_ids = ColumnFamilyDescriptor::new(CF_PAY_IDS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_pay_ids])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn column_family(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PaymentError::StorageError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn read_account(&self, account_no: &str) -> Result<Option<UserAccount>> {
        let cf = self.column_family(CF_ACCOUNTS)?;
        match self.db.get_cf(cf, account_no.as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Whether the index entry for `pay_id` should be (re)pointed at `account_no`.
    fn claims_pay_id(&self, pay_id: &str, account_no: &str) -> Result<bool> {
        let cf = self.column_family(CF_PAY_IDS)?;
        let Some(owner) = self.db.get_cf(cf, pay_id.as_bytes())? else {
            return Ok(true);
        };
        let owner = decode_owner(owner)?;
        if owner == account_no {
            return Ok(false);
        }
        // A stale entry left behind by an account that changed its pay id.
        let still_owned = self
            .read_account(&owner)?
            .is_some_and(|account| account.pay_id == pay_id);
        Ok(!still_owned)
    }
}

fn encode(account: &UserAccount) -> Result<Vec<u8>> {
    serde_json::to_vec(account).map_err(|e| PaymentError::StorageError(Box::new(e)))
}

fn decode(bytes: &[u8]) -> Result<UserAccount> {
    serde_json::from_slice(bytes).map_err(|e| PaymentError::StorageError(Box::new(e)))
}

fn decode_owner(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| PaymentError::StorageError(Box::new(e)))
}

#[async_trait]
impl AccountStore for RocksDBStore {
    async fn find_by_account_number(&self, account_no: &str) -> Result<Option<UserAccount>> {
        self.read_account(account_no)
    }

    async fn find_by_pay_id(&self, pay_id: &str) -> Result<Option<UserAccount>> {
        let cf = self.column_family(CF_PAY_IDS)?;
        let Some(owner) = self.db.get_cf(cf, pay_id.as_bytes())? else {
            return Ok(None);
        };
        let account = self.read_account(&decode_owner(owner)?)?;
        Ok(account.filter(|account| account.pay_id == pay_id))
    }

    async fn save(&self, account: UserAccount) -> Result<()> {
        let accounts = self.column_family(CF_ACCOUNTS)?;
        let pay_ids = self.column_family(CF_PAY_IDS)?;
        let mut batch = WriteBatch::default();

        if let Some(previous) = self.read_account(&account.account_no)?
            && !previous.pay_id.is_empty()
            && previous.pay_id != account.pay_id
            && self.db.get_cf(pay_ids, previous.pay_id.as_bytes())?.as_deref()
                == Some(account.account_no.as_bytes())
        {
            batch.delete_cf(pay_ids, previous.pay_id.as_bytes());
        }

        if !account.pay_id.is_empty() && self.claims_pay_id(&account.pay_id, &account.account_no)? {
            batch.put_cf(pay_ids, account.pay_id.as_bytes(), account.account_no.as_bytes());
        }

        batch.put_cf(accounts, account.account_no.as_bytes(), encode(&account)?);
        self.db.write(batch)?;

        Ok(())
    }

    async fn all_accounts(&self) -> Result<Vec<UserAccount>> {
        let cf = self.column_family(CF_ACCOUNTS)?;

        let mut accounts = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            accounts.push(decode(&value)?);
        }

        Ok(accounts)
    }
}
