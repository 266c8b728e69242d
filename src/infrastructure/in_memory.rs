use crate::domain::account::UserAccount;
use crate::domain::ports::AccountStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for user accounts.
///
/// Accounts are kept in a `BTreeMap` keyed by account number, so listing and
/// pay id lookups walk the accounts in account-number order. Pay ids are not
/// indexed: when several accounts share one, the lowest account number wins.
///
/// `Clone` shares the underlying map.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<BTreeMap<String, UserAccount>>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `accounts`.
    pub fn with_accounts(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.account_no.clone(), account))
            .collect();
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_account_number(&self, account_no: &str) -> Result<Option<UserAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(account_no).cloned())
    }

    async fn find_by_pay_id(&self, pay_id: &str) -> Result<Option<UserAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.pay_id == pay_id)
            .cloned())
    }

    async fn save(&self, account: UserAccount) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.account_no.clone(), account);
        Ok(())
    }

    async fn all_accounts(&self) -> Result<Vec<UserAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().cloned().collect())
    }
}
