use super::account::UserAccount;
use crate::error::Result;
use async_trait::async_trait;

/// Storage of user accounts, reachable by account number or by pay id.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_account_number(&self, account_no: &str) -> Result<Option<UserAccount>>;
    async fn find_by_pay_id(&self, pay_id: &str) -> Result<Option<UserAccount>>;
    /// Inserts or replaces the full record keyed by `account_no`.
    async fn save(&self, account: UserAccount) -> Result<()>;
    async fn all_accounts(&self) -> Result<Vec<UserAccount>>;
}

pub type AccountStoreBox = Box<dyn AccountStore>;
