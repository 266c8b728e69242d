use rust_decimal_macros::dec;
use samebank::application::handler::TransferHandler;
use samebank::domain::account::{Balance, UserAccount};
use samebank::domain::ports::AccountStoreBox;
use samebank::domain::transaction::{TransferOutcome, TransferRequest};
use samebank::infrastructure::in_memory::InMemoryAccountStore;
use std::sync::Arc;

#[tokio::test]
async fn test_store_as_trait_object() {
    let account_store: AccountStoreBox = Box::new(InMemoryAccountStore::new());
    let account = UserAccount::new("111", "alice", "0411000111", Balance::new(dec!(100.0)));

    // Verify Send + Sync by spawning a task
    let handle = tokio::spawn(async move {
        account_store.save(account).await.unwrap();
        account_store.find_by_pay_id("0411000111").await.unwrap().unwrap()
    });

    let retrieved = handle.await.unwrap();
    assert_eq!(retrieved.account_no, "111");
}

#[tokio::test]
async fn test_concurrent_transfers_on_disjoint_pairs() {
    let store = InMemoryAccountStore::with_accounts((0..20).map(|i| {
        UserAccount::new(format!("{i:04}"), format!("user-{i}"), "", Balance::new(dec!(100)))
    }));
    let handler = Arc::new(TransferHandler::new(Box::new(store)));

    // Pairs (0,1), (2,3), ... never share an account.
    let mut tasks = Vec::new();
    for pair in 0..10 {
        let handler = Arc::clone(&handler);
        tasks.push(tokio::spawn(async move {
            let request = TransferRequest::new(
                format!("{:04}", pair * 2),
                "BANK_ACCOUNT",
                format!("{:04}", pair * 2 + 1),
                "25.5",
            );
            handler.transfer(&request).await.unwrap()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), TransferOutcome::Completed);
    }

    let handler = Arc::into_inner(handler).unwrap();
    let accounts = handler.into_results().await.unwrap();
    assert_eq!(accounts.len(), 20);
    for (i, account) in accounts.iter().enumerate() {
        let expected = if i % 2 == 0 { dec!(74.5) } else { dec!(125.5) };
        assert_eq!(account.account_balance, Balance::new(expected), "{}", account.account_no);
    }
}
