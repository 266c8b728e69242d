use rust_decimal_macros::dec;
use samebank::application::handler::TransferHandler;
use samebank::domain::account::Balance;
use samebank::domain::ports::AccountStore;
use samebank::domain::transaction::{TransferOutcome, TransferRequest};
use samebank::error::PaymentError;

mod common;
use common::{RECEIVER_ACCOUNT, RECEIVER_PAY_ID, SENDER_ACCOUNT, store_with};

#[tokio::test]
async fn test_transfer_between_bank_accounts() {
    let store = store_with(dec!(100), dec!(50));
    let handler = TransferHandler::new(Box::new(store.clone()));

    let request = TransferRequest::new(SENDER_ACCOUNT, "BANK_ACCOUNT", RECEIVER_ACCOUNT, "10");
    let outcome = handler.transfer(&request).await.unwrap();
    assert_eq!(outcome, TransferOutcome::Completed);
    assert_eq!(outcome.message(), "Transaction Successful!!");

    let sender = store.find_by_account_number(SENDER_ACCOUNT).await.unwrap().unwrap();
    let receiver = store.find_by_account_number(RECEIVER_ACCOUNT).await.unwrap().unwrap();
    assert_eq!(sender.account_balance, Balance::new(dec!(90)));
    assert_eq!(receiver.account_balance, Balance::new(dec!(60)));
}

#[tokio::test]
async fn test_insufficient_balance_is_an_outcome() {
    let store = store_with(dec!(5), dec!(50));
    let handler = TransferHandler::new(Box::new(store.clone()));

    let request = TransferRequest::new(SENDER_ACCOUNT, "BANK_ACCOUNT", RECEIVER_ACCOUNT, "10");
    let outcome = handler.transfer(&request).await.unwrap();
    assert_eq!(outcome, TransferOutcome::InsufficientBalance);
    assert_eq!(outcome.message(), "Insufficient account balance");

    let sender = store.find_by_account_number(SENDER_ACCOUNT).await.unwrap().unwrap();
    let receiver = store.find_by_account_number(RECEIVER_ACCOUNT).await.unwrap().unwrap();
    assert_eq!(sender.account_balance, Balance::new(dec!(5)));
    assert_eq!(receiver.account_balance, Balance::new(dec!(50)));
}

#[tokio::test]
async fn test_empty_sender_is_rejected() {
    let handler = TransferHandler::new(Box::new(store_with(dec!(100), dec!(50))));

    let request = TransferRequest::new("", "BANK_ACCOUNT", RECEIVER_ACCOUNT, "10");
    let err = handler.transfer(&request).await.unwrap_err();
    assert!(matches!(err, PaymentError::InvalidInput(_)));
    assert_eq!(err.to_string(), "Invalid sender account information");
}

#[tokio::test]
async fn test_pay_id_resolves_receiver() {
    let store = store_with(dec!(100), dec!(50));
    let handler = TransferHandler::new(Box::new(store.clone()));

    let request = TransferRequest::new(SENDER_ACCOUNT, "PAY_ID", RECEIVER_PAY_ID, "10");
    assert_eq!(
        handler.transfer(&request).await.unwrap(),
        TransferOutcome::Completed
    );

    let receiver = store.find_by_pay_id(RECEIVER_PAY_ID).await.unwrap().unwrap();
    assert_eq!(receiver.account_no, RECEIVER_ACCOUNT);
    assert_eq!(receiver.account_balance, Balance::new(dec!(60)));
}

#[tokio::test]
async fn test_negative_amount_is_rejected_regardless_of_balance() {
    for balance in [dec!(0), dec!(5), dec!(1000000)] {
        let handler = TransferHandler::new(Box::new(store_with(balance, dec!(50))));

        let request = TransferRequest::new(SENDER_ACCOUNT, "BANK_ACCOUNT", RECEIVER_ACCOUNT, "-1");
        let err = handler.transfer(&request).await.unwrap_err();
        assert!(matches!(err, PaymentError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Amount to be transferred is invalid");
    }
}

#[tokio::test]
async fn test_unregistered_parties() {
    let handler = TransferHandler::new(Box::new(store_with(dec!(100), dec!(50))));

    let request = TransferRequest::new("INVALID_NO", "BANK_ACCOUNT", RECEIVER_ACCOUNT, "10");
    let err = handler.transfer(&request).await.unwrap_err();
    assert!(matches!(err, PaymentError::NotFound(_)));
    assert_eq!(err.to_string(), "Sender account not registered with bank");

    let request = TransferRequest::new(SENDER_ACCOUNT, "BANK_ACCOUNT", "INVALID_NO", "10");
    let err = handler.transfer(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "Receiver BANK_ACCOUNT not registered with bank");

    let request = TransferRequest::new(SENDER_ACCOUNT, "PAY_ID", "0499999999", "10");
    let err = handler.transfer(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "Receiver PAY_ID not registered with bank");
}

#[tokio::test]
async fn test_repeated_request_is_not_deduplicated() {
    let store = store_with(dec!(100), dec!(50));
    let handler = TransferHandler::new(Box::new(store.clone()));
    let request = TransferRequest::new(SENDER_ACCOUNT, "BANK_ACCOUNT", RECEIVER_ACCOUNT, "30");

    for _ in 0..3 {
        assert_eq!(
            handler.transfer(&request).await.unwrap(),
            TransferOutcome::Completed
        );
    }
    // The fourth no longer fits in the remaining 10.
    assert_eq!(
        handler.transfer(&request).await.unwrap(),
        TransferOutcome::InsufficientBalance
    );

    let accounts = handler.into_results().await.unwrap();
    assert_eq!(accounts[0].account_balance, Balance::new(dec!(10)));
    assert_eq!(accounts[1].account_balance, Balance::new(dec!(140)));
}
