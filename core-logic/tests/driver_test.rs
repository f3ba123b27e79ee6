mod common;

use common::{MockClient, ReceiptStep, SendStep};
use core_logic::{
    ConfirmPolicy, NonceCounter, OperationDriver, OperationOutcome, RetryPolicy,
    TransactionIntent, TxStep,
};
use ethers::types::{Address, Bytes, U256};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn intent(nonce: u64) -> TransactionIntent {
    TransactionIntent {
        from: Address::zero(),
        to: Address::repeat_byte(0x22),
        value: U256::from(1u64),
        gas_limit: U256::from(21_000u64),
        gas_price: U256::from(5_000_000_000u64),
        nonce,
        chain_id: 16_600,
        data: Bytes::new(),
    }
}

fn quick_confirm() -> ConfirmPolicy {
    ConfirmPolicy {
        max_wait: Duration::from_millis(100),
        poll_interval: Duration::from_millis(10),
    }
}

fn quick_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10))
}

#[tokio::test]
async fn nonce_advances_only_on_accepted_send() {
    let client = Arc::new(
        MockClient::new()
            .with_start_nonce(7)
            .script_sends(vec![
                SendStep::Accept,
                SendStep::Reject("invalid sender"),
                SendStep::Accept,
            ])
            .script_receipts(vec![ReceiptStep::Found(1, 1), ReceiptStep::Found(2, 1)]),
    );
    let nonce = NonceCounter::from_pending(client.as_ref(), Address::zero())
        .await
        .unwrap();
    let mut driver = OperationDriver::new(client.clone(), nonce, quick_retry());

    let first = driver.run_operation("transfer", quick_confirm(), intent).await;
    assert!(first.is_success());

    let second = driver.run_operation("transfer", quick_confirm(), intent).await;
    assert!(matches!(second, OperationOutcome::SendFailure(_)));

    let third = driver.run_operation("transfer", quick_confirm(), intent).await;
    assert!(third.is_success());

    // Slot 7 consumed, 8 reused after the failed send, then consumed.
    assert_eq!(client.signed_nonces(), vec![7, 8, 8]);
    assert_eq!(driver.next_nonce(), 9);
}

#[tokio::test]
async fn confirmation_timeout_still_consumes_nonce() {
    let client = Arc::new(MockClient::new().script_sends(vec![SendStep::Accept]));
    let mut driver = OperationDriver::new(client.clone(), NonceCounter::new(0), quick_retry());

    let confirm = ConfirmPolicy {
        max_wait: Duration::from_millis(40),
        poll_interval: Duration::from_millis(10),
    };
    let outcome = driver.run_operation("transfer", confirm, intent).await;

    assert!(outcome.timed_out());
    assert!(!outcome.is_success());
    assert_eq!(driver.next_nonce(), 1);
}

#[tokio::test]
async fn reverted_receipt_maps_to_confirm_failure() {
    let client = Arc::new(
        MockClient::new()
            .script_sends(vec![SendStep::Accept])
            .script_receipts(vec![ReceiptStep::Found(5, 0)]),
    );
    let mut driver = OperationDriver::new(client.clone(), NonceCounter::new(0), quick_retry());

    let outcome = driver.run_operation("swap", quick_confirm(), intent).await;

    assert!(outcome.reverted());
    assert!(!outcome.is_success());
    assert_eq!(driver.next_nonce(), 1);
}

#[tokio::test]
async fn second_step_skipped_when_first_fails() {
    // Approve mines but reverts; the swap intent must never be built.
    let client = Arc::new(
        MockClient::new()
            .script_sends(vec![SendStep::Accept])
            .script_receipts(vec![ReceiptStep::Found(3, 0)]),
    );
    let mut driver = OperationDriver::new(client.clone(), NonceCounter::new(0), quick_retry());

    let swap_builds = Arc::new(AtomicUsize::new(0));
    let counter = swap_builds.clone();
    let steps = vec![
        TxStep::new("approve", quick_confirm(), intent),
        TxStep::new("swap", quick_confirm(), move |nonce| {
            counter.fetch_add(1, Ordering::SeqCst);
            intent(nonce)
        }),
    ];

    let outcome = driver.run_sequence(steps).await;

    assert!(outcome.reverted());
    assert_eq!(swap_builds.load(Ordering::SeqCst), 0);
    assert_eq!(driver.next_nonce(), 1);
}

#[tokio::test]
async fn sequence_runs_both_steps_on_success() {
    let client = Arc::new(
        MockClient::new()
            .script_sends(vec![SendStep::Accept, SendStep::Accept])
            .script_receipts(vec![ReceiptStep::Found(1, 1), ReceiptStep::Found(2, 1)]),
    );
    let mut driver = OperationDriver::new(client.clone(), NonceCounter::new(0), quick_retry());

    let swap_builds = Arc::new(AtomicUsize::new(0));
    let counter = swap_builds.clone();
    let steps = vec![
        TxStep::new("approve", quick_confirm(), intent),
        TxStep::new("swap", quick_confirm(), move |nonce| {
            counter.fetch_add(1, Ordering::SeqCst);
            intent(nonce)
        }),
    ];

    let outcome = driver.run_sequence(steps).await;

    assert!(outcome.is_success());
    assert_eq!(swap_builds.load(Ordering::SeqCst), 1);
    assert_eq!(client.signed_nonces(), vec![0, 1]);
    assert_eq!(driver.next_nonce(), 2);
}
