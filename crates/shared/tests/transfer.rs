mod common;

use common::Harness;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::{
    domain::requests::TransferRequest,
    errors::ServiceError,
    model::card::{CardStatus, MAX_BALANCE},
};
use std::time::Duration;
use uuid::Uuid;

fn request(from: Uuid, to: Uuid, amount: Decimal) -> TransferRequest {
    TransferRequest {
        from_card_id: from,
        to_card_id: to,
        amount,
    }
}

#[tokio::test]
async fn transfer_moves_funds_between_own_cards() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(100.00), CardStatus::Active).await;
    let y = h.card(owner, dec!(50.00), CardStatus::Active).await;

    h.transfers
        .transfer(owner, &request(x, y, dec!(30.00)))
        .await
        .unwrap();

    assert_eq!(h.balance(x).await, dec!(70.00));
    assert_eq!(h.balance(y).await, dec!(80.00));
}

#[tokio::test]
async fn transfer_to_blocked_card_is_rejected() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(100.00), CardStatus::Active).await;
    let y = h.card(owner, dec!(0.00), CardStatus::Blocked).await;

    let err = h
        .transfers
        .transfer(owner, &request(x, y, dec!(10.00)))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::CardIsNotActive));
    assert_eq!(h.balance(x).await, dec!(100.00));
    assert_eq!(h.balance(y).await, dec!(0.00));
}

#[tokio::test]
async fn transfer_from_blocked_card_is_rejected() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(100.00), CardStatus::Blocked).await;
    let y = h.card(owner, dec!(0.00), CardStatus::Active).await;

    let err = h
        .transfers
        .transfer(owner, &request(x, y, dec!(10.00)))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::CardIsNotActive));
}

#[tokio::test]
async fn transfer_exceeding_balance_is_rejected() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(10.00), CardStatus::Active).await;
    let y = h.card(owner, dec!(0.00), CardStatus::Active).await;

    let err = h
        .transfers
        .transfer(owner, &request(x, y, dec!(50.00)))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientFunds));
    assert_eq!(h.balance(x).await, dec!(10.00));
    assert_eq!(h.balance(y).await, dec!(0.00));
}

#[tokio::test]
async fn transfer_of_whole_balance_leaves_zero() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(25.50), CardStatus::Active).await;
    let y = h.card(owner, dec!(0.00), CardStatus::Active).await;

    h.transfers
        .transfer(owner, &request(x, y, dec!(25.50)))
        .await
        .unwrap();

    assert_eq!(h.balance(x).await, Decimal::ZERO);
    assert_eq!(h.balance(y).await, dec!(25.50));
}

#[tokio::test]
async fn non_positive_amounts_are_rejected_before_storage() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(10.00), CardStatus::Active).await;

    for amount in [dec!(0), dec!(-5.00)] {
        // unknown card ids prove storage is never consulted
        let err = h
            .transfers
            .transfer(owner, &request(Uuid::new_v4(), x, amount))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidAmount));
    }

    assert_eq!(h.balance(x).await, dec!(10.00));
}

#[tokio::test]
async fn sub_cent_amounts_are_rejected() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(100.00), CardStatus::Active).await;
    let y = h.card(owner, dec!(50.00), CardStatus::Active).await;

    for amount in [dec!(0.005), dec!(0.001), dec!(12.345)] {
        let err = h
            .transfers
            .transfer(owner, &request(x, y, amount))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidAmount));
    }

    // trailing zeros are not extra precision
    h.transfers
        .transfer(owner, &request(x, y, dec!(1.500)))
        .await
        .unwrap();

    assert_eq!(h.balance(x).await, dec!(98.50));
    assert_eq!(h.balance(y).await, dec!(51.50));
}

#[tokio::test]
async fn credit_beyond_the_maximum_balance_is_rejected() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(10.00), CardStatus::Active).await;
    let y = h.card(owner, MAX_BALANCE - dec!(5.00), CardStatus::Active).await;

    let err = h
        .transfers
        .transfer(owner, &request(x, y, dec!(5.01)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidAmount));
    assert_eq!(h.balance(x).await, dec!(10.00));

    h.transfers
        .transfer(owner, &request(x, y, dec!(5.00)))
        .await
        .unwrap();
    assert_eq!(h.balance(y).await, MAX_BALANCE);
}

#[tokio::test]
async fn foreign_cards_look_absent() {
    let h = Harness::new();
    let owner = h.user().await;
    let stranger = h.user().await;
    let mine = h.card(owner, dec!(100.00), CardStatus::Active).await;
    let theirs = h.card(stranger, dec!(100.00), CardStatus::Active).await;

    let err = h
        .transfers
        .transfer(owner, &request(mine, theirs, dec!(1.00)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CardNotFound(id) if id == theirs));

    let err = h
        .transfers
        .transfer(owner, &request(theirs, mine, dec!(1.00)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CardNotFound(id) if id == theirs));

    assert_eq!(h.balance(mine).await, dec!(100.00));
    assert_eq!(h.balance(theirs).await, dec!(100.00));
}

#[tokio::test]
async fn missing_source_is_reported_before_missing_destination() {
    let h = Harness::new();
    let owner = h.user().await;
    let from = Uuid::new_v4();
    let to = Uuid::new_v4();

    let err = h
        .transfers
        .transfer(owner, &request(from, to, dec!(1.00)))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::CardNotFound(id) if id == from));
}

#[tokio::test]
async fn self_transfer_changes_nothing() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(40.00), CardStatus::Active).await;

    h.transfers
        .transfer(owner, &request(x, x, dec!(15.00)))
        .await
        .unwrap();
    assert_eq!(h.balance(x).await, dec!(40.00));

    let err = h
        .transfers
        .transfer(owner, &request(x, x, dec!(45.00)))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientFunds));
}

#[tokio::test]
async fn sequences_of_transfers_conserve_funds_and_never_go_negative() {
    let h = Harness::new();
    let owner = h.user().await;
    let cards = [
        h.card(owner, dec!(100.00), CardStatus::Active).await,
        h.card(owner, dec!(35.25), CardStatus::Active).await,
        h.card(owner, dec!(0.00), CardStatus::Active).await,
    ];
    let total = dec!(135.25);

    let amounts = [dec!(12.34), dec!(99.99), dec!(0.01), dec!(60.00), dec!(7.50)];

    for (step, amount) in amounts.iter().cycle().take(30).enumerate() {
        let from = cards[step % 3];
        let to = cards[(step + 1) % 3];
        let before = h.balance(from).await + h.balance(to).await;

        let result = h.transfers.transfer(owner, &request(from, to, *amount)).await;
        assert!(matches!(result, Ok(_) | Err(ServiceError::InsufficientFunds)));

        assert_eq!(h.balance(from).await + h.balance(to).await, before);

        let mut sum = Decimal::ZERO;
        for card in cards {
            let balance = h.balance(card).await;
            assert!(balance >= Decimal::ZERO);
            sum += balance;
        }
        assert_eq!(sum, total);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn opposite_concurrent_transfers_do_not_deadlock() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(500.00), CardStatus::Active).await;
    let y = h.card(owner, dec!(500.00), CardStatus::Active).await;

    let mut handles = Vec::new();
    for i in 0..40 {
        let transfers = h.transfers.clone();
        let (from, to) = if i % 2 == 0 { (x, y) } else { (y, x) };
        handles.push(tokio::spawn(async move {
            transfers.transfer(owner, &request(from, to, dec!(3.00))).await
        }));
    }

    let all = async {
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
    };
    tokio::time::timeout(Duration::from_secs(10), all)
        .await
        .expect("transfers finished without deadlock");

    assert_eq!(h.balance(x).await, dec!(500.00));
    assert_eq!(h.balance(y).await, dec!(500.00));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_drains_never_overdraw() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(100.00), CardStatus::Active).await;
    let y = h.card(owner, dec!(0.00), CardStatus::Active).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let transfers = h.transfers.clone();
        handles.push(tokio::spawn(async move {
            transfers.transfer(owner, &request(x, y, dec!(30.00))).await
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(ServiceError::InsufficientFunds) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(succeeded, 3);
    assert_eq!(h.balance(x).await, dec!(10.00));
    assert_eq!(h.balance(y).await, dec!(90.00));
}

#[tokio::test]
async fn storage_conflicts_are_retried() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(100.00), CardStatus::Active).await;
    let y = h.card(owner, dec!(0.00), CardStatus::Active).await;

    h.store.fail_next_commits(common::CONFLICT_RETRIES - 1);
    h.transfers
        .transfer(owner, &request(x, y, dec!(10.00)))
        .await
        .unwrap();

    assert_eq!(h.balance(x).await, dec!(90.00));
    assert_eq!(h.balance(y).await, dec!(10.00));
}

#[tokio::test]
async fn exhausted_retries_surface_as_transient() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(100.00), CardStatus::Active).await;
    let y = h.card(owner, dec!(0.00), CardStatus::Active).await;

    h.store.fail_next_commits(common::CONFLICT_RETRIES);
    let err = h
        .transfers
        .transfer(owner, &request(x, y, dec!(10.00)))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Transient(_)));
    assert_eq!(h.balance(x).await, dec!(100.00));
    assert_eq!(h.balance(y).await, dec!(0.00));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn blocking_the_destination_does_not_interleave_with_transfers() {
    let h = Harness::new();
    let owner = h.user().await;
    let x = h.card(owner, dec!(100.00), CardStatus::Active).await;
    let y = h.card(owner, dec!(50.00), CardStatus::Active).await;

    let mut handles = Vec::new();
    for _ in 0..30 {
        let transfers = h.transfers.clone();
        handles.push(tokio::spawn(async move {
            transfers.transfer(owner, &request(x, y, dec!(1.00))).await
        }));
    }

    let lifecycle = h.lifecycle.clone();
    let blocker = tokio::spawn(async move { lifecycle.block(y).await });

    let mut committed = 0u32;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => committed += 1,
            Err(ServiceError::CardIsNotActive) => {}
            Err(other) => panic!("unexpected transfer error: {other:?}"),
        }
    }
    let blocked = blocker.await.unwrap().unwrap().data;

    // every committed transfer landed before the block did
    assert_eq!(blocked.status, CardStatus::Blocked);
    assert_eq!(blocked.balance, h.balance(y).await);

    let moved = Decimal::from(committed);
    assert_eq!(h.balance(x).await, dec!(100.00) - moved);
    assert_eq!(h.balance(y).await, dec!(50.00) + moved);
    assert_eq!(h.balance(x).await + h.balance(y).await, dec!(150.00));
}
