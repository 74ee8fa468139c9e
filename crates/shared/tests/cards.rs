mod common;

use common::Harness;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::{
    domain::requests::{CreateCardRequest, FindAllCards},
    errors::ServiceError,
    model::card::CardStatus,
};
use uuid::Uuid;

#[tokio::test]
async fn issued_card_is_active_masked_and_valid_for_three_years() {
    let h = Harness::new();
    let owner = h.user().await;

    let card = h
        .card_commands
        .create(&CreateCardRequest {
            user_id: owner,
            initial_balance: Some(dec!(250.00)),
        })
        .await
        .unwrap()
        .data;

    assert_eq!(card.user_id, owner);
    assert_eq!(card.status, CardStatus::Active);
    assert_eq!(card.balance, dec!(250.00));

    let (mask, last4) = card.number.split_at(15);
    assert_eq!(mask, "**** **** **** ");
    assert_eq!(last4.len(), 4);
    assert!(last4.chars().all(|c| c.is_ascii_digit()));

    let today = chrono::Utc::now().date_naive();
    let years = card.expiration_date.years_since(today).unwrap();
    assert!((2..=3).contains(&years));

    let stored = h.stored(card.id).await;
    assert_eq!(stored.card_number.len(), 16);
    assert!(stored.card_number.ends_with(last4));
}

#[tokio::test]
async fn issued_card_defaults_to_zero_balance() {
    let h = Harness::new();
    let owner = h.user().await;

    let card = h
        .card_commands
        .create(&CreateCardRequest {
            user_id: owner,
            initial_balance: None,
        })
        .await
        .unwrap()
        .data;

    assert_eq!(card.balance, Decimal::ZERO);
}

#[tokio::test]
async fn card_for_unknown_user_is_rejected() {
    let h = Harness::new();
    let stranger = Uuid::new_v4();

    let err = h
        .card_commands
        .create(&CreateCardRequest {
            user_id: stranger,
            initial_balance: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::UserNotFound(id) if id == stranger));
}

#[tokio::test]
async fn negative_opening_balance_fails_validation() {
    let h = Harness::new();
    let owner = h.user().await;

    let err = h
        .card_commands
        .create(&CreateCardRequest {
            user_id: owner,
            initial_balance: Some(dec!(-1.00)),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn deleted_card_is_gone() {
    let h = Harness::new();
    let owner = h.user().await;
    let card = h.card(owner, dec!(1.00), CardStatus::Active).await;

    h.card_commands.delete(card).await.unwrap();

    let err = h.card_queries.find_by_id(card).await.unwrap_err();
    assert!(matches!(err, ServiceError::CardNotFound(_)));

    let err = h.card_commands.delete(card).await.unwrap_err();
    assert!(matches!(err, ServiceError::CardNotFound(id) if id == card));
}

#[tokio::test]
async fn listing_filters_and_paginates() {
    let h = Harness::new();
    let owner = h.user().await;
    let other = h.user().await;

    for balance in [dec!(10.00), dec!(20.00), dec!(30.00), dec!(40.00)] {
        h.card(owner, balance, CardStatus::Active).await;
    }
    h.card(owner, dec!(50.00), CardStatus::Blocked).await;
    h.card(other, dec!(60.00), CardStatus::Active).await;

    let all = h.card_queries.find_all(&FindAllCards::new()).await.unwrap();
    assert_eq!(all.pagination.total_elements, 6);
    assert_eq!(all.pagination.total_pages, 2);
    assert_eq!(all.data.len(), 5);

    let filter = FindAllCards {
        user_id: Some(owner),
        status: Some(CardStatus::Active),
        balance_from: Some(dec!(20.00)),
        balance_to: Some(dec!(35.00)),
        ..FindAllCards::new()
    };
    let page = h.card_queries.find_all(&filter).await.unwrap();
    assert_eq!(page.pagination.total_elements, 2);
    assert!(page.data.iter().all(|card| card.user_id == owner));

    let second = FindAllCards {
        page_number: 1,
        page_size: 4,
        ..FindAllCards::new()
    };
    let page = h.card_queries.find_all(&second).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.page_number, 1);
}

#[tokio::test]
async fn invalid_page_size_fails_validation() {
    let h = Harness::new();

    let filter = FindAllCards {
        page_size: 0,
        ..FindAllCards::new()
    };

    let err = h.card_queries.find_all(&filter).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn my_cards_ignore_requested_owner() {
    let h = Harness::new();
    let me = h.user().await;
    let other = h.user().await;
    let mine = h.card(me, dec!(1.00), CardStatus::Active).await;
    h.card(other, dec!(2.00), CardStatus::Active).await;

    let filter = FindAllCards {
        user_id: Some(other),
        ..FindAllCards::new()
    };
    let page = h.card_queries.find_my_cards(me, &filter).await.unwrap();

    assert_eq!(page.pagination.total_elements, 1);
    assert_eq!(page.data[0].id, mine);
}

#[tokio::test]
async fn balance_is_visible_to_owner_only() {
    let h = Harness::new();
    let me = h.user().await;
    let other = h.user().await;
    let card = h.card(me, dec!(42.42), CardStatus::Blocked).await;

    let balance = h.card_queries.my_balance(card, me).await.unwrap().data;
    assert_eq!(balance.card_id, card);
    assert_eq!(balance.balance, dec!(42.42));

    let err = h.card_queries.my_balance(card, other).await.unwrap_err();
    assert!(matches!(err, ServiceError::CardNotFound(id) if id == card));
}
