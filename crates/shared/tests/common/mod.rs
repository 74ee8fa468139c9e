#![allow(dead_code)]

use chrono::{Months, Utc};
use rust_decimal::Decimal;
use shared::{
    abstract_trait::{
        block_request::DynBlockRequestService,
        card::{
            repository::{CardCommandRepositoryTrait, CardQueryRepositoryTrait},
            service::{
                DynCardCommandService, DynCardLifecycleService, DynCardQueryService,
                DynTransferService,
            },
        },
        user::{DynUserService, UserCommandRepositoryTrait},
    },
    config::Hashing,
    model::{
        card::{CardModel, CardStatus},
        user::{UserModel, UserRole},
    },
    repository::memory::MemoryStore,
    service::{
        block_request::{BlockRequestService, BlockRequestServiceDeps},
        card::{
            CardCommandService, CardCommandServiceDeps, CardLifecycleService, CardQueryService,
            TransferService,
        },
        user::{UserService, UserServiceDeps},
    },
    utils::Metrics,
};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use uuid::Uuid;

pub const CONFLICT_RETRIES: u32 = 3;

static CARD_SEQ: AtomicU64 = AtomicU64::new(1);

/// Services wired against one in-memory store.
pub struct Harness {
    pub store: MemoryStore,
    pub transfers: DynTransferService,
    pub lifecycle: DynCardLifecycleService,
    pub block_requests: DynBlockRequestService,
    pub card_commands: DynCardCommandService,
    pub card_queries: DynCardQueryService,
    pub users: DynUserService,
}

impl Harness {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let shared = Arc::new(store.clone());
        let metrics = Metrics::new();

        Self {
            transfers: Arc::new(TransferService::new(
                shared.clone(),
                metrics.clone(),
                CONFLICT_RETRIES,
            )),
            lifecycle: Arc::new(CardLifecycleService::new(
                shared.clone(),
                metrics.clone(),
                CONFLICT_RETRIES,
            )),
            block_requests: Arc::new(BlockRequestService::new(BlockRequestServiceDeps {
                store: shared.clone(),
                query: shared.clone(),
                metrics: metrics.clone(),
                conflict_retries: CONFLICT_RETRIES,
            })),
            card_commands: Arc::new(CardCommandService::new(CardCommandServiceDeps {
                user_query: shared.clone(),
                command: shared.clone(),
                metrics: metrics.clone(),
            })),
            card_queries: Arc::new(CardQueryService::new(shared.clone(), metrics.clone())),
            users: Arc::new(UserService::new(UserServiceDeps {
                query: shared.clone(),
                command: shared,
                hashing: Arc::new(Hashing::with_cost(4)),
                metrics,
            })),
            store,
        }
    }

    pub async fn user(&self) -> Uuid {
        let id = Uuid::new_v4();
        UserCommandRepositoryTrait::create(
            &self.store,
            &UserModel {
                id,
                first_name: "Anna".into(),
                last_name: "Petrova".into(),
                email: format!("{id}@example.com"),
                phone_number: "89001234567".into(),
                password: "not-a-real-hash".into(),
                role: UserRole::User,
                created_at: None,
                updated_at: None,
            },
        )
        .await
        .expect("seed user");
        id
    }

    pub async fn card(&self, owner: Uuid, balance: Decimal, status: CardStatus) -> Uuid {
        let id = Uuid::new_v4();
        let seq = CARD_SEQ.fetch_add(1, Ordering::SeqCst);

        CardCommandRepositoryTrait::create(
            &self.store,
            &CardModel {
                id,
                user_id: owner,
                card_number: format!("4000{seq:012}"),
                expiration_date: Utc::now().date_naive() + Months::new(36),
                status,
                balance,
                created_at: None,
                updated_at: None,
            },
        )
        .await
        .expect("seed card");
        id
    }

    pub async fn stored(&self, card_id: Uuid) -> CardModel {
        CardQueryRepositoryTrait::find_by_id(&self.store, card_id)
            .await
            .expect("read card")
            .expect("card exists")
    }

    pub async fn balance(&self, card_id: Uuid) -> Decimal {
        self.stored(card_id).await.balance
    }
}
