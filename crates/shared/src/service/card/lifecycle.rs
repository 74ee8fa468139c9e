use crate::{
    abstract_trait::card::{repository::DynCardStore, service::CardLifecycleServiceTrait},
    domain::responses::{ApiResponse, CardResponse},
    errors::ServiceError,
    model::card::{CardModel, CardStatus},
    utils::{Method, Metrics, mask_card_number, retry_on_conflict},
};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

pub struct CardLifecycleService {
    store: DynCardStore,
    metrics: Metrics,
    conflict_retries: u32,
}

impl CardLifecycleService {
    pub fn new(store: DynCardStore, metrics: Metrics, conflict_retries: u32) -> Self {
        Self {
            store,
            metrics,
            conflict_retries,
        }
    }

    async fn apply(&self, card_id: Uuid, target: CardStatus) -> Result<CardModel, ServiceError> {
        let mut tx = self.store.begin().await?;

        let mut card = tx
            .find_by_id_for_update(card_id)
            .await?
            .ok_or(ServiceError::CardNotFound(card_id))?;

        if card.status == target {
            warn!("🔁 Card {card_id} already has status {target}");
            return Err(ServiceError::StatusAlreadySet {
                card_number: mask_card_number(&card.card_number),
                status: target,
            });
        }

        card.status = target;
        let saved = tx.save(&card).await?;
        tx.commit().await?;

        Ok(saved)
    }
}

#[async_trait]
impl CardLifecycleServiceTrait for CardLifecycleService {
    async fn set_status(
        &self,
        card_id: Uuid,
        target: CardStatus,
    ) -> Result<ApiResponse<CardResponse>, ServiceError> {
        let start = Instant::now();
        info!("🔄 Setting status of card {card_id} to {target}");

        let result = retry_on_conflict(self.conflict_retries, "set_status", move || {
            self.apply(card_id, target)
        })
        .await;

        self.metrics
            .record_result(Method::SetStatus, &result, start.elapsed().as_secs_f64());

        let card = result?;
        info!("✅ Card {card_id} is now {target}");

        Ok(ApiResponse::success(
            format!("Card status changed to {target}"),
            CardResponse::from(card),
        ))
    }

    async fn block(&self, card_id: Uuid) -> Result<ApiResponse<CardResponse>, ServiceError> {
        self.set_status(card_id, CardStatus::Blocked).await
    }

    async fn activate(&self, card_id: Uuid) -> Result<ApiResponse<CardResponse>, ServiceError> {
        self.set_status(card_id, CardStatus::Active).await
    }
}
