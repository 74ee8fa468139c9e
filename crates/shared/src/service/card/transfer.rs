use crate::{
    abstract_trait::card::{repository::DynCardStore, service::TransferServiceTrait},
    domain::{requests::TransferRequest, responses::ApiResponse},
    errors::ServiceError,
    model::card::{MAX_BALANCE, fits_balance_column},
    utils::{Method, Metrics, retry_on_conflict},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Moves funds between two cards of the same owner inside one unit of work.
pub struct TransferService {
    store: DynCardStore,
    metrics: Metrics,
    conflict_retries: u32,
}

impl std::fmt::Debug for TransferService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferService")
            .field("store", &"DynCardStore")
            .field("conflict_retries", &self.conflict_retries)
            .finish()
    }
}

impl TransferService {
    pub fn new(store: DynCardStore, metrics: Metrics, conflict_retries: u32) -> Self {
        Self {
            store,
            metrics,
            conflict_retries,
        }
    }

    async fn execute(
        &self,
        caller_id: Uuid,
        from_id: Uuid,
        to_id: Uuid,
        amount: Decimal,
    ) -> Result<(), ServiceError> {
        let mut tx = self.store.begin().await?;

        // rows are always locked in id order so opposite transfers cannot deadlock
        let (low, high) = if from_id <= to_id {
            (from_id, to_id)
        } else {
            (to_id, from_id)
        };

        let low_card = tx.find_by_id_for_owner_for_update(low, caller_id).await?;
        let high_card = if low == high {
            low_card.clone()
        } else {
            tx.find_by_id_for_owner_for_update(high, caller_id).await?
        };

        let (from_card, to_card) = if from_id <= to_id {
            (low_card, high_card)
        } else {
            (high_card, low_card)
        };

        let mut from_card = from_card.ok_or(ServiceError::CardNotFound(from_id))?;
        let mut to_card = to_card.ok_or(ServiceError::CardNotFound(to_id))?;

        if !from_card.is_active() || !to_card.is_active() {
            warn!("🚫 Transfer {from_id} -> {to_id} rejected: card not active");
            return Err(ServiceError::CardIsNotActive);
        }

        if from_card.balance < amount {
            warn!("🚫 Transfer {from_id} -> {to_id} rejected: insufficient funds");
            return Err(ServiceError::InsufficientFunds);
        }

        if from_id == to_id {
            info!("↩️ Self-transfer on card {from_id} has no effect");
            return Ok(());
        }

        if to_card.balance + amount > MAX_BALANCE {
            warn!("🚫 Transfer {from_id} -> {to_id} rejected: destination balance would overflow");
            return Err(ServiceError::InvalidAmount);
        }

        from_card.balance -= amount;
        to_card.balance += amount;

        tx.save(&from_card).await?;
        tx.save(&to_card).await?;
        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl TransferServiceTrait for TransferService {
    async fn transfer(
        &self,
        caller_id: Uuid,
        req: &TransferRequest,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let start = Instant::now();

        info!(
            "💸 Transferring {} from card {} to card {} for user {caller_id}",
            req.amount, req.from_card_id, req.to_card_id
        );

        let result = if req.amount <= Decimal::ZERO || !fits_balance_column(req.amount) {
            warn!("🚫 Transfer rejected: invalid amount {}", req.amount);
            Err(ServiceError::InvalidAmount)
        } else {
            retry_on_conflict(self.conflict_retries, "transfer", move || {
                self.execute(caller_id, req.from_card_id, req.to_card_id, req.amount)
            })
            .await
        };

        self.metrics
            .record_result(Method::Transfer, &result, start.elapsed().as_secs_f64());

        result?;

        info!(
            "✅ Transferred {} from card {} to card {}",
            req.amount, req.from_card_id, req.to_card_id
        );

        Ok(ApiResponse::success("Transfer completed successfully", ()))
    }
}
