use crate::{
    abstract_trait::{
        block_request::{BlockRequestServiceTrait, DynBlockRequestQueryRepository},
        card::repository::DynCardStore,
    },
    domain::responses::{ApiResponse, BlockRequestResponse},
    errors::{RepositoryError, ServiceError},
    model::{
        block_request::{BlockRequestModel, BlockRequestStatus},
        card::CardStatus,
    },
    utils::{Method, Metrics, retry_on_conflict},
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Owner-filed block requests and their administrative resolution.
pub struct BlockRequestService {
    store: DynCardStore,
    query: DynBlockRequestQueryRepository,
    metrics: Metrics,
    conflict_retries: u32,
}

pub struct BlockRequestServiceDeps {
    pub store: DynCardStore,
    pub query: DynBlockRequestQueryRepository,
    pub metrics: Metrics,
    pub conflict_retries: u32,
}

fn duplicate_on_unique_violation(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(_) => ServiceError::DuplicateBlockRequest,
        other => ServiceError::Repo(other),
    }
}

impl BlockRequestService {
    pub fn new(deps: BlockRequestServiceDeps) -> Self {
        let BlockRequestServiceDeps {
            store,
            query,
            metrics,
            conflict_retries,
        } = deps;

        Self {
            store,
            query,
            metrics,
            conflict_retries,
        }
    }

    async fn file_request(
        &self,
        card_id: Uuid,
        caller_id: Uuid,
    ) -> Result<BlockRequestModel, ServiceError> {
        let mut tx = self.store.begin().await?;

        // the card row lock serializes concurrent requests for the same card
        tx.find_by_id_for_update(card_id)
            .await?
            .filter(|card| card.user_id == caller_id)
            .ok_or(ServiceError::CardNotFound(card_id))?;

        if tx
            .exists_block_request(card_id, BlockRequestStatus::Active)
            .await?
        {
            warn!("🚫 Card {card_id} already has an active block request");
            return Err(ServiceError::DuplicateBlockRequest);
        }

        let request = BlockRequestModel {
            id: Uuid::new_v4(),
            card_id,
            user_id: caller_id,
            requested_at: Utc::now().naive_utc(),
            status: BlockRequestStatus::Active,
        };

        let saved = tx
            .insert_block_request(&request)
            .await
            .map_err(duplicate_on_unique_violation)?;
        tx.commit().await.map_err(duplicate_on_unique_violation)?;

        Ok(saved)
    }

    async fn resolve(&self, request_id: Uuid) -> Result<BlockRequestModel, ServiceError> {
        let mut tx = self.store.begin().await?;

        // card row first, then the request row: the same order a card delete
        // takes through its cascade
        let card_id = tx
            .find_block_request(request_id)
            .await?
            .ok_or(ServiceError::BlockRequestNotFound(request_id))?
            .card_id;

        let mut card = tx
            .find_by_id_for_update(card_id)
            .await?
            .ok_or(ServiceError::BlockRequestNotFound(request_id))?;

        let request = tx
            .find_block_request_for_update(request_id)
            .await?
            .ok_or(ServiceError::BlockRequestNotFound(request_id))?;

        if request.status != BlockRequestStatus::Active {
            warn!("🚫 Block request {request_id} is already {}", request.status);
            return Err(ServiceError::BlockRequestAlreadyCompleted(request_id));
        }

        if card.status == CardStatus::Active {
            card.status = CardStatus::Blocked;
            tx.save(&card).await?;
        } else {
            info!("ℹ️ Card {} was already blocked", card.id);
        }

        let completed = tx
            .update_block_request_status(request_id, BlockRequestStatus::Completed)
            .await?;
        tx.commit().await?;

        Ok(completed)
    }
}

#[async_trait]
impl BlockRequestServiceTrait for BlockRequestService {
    async fn request_block(
        &self,
        card_id: Uuid,
        caller_id: Uuid,
    ) -> Result<ApiResponse<BlockRequestResponse>, ServiceError> {
        let start = Instant::now();
        info!("🧾 User {caller_id} requests block of card {card_id}");

        let result = retry_on_conflict(self.conflict_retries, "request_block", move || {
            self.file_request(card_id, caller_id)
        })
        .await;

        self.metrics
            .record_result(Method::RequestBlock, &result, start.elapsed().as_secs_f64());

        let request = result?;
        info!("✅ Block request {} filed for card {card_id}", request.id);

        Ok(ApiResponse::success(
            "Block request submitted",
            BlockRequestResponse::from(request),
        ))
    }

    async fn complete(
        &self,
        request_id: Uuid,
    ) -> Result<ApiResponse<BlockRequestResponse>, ServiceError> {
        let start = Instant::now();
        info!("🔒 Completing block request {request_id}");

        let result = retry_on_conflict(
            self.conflict_retries,
            "complete_block_request",
            move || self.resolve(request_id),
        )
        .await;

        self.metrics.record_result(
            Method::CompleteBlockRequest,
            &result,
            start.elapsed().as_secs_f64(),
        );

        let request = result?;
        info!(
            "✅ Block request {request_id} completed, card {} blocked",
            request.card_id
        );

        Ok(ApiResponse::success(
            "Block request completed",
            BlockRequestResponse::from(request),
        ))
    }

    async fn find_active(&self) -> Result<ApiResponse<Vec<BlockRequestResponse>>, ServiceError> {
        let start = Instant::now();

        let result = self.query.find_active().await.map_err(|e| {
            error!("❌ Failed to fetch active block requests: {e:?}");
            ServiceError::Repo(e)
        });

        self.metrics.record_result(
            Method::FindActiveBlockRequests,
            &result,
            start.elapsed().as_secs_f64(),
        );

        let requests = result?;

        Ok(ApiResponse::success(
            "Active block requests retrieved successfully",
            requests.into_iter().map(BlockRequestResponse::from).collect(),
        ))
    }
}
