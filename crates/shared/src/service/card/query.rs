use crate::{
    abstract_trait::card::{repository::DynCardQueryRepository, service::CardQueryServiceTrait},
    domain::{
        requests::FindAllCards,
        responses::{
            ApiResponse, ApiResponsePagination, CardBalanceResponse, CardResponse, Pagination,
        },
    },
    errors::{ServiceError, format_validation_errors},
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

pub struct CardQueryService {
    query: DynCardQueryRepository,
    metrics: Metrics,
}

impl CardQueryService {
    pub fn new(query: DynCardQueryRepository, metrics: Metrics) -> Self {
        Self { query, metrics }
    }

    async fn page(
        &self,
        filter: &FindAllCards,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError> {
        if let Err(validation_errors) = filter.validate() {
            let errors = format_validation_errors(&validation_errors);
            error!("Validation failed: {errors:?}");
            return Err(ServiceError::Validation(errors));
        }

        info!(
            "🔍 Searching cards | Page: {}, Size: {}",
            filter.page_number, filter.page_size
        );

        let (cards, total_elements) = self.query.find_all(filter).await.map_err(|e| {
            error!("❌ Failed to fetch cards: {e:?}");
            ServiceError::Repo(e)
        })?;

        info!("✅ Found {} cards of {total_elements}", cards.len());

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Cards retrieved successfully".to_string(),
            data: cards.into_iter().map(CardResponse::from).collect(),
            pagination: Pagination::new(filter.page_number, filter.page_size, total_elements),
        })
    }
}

#[async_trait]
impl CardQueryServiceTrait for CardQueryService {
    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<CardResponse>, ServiceError> {
        let start = Instant::now();
        info!("🔍 Fetching card id={id}");

        let result = match self.query.find_by_id(id).await {
            Ok(Some(card)) => Ok(card),
            Ok(None) => Err(ServiceError::CardNotFound(id)),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.metrics
            .record_result(Method::FindCard, &result, start.elapsed().as_secs_f64());

        Ok(ApiResponse::success(
            "Card retrieved successfully",
            CardResponse::from(result?),
        ))
    }

    async fn find_all(
        &self,
        filter: &FindAllCards,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError> {
        let start = Instant::now();
        let result = self.page(filter).await;
        self.metrics
            .record_result(Method::FindAllCards, &result, start.elapsed().as_secs_f64());
        result
    }

    async fn find_my_cards(
        &self,
        caller_id: Uuid,
        filter: &FindAllCards,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError> {
        let start = Instant::now();

        let scoped = FindAllCards {
            user_id: Some(caller_id),
            ..filter.clone()
        };
        let result = self.page(&scoped).await;

        self.metrics
            .record_result(Method::FindMyCards, &result, start.elapsed().as_secs_f64());
        result
    }

    async fn my_balance(
        &self,
        card_id: Uuid,
        caller_id: Uuid,
    ) -> Result<ApiResponse<CardBalanceResponse>, ServiceError> {
        let start = Instant::now();
        info!("💰 Fetching balance of card {card_id} for user {caller_id}");

        let result = match self.query.find_by_id_for_owner(card_id, caller_id).await {
            Ok(Some(card)) => Ok(card),
            Ok(None) => Err(ServiceError::CardNotFound(card_id)),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.metrics
            .record_result(Method::MyCardBalance, &result, start.elapsed().as_secs_f64());

        let card = result?;

        Ok(ApiResponse::success(
            "Balance retrieved successfully",
            CardBalanceResponse {
                card_id: card.id,
                balance: card.balance,
            },
        ))
    }
}
