use crate::{
    abstract_trait::{
        card::{repository::DynCardCommandRepository, service::CardCommandServiceTrait},
        user::DynUserQueryRepository,
    },
    domain::{
        requests::CreateCardRequest,
        responses::{ApiResponse, CardResponse},
    },
    errors::{RepositoryError, ServiceError, format_validation_errors},
    model::card::{CardModel, CardStatus},
    utils::{Method, Metrics, random_card_number},
};
use async_trait::async_trait;
use chrono::{Months, Utc};
use rust_decimal::Decimal;
use tokio::time::Instant;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

const CARD_VALIDITY_MONTHS: u32 = 36;

pub struct CardCommandService {
    user_query: DynUserQueryRepository,
    command: DynCardCommandRepository,
    metrics: Metrics,
}

pub struct CardCommandServiceDeps {
    pub user_query: DynUserQueryRepository,
    pub command: DynCardCommandRepository,
    pub metrics: Metrics,
}

impl CardCommandService {
    pub fn new(deps: CardCommandServiceDeps) -> Self {
        let CardCommandServiceDeps {
            user_query,
            command,
            metrics,
        } = deps;

        Self {
            user_query,
            command,
            metrics,
        }
    }

    async fn create_card(&self, req: &CreateCardRequest) -> Result<CardModel, ServiceError> {
        if let Err(validation_errors) = req.validate() {
            let errors = format_validation_errors(&validation_errors);
            error!("Validation failed: {errors:?}");
            return Err(ServiceError::Validation(errors));
        }

        self.user_query
            .find_by_id(req.user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(req.user_id))?;

        let today = Utc::now().date_naive();
        let expiration_date = today
            .checked_add_months(Months::new(CARD_VALIDITY_MONTHS))
            .ok_or_else(|| ServiceError::Internal("expiration date out of range".into()))?;

        let card = CardModel {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            card_number: random_card_number()?,
            expiration_date,
            status: CardStatus::Active,
            balance: req.initial_balance.unwrap_or(Decimal::ZERO),
            created_at: None,
            updated_at: None,
        };

        let created = self.command.create(&card).await.map_err(|e| {
            error!("💥 Failed to create card for user {}: {e:?}", req.user_id);
            match e {
                RepositoryError::ForeignKey(_) => ServiceError::UserNotFound(req.user_id),
                other => ServiceError::Repo(other),
            }
        })?;

        Ok(created)
    }
}

#[async_trait]
impl CardCommandServiceTrait for CardCommandService {
    async fn create(
        &self,
        req: &CreateCardRequest,
    ) -> Result<ApiResponse<CardResponse>, ServiceError> {
        let start = Instant::now();
        info!("🆕 Creating card for user_id={}", req.user_id);

        let result = self.create_card(req).await;
        self.metrics
            .record_result(Method::CreateCard, &result, start.elapsed().as_secs_f64());

        let card = result?;
        info!("✅ Card created successfully with card_id={}", card.id);

        Ok(ApiResponse::success(
            "Card created successfully",
            CardResponse::from(card),
        ))
    }

    async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, ServiceError> {
        let start = Instant::now();
        info!("🗑️ Deleting card id={id}");

        let result = self.command.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::CardNotFound(id),
            other => {
                error!("💥 Failed to delete card id={id}: {other:?}");
                ServiceError::Repo(other)
            }
        });

        self.metrics
            .record_result(Method::DeleteCard, &result, start.elapsed().as_secs_f64());

        result?;
        info!("✅ Card {id} deleted");

        Ok(ApiResponse::success("Card deleted successfully", ()))
    }
}
