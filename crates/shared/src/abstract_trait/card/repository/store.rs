//! Transactional access to cards and their block requests.
//!
//! Every read made through a [`CardTransactionTrait`] locks the row it
//! returns until the transaction commits or is dropped. Dropping without
//! `commit` discards every write made through it.

use crate::{
    errors::RepositoryError,
    model::{
        block_request::{BlockRequestModel, BlockRequestStatus},
        card::CardModel,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCardStore = Arc<dyn CardStoreTrait + Send + Sync>;

#[async_trait]
pub trait CardStoreTrait {
    async fn begin(&self) -> Result<Box<dyn CardTransactionTrait>, RepositoryError>;
}

#[async_trait]
pub trait CardTransactionTrait: Send {
    async fn find_by_id_for_update(
        &mut self,
        id: Uuid,
    ) -> Result<Option<CardModel>, RepositoryError>;

    async fn find_by_id_for_owner_for_update(
        &mut self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<CardModel>, RepositoryError>;

    async fn save(&mut self, card: &CardModel) -> Result<CardModel, RepositoryError>;

    async fn exists_block_request(
        &mut self,
        card_id: Uuid,
        status: BlockRequestStatus,
    ) -> Result<bool, RepositoryError>;

    async fn insert_block_request(
        &mut self,
        request: &BlockRequestModel,
    ) -> Result<BlockRequestModel, RepositoryError>;

    /// Plain read without a row lock.
    async fn find_block_request(
        &mut self,
        id: Uuid,
    ) -> Result<Option<BlockRequestModel>, RepositoryError>;

    async fn find_block_request_for_update(
        &mut self,
        id: Uuid,
    ) -> Result<Option<BlockRequestModel>, RepositoryError>;

    async fn update_block_request_status(
        &mut self,
        id: Uuid,
        status: BlockRequestStatus,
    ) -> Result<BlockRequestModel, RepositoryError>;

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;
}
