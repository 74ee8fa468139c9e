use crate::{errors::repository::RepositoryError, model::card::CardStatus};
use bcrypt::BcryptError;
use jsonwebtoken::errors::Error as JwtError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Card with ID: {0} was not found.")]
    CardNotFound(Uuid),

    #[error("User with ID: {0} was not found.")]
    UserNotFound(Uuid),

    #[error("Block request with ID: {0} was not found.")]
    BlockRequestNotFound(Uuid),

    #[error("Card {card_number} already has status {status}")]
    StatusAlreadySet {
        card_number: String,
        status: CardStatus,
    },

    #[error("Both cards must be active")]
    CardIsNotActive,

    #[error("Insufficient funds on the source card")]
    InsufficientFunds,

    #[error("A block request for this card is already active.")]
    DuplicateBlockRequest,

    #[error("Block request {0} has already been completed")]
    BlockRequestAlreadyCompleted(Uuid),

    #[error("Transfer amount must be positive with at most two decimal places")]
    InvalidAmount,

    #[error("Email '{0}' is already registered.")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] BcryptError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Temporarily unavailable: {0}")]
    Transient(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Repo(repo) if repo.is_conflict())
    }
}
