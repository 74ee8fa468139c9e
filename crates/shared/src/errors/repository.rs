use thiserror::Error;

const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Write conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("{0}")]
    Custom(String),
}

impl RepositoryError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::Conflict(_))
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::RowNotFound => Some(RepositoryError::NotFound),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED) => {
                        Some(RepositoryError::Conflict(message))
                    }
                    Some(UNIQUE_VIOLATION) => Some(RepositoryError::AlreadyExists(message)),
                    Some(FOREIGN_KEY_VIOLATION) => Some(RepositoryError::ForeignKey(message)),
                    _ => None,
                }
            }
            _ => None,
        };

        classified.unwrap_or(RepositoryError::Sqlx(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn only_conflict_reports_conflict() {
        assert!(RepositoryError::Conflict("serialization".into()).is_conflict());
        assert!(!RepositoryError::NotFound.is_conflict());
        assert!(!RepositoryError::AlreadyExists("dup".into()).is_conflict());
    }
}
