use crate::errors::ServiceError;
use std::{future::Future, time::Duration};
use tracing::{error, warn};

const BASE_BACKOFF: Duration = Duration::from_millis(10);

/// Re-runs a whole unit of work while the storage layer reports a write
/// collision. Any other outcome is returned as is.
pub async fn retry_on_conflict<T, F, Fut>(
    attempts: u32,
    operation: &str,
    mut op: F,
) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Err(e) if e.is_conflict() => {
                if attempt >= attempts {
                    error!("🔁 {operation} gave up after {attempt} conflicting attempts: {e}");
                    return Err(ServiceError::Transient(format!(
                        "{operation} could not complete due to concurrent updates, please retry"
                    )));
                }

                warn!("🔁 {operation} hit a storage conflict (attempt {attempt}/{attempts}), retrying");
                tokio::time::sleep(BASE_BACKOFF * attempt).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RepositoryError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn conflict() -> ServiceError {
        ServiceError::Repo(RepositoryError::Conflict("40001".into()))
    }

    #[tokio::test]
    async fn succeeds_once_conflicts_clear() {
        let calls = &AtomicU32::new(0);

        let result = retry_on_conflict(3, "test", || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(conflict())
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_retries_become_transient() {
        let calls = &AtomicU32::new(0);

        let result: Result<(), _> = retry_on_conflict(2, "test", || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(conflict())
        })
        .await;

        assert!(matches!(result, Err(ServiceError::Transient(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn business_errors_are_not_retried() {
        let calls = &AtomicU32::new(0);

        let result: Result<(), _> = retry_on_conflict(5, "test", || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::InsufficientFunds)
        })
        .await;

        assert!(matches!(result, Err(ServiceError::InsufficientFunds)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
