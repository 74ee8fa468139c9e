use crate::middleware::jwt::CurrentUser;
use axum::{
    extract::{Extension, Request, State},
    middleware::Next,
    response::Response,
};
use shared::{
    errors::{AppErrorHttp, ServiceError},
    model::user::UserRole,
};
use tracing::warn;

/// Rejects callers whose role differs from the one the route is mounted with.
///
/// Must run after [`crate::middleware::jwt::auth`].
pub async fn require_role(
    State(required): State<UserRole>,
    Extension(user): Extension<CurrentUser>,
    req: Request,
    next: Next,
) -> Result<Response, AppErrorHttp> {
    if user.role != required {
        warn!(
            "⛔ User {} with role {} denied access to {}",
            user.id,
            user.role,
            req.uri().path()
        );
        return Err(ServiceError::Forbidden(format!("{required} role required")).into());
    }

    Ok(next.run(req).await)
}
