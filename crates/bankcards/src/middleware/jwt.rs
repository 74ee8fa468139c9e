use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use shared::{
    abstract_trait::jwt::DynJwtService,
    errors::{AppErrorHttp, ServiceError},
    model::user::UserRole,
};
use uuid::Uuid;

/// Identity extracted from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: UserRole,
}

pub async fn auth(
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppErrorHttp> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ServiceError::InvalidCredentials)?;

    let claims = jwt.verify_token(token)?;

    req.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}
