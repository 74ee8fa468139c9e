use crate::{
    middleware::{
        jwt::{self, CurrentUser},
        role::require_role,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    abstract_trait::block_request::DynBlockRequestService,
    domain::responses::{ApiResponse, BlockRequestResponse},
    errors::AppErrorHttp,
    model::user::UserRole,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    put,
    path = "/api/cards/{id}/request-block",
    tag = "BlockRequest",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Card ID")),
    responses(
        (status = 201, description = "Block request filed", body = ApiResponse<BlockRequestResponse>),
        (status = 404, description = "Card not found or not owned by caller"),
        (status = 409, description = "An active block request already exists"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "User role required")
    )
)]
pub async fn request_block(
    Extension(service): Extension<DynBlockRequestService>,
    Extension(user): Extension<CurrentUser>,
    Path(card_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.request_block(card_id, user.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/block-requests",
    tag = "BlockRequest",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending block requests", body = ApiResponse<Vec<BlockRequestResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn get_active_block_requests(
    Extension(service): Extension<DynBlockRequestService>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_active().await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/block-requests/{id}/complete",
    tag = "BlockRequest",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Block request ID")),
    responses(
        (status = 200, description = "Card blocked and request completed", body = ApiResponse<BlockRequestResponse>),
        (status = 404, description = "Block request or card not found"),
        (status = 409, description = "Request already completed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn complete_block_request(
    Extension(service): Extension<DynBlockRequestService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.complete(id).await?;
    Ok(Json(response))
}

pub fn block_request_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let owner_routes = OpenApiRouter::new()
        .route("/api/cards/{id}/request-block", put(request_block))
        .route_layer(middleware::from_fn_with_state(UserRole::User, require_role))
        .route_layer(middleware::from_fn(jwt::auth));

    let admin_routes = OpenApiRouter::new()
        .route("/api/block-requests", get(get_active_block_requests))
        .route("/api/block-requests/{id}/complete", put(complete_block_request))
        .route_layer(middleware::from_fn_with_state(
            UserRole::Admin,
            require_role,
        ))
        .route_layer(middleware::from_fn(jwt::auth));

    owner_routes
        .merge(admin_routes)
        .layer(Extension(app_state.di_container.block_request_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
