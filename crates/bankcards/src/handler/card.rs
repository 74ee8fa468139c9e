use crate::{
    middleware::{
        jwt::{self, CurrentUser},
        role::require_role,
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    abstract_trait::card::service::{
        DynCardCommandService, DynCardLifecycleService, DynCardQueryService, DynTransferService,
    },
    domain::{
        requests::{CreateCardRequest, FindAllCards, TransferRequest},
        responses::{ApiResponse, ApiResponsePagination, CardBalanceResponse, CardResponse},
    },
    errors::AppErrorHttp,
    model::user::UserRole,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/cards",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(FindAllCards),
    responses(
        (status = 200, description = "Filtered page of cards", body = ApiResponsePagination<Vec<CardResponse>>),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn get_cards(
    Extension(service): Extension<DynCardQueryService>,
    Query(params): Query<FindAllCards>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/cards",
    tag = "Card",
    security(("bearer_auth" = [])),
    request_body = CreateCardRequest,
    responses(
        (status = 201, description = "Card issued", body = ApiResponse<CardResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Owner not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_card(
    Extension(service): Extension<DynCardCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCardRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/cards/{id}",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Card details", body = ApiResponse<CardResponse>),
        (status = 404, description = "Card not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn get_card(
    Extension(service): Extension<DynCardQueryService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_by_id(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/cards/{id}",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Card ID")),
    responses(
        (status = 204, description = "Card deleted"),
        (status = 404, description = "Card not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn delete_card(
    Extension(service): Extension<DynCardCommandService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/cards/{id}/block",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Card blocked", body = ApiResponse<CardResponse>),
        (status = 404, description = "Card not found"),
        (status = 409, description = "Card is already blocked"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn block_card(
    Extension(service): Extension<DynCardLifecycleService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.block(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/cards/{id}/activate",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Card activated", body = ApiResponse<CardResponse>),
        (status = 404, description = "Card not found"),
        (status = 409, description = "Card is already active"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn activate_card(
    Extension(service): Extension<DynCardLifecycleService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.activate(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/cards/my",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(FindAllCards),
    responses(
        (status = 200, description = "Caller's cards", body = ApiResponsePagination<Vec<CardResponse>>),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_my_cards(
    Extension(service): Extension<DynCardQueryService>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FindAllCards>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_my_cards(user.id, &params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/cards/balance/{id}",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Card balance", body = ApiResponse<CardBalanceResponse>),
        (status = 404, description = "Card not found or not owned by caller"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_my_balance(
    Extension(service): Extension<DynCardQueryService>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.my_balance(id, user.id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/cards/transfer",
    tag = "Card",
    security(("bearer_auth" = [])),
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer completed"),
        (status = 400, description = "Invalid amount, inactive card or insufficient funds"),
        (status = 404, description = "Card not found or not owned by caller"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Storage conflict, retry later")
    )
)]
pub async fn transfer(
    Extension(service): Extension<DynTransferService>,
    Extension(user): Extension<CurrentUser>,
    SimpleValidatedJson(body): SimpleValidatedJson<TransferRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.transfer(user.id, &body).await?;
    Ok(Json(response))
}

fn admin_card_routes(app_state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cards", get(get_cards))
        .route("/api/cards", post(create_card))
        .route("/api/cards/{id}", get(get_card).delete(delete_card))
        .route("/api/cards/{id}/block", put(block_card))
        .route("/api/cards/{id}/activate", put(activate_card))
        .route_layer(middleware::from_fn_with_state(
            UserRole::Admin,
            require_role,
        ))
        .route_layer(middleware::from_fn(jwt::auth))
        .layer(Extension(app_state.di_container.card_command_service.clone()))
        .layer(Extension(app_state.di_container.card_lifecycle_service.clone()))
}

fn owner_card_routes(app_state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cards/my", get(get_my_cards))
        .route("/api/cards/balance/{id}", get(get_my_balance))
        .route("/api/cards/transfer", post(transfer))
        .route_layer(middleware::from_fn(jwt::auth))
        .layer(Extension(app_state.di_container.transfer_service.clone()))
}

pub fn card_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    admin_card_routes(&app_state)
        .merge(owner_card_routes(&app_state))
        .layer(Extension(app_state.di_container.card_query_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
