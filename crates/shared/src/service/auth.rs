use crate::{
    abstract_trait::{
        auth::AuthServiceTrait, hashing::DynHashing, jwt::DynJwtService,
        user::DynUserQueryRepository,
    },
    domain::{
        requests::LoginRequest,
        responses::{ApiResponse, TokenResponse},
    },
    errors::{ServiceError, format_validation_errors},
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{error, info, warn};
use validator::Validate;

pub struct AuthService {
    query: DynUserQueryRepository,
    hashing: DynHashing,
    jwt_config: DynJwtService,
    metrics: Metrics,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("query", &"DynUserQueryRepository")
            .field("hashing", &"Hashing")
            .field("jwt_config", &"JwtConfig")
            .finish()
    }
}

pub struct AuthServiceDeps {
    pub query: DynUserQueryRepository,
    pub hashing: DynHashing,
    pub jwt_config: DynJwtService,
    pub metrics: Metrics,
}

impl AuthService {
    pub fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            query,
            hashing,
            jwt_config,
            metrics,
        } = deps;

        Self {
            query,
            hashing,
            jwt_config,
            metrics,
        }
    }

    async fn issue_token(&self, req: &LoginRequest) -> Result<String, ServiceError> {
        if let Err(validation_errors) = req.validate() {
            let errors = format_validation_errors(&validation_errors);
            error!("Validation failed: {errors:?}");
            return Err(ServiceError::Validation(errors));
        }

        let Some(user) = self.query.find_by_email(&req.email).await? else {
            warn!("❌ Login attempt for unknown email: {}", req.email);
            return Err(ServiceError::InvalidCredentials);
        };

        if self
            .hashing
            .compare_password(&user.password, &req.password)
            .await
            .is_err()
        {
            warn!("❌ Invalid password for user: {}", req.email);
            return Err(ServiceError::InvalidCredentials);
        }

        self.jwt_config.generate_token(user.id, user.role)
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let start = Instant::now();
        info!("🔐 Login attempt for email: {}", req.email);

        let result = self.issue_token(req).await;
        self.metrics
            .record_result(Method::Login, &result, start.elapsed().as_secs_f64());

        let token = result?;
        info!("✅ Login successful for email: {}", req.email);

        Ok(ApiResponse::success(
            "Login successful",
            TokenResponse { token },
        ))
    }
}
