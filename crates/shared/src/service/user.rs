use crate::{
    abstract_trait::{
        hashing::DynHashing,
        user::{DynUserCommandRepository, DynUserQueryRepository, UserServiceTrait},
    },
    domain::{
        requests::{CreateUserRequest, UpdateUserRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError, format_validation_errors},
    model::user::{UserModel, UserRole},
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

pub struct UserService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hashing: DynHashing,
    metrics: Metrics,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("query", &"DynUserQueryRepository")
            .field("command", &"DynUserCommandRepository")
            .field("hashing", &"Hashing")
            .finish()
    }
}

pub struct UserServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hashing: DynHashing,
    pub metrics: Metrics,
}

impl UserService {
    pub fn new(deps: UserServiceDeps) -> Self {
        let UserServiceDeps {
            query,
            command,
            hashing,
            metrics,
        } = deps;

        Self {
            query,
            command,
            hashing,
            metrics,
        }
    }

    fn email_taken(email: &str) -> impl FnOnce(RepositoryError) -> ServiceError + '_ {
        move |e| match e {
            RepositoryError::AlreadyExists(_) => ServiceError::EmailAlreadyExists(email.to_string()),
            other => ServiceError::Repo(other),
        }
    }

    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserModel, ServiceError> {
        if let Err(validation_errors) = req.validate() {
            let errors = format_validation_errors(&validation_errors);
            error!("Validation failed: {errors:?}");
            return Err(ServiceError::Validation(errors));
        }

        if self.query.find_by_email(&req.email).await?.is_some() {
            warn!("❌ Email already taken: {}", req.email);
            return Err(ServiceError::EmailAlreadyExists(req.email.clone()));
        }

        let password = self.hashing.hash_password(&req.password).await?;

        let user = UserModel {
            id: Uuid::new_v4(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            phone_number: req.phone_number.clone(),
            password,
            role: req.role.unwrap_or(UserRole::User),
            created_at: None,
            updated_at: None,
        };

        self.command
            .create(&user)
            .await
            .map_err(Self::email_taken(&req.email))
    }

    async fn update_user(
        &self,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> Result<UserModel, ServiceError> {
        if let Err(validation_errors) = req.validate() {
            let errors = format_validation_errors(&validation_errors);
            error!("Validation failed: {errors:?}");
            return Err(ServiceError::Validation(errors));
        }

        let mut user = self
            .query
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::UserNotFound(id))?;

        if let Some(email) = &req.email {
            if let Some(owner) = self.query.find_by_email(email).await? {
                if owner.id != id {
                    warn!("❌ Email already taken: {email}");
                    return Err(ServiceError::EmailAlreadyExists(email.clone()));
                }
            }
            user.email = email.clone();
        }
        if let Some(first_name) = &req.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &req.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(phone_number) = &req.phone_number {
            user.phone_number = phone_number.clone();
        }
        if let Some(role) = req.role {
            user.role = role;
        }
        if let Some(password) = &req.password {
            user.password = self.hashing.hash_password(password).await?;
        }

        let email = user.email.clone();
        self.command
            .update(&user)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ServiceError::UserNotFound(id),
                other => Self::email_taken(&email)(other),
            })
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError> {
        let start = Instant::now();

        let result = self.query.find_all().await.map_err(|e| {
            error!("❌ Failed to fetch users: {e:?}");
            ServiceError::Repo(e)
        });

        self.metrics
            .record_result(Method::FindAllUsers, &result, start.elapsed().as_secs_f64());

        Ok(ApiResponse::success(
            "Users retrieved successfully",
            result?.into_iter().map(UserResponse::from).collect(),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let start = Instant::now();

        let result = match self.query.find_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(ServiceError::UserNotFound(id)),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.metrics
            .record_result(Method::FindUser, &result, start.elapsed().as_secs_f64());

        Ok(ApiResponse::success(
            "User retrieved successfully",
            UserResponse::from(result?),
        ))
    }

    async fn create(
        &self,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let start = Instant::now();
        info!("🆕 Creating user with email: {}", req.email);

        let result = self.create_user(req).await;
        self.metrics
            .record_result(Method::CreateUser, &result, start.elapsed().as_secs_f64());

        let user = result?;
        info!("✅ User created with id={}", user.id);

        Ok(ApiResponse::success(
            "User created successfully",
            UserResponse::from(user),
        ))
    }

    async fn update(
        &self,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let start = Instant::now();
        info!("🔄 Updating user id={id}");

        let result = self.update_user(id, req).await;
        self.metrics
            .record_result(Method::UpdateUser, &result, start.elapsed().as_secs_f64());

        let user = result?;
        info!("✅ User {id} updated");

        Ok(ApiResponse::success(
            "User updated successfully",
            UserResponse::from(user),
        ))
    }

    async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, ServiceError> {
        let start = Instant::now();
        info!("🗑️ Deleting user id={id}");

        let result = self.command.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::UserNotFound(id),
            other => {
                error!("💥 Failed to delete user id={id}: {other:?}");
                ServiceError::Repo(other)
            }
        });

        self.metrics
            .record_result(Method::DeleteUser, &result, start.elapsed().as_secs_f64());

        result?;
        info!("✅ User {id} deleted");

        Ok(ApiResponse::success("User deleted successfully", ()))
    }
}
