use shared::{
    abstract_trait::{
        auth::DynAuthService,
        block_request::{DynBlockRequestQueryRepository, DynBlockRequestService},
        card::{
            repository::{DynCardCommandRepository, DynCardQueryRepository, DynCardStore},
            service::{
                DynCardCommandService, DynCardLifecycleService, DynCardQueryService,
                DynTransferService,
            },
        },
        hashing::DynHashing,
        jwt::DynJwtService,
        user::{DynUserCommandRepository, DynUserQueryRepository, DynUserService},
    },
    config::ConnectionPool,
    repository::{
        block_request::BlockRequestQueryRepository,
        card::{CardCommandRepository, CardQueryRepository, PgCardStore},
        memory::MemoryStore,
        user::{UserCommandRepository, UserQueryRepository},
    },
    service::{
        auth::{AuthService, AuthServiceDeps},
        block_request::{BlockRequestService, BlockRequestServiceDeps},
        card::{
            CardCommandService, CardCommandServiceDeps, CardLifecycleService, CardQueryService,
            TransferService,
        },
        user::{UserService, UserServiceDeps},
    },
    utils::Metrics,
};
use std::sync::Arc;

pub struct Repositories {
    pub card_store: DynCardStore,
    pub card_query: DynCardQueryRepository,
    pub card_command: DynCardCommandRepository,
    pub block_request_query: DynBlockRequestQueryRepository,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            card_store: Arc::new(PgCardStore::new(pool.clone())) as DynCardStore,
            card_query: Arc::new(CardQueryRepository::new(pool.clone())) as DynCardQueryRepository,
            card_command: Arc::new(CardCommandRepository::new(pool.clone()))
                as DynCardCommandRepository,
            block_request_query: Arc::new(BlockRequestQueryRepository::new(pool.clone()))
                as DynBlockRequestQueryRepository,
            user_query: Arc::new(UserQueryRepository::new(pool.clone())) as DynUserQueryRepository,
            user_command: Arc::new(UserCommandRepository::new(pool)) as DynUserCommandRepository,
        }
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);

        Self {
            card_store: store.clone() as DynCardStore,
            card_query: store.clone() as DynCardQueryRepository,
            card_command: store.clone() as DynCardCommandRepository,
            block_request_query: store.clone() as DynBlockRequestQueryRepository,
            user_query: store.clone() as DynUserQueryRepository,
            user_command: store as DynUserCommandRepository,
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub card_command_service: DynCardCommandService,
    pub card_query_service: DynCardQueryService,
    pub card_lifecycle_service: DynCardLifecycleService,
    pub transfer_service: DynTransferService,
    pub block_request_service: DynBlockRequestService,
    pub user_service: DynUserService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .field("card_command_service", &"DynCardCommandService")
            .field("card_query_service", &"DynCardQueryService")
            .field("card_lifecycle_service", &"DynCardLifecycleService")
            .field("transfer_service", &"DynTransferService")
            .field("block_request_service", &"DynBlockRequestService")
            .field("user_service", &"DynUserService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(
        repositories: Repositories,
        hashing: DynHashing,
        jwt_config: DynJwtService,
        metrics: Metrics,
        conflict_retries: u32,
    ) -> Self {
        let Repositories {
            card_store,
            card_query,
            card_command,
            block_request_query,
            user_query,
            user_command,
        } = repositories;

        let auth_service = Arc::new(AuthService::new(AuthServiceDeps {
            query: user_query.clone(),
            hashing: hashing.clone(),
            jwt_config,
            metrics: metrics.clone(),
        })) as DynAuthService;

        let card_command_service = Arc::new(CardCommandService::new(CardCommandServiceDeps {
            user_query: user_query.clone(),
            command: card_command,
            metrics: metrics.clone(),
        })) as DynCardCommandService;

        let card_query_service =
            Arc::new(CardQueryService::new(card_query, metrics.clone())) as DynCardQueryService;

        let card_lifecycle_service = Arc::new(CardLifecycleService::new(
            card_store.clone(),
            metrics.clone(),
            conflict_retries,
        )) as DynCardLifecycleService;

        let transfer_service = Arc::new(TransferService::new(
            card_store.clone(),
            metrics.clone(),
            conflict_retries,
        )) as DynTransferService;

        let block_request_service = Arc::new(BlockRequestService::new(BlockRequestServiceDeps {
            store: card_store,
            query: block_request_query,
            metrics: metrics.clone(),
            conflict_retries,
        })) as DynBlockRequestService;

        let user_service = Arc::new(UserService::new(UserServiceDeps {
            query: user_query,
            command: user_command,
            hashing,
            metrics,
        })) as DynUserService;

        Self {
            auth_service,
            card_command_service,
            card_query_service,
            card_lifecycle_service,
            transfer_service,
            block_request_service,
            user_service,
        }
    }
}
