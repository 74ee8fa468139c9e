use crate::di::{DependenciesInject, Repositories};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::jwt::DynJwtService,
    config::{Config, ConnectionManager, Hashing, JwtConfig},
    repository::memory::MemoryStore,
    utils::Metrics,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &"DynJwtService")
            .field("di_container", &self.di_container)
            .field("registry", &self.registry)
            .finish()
    }
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = ConnectionManager::new_pool(&config.database_url, config.run_migrations)
            .await
            .context("Failed to initialize database pool")?;

        let jwt_config = Arc::new(JwtConfig::new(
            &config.jwt_secret,
            config.jwt_expiration_minutes,
        )) as DynJwtService;

        Ok(Self::assemble(
            Repositories::postgres(pool),
            jwt_config,
            Hashing::new(),
            config.storage_conflict_retries,
        ))
    }

    /// Wires the application against an in-process store.
    pub fn in_memory(store: MemoryStore, jwt_secret: &str, hashing: Hashing) -> Self {
        let jwt_config = Arc::new(JwtConfig::new(jwt_secret, 60)) as DynJwtService;
        Self::assemble(Repositories::in_memory(store), jwt_config, hashing, 3)
    }

    fn assemble(
        repositories: Repositories,
        jwt_config: DynJwtService,
        hashing: Hashing,
        conflict_retries: u32,
    ) -> Self {
        let metrics = Metrics::new();
        let mut registry = Registry::default();
        metrics.register(&mut registry);

        let di_container = DependenciesInject::new(
            repositories,
            Arc::new(hashing),
            jwt_config.clone(),
            metrics,
            conflict_retries,
        );

        Self {
            jwt_config,
            di_container,
            registry: Arc::new(registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_names_the_wired_services() {
        let state = AppState::in_memory(MemoryStore::new(), "secret", Hashing::with_cost(4));
        let rendered = format!("{state:?}");

        assert!(rendered.starts_with("AppState"));
        assert!(rendered.contains("DynJwtService"));
        assert!(rendered.contains("DynTransferService"));
    }
}
