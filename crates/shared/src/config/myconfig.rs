use anyhow::{Context, Result, anyhow};

const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 60;
const DEFAULT_STORAGE_CONFLICT_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    pub run_migrations: bool,
    pub port: u16,
    pub storage_conflict_retries: u32,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("Missing env: DATABASE_URL")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("Missing env: JWT_SECRET")?;
        let run_migrations_str =
            std::env::var("RUN_MIGRATIONS").context("Missing env: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing env: PORT")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{other}'",
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let jwt_expiration_minutes = match std::env::var("JWT_EXPIRATION_MINUTES") {
            Ok(value) => value
                .parse::<i64>()
                .context("JWT_EXPIRATION_MINUTES must be a valid integer")?,
            Err(_) => DEFAULT_JWT_EXPIRATION_MINUTES,
        };

        if jwt_expiration_minutes <= 0 {
            return Err(anyhow!("JWT_EXPIRATION_MINUTES must be positive"));
        }

        let storage_conflict_retries = match std::env::var("STORAGE_CONFLICT_RETRIES") {
            Ok(value) => value
                .parse::<u32>()
                .context("STORAGE_CONFLICT_RETRIES must be a valid u32 integer")?,
            Err(_) => DEFAULT_STORAGE_CONFLICT_RETRIES,
        };

        if storage_conflict_retries == 0 {
            return Err(anyhow!("STORAGE_CONFLICT_RETRIES must be at least 1"));
        }

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_minutes,
            run_migrations,
            port,
            storage_conflict_retries,
        })
    }
}
