use anyhow::Result;
use chrono::{FixedOffset, Offset, Utc};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub storage_backend: StorageBackend,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub client_base_url: String,
    pub platform_channel_id: String,
    pub platform_channel_secret: String,
    pub platform_issuer: String,
    pub admin_user_ids: Vec<String>,
    pub work_locations: Vec<String>,
    pub utc_offset_minutes: i32,
    pub record_retention_months: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse()
            .map_err(anyhow::Error::msg)?;

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/nightrun".to_string()),
            storage_backend,
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            client_base_url: env::var("CLIENT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            platform_channel_id: env::var("PLATFORM_CHANNEL_ID").unwrap_or_default(),
            platform_channel_secret: env::var("PLATFORM_CHANNEL_SECRET").unwrap_or_default(),
            platform_issuer: env::var("PLATFORM_ISSUER")
                .unwrap_or_else(|_| "https://access.line.me".to_string()),
            admin_user_ids: split_list(&env::var("ADMIN_USER_IDS").unwrap_or_default()),
            work_locations: split_list(
                &env::var("WORK_LOCATIONS").unwrap_or_else(|_| "main_office,warehouse".to_string()),
            ),
            utc_offset_minutes: env::var("UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "540".to_string())
                .parse()
                .unwrap_or(540),
            record_retention_months: env::var("RECORD_RETENTION_MONTHS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_user_ids.iter().any(|id| id == user_id)
    }

    /// Offset used to decide which calendar day "today" is for drivers.
    /// Out-of-range values fall back to UTC.
    pub fn business_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
