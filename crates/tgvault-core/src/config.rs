//! Configuration module
//!
//! Runtime configuration for the API service, loaded from environment
//! variables (with `.env` support). Backend pool membership is fixed here at
//! startup: `BOT_TOKENS` and `CLIENT_API_URLS` are ordered, comma-separated
//! lists and their order is the pool order.

use std::env;

use secrecy::SecretString;

const DEFAULT_PORT: u16 = 8000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_FILE_SIZE_MB: usize = 20;
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    environment: String,
    cors_origins: Vec<String>,
    database_url: String,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    max_file_size_bytes: usize,
    telegram_api_base: String,
    bot_tokens: Vec<SecretString>,
    client_api_urls: Vec<String>,
    storage_chat_id: i64,
    log_json: bool,
}

/// Split a comma-separated env value into trimmed, non-empty items.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let storage_chat_id = env::var("STORAGE_CHAT_ID")
            .map_err(|_| anyhow::anyhow!("STORAGE_CHAT_ID must be set"))?
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("STORAGE_CHAT_ID must be a chat id (integer)"))?;

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let bot_tokens = parse_list(&env::var("BOT_TOKENS").unwrap_or_default())
            .into_iter()
            .map(SecretString::from)
            .collect();

        let client_api_urls = parse_list(&env::var("CLIENT_API_URLS").unwrap_or_default())
            .into_iter()
            .map(|url| url.trim_end_matches('/').to_string())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            environment,
            cors_origins: parse_list(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string())),
            database_url,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            telegram_api_base: env::var("TELEGRAM_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| TELEGRAM_API_BASE.to_string()),
            bot_tokens,
            client_api_urls,
            storage_chat_id,
            log_json: env::var("LOG_JSON")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        })
    }

    /// Startup sanity checks. An all-empty pool configuration is legal here
    /// (requests fail with a configuration error on first use), but it is
    /// almost certainly a deployment mistake, so it is reported loudly by
    /// the caller.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database_url.is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }
        if self.max_file_size_bytes == 0 {
            anyhow::bail!("MAX_FILE_SIZE_MB must be greater than zero");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_bytes
    }

    pub fn telegram_api_base(&self) -> &str {
        &self.telegram_api_base
    }

    /// Ordered bot tokens; pool order follows this order.
    pub fn bot_tokens(&self) -> &[SecretString] {
        &self.bot_tokens
    }

    /// Ordered base URLs of user-session gateways; pool order follows this order.
    pub fn client_api_urls(&self) -> &[String] {
        &self.client_api_urls
    }

    pub fn storage_chat_id(&self) -> i64 {
        self.storage_chat_id
    }

    pub fn log_json(&self) -> bool {
        self.log_json
    }

    /// Test constructor with explicit values (bypasses the environment).
    pub fn for_tests(database_url: &str, bot_tokens: Vec<&str>, client_api_urls: Vec<&str>) -> Self {
        Config {
            server_port: DEFAULT_PORT,
            environment: "test".to_string(),
            cors_origins: vec!["*".to_string()],
            database_url: database_url.to_string(),
            db_max_connections: 2,
            db_timeout_seconds: 5,
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            telegram_api_base: TELEGRAM_API_BASE.to_string(),
            bot_tokens: bot_tokens
                .into_iter()
                .map(|token| SecretString::from(token.to_string()))
                .collect(),
            client_api_urls: client_api_urls.into_iter().map(String::from).collect(),
            storage_chat_id: -100_1234,
            log_json: false,
        }
    }
}
