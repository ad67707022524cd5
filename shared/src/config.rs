use anyhow::{Context, Result};
use strum::EnumString;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
    pub mail: MailConfig,
    pub ai: CompletionConfig,
    pub identity: IdentityConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let server = ServerConfig {
            port: parse_or("PORT", 8080)?,
        };
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".into()),
            port: parse_or("DATABASE_PORT", 5432)?,
            username: std::env::var("DATABASE_USERNAME").unwrap_or_else(|_| "app".into()),
            password: std::env::var("DATABASE_PASSWORD").unwrap_or_else(|_| "passwd".into()),
            database: std::env::var("DATABASE_NAME").unwrap_or_else(|_| "app".into()),
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".into()),
            port: parse_or("REDIS_PORT", 6379)?,
        };
        let auth = AuthConfig {
            ttl: parse_or("AUTH_TOKEN_TTL", 86400)?,
        };
        let store = StoreConfig {
            backend: std::env::var("STORE_BACKEND")
                .ok()
                .map(|v| v.parse::<StoreBackend>())
                .transpose()
                .context("STORE_BACKEND must be `postgres` or `memory`")?
                .unwrap_or_default(),
        };
        let mail = MailConfig {
            api_url: std::env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com/emails".into()),
            api_key: optional("MAIL_API_KEY"),
            sender: optional("MAIL_FROM"),
            destination: optional("MAIL_TO"),
        };
        let ai = CompletionConfig {
            api_url: std::env::var("AI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
            api_key: optional("AI_API_KEY"),
            model: std::env::var("AI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".into()),
        };
        let identity = IdentityConfig {
            api_url: std::env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".into()),
            api_key: optional("IDENTITY_API_KEY"),
        };
        Ok(Self {
            server,
            database,
            redis,
            auth,
            store,
            mail,
            ai,
            identity,
        })
    }
}

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub ttl: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

// メール送信・AI・認証プロバイダの秘密情報は起動時には必須にせず、
// 初回利用時に required() で検査してサーバーエラーとして返す
#[derive(Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub sender: Option<String>,
    pub destination: Option<String>,
}

#[derive(Clone)]
pub struct CompletionConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Clone)]
pub struct IdentityConfig {
    pub api_url: String,
    pub api_key: Option<String>,
}

/// Returns the configured value or a `MissingConfiguration` error naming `key`.
pub fn required<'a>(value: &'a Option<String>, key: &str) -> AppResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| AppError::MissingConfiguration(key.to_string()))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v.parse().with_context(|| format!("invalid value for {key}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_reports_the_missing_key() {
        let missing: Option<String> = None;
        let err = required(&missing, "MAIL_TO").unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(key) if key == "MAIL_TO"));

        let present = Some("frontdesk@example.com".to_string());
        assert_eq!(required(&present, "MAIL_TO").unwrap(), "frontdesk@example.com");
    }

    #[test]
    fn store_backend_parses_lowercase_names() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert!("mongo".parse::<StoreBackend>().is_err());
    }
}
