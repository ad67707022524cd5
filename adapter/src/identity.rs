use async_trait::async_trait;
use kernel::{
    model::{auth::Credentials, id::UserId},
    service::identity::IdentityProvider,
};
use serde::{Deserialize, Serialize};
use shared::{
    config::{required, IdentityConfig},
    error::{AppError, AppResult},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Email/password accounts on a hosted identity toolkit.
pub struct IdentityProviderClient {
    http: reqwest::Client,
    config: IdentityConfig,
}

impl IdentityProviderClient {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn call(&self, endpoint: &str, credentials: &Credentials) -> AppResult<UserId> {
        let api_key = required(&self.config.api_key, "IDENTITY_API_KEY")?;
        let url = format!(
            "{}/accounts:{endpoint}",
            self.config.api_url.trim_end_matches('/')
        );
        let resp = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(&PasswordRequest {
                email: &credentials.email,
                password: &credentials.password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("identity provider unreachable: {e}"))
            })?;

        if resp.status().is_success() {
            let account: AccountResponse = resp.json().await.map_err(|e| {
                AppError::ExternalServiceError(format!("unexpected identity response: {e}"))
            })?;
            return Ok(UserId::from(account.local_id));
        }

        let status = resp.status();
        let code = resp
            .json::<ErrorEnvelope>()
            .await
            .map(|envelope| envelope.error.message)
            .unwrap_or_default();
        Err(map_provider_error(status, &code))
    }
}

// エラーコードは "WEAK_PASSWORD : Password should be ..." のように補足が付くことがある
fn map_provider_error(status: reqwest::StatusCode, code: &str) -> AppError {
    let head = code.split(':').next().unwrap_or_default().trim();
    match head {
        "EMAIL_EXISTS" => AppError::UnprocessableEntity("email address already registered".into()),
        "WEAK_PASSWORD" => AppError::UnprocessableEntity("password is too weak".into()),
        "INVALID_EMAIL" => AppError::UnprocessableEntity("invalid email address".into()),
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
        | "USER_DISABLED" => AppError::InvalidCredentials,
        _ => AppError::ExternalServiceError(format!("identity provider responded {status}: {code}")),
    }
}

#[async_trait]
impl IdentityProvider for IdentityProviderClient {
    async fn sign_up(&self, credentials: &Credentials) -> AppResult<UserId> {
        self.call("signUp", credentials).await
    }

    async fn sign_in(&self, credentials: &Credentials) -> AppResult<UserId> {
        self.call("signInWithPassword", credentials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn provider_codes_map_to_app_errors() {
        assert!(matches!(
            map_provider_error(StatusCode::BAD_REQUEST, "EMAIL_EXISTS"),
            AppError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            map_provider_error(
                StatusCode::BAD_REQUEST,
                "WEAK_PASSWORD : Password should be at least 6 characters"
            ),
            AppError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            map_provider_error(StatusCode::BAD_REQUEST, "INVALID_LOGIN_CREDENTIALS"),
            AppError::InvalidCredentials
        ));
        assert!(matches!(
            map_provider_error(StatusCode::INTERNAL_SERVER_ERROR, ""),
            AppError::ExternalServiceError(_)
        ));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let client = IdentityProviderClient::new(IdentityConfig {
            api_url: "http://127.0.0.1:9/v1".into(),
            api_key: None,
        });
        let res = client
            .sign_in(&Credentials::new("a@example.com".into(), "secret".into()))
            .await;
        assert!(matches!(res, Err(AppError::MissingConfiguration(_))));
    }
}
