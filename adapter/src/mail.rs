use async_trait::async_trait;
use kernel::{model::notification::MailMessage, service::mail::MailSender};
use serde::Serialize;
use shared::{
    config::{required, MailConfig},
    error::{AppError, AppResult},
};

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

/// Transactional email over an HTTP API; every message goes to the
/// configured front-desk address.
pub struct MailClient {
    http: reqwest::Client,
    config: MailConfig,
}

impl MailClient {
    pub fn new(config: MailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MailSender for MailClient {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        let api_key = required(&self.config.api_key, "MAIL_API_KEY")?;
        let sender = required(&self.config.sender, "MAIL_FROM")?;
        let destination = required(&self.config.destination, "MAIL_TO")?;

        let body = SendEmailBody {
            from: sender,
            to: [destination],
            subject: &message.subject,
            text: &message.text,
            reply_to: message.reply_to.as_deref(),
        };
        let resp = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("mail API unreachable: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, %detail, "mail API rejected the message");
            return Err(AppError::ExternalServiceError(format!(
                "mail API responded with {status}"
            )));
        }
        tracing::info!(subject = %message.subject, "mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_destination_is_a_configuration_error() {
        let client = MailClient::new(MailConfig {
            api_url: "http://127.0.0.1:9/emails".into(),
            api_key: Some("re_test".into()),
            sender: Some("hotel@example.com".into()),
            destination: None,
        });
        let res = client
            .send(MailMessage {
                subject: "Hello".into(),
                text: "Body".into(),
                reply_to: None,
            })
            .await;
        assert!(matches!(res, Err(AppError::MissingConfiguration(key)) if key == "MAIL_TO"));
    }

    #[test]
    fn request_body_matches_the_mail_api() {
        let body = SendEmailBody {
            from: "hotel@example.com",
            to: ["desk@example.com"],
            subject: "Contact form: hi",
            text: "Body",
            reply_to: Some("guest@example.com"),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "from": "hotel@example.com",
                "to": ["desk@example.com"],
                "subject": "Contact form: hi",
                "text": "Body",
                "reply_to": "guest@example.com"
            })
        );
    }
}
