//! Outbound "new data" notifications.
//!
//! Mail goes through an HTTP relay: the payload carries sender, recipient,
//! subject and body, and the relay owns the SMTP credentials.

use serde::Serialize;
use tracing::info;

use crate::config::{AppConfig, NotifyConfig};
use crate::diff::RowDelta;
use crate::error::NotifyError;
use crate::http_client::http_client;

pub trait Notifier {
    fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    token: Option<String>,
    from: String,
    to: String,
    timeout_secs: u64,
}

impl WebhookNotifier {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, NotifyError> {
        let NotifyConfig {
            url,
            token,
            from,
            to,
        } = cfg.notify.clone();
        Ok(Self {
            url: url.ok_or(NotifyError::NotConfigured("FOOT_NOTIFY_URL"))?,
            token,
            from: from.ok_or(NotifyError::NotConfigured("FOOT_NOTIFY_FROM"))?,
            to: to.ok_or(NotifyError::NotConfigured("FOOT_NOTIFY_TO"))?,
            timeout_secs: cfg.http_timeout_secs,
        })
    }
}

impl Notifier for WebhookNotifier {
    fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let client =
            http_client(self.timeout_secs).map_err(|err| NotifyError::Client(err.to_string()))?;
        let payload = MailPayload {
            from: &self.from,
            to: &self.to,
            subject,
            body,
        };
        let mut req = client.post(&self.url).json(&payload);
        if let Some(token) = self.token.as_deref() {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?;
        if !resp.status().is_success() {
            return Err(NotifyError::Status(resp.status().as_u16()));
        }
        info!(to = %self.to, "notification sent");
        Ok(())
    }
}

pub fn new_rows_message(country: &str, delta: &RowDelta) -> (String, String) {
    let subject = "New match data available".to_string();
    let body = format!(
        "{} new match row(s) for {country} were added to the results file \
         ({} -> {} rows). Check the website for more details.",
        delta.added(),
        delta.baseline,
        delta.fetched
    );
    (subject, body)
}
