//! Transactional-email transports
//!
//! [`HttpMailer`] submits messages to an HTTP mail API as JSON;
//! [`NoopMailer`] is the fallback when no transport is configured, so a
//! development instance runs without credentials.

use async_trait::async_trait;
use tracing::debug;

use super::{Mailer, OutboundEmail, TransportError};

/// Mailer backed by a transactional-email HTTP API.
///
/// Posts the message as a JSON object `{from, to, subject, html}` with a
/// bearer token. The concrete provider only needs to accept that shape.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl HttpMailer {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            token,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(message)
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError::Rejected {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}

/// Transport that drops every message, logging it at debug level.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<(), TransportError> {
        debug!(to = %message.to, subject = %message.subject, "mail transport not configured, dropping message");
        Ok(())
    }
}
