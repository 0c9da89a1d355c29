//! Order status notifications
//!
//! The [`Notifier`] composes a status-keyed email and submits it through an
//! injected [`Mailer`]. Delivery is best-effort and at-most-once: the
//! dispatcher logs success or failure and never raises back to the caller,
//! so a transport outage can never block or fail an order mutation. There
//! is no retry, no queue, and no delivery confirmation tracking.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::DeliveryStatus;

pub mod http;
pub mod templates;

pub use http::{HttpMailer, NoopMailer};

/// A composed message handed to the transport.
#[derive(Clone, Debug, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Errors from the transactional-email transport.
///
/// These never propagate past the [`Notifier`]; they exist so transports
/// can be exercised directly in tests.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport request failed: {0}")]
    Request(String),

    #[error("transport rejected the message with status {status}")]
    Rejected { status: u16 },
}

/// Transactional-email transport seam.
///
/// An injected collaborator rather than module-global state, so tests can
/// substitute a fake and transport lifecycle stays explicit.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &OutboundEmail) -> Result<(), TransportError>;
}

/// Composes order notifications and absorbs transport failures.
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    from: String,
    tracking_url: String,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, from: String, tracking_url: String) -> Self {
        Self {
            mailer,
            from,
            tracking_url,
        }
    }

    /// Send the notification for an order reaching `status`.
    ///
    /// `None` means "just created" and selects the default template. Any
    /// transport failure is logged and swallowed here.
    pub async fn order_update(&self, to: &str, order_id: &str, status: Option<DeliveryStatus>) {
        let template = templates::for_status(status.map(DeliveryStatus::as_str));
        let body = template.body.replace("{tracking_url}", &self.tracking_url);
        let message = OutboundEmail {
            from: self.from.clone(),
            to: to.to_string(),
            subject: template.subject.to_string(),
            html: format!(
                "<h3>Delivery Order #{order_id}</h3>\n{body}\n<br/>\n<p>Best regards,<br/>Logistics Team</p>"
            ),
        };

        match self.mailer.send(&message).await {
            Ok(()) => info!(order_id, subject = %message.subject, "notification sent"),
            Err(err) => warn!(order_id, error = %err, "failed to send notification"),
        }
    }
}
