//! Shared harness for the HTTP integration tests
//!
//! Builds the real router over in-memory stores with a recording mail
//! transport, so tests exercise the full request path without external
//! services.

#![allow(dead_code)] // each test binary uses a subset of these helpers

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{Value, json};

use agrilink::notify::{Mailer, Notifier, OutboundEmail, TransportError};
use agrilink::server::{self, AppState};

/// Mail transport fake: records every message, optionally failing each send.
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    /// A transport that records the attempt and then reports an outage.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn subjects(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.subject).collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            return Err(TransportError::Rejected { status: 503 });
        }
        Ok(())
    }
}

fn server_with(mailer: Arc<RecordingMailer>) -> (TestServer, Arc<RecordingMailer>) {
    let notifier = Arc::new(Notifier::new(
        mailer.clone(),
        "logistics@agrilink.example".to_string(),
        "http://localhost:5173/tracking".to_string(),
    ));
    let state = AppState::in_memory(notifier);
    let server = TestServer::new(server::router(state));
    (server, mailer)
}

pub fn test_server() -> (TestServer, Arc<RecordingMailer>) {
    server_with(RecordingMailer::new())
}

/// Server whose mail transport fails every send.
pub fn broken_mail_server() -> (TestServer, Arc<RecordingMailer>) {
    server_with(RecordingMailer::failing())
}

/// A complete, valid delivery order creation payload.
pub fn order_payload(order_id: &str) -> Value {
    json!({
        "orderId": order_id,
        "deliveryAddress": "42 Farm Lane, Green Valley",
        "contactNumber": "1234567890",
        "email": "buyer@example.com",
        "preferredPacking": "Crates",
        "preferredVehicleType": "Refrigerated Truck",
        "refrigeratedPacking": true,
        "specialInstructions": "Leave at the gate"
    })
}

/// Wait until the recorder has seen at least `count` messages.
///
/// Creation notifications are spawned off the request task, so tests poll
/// briefly instead of assuming they landed before the response.
pub async fn wait_for_mail(mailer: &RecordingMailer, count: usize) {
    for _ in 0..40 {
        if mailer.sent().len() >= count {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(25)).await;
    }
    panic!(
        "expected at least {count} sent message(s), got {}",
        mailer.sent().len()
    );
}
