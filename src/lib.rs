//! # Agrilink
//!
//! Backend for a multi-sided agricultural marketplace with a logistics
//! module: farmers list produce, buyers order it, and delivery orders move
//! through a fixed four-stage tracking pipeline with email notifications
//! on every status change.
//!
//! ## Architecture
//!
//! - [`domain`] — the stored records and their validation rules
//! - [`storage`] — the [`DocumentStore`](storage::DocumentStore) seam with
//!   in-memory (default) and MongoDB (`mongodb_backend` feature) backends
//! - [`notify`] — status-keyed email templates behind an injected
//!   [`Mailer`](notify::Mailer) transport; best-effort, never blocks a
//!   request
//! - [`server`] — the axum REST surface and process entry point
//! - [`core`] — error taxonomy and field validators shared by all of it
//!
//! ## Running
//!
//! ```sh
//! PORT=5000 cargo run
//! ```
//!
//! With persistent storage:
//!
//! ```sh
//! MONGO_URI=mongodb://localhost:27017 cargo run --features mongodb_backend
//! ```
//!
//! Notifications need `MAIL_API_URL` and `MAIL_API_TOKEN`; without them the
//! server runs and logs dropped messages.

pub mod config;
pub mod core;
pub mod domain;
pub mod notify;
pub mod server;
pub mod storage;
