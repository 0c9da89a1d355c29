//! HTTP surface: router assembly and the server entry point
//!
//! Route paths are part of the public contract consumed by the frontend;
//! the exact strings matter and are kept verbatim.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use axum::routing::{delete, get, patch, post, put};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::notify::{HttpMailer, Mailer, NoopMailer, Notifier};

pub mod delivery;
pub mod feedback;
pub mod products;
pub mod state;
pub mod users;
pub mod warehouse;

pub use state::AppState;

/// Standard success envelope: a human-readable message plus the record.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    pub data: T,
}

/// Build the full application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        // delivery order lifecycle
        .route("/create-delivery-order", post(delivery::create_delivery_order))
        .route("/get-delivery-orders", get(delivery::get_delivery_orders))
        .route("/get-delivery-order/{id}", get(delivery::get_delivery_order))
        .route(
            "/update-delivery-order/{id}",
            put(delivery::update_delivery_order),
        )
        .route(
            "/delete-delivery-order/{id}",
            delete(delivery::delete_delivery_order),
        )
        .route("/track-order/{orderId}", get(delivery::track_order))
        .route("/update-status/{orderId}", patch(delivery::update_status))
        // marketplace accounts
        .route("/register-user", post(users::register_user))
        .route("/get-all-users", get(users::get_all_users))
        .route("/get-user-profile/{id}", get(users::get_user_profile))
        .route("/update-user-profile", put(users::update_user_profile))
        .route("/delete-user/{id}", delete(users::delete_user))
        // produce listings
        .route("/create-products", post(products::create_product))
        .route("/get-products", get(products::get_products))
        .route("/update-products/{id}", put(products::update_product))
        .route("/delete-products/{id}", delete(products::delete_product))
        // warehouse storage requests
        .route("/requests", get(warehouse::get_requests))
        .route("/request-warehouse", post(warehouse::create_request))
        .route("/update-request/{id}", put(warehouse::update_request))
        .route("/delete-request/{id}", delete(warehouse::delete_request))
        // feedback
        .route(
            "/feedback",
            post(feedback::submit_feedback).get(feedback::list_feedback),
        )
        .route("/feedback/average-rating", get(feedback::average_rating))
        .with_state(state)
}

/// Bind and serve the application with graceful shutdown.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let notifier = Arc::new(Notifier::new(
        build_mailer(&config),
        config.mail_from.clone(),
        config.tracking_url.clone(),
    ));
    let state = build_state(&config, notifier).await?;

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = router(state).layer(cors).layer(TraceLayer::new_for_http());

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn build_mailer(config: &AppConfig) -> Arc<dyn Mailer> {
    match (&config.mail_endpoint, &config.mail_token) {
        (Some(endpoint), Some(token)) => {
            Arc::new(HttpMailer::new(endpoint.clone(), token.clone()))
        }
        _ => {
            warn!("MAIL_API_URL/MAIL_API_TOKEN not set, notifications will be dropped");
            Arc::new(NoopMailer)
        }
    }
}

#[cfg(feature = "mongodb_backend")]
async fn build_state(config: &AppConfig, notifier: Arc<Notifier>) -> anyhow::Result<AppState> {
    let client = mongodb::Client::with_uri_str(&config.mongo_uri).await?;
    let database = client.database(&config.mongo_db);
    info!("Connected to MongoDB database '{}'", config.mongo_db);
    Ok(AppState::mongo(database, notifier).await?)
}

#[cfg(not(feature = "mongodb_backend"))]
async fn build_state(_config: &AppConfig, notifier: Arc<Notifier>) -> anyhow::Result<AppState> {
    warn!("mongodb_backend feature disabled, using volatile in-memory storage");
    Ok(AppState::in_memory(notifier))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
