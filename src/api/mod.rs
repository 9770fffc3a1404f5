//! HTTP API.
//!
//! Handlers are thin: pull the caller and payload out of the request, check
//! permissions, call [`RollcallService`](crate::service::RollcallService),
//! and serialize the result. Errors become JSON bodies with a matching
//! status code (see [`error`]).

pub mod error;
pub mod extract;
pub mod meetings;
pub mod requests;
pub mod state;
pub mod users;
pub mod voting;

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{delete, get, post, put},
    Json, Router,
};
use log::{info, warn};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::ServerConfig;
use crate::constants::LOG_SERVER_STOPPED;

pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/auth/sync", post(users::sync_user))
        .route("/me", get(users::me))
        .route("/me/absences", get(users::my_absences))
        .route("/me/requests", get(users::my_requests))
        .route("/users", get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user).patch(users::update_user).delete(users::delete_user),
        )
        .route("/users/{id}/absences", get(users::user_absences))
        .route("/users/{id}/attendance", get(users::user_attendance))
        .route("/roles", get(users::list_roles).post(users::create_role))
        .route("/roles/{id}", put(users::update_role).patch(users::update_role).delete(users::delete_role))
        .route("/meetings", get(meetings::list_meetings).post(meetings::create_meeting))
        .route("/meetings/upcoming", get(meetings::upcoming_meetings))
        .route(
            "/meetings/{id}",
            get(meetings::get_meeting)
                .patch(meetings::update_meeting)
                .delete(meetings::delete_meeting),
        )
        .route(
            "/meetings/{id}/attendance",
            get(meetings::meeting_attendance).put(meetings::record_attendance),
        )
        .route("/attendance/report", get(meetings::attendance_report))
        .route("/attendance/{id}", delete(meetings::delete_attendance))
        .route("/requests", get(requests::list_requests).post(requests::submit_request))
        .route("/requests/{id}", get(requests::get_request).delete(requests::withdraw_request))
        .route("/requests/{id}/review", post(requests::review_request))
        .route("/voting/events", get(voting::list_events).post(voting::create_event))
        .route("/voting/events/{id}", delete(voting::delete_event))
        .route("/voting/events/{id}/votes", post(voting::cast_vote))
        .route("/voting/events/{id}/results", get(voting::event_results))
        .route("/voting/active", get(voting::active_event));

    Router::new().nest("/api", api).with_state(state)
}

/// Build the CORS layer. No configured origins means any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60))
}

/// Serve the API until Ctrl+C or SIGTERM.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = router(state).layer(cors_layer(&config.cors_origins));

    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("{}", LOG_SERVER_STOPPED);
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
