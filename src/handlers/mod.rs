//! HTTP handlers module
//!
//! Defines the shared application state and wires every route into the
//! axum router. The state is passed explicitly per request; there is no
//! process-wide cached client.

pub mod error;
pub mod events;
pub mod health;
pub mod participants;
pub mod users;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::services::ServiceFactory;

/// Shared application state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseService,
    pub services: ServiceFactory,
    pub settings: Settings,
}

impl AppState {
    pub fn new(db: DatabaseService, settings: Settings) -> Self {
        Self {
            services: ServiceFactory::new(db.clone()),
            db,
            settings,
        }
    }
}

/// CORS policy from the configured origin list. A literal `"*"` opens the
/// API up; an empty list allows no cross-origin callers.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.server.allowed_origins);

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/events/:id/participants",
            get(participants::list_participants)
                .post(participants::rsvp)
                .delete(participants::cancel_rsvp),
        )
        .route("/users/me/events", get(users::my_events))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
