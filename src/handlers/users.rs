//! User-scoped handlers
//!
//! The caller's own view of their participation: which events they hold an
//! active RSVP for.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::handlers::error::ApiError;
use crate::handlers::AppState;
use crate::middleware::auth::AuthUser;
use crate::services::event::EventView;

#[derive(Debug, Serialize)]
pub struct MyEventsResponse {
    pub events: Vec<EventView>,
}

/// GET /users/me/events - events the caller is going to or waitlisted for
pub async fn my_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MyEventsResponse>, ApiError> {
    let events = state
        .services
        .event_service
        .list_user_events(auth.user_id)
        .await?;

    Ok(Json(MyEventsResponse { events }))
}
