//! Event handlers
//!
//! Public event listings plus the admin CRUD surface.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::handlers::error::ApiError;
use crate::handlers::AppState;
use crate::middleware::auth::AdminUser;
use crate::models::event::{CreateEventRequest, EventListQuery, Pagination, UpdateEventRequest};
use crate::services::event::EventView;

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventView>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /events - list events with pagination and projected status
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<EventListResponse>, ApiError> {
    let (events, pagination) = state.services.event_service.list_events(query).await?;

    Ok(Json(EventListResponse { events, pagination }))
}

/// POST /events - create a new event (admin only)
pub async fn create_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventView>), ApiError> {
    let event = state
        .services
        .event_service
        .create_event(admin.id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /events/{id} - fetch a single event with projected status
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventView>, ApiError> {
    let event = state.services.event_service.get_event(event_id).await?;

    Ok(Json(event))
}

/// PUT /events/{id} - update an event (admin only)
pub async fn update_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<EventView>, ApiError> {
    let event = state
        .services
        .event_service
        .update_event(admin.id, event_id, request)
        .await?;

    Ok(Json(event))
}

/// DELETE /events/{id} - delete an event (admin only)
pub async fn delete_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .services
        .event_service
        .delete_event(admin.id, event_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Event deleted successfully",
    }))
}
