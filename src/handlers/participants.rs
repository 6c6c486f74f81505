//! Participant handlers
//!
//! The RSVP surface: list participants, register, and cancel. Admission
//! versus waitlisting is decided by the RSVP service; these handlers only
//! translate outcomes into status codes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::handlers::error::ApiError;
use crate::handlers::AppState;
use crate::middleware::auth::AuthUser;
use crate::models::participant::{EventParticipant, ParticipantWithUser};

#[derive(Debug, Serialize)]
pub struct ParticipantListResponse {
    pub participants: Vec<ParticipantWithUser>,
}

#[derive(Debug, Serialize)]
pub struct RsvpResponse {
    #[serde(flatten)]
    pub participant: EventParticipant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub message: &'static str,
}

/// GET /events/{id}/participants - joined participant list
pub async fn list_participants(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ParticipantListResponse>, ApiError> {
    let participants = state
        .services
        .rsvp_service
        .list_participants(event_id)
        .await?;

    Ok(Json(ParticipantListResponse { participants }))
}

/// POST /events/{id}/participants - RSVP to an event
///
/// 201 with the record on direct admission; 200 with a waitlist notice when
/// the event is at capacity.
pub async fn rsvp(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<(StatusCode, Json<RsvpResponse>), ApiError> {
    let outcome = state
        .services
        .rsvp_service
        .rsvp(auth.user_id, event_id)
        .await?;

    let status = if outcome.waitlisted {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(RsvpResponse {
            message: outcome.notice(),
            participant: outcome.participant,
        }),
    ))
}

/// DELETE /events/{id}/participants - cancel the caller's RSVP
pub async fn cancel_rsvp(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<CancelResponse>, ApiError> {
    state
        .services
        .rsvp_service
        .cancel(auth.user_id, event_id)
        .await?;

    Ok(Json(CancelResponse {
        message: "RSVP cancelled successfully",
    }))
}
