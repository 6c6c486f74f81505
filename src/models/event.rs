//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    /// Maximum number of going participants; unlimited when absent
    pub capacity: Option<i32>,
    pub is_published: bool,
    pub is_online: bool,
    pub location: Option<String>,
    pub price_cents: i64,
    pub organizer_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub is_published: Option<bool>,
    pub is_online: Option<bool>,
    pub location: Option<String>,
    pub price_cents: Option<i64>,
    pub organizer_user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub is_published: Option<bool>,
    pub is_online: Option<bool>,
    pub location: Option<String>,
    pub price_cents: Option<i64>,
}

/// Pagination parameters for event listings
#[derive(Debug, Clone, Deserialize)]
pub struct EventListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// "true", "false" or "all" (default)
    pub published: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total_items: i64,
    pub total_pages: i64,
}
