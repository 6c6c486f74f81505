//! Event repository implementation

use sqlx::{PgPool, Postgres, Transaction};
use chrono::Utc;
use uuid::Uuid;
use crate::models::event::{Event, CreateEventRequest, UpdateEventRequest};
use crate::utils::errors::GatherHubError;

const EVENT_COLUMNS: &str = "id, title, description, date, rsvp_deadline, capacity, is_published, is_online, location, price_cents, organizer_user_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, GatherHubError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, title, description, date, rsvp_deadline, capacity, is_published, is_online, location, price_cents, organizer_user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, title, description, date, rsvp_deadline, capacity, is_published, is_online, location, price_cents, organizer_user_id, created_at, updated_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(request.title)
        .bind(request.description)
        .bind(request.date)
        .bind(request.rsvp_deadline)
        .bind(request.capacity)
        .bind(request.is_published.unwrap_or(false))
        .bind(request.is_online.unwrap_or(false))
        .bind(request.location)
        .bind(request.price_cents.unwrap_or(0))
        .bind(request.organizer_user_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, GatherHubError> {
        let event = sqlx::query_as::<_, Event>(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1")
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID inside a transaction, locking the row.
    ///
    /// The row lock serializes all RSVP/cancel traffic for one event, so the
    /// going-count read and the participant upsert behave as one atomic unit.
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Event>, GatherHubError> {
        let event = sqlx::query_as::<_, Event>(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE")
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(event)
    }

    /// Update event
    pub async fn update(&self, id: Uuid, request: UpdateEventRequest) -> Result<Option<Event>, GatherHubError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                date = COALESCE($4, date),
                rsvp_deadline = COALESCE($5, rsvp_deadline),
                capacity = COALESCE($6, capacity),
                is_published = COALESCE($7, is_published),
                is_online = COALESCE($8, is_online),
                location = COALESCE($9, location),
                price_cents = COALESCE($10, price_cents),
                updated_at = $11
            WHERE id = $1
            RETURNING id, title, description, date, rsvp_deadline, capacity, is_published, is_online, location, price_cents, organizer_user_id, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.date)
        .bind(request.rsvp_deadline)
        .bind(request.capacity)
        .bind(request.is_published)
        .bind(request.is_online)
        .bind(request.location)
        .bind(request.price_cents)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event; participant records cascade at the schema level
    pub async fn delete(&self, id: Uuid) -> Result<bool, GatherHubError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List events with pagination, optionally filtered by publication state,
    /// newest first
    pub async fn list(
        &self,
        published: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, GatherHubError> {
        let events = match published {
            Some(is_published) => {
                sqlx::query_as::<_, Event>(
                    &format!("SELECT {EVENT_COLUMNS} FROM events WHERE is_published = $1 ORDER BY date DESC LIMIT $2 OFFSET $3")
                )
                .bind(is_published)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Event>(
                    &format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY date DESC LIMIT $1 OFFSET $2")
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(events)
    }

    /// Events a user holds an active (going or waitlisted) record for,
    /// soonest first
    pub async fn find_registered_for_user(&self, user_id: Uuid) -> Result<Vec<Event>, GatherHubError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT e.id, e.title, e.description, e.date, e.rsvp_deadline, e.capacity,
                   e.is_published, e.is_online, e.location, e.price_cents,
                   e.organizer_user_id, e.created_at, e.updated_at
            FROM events e
            INNER JOIN event_participants ep ON ep.event_id = e.id
            WHERE ep.user_id = $1 AND ep.status <> 'cancelled'
            ORDER BY e.date ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count events, optionally filtered by publication state
    pub async fn count(&self, published: Option<bool>) -> Result<i64, GatherHubError> {
        let count: (i64,) = match published {
            Some(is_published) => {
                sqlx::query_as("SELECT COUNT(*) FROM events WHERE is_published = $1")
                    .bind(is_published)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM events")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count.0)
    }
}
