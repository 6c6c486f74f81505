//! Event participant repository implementation
//!
//! Mutating methods take an open transaction: the RSVP service brackets the
//! going-count read and the record upsert inside one per-event transaction,
//! and the primitives here must all run on that same connection.

use sqlx::{PgPool, Postgres, Transaction};
use chrono::Utc;
use uuid::Uuid;
use crate::models::participant::{EventParticipant, ParticipantStatus, ParticipantWithUser};
use crate::utils::errors::GatherHubError;

const PARTICIPANT_COLUMNS: &str = "id, event_id, user_id, status, is_checked_in, rsvp_at, cancelled_at";

#[derive(Debug, Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count going participants for an event, excluding one user's own record.
    ///
    /// Excluding the caller makes re-RSVP idempotent: a user already holding
    /// a going slot never gets displaced onto the waitlist by their own
    /// repeated request.
    pub async fn count_going_excluding(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<i64, GatherHubError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_participants WHERE event_id = $1 AND status = 'going' AND user_id <> $2"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count.0)
    }

    /// Count going participants for an event
    pub async fn count_going(&self, event_id: Uuid) -> Result<i64, GatherHubError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_participants WHERE event_id = $1 AND status = 'going'"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count going participants inside an open transaction
    pub async fn count_going_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
    ) -> Result<i64, GatherHubError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_participants WHERE event_id = $1 AND status = 'going'"
        )
        .bind(event_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count.0)
    }

    /// Find a user's record for an event, cancelled or not
    pub async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<EventParticipant>, GatherHubError> {
        let participant = sqlx::query_as::<_, EventParticipant>(
            &format!("SELECT {PARTICIPANT_COLUMNS} FROM event_participants WHERE event_id = $1 AND user_id = $2")
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Insert or revive a participant record with the decided status.
    ///
    /// The UNIQUE (user_id, event_id) constraint keys the upsert. An active
    /// record keeps its original rsvp_at so repeated requests cannot reset a
    /// waitlist position; a cancelled record is revived with a fresh one.
    pub async fn upsert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        user_id: Uuid,
        status: ParticipantStatus,
    ) -> Result<EventParticipant, GatherHubError> {
        let participant = sqlx::query_as::<_, EventParticipant>(
            r#"
            INSERT INTO event_participants (id, event_id, user_id, status, is_checked_in, rsvp_at, cancelled_at)
            VALUES ($1, $2, $3, $4, false, $5, NULL)
            ON CONFLICT (user_id, event_id) DO UPDATE
            SET status = EXCLUDED.status,
                cancelled_at = NULL,
                rsvp_at = CASE
                    WHEN event_participants.cancelled_at IS NULL THEN event_participants.rsvp_at
                    ELSE EXCLUDED.rsvp_at
                END
            RETURNING id, event_id, user_id, status, is_checked_in, rsvp_at, cancelled_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(user_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(participant)
    }

    /// Find a user's active (non-cancelled) record inside a transaction
    pub async fn find_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<EventParticipant>, GatherHubError> {
        let participant = sqlx::query_as::<_, EventParticipant>(
            &format!("SELECT {PARTICIPANT_COLUMNS} FROM event_participants WHERE event_id = $1 AND user_id = $2 AND status <> 'cancelled'")
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(participant)
    }

    /// Mark a record cancelled
    pub async fn mark_cancelled(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        participant_id: Uuid,
    ) -> Result<EventParticipant, GatherHubError> {
        let participant = sqlx::query_as::<_, EventParticipant>(
            r#"
            UPDATE event_participants
            SET status = 'cancelled', cancelled_at = $2
            WHERE id = $1
            RETURNING id, event_id, user_id, status, is_checked_in, rsvp_at, cancelled_at
            "#
        )
        .bind(participant_id)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(participant)
    }

    /// Longest-waiting waitlisted record for an event, FIFO by rsvp_at
    pub async fn oldest_waitlisted(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
    ) -> Result<Option<EventParticipant>, GatherHubError> {
        let participant = sqlx::query_as::<_, EventParticipant>(
            &format!("SELECT {PARTICIPANT_COLUMNS} FROM event_participants WHERE event_id = $1 AND status = 'waitlisted' ORDER BY rsvp_at ASC LIMIT 1")
        )
        .bind(event_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(participant)
    }

    /// Promote a waitlisted record to going
    pub async fn promote(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        participant_id: Uuid,
    ) -> Result<EventParticipant, GatherHubError> {
        let participant = sqlx::query_as::<_, EventParticipant>(
            r#"
            UPDATE event_participants
            SET status = 'going'
            WHERE id = $1 AND status = 'waitlisted'
            RETURNING id, event_id, user_id, status, is_checked_in, rsvp_at, cancelled_at
            "#
        )
        .bind(participant_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(participant)
    }

    /// All non-cancelled records for an event joined with public user fields,
    /// FIFO by rsvp_at
    pub async fn list_with_users(&self, event_id: Uuid) -> Result<Vec<ParticipantWithUser>, GatherHubError> {
        let participants = sqlx::query_as::<_, ParticipantWithUser>(
            r#"
            SELECT ep.id, ep.event_id, ep.user_id, ep.status, ep.is_checked_in, ep.rsvp_at,
                   u.first_name, u.last_name, u.profile_image
            FROM event_participants ep
            INNER JOIN users u ON u.id = ep.user_id
            WHERE ep.event_id = $1 AND ep.status <> 'cancelled'
            ORDER BY ep.rsvp_at ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }
}
