//! Event service implementation
//!
//! This service handles event CRUD for administrators and the public event
//! listings, attaching the projected status to every event it returns.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::DatabaseService;
use crate::models::event::{CreateEventRequest, Event, EventListQuery, Pagination, UpdateEventRequest};
use crate::services::status::{self, EventStatus};
use crate::utils::errors::{GatherHubError, Result};
use crate::utils::logging;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// An event together with its projected status
#[derive(Debug, Clone, serde::Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub status: EventStatus,
}

impl EventView {
    pub fn project(event: Event) -> Self {
        let status = status::project(&event, Utc::now());
        Self { event, status }
    }
}

/// Event service for managing events
#[derive(Clone)]
pub struct EventService {
    db: DatabaseService,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Create a new event. Unset fields default to an unpublished, free,
    /// in-person event organized by the caller.
    pub async fn create_event(
        &self,
        admin_id: Uuid,
        mut request: CreateEventRequest,
    ) -> Result<EventView> {
        if request.title.trim().is_empty() {
            return Err(GatherHubError::InvalidInput("Event title is required".to_string()));
        }
        if matches!(request.capacity, Some(cap) if cap <= 0) {
            return Err(GatherHubError::InvalidInput(
                "Event capacity must be a positive integer".to_string(),
            ));
        }

        if request.organizer_user_id.is_none() {
            request.organizer_user_id = Some(admin_id);
        }

        let event = self.db.events.create(request).await?;
        logging::log_admin_action(admin_id, "create_event", Some(event.id));

        Ok(EventView::project(event))
    }

    /// Get a single event by ID
    pub async fn get_event(&self, event_id: Uuid) -> Result<EventView> {
        let event = self
            .db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(GatherHubError::EventNotFound { event_id })?;

        Ok(EventView::project(event))
    }

    /// Update an event
    pub async fn update_event(
        &self,
        admin_id: Uuid,
        event_id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<EventView> {
        if matches!(request.capacity, Some(cap) if cap <= 0) {
            return Err(GatherHubError::InvalidInput(
                "Event capacity must be a positive integer".to_string(),
            ));
        }

        let event = self
            .db
            .events
            .update(event_id, request)
            .await?
            .ok_or(GatherHubError::EventNotFound { event_id })?;

        logging::log_admin_action(admin_id, "update_event", Some(event_id));

        Ok(EventView::project(event))
    }

    /// Delete an event; dependent participant records cascade
    pub async fn delete_event(&self, admin_id: Uuid, event_id: Uuid) -> Result<()> {
        let deleted = self.db.events.delete(event_id).await?;
        if !deleted {
            return Err(GatherHubError::EventNotFound { event_id });
        }

        logging::log_admin_action(admin_id, "delete_event", Some(event_id));
        info!(event_id = %event_id, "Event deleted");

        Ok(())
    }

    /// Events the user holds an active RSVP for, soonest first
    pub async fn list_user_events(&self, user_id: Uuid) -> Result<Vec<EventView>> {
        let events = self.db.events.find_registered_for_user(user_id).await?;
        Ok(events.into_iter().map(EventView::project).collect())
    }

    /// List events with pagination and an optional publication filter
    pub async fn list_events(&self, query: EventListQuery) -> Result<(Vec<EventView>, Pagination)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let published = match query.published.as_deref() {
            None | Some("all") => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => {
                return Err(GatherHubError::InvalidInput(format!(
                    "Invalid published filter: {}",
                    other
                )));
            }
        };

        debug!(page = page, limit = limit, published = ?published, "Listing events");

        let events = self.db.events.list(published, limit, offset).await?;
        let total_items = self.db.events.count(published).await?;
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };

        let views = events.into_iter().map(EventView::project).collect();

        Ok((
            views,
            Pagination {
                page,
                limit,
                total_items,
                total_pages,
            },
        ))
    }
}
