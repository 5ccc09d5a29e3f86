//! Event Service - Business logic layer

use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{EventError, EventResult};
use crate::models::{
    CreateEvent, DeleteEventResponse, EVENT_DELETED, Event, EventListQuery, EventPage,
    EventPageRequest, NewEvent, Participant, RegisterParticipant, UpdateEvent,
};
use crate::repository::EventRepository;

/// Event service providing business logic operations
///
/// Validates input before it reaches the repository and decides how
/// repository failures are reported to callers.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    /// Create a new EventService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List events, sorted and paginated
    #[instrument(skip(self))]
    pub async fn list_events(&self, query: EventListQuery) -> EventResult<EventPage> {
        let request = EventPageRequest::try_from(query)?;

        self.repository
            .list_events(&request)
            .await
            .map_err(|e| EventError::Internal(e.to_string()))
    }

    /// Create a new event
    #[instrument(skip(self, input))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        let new_event = NewEvent::try_from(input)?;

        self.repository
            .create_event(new_event)
            .await
            .map_err(EventError::into_validation)
    }

    /// Get an event by ID
    #[instrument(skip(self))]
    pub async fn get_event(&self, id: &str) -> EventResult<Event> {
        self.repository
            .get_event(id)
            .await
            .map_err(EventError::into_internal)?
            .ok_or_else(|| EventError::NotFound(id.to_string()))
    }

    /// Apply a partial update to an event
    #[instrument(skip(self, input))]
    pub async fn update_event(&self, id: &str, input: UpdateEvent) -> EventResult<Event> {
        self.repository
            .update_event(id, input)
            .await
            .map_err(EventError::into_internal)?
            .ok_or_else(|| EventError::NotFound(id.to_string()))
    }

    /// Delete an event; its participants are left in place
    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: &str) -> EventResult<DeleteEventResponse> {
        let deleted = self
            .repository
            .delete_event(id)
            .await
            .map_err(EventError::into_internal)?
            .ok_or_else(|| EventError::NotFound(id.to_string()))?;

        tracing::info!(event_id = %deleted.id, "Event removed");

        Ok(DeleteEventResponse {
            message: EVENT_DELETED.to_string(),
            event_id: id.to_string(),
        })
    }

    /// Register a participant to an event
    #[instrument(skip(self, input))]
    pub async fn register_participant(
        &self,
        event_id: &str,
        input: RegisterParticipant,
    ) -> EventResult<Participant> {
        let participant = input.into_new_participant(Utc::now())?;

        self.repository
            .register_participant(event_id, participant)
            .await
            .map_err(|e| match e {
                EventError::InvalidId(id) => EventError::InvalidId(id),
                other => EventError::Internal(other.to_string()),
            })
    }

    /// List participants of an event, optionally filtered by name or email
    #[instrument(skip(self))]
    pub async fn list_participants(
        &self,
        event_id: &str,
        search: Option<String>,
    ) -> EventResult<Vec<Participant>> {
        self.repository
            .list_participants(event_id, search)
            .await
            .map_err(|e| match e {
                EventError::InvalidId(id) => EventError::InvalidId(id),
                other => EventError::Internal(other.to_string()),
            })
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
