use async_trait::async_trait;

use crate::error::EventResult;
use crate::models::{Event, EventPage, EventPageRequest, NewEvent, NewParticipant, Participant, UpdateEvent};

/// Repository trait for event and participant persistence
///
/// Identifiers are passed as raw strings; each implementation decides how a
/// malformed identifier is reported (see the individual methods).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Sorted, paginated page of events together with the total count
    async fn list_events(&self, request: &EventPageRequest) -> EventResult<EventPage>;

    /// Insert an event, assigning id and timestamps
    async fn create_event(&self, input: NewEvent) -> EventResult<Event>;

    /// Find an event; a malformed id yields `None` rather than an error
    async fn get_event(&self, id: &str) -> EventResult<Option<Event>>;

    /// Apply a partial update and return the post-update record
    async fn update_event(&self, id: &str, input: UpdateEvent) -> EventResult<Option<Event>>;

    /// Remove an event and return the removed record
    async fn delete_event(&self, id: &str) -> EventResult<Option<Event>>;

    /// Store a participant for `event_id` without checking that the event exists
    async fn register_participant(
        &self,
        event_id: &str,
        input: NewParticipant,
    ) -> EventResult<Participant>;

    /// Participants of an event, optionally narrowed by a name/email search
    async fn list_participants(
        &self,
        event_id: &str,
        search: Option<String>,
    ) -> EventResult<Vec<Participant>>;
}
