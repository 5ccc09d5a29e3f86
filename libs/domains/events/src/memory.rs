//! In-memory implementation of EventRepository (for development/testing)

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::EventResult;
use crate::models::{
    Event, EventPage, EventPageRequest, NewEvent, NewParticipant, Participant, SortOrder,
    UpdateEvent, parse_object_id,
};
use crate::repository::EventRepository;

/// Keeps events and participants in insertion order, mirroring the natural
/// order of the document store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<Vec<Event>>>,
    participants: Arc<RwLock<Vec<Participant>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list_events(&self, request: &EventPageRequest) -> EventResult<EventPage> {
        let events = self.events.read().await;

        let mut sorted: Vec<Event> = events.clone();
        sorted.sort_by(|a, b| {
            let ordering = request.sort_field.compare(a, b);
            let ordering = match request.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.id.cmp(&b.id))
        });

        let page: Vec<Event> = sorted
            .into_iter()
            .skip(usize::try_from(request.skip()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.limit).unwrap_or(usize::MAX))
            .collect();

        Ok(request.into_page(page, events.len() as u64))
    }

    async fn create_event(&self, input: NewEvent) -> EventResult<Event> {
        let now = Utc::now();
        let event = Event {
            id: ObjectId::new().to_hex(),
            img_url: input.img_url,
            title: input.title,
            description: input.description,
            event_date: input.event_date,
            organizer: input.organizer,
            created_at: now,
            updated_at: now,
        };

        self.events.write().await.push(event.clone());

        tracing::info!(event_id = %event.id, "Created event");
        Ok(event)
    }

    async fn get_event(&self, id: &str) -> EventResult<Option<Event>> {
        let Ok(oid) = parse_object_id(id) else {
            return Ok(None);
        };
        let id = oid.to_hex();

        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == id).cloned())
    }

    async fn update_event(&self, id: &str, input: UpdateEvent) -> EventResult<Option<Event>> {
        let id = parse_object_id(id)?.to_hex();

        let mut events = self.events.write().await;
        let Some(event) = events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        event.apply_update(input, Utc::now());
        Ok(Some(event.clone()))
    }

    async fn delete_event(&self, id: &str) -> EventResult<Option<Event>> {
        let id = parse_object_id(id)?.to_hex();

        let mut events = self.events.write().await;
        let removed = events
            .iter()
            .position(|e| e.id == id)
            .map(|index| events.remove(index));
        Ok(removed)
    }

    async fn register_participant(
        &self,
        event_id: &str,
        input: NewParticipant,
    ) -> EventResult<Participant> {
        let event_oid = parse_object_id(event_id)?;
        let referral = input.required_referral()?.to_string();

        let now = Utc::now();
        let participant = Participant {
            id: ObjectId::new().to_hex(),
            full_name: input.full_name,
            email: input.email,
            dob: input.dob,
            referral,
            event_id: event_oid.to_hex(),
            created_at: now,
            updated_at: now,
        };

        self.participants.write().await.push(participant.clone());
        Ok(participant)
    }

    async fn list_participants(
        &self,
        event_id: &str,
        search: Option<String>,
    ) -> EventResult<Vec<Participant>> {
        let event_hex = parse_object_id(event_id)?.to_hex();
        let needle = search
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase());

        let participants = self.participants.read().await;
        let result = participants
            .iter()
            .filter(|p| p.event_id == event_hex)
            .filter(|p| match needle {
                Some(ref needle) => {
                    p.full_name.to_lowercase().contains(needle)
                        || p.email.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect();

        Ok(result)
    }
}
