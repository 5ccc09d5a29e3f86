//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{DateTime as BsonDateTime, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{EventError, EventResult};
use crate::models::{
    Event, EventPage, EventPageRequest, NewEvent, NewParticipant, Participant, UpdateEvent,
    parse_object_id,
};
use crate::repository::EventRepository;

pub const EVENTS_COLLECTION: &str = "events";
pub const PARTICIPANTS_COLLECTION: &str = "participants";

fn to_bson_date(value: chrono::DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(value.timestamp_millis())
}

fn from_bson_date(value: BsonDateTime) -> EventResult<chrono::DateTime<Utc>> {
    chrono::DateTime::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        EventError::Internal(format!(
            "Stored date out of range: {} ms",
            value.timestamp_millis()
        ))
    })
}

/// Stored shape of an event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    img_url: String,
    title: String,
    description: String,
    event_date: BsonDateTime,
    organizer: String,
    created_at: BsonDateTime,
    updated_at: BsonDateTime,
}

impl TryFrom<EventDocument> for Event {
    type Error = EventError;

    fn try_from(doc: EventDocument) -> EventResult<Self> {
        Ok(Self {
            id: doc.id.to_hex(),
            img_url: doc.img_url,
            title: doc.title,
            description: doc.description,
            event_date: from_bson_date(doc.event_date)?,
            organizer: doc.organizer,
            created_at: from_bson_date(doc.created_at)?,
            updated_at: from_bson_date(doc.updated_at)?,
        })
    }
}

/// Stored shape of a participant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    full_name: String,
    email: String,
    dob: BsonDateTime,
    referral: String,
    event_id: ObjectId,
    created_at: BsonDateTime,
    updated_at: BsonDateTime,
}

impl TryFrom<ParticipantDocument> for Participant {
    type Error = EventError;

    fn try_from(doc: ParticipantDocument) -> EventResult<Self> {
        Ok(Self {
            id: doc.id.to_hex(),
            full_name: doc.full_name,
            email: doc.email,
            dob: from_bson_date(doc.dob)?,
            referral: doc.referral,
            event_id: doc.event_id.to_hex(),
            created_at: from_bson_date(doc.created_at)?,
            updated_at: from_bson_date(doc.updated_at)?,
        })
    }
}

/// MongoDB implementation of the EventRepository
pub struct MongoEventRepository {
    events: Collection<EventDocument>,
    participants: Collection<ParticipantDocument>,
}

impl MongoEventRepository {
    /// Create a repository over the `events` and `participants` collections
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoEventRepository::new(&client.database("events"));
    /// ```
    pub fn new(db: &Database) -> Self {
        Self {
            events: db.collection(EVENTS_COLLECTION),
            participants: db.collection(PARTICIPANTS_COLLECTION),
        }
    }

    /// Create the indexes used by listing and participant lookups
    #[instrument(skip(self))]
    pub async fn create_indexes(&self) -> EventResult<()> {
        self.events
            .create_index(IndexModel::builder().keys(doc! { "title": 1 }).build())
            .await?;
        self.participants
            .create_index(IndexModel::builder().keys(doc! { "eventId": 1 }).build())
            .await?;

        tracing::info!("Event indexes created");
        Ok(())
    }

    /// Sort on the requested field with `_id` as tie-breaker so pages are stable
    fn sort_document(request: &EventPageRequest) -> Document {
        let mut sort = Document::new();
        sort.insert(request.sort_field.storage_key(), request.sort_order.direction());
        sort.insert("_id", 1);
        sort
    }

    /// `$set` document holding only the supplied fields plus `updatedAt`
    fn update_document(input: UpdateEvent, now: chrono::DateTime<Utc>) -> Document {
        let mut set = Document::new();

        if let Some(img_url) = input.img_url {
            set.insert("imgUrl", img_url);
        }
        if let Some(title) = input.title {
            set.insert("title", title);
        }
        if let Some(description) = input.description {
            set.insert("description", description);
        }
        if let Some(event_date) = input.event_date {
            set.insert("eventDate", to_bson_date(event_date));
        }
        if let Some(organizer) = input.organizer {
            set.insert("organizer", organizer);
        }
        set.insert("updatedAt", to_bson_date(now));

        doc! { "$set": set }
    }

    /// Filter participants by event, and by name or email when a search is given
    fn participant_filter(event_id: ObjectId, search: Option<&str>) -> Document {
        let mut filter = doc! { "eventId": event_id };

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            let pattern = regex::escape(search);
            filter.insert(
                "$or",
                vec![
                    doc! { "fullName": { "$regex": pattern.clone(), "$options": "i" } },
                    doc! { "email": { "$regex": pattern, "$options": "i" } },
                ],
            );
        }

        filter
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self))]
    async fn list_events(&self, request: &EventPageRequest) -> EventResult<EventPage> {
        let total_events = self.events.count_documents(doc! {}).await?;

        let cursor = self
            .events
            .find(doc! {})
            .sort(Self::sort_document(request))
            .skip(request.skip())
            .limit(i64::try_from(request.limit).unwrap_or(i64::MAX))
            .await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        let events = documents
            .into_iter()
            .map(Event::try_from)
            .collect::<EventResult<Vec<_>>>()?;
        Ok(request.into_page(events, total_events))
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create_event(&self, input: NewEvent) -> EventResult<Event> {
        let now = to_bson_date(Utc::now());
        let document = EventDocument {
            id: ObjectId::new(),
            img_url: input.img_url,
            title: input.title,
            description: input.description,
            event_date: to_bson_date(input.event_date),
            organizer: input.organizer,
            created_at: now,
            updated_at: now,
        };

        self.events.insert_one(&document).await?;

        tracing::info!(event_id = %document.id, "Event created successfully");
        document.try_into()
    }

    #[instrument(skip(self))]
    async fn get_event(&self, id: &str) -> EventResult<Option<Event>> {
        let Ok(oid) = parse_object_id(id) else {
            return Ok(None);
        };

        let document = self.events.find_one(doc! { "_id": oid }).await?;
        document.map(Event::try_from).transpose()
    }

    #[instrument(skip(self, input))]
    async fn update_event(&self, id: &str, input: UpdateEvent) -> EventResult<Option<Event>> {
        let oid = parse_object_id(id)?;

        let document = self
            .events
            .find_one_and_update(doc! { "_id": oid }, Self::update_document(input, Utc::now()))
            .return_document(ReturnDocument::After)
            .await?;

        if document.is_some() {
            tracing::info!(event_id = %id, "Event updated successfully");
        }
        document.map(Event::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, id: &str) -> EventResult<Option<Event>> {
        let oid = parse_object_id(id)?;

        let document = self.events.find_one_and_delete(doc! { "_id": oid }).await?;

        if document.is_some() {
            tracing::info!(event_id = %id, "Event deleted successfully");
        }
        document.map(Event::try_from).transpose()
    }

    #[instrument(skip(self, input))]
    async fn register_participant(
        &self,
        event_id: &str,
        input: NewParticipant,
    ) -> EventResult<Participant> {
        let event_oid = parse_object_id(event_id)?;
        let referral = input.required_referral()?.to_string();

        let now = to_bson_date(Utc::now());
        let document = ParticipantDocument {
            id: ObjectId::new(),
            full_name: input.full_name,
            email: input.email,
            dob: to_bson_date(input.dob),
            referral,
            event_id: event_oid,
            created_at: now,
            updated_at: now,
        };

        self.participants.insert_one(&document).await?;

        tracing::info!(participant_id = %document.id, event_id = %event_id, "Participant registered");
        document.try_into()
    }

    #[instrument(skip(self))]
    async fn list_participants(
        &self,
        event_id: &str,
        search: Option<String>,
    ) -> EventResult<Vec<Participant>> {
        let event_oid = parse_object_id(event_id)?;
        let filter = Self::participant_filter(event_oid, search.as_deref());

        let cursor = self.participants.find(filter).await?;
        let documents: Vec<ParticipantDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Participant::try_from).collect()
    }
}
