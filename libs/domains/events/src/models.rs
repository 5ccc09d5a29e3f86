//! Event and participant models, request DTOs and paging types

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson::oid::ObjectId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{EventError, EventResult};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 8;

pub const EVENT_FIELDS_REQUIRED: &str = "All fields are required.";
pub const PARTICIPANT_FIELDS_REQUIRED: &str = "Full name, email, and date of birth are required.";
pub const INVALID_EMAIL: &str = "Invalid email format.";
pub const DOB_IN_FUTURE: &str = "Date of birth cannot be in the future.";
pub const EVENT_DELETED: &str = "Event deleted successfully";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Returns true when `email` looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Parse a 24-character hex identifier into an ObjectId
pub fn parse_object_id(id: &str) -> EventResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| EventError::InvalidId(id.to_string()))
}

/// Event entity as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier (hex ObjectId)
    pub id: String,
    /// Cover image URL
    pub img_url: String,
    pub title: String,
    pub description: String,
    /// When the event takes place
    pub event_date: DateTime<Utc>,
    pub organizer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Apply the supplied fields of a partial update
    pub fn apply_update(&mut self, update: UpdateEvent, now: DateTime<Utc>) {
        if let Some(img_url) = update.img_url {
            self.img_url = img_url;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(event_date) = update.event_date {
            self.event_date = event_date;
        }
        if let Some(organizer) = update.organizer {
            self.organizer = organizer;
        }
        self.updated_at = now;
    }
}

/// Participant registered to an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub full_name: String,
    pub email: String,
    /// Date of birth
    pub dob: DateTime<Utc>,
    /// How the participant heard about the event
    pub referral: String,
    /// Referenced event (not checked for existence)
    pub event_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating an event
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation failure rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[validate(required, length(min = 1))]
    pub img_url: Option<String>,
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    #[validate(required)]
    #[serde(default, deserialize_with = "flexible_date::deserialize_option")]
    pub event_date: Option<DateTime<Utc>>,
    #[validate(required, length(min = 1))]
    pub organizer: Option<String>,
}

/// Event fields that passed validation and are ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub img_url: String,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub organizer: String,
}

impl TryFrom<CreateEvent> for NewEvent {
    type Error = EventError;

    fn try_from(input: CreateEvent) -> EventResult<Self> {
        if let Err(errors) = input.validate() {
            tracing::debug!(%errors, "Event creation rejected");
            return Err(EventError::Validation(EVENT_FIELDS_REQUIRED.to_string()));
        }

        let (Some(img_url), Some(title), Some(description), Some(event_date), Some(organizer)) = (
            input.img_url,
            input.title,
            input.description,
            input.event_date,
            input.organizer,
        ) else {
            return Err(EventError::Validation(EVENT_FIELDS_REQUIRED.to_string()));
        };

        Ok(Self {
            img_url,
            title,
            description,
            event_date,
            organizer,
        })
    }
}

/// Partial update of an event; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub img_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flexible_date::deserialize_option")]
    pub event_date: Option<DateTime<Utc>>,
    pub organizer: Option<String>,
}

/// Request body for registering a participant
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterParticipant {
    #[validate(required, length(min = 1))]
    pub full_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required)]
    #[serde(default, deserialize_with = "flexible_date::deserialize_option")]
    pub dob: Option<DateTime<Utc>>,
    pub referral: Option<String>,
}

impl RegisterParticipant {
    /// Check presence, email format and date of birth, in that order.
    ///
    /// The referral source is not checked here; the storage layer enforces it.
    pub fn into_new_participant(self, now: DateTime<Utc>) -> EventResult<NewParticipant> {
        if self.validate().is_err() {
            return Err(EventError::Validation(
                PARTICIPANT_FIELDS_REQUIRED.to_string(),
            ));
        }

        let (Some(full_name), Some(email), Some(dob)) = (self.full_name, self.email, self.dob)
        else {
            return Err(EventError::Validation(
                PARTICIPANT_FIELDS_REQUIRED.to_string(),
            ));
        };

        if !is_valid_email(&email) {
            return Err(EventError::Validation(INVALID_EMAIL.to_string()));
        }

        if dob > now {
            return Err(EventError::Validation(DOB_IN_FUTURE.to_string()));
        }

        Ok(NewParticipant {
            full_name,
            email,
            dob,
            referral: self.referral,
        })
    }
}

/// Participant fields accepted for registration
#[derive(Debug, Clone, PartialEq)]
pub struct NewParticipant {
    pub full_name: String,
    pub email: String,
    pub dob: DateTime<Utc>,
    pub referral: Option<String>,
}

impl NewParticipant {
    /// Schema check applied when the record is written
    pub fn required_referral(&self) -> EventResult<&str> {
        self.referral
            .as_deref()
            .filter(|referral| !referral.is_empty())
            .ok_or_else(|| {
                EventError::Database("participant validation failed: referral is required".into())
            })
    }
}

/// Event fields accepted as sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Default, ToSchema)]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    ImgUrl,
    #[default]
    Title,
    Description,
    EventDate,
    Organizer,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Document key the field is stored under
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::ImgUrl => "imgUrl",
            Self::Title => "title",
            Self::Description => "description",
            Self::EventDate => "eventDate",
            Self::Organizer => "organizer",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Compare two events on this field
    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        match self {
            Self::ImgUrl => a.img_url.cmp(&b.img_url),
            Self::Title => a.title.cmp(&b.title),
            Self::Description => a.description.cmp(&b.description),
            Self::EventDate => a.event_date.cmp(&b.event_date),
            Self::Organizer => a.organizer.cmp(&b.organizer),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Default, ToSchema)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// MongoDB sort direction
    pub fn direction(&self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// Query parameters for listing events
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct EventListQuery {
    /// Field to sort by (default `title`)
    pub sort_field: Option<String>,
    /// `asc` (default) or `desc`
    pub sort_order: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Page size (default 8)
    pub limit: Option<u64>,
}

/// Resolved paging request handed to the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventPageRequest {
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub page: u64,
    pub limit: u64,
}

impl Default for EventPageRequest {
    fn default() -> Self {
        Self {
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl EventPageRequest {
    /// Number of records preceding the requested page
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }

    pub fn into_page(self, events: Vec<Event>, total_events: u64) -> EventPage {
        EventPage {
            events,
            current_page: self.page,
            total_pages: self.total_pages(total_events),
            total_events,
        }
    }
}

impl TryFrom<EventListQuery> for EventPageRequest {
    type Error = EventError;

    fn try_from(query: EventListQuery) -> EventResult<Self> {
        let sort_field = match query.sort_field.as_deref() {
            None => SortField::default(),
            Some(raw) => raw
                .parse()
                .map_err(|_| EventError::Validation(format!("Invalid sort field: {}", raw)))?,
        };

        let sort_order = match query.sort_order.as_deref() {
            None => SortOrder::default(),
            Some(raw) => raw
                .parse()
                .map_err(|_| EventError::Validation(format!("Invalid sort order: {}", raw)))?,
        };

        let page = query.page.unwrap_or(DEFAULT_PAGE);
        if page == 0 {
            return Err(EventError::Validation("page must be at least 1".into()));
        }

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(EventError::Validation("limit must be at least 1".into()));
        }

        Ok(Self {
            sort_field,
            sort_order,
            page,
            limit,
        })
    }
}

/// One page of events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    pub events: Vec<Event>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_events: u64,
}

/// Query parameters for listing participants
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParticipantQuery {
    /// Case-insensitive substring matched against full name or email
    pub search: Option<String>,
}

/// Confirmation returned after deleting an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventResponse {
    pub message: String,
    pub event_id: String,
}

/// Dates arrive either as RFC 3339 timestamps or as bare `YYYY-MM-DD` days.
pub mod flexible_date {
    use super::*;
    use serde::Deserializer;

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(timestamp.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|day| day.and_time(NaiveTime::MIN).and_utc())
            .map_err(|_| format!("invalid date '{}', expected RFC 3339 or YYYY-MM-DD", raw))
    }

    /// An empty string counts as absent.
    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value).map(Some).map_err(serde::de::Error::custom),
        }
    }
}
