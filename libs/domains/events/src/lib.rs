//! Events Domain
//!
//! Events and the participants registered to them, stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Field validation, error policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB / in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, paging
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{handlers, MongoEventRepository, EventService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("events");
//!
//! let repository = MongoEventRepository::new(&db);
//! repository.create_indexes().await?;
//!
//! let router = handlers::router(EventService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryEventRepository;
pub use models::{
    CreateEvent, DeleteEventResponse, Event, EventListQuery, EventPage, EventPageRequest,
    Participant, ParticipantQuery, RegisterParticipant, SortField, SortOrder, UpdateEvent,
};
pub use self::mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::EventService;
