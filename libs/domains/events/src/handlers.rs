use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    JsonBody, QueryParams,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::models::{
    CreateEvent, DeleteEventResponse, Event, EventListQuery, EventPage, Participant,
    ParticipantQuery, RegisterParticipant, SortField, SortOrder, UpdateEvent,
};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        get_event,
        update_event,
        delete_event,
        register_participant,
        list_participants,
    ),
    components(
        schemas(
            Event,
            EventPage,
            CreateEvent,
            UpdateEvent,
            DeleteEventResponse,
            Participant,
            RegisterParticipant,
            SortField,
            SortOrder
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Event and participant management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/{id}",
            get(get_event).patch(update_event).delete(delete_event),
        )
        .route("/{id}/register", post(register_participant))
        .route("/{id}/participants", get(list_participants))
        .with_state(shared_service)
}

/// List events with sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    params(EventListQuery),
    responses(
        (status = 200, description = "Page of events", body = EventPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    QueryParams(query): QueryParams<EventListQuery>,
) -> EventResult<Json<EventPage>> {
    let page = service.list_events(query).await?;
    Ok(Json(page))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created successfully", body = Event),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    JsonBody(input): JsonBody<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> EventResult<Json<Event>> {
    let event = service.get_event(&id).await?;
    Ok(Json(event))
}

/// Partially update an event
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex)")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated successfully", body = Event),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateEvent>,
) -> EventResult<Json<Event>> {
    let event = service.update_event(&id, input).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Event deleted successfully", body = DeleteEventResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> EventResult<Json<DeleteEventResponse>> {
    let response = service.delete_event(&id).await?;
    Ok(Json(response))
}

/// Register a participant to an event
#[utoipa::path(
    post,
    path = "/{id}/register",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex)")
    ),
    request_body = RegisterParticipant,
    responses(
        (status = 201, description = "Participant registered", body = Participant),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_participant<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<RegisterParticipant>,
) -> EventResult<impl IntoResponse> {
    let participant = service.register_participant(&id, input).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// List participants of an event
#[utoipa::path(
    get,
    path = "/{id}/participants",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex)"),
        ParticipantQuery
    ),
    responses(
        (status = 200, description = "Participants of the event", body = Vec<Participant>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_participants<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<ParticipantQuery>,
) -> EventResult<Json<Vec<Participant>>> {
    let participants = service.list_participants(&id, query.search).await?;
    Ok(Json(participants))
}
