//! Handler tests for Events domain
//!
//! These tests drive the events router directly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization and HTTP status codes
//! - Error envelope for validation, id format and not-found failures
//!
//! Storage is the in-memory repository, so no database is required.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> (Router, InMemoryEventRepository) {
    let repo = InMemoryEventRepository::new();
    let router = handlers::router(EventService::new(repo.clone()));
    (router, repo)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn event_body(title: &str) -> Value {
    json!({
        "imgUrl": "https://img.example.com/cover.png",
        "title": title,
        "description": "An evening of talks",
        "eventDate": "2026-11-20T18:00:00Z",
        "organizer": "Rust Guild"
    })
}

async fn create(app: &Router, title: &str) -> Event {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", event_body(title)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_event_returns_201_with_fields() {
    let (app, _) = app();

    let event = create(&app, "Rust Meetup").await;

    assert_eq!(event.title, "Rust Meetup");
    assert_eq!(event.organizer, "Rust Guild");
    assert_eq!(event.img_url, "https://img.example.com/cover.png");
    assert_eq!(event.event_date.to_rfc3339(), "2026-11-20T18:00:00+00:00");
    assert_eq!(event.id.len(), 24);
}

#[tokio::test]
async fn test_create_event_accepts_plain_date() {
    let (app, _) = app();
    let mut body = event_body("Dated");
    body["eventDate"] = json!("2026-12-01");

    let response = app.oneshot(json_request("POST", "/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let event: Value = json_body(response.into_body()).await;
    assert_eq!(event["eventDate"], "2026-12-01T00:00:00Z");
}

#[tokio::test]
async fn test_create_event_missing_field_returns_400() {
    let (app, repo) = app();

    for field in ["imgUrl", "title", "description", "eventDate", "organizer"] {
        let mut body = event_body("Incomplete");
        body.as_object_mut().unwrap().remove(field);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {}", field);

        let error: Value = json_body(response.into_body()).await;
        assert_eq!(error["message"], "All fields are required.");
        assert_eq!(error["error"], "VALIDATION_ERROR");
    }

    let page = repo
        .list_events(&EventPageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_events, 0);
}

#[tokio::test]
async fn test_create_event_malformed_json_returns_400() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_event_unparseable_date_returns_400() {
    let (app, repo) = app();
    let mut body = event_body("Someday");
    body["eventDate"] = json!("next tuesday");

    let response = app.oneshot(json_request("POST", "/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "JSON_EXTRACTION");

    let page = repo
        .list_events(&EventPageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_events, 0);
}

#[tokio::test]
async fn test_create_event_without_content_type_returns_400() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(event_body("Untyped").to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_events_single_event_page() {
    let (app, _) = app();
    let event = create(&app, "Only").await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: EventPage = json_body(response.into_body()).await;
    assert_eq!(page.events, vec![event]);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_events, 1);
}

#[tokio::test]
async fn test_list_events_paginates_with_camel_case_params() {
    let (app, _) = app();
    for title in ["E", "A", "C", "B", "D"] {
        create(&app, title).await;
    }

    let response = app
        .clone()
        .oneshot(get("/?sortField=title&sortOrder=desc&page=2&limit=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: Value = json_body(response.into_body()).await;
    assert_eq!(page["currentPage"], 2);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["totalEvents"], 5);
    let titles: Vec<&str> = page["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["C", "B"]);
}

#[tokio::test]
async fn test_list_events_page_past_end_is_empty() {
    let (app, _) = app();
    create(&app, "Alpha").await;

    let response = app.oneshot(get("/?page=5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: EventPage = json_body(response.into_body()).await;
    assert!(page.events.is_empty());
    assert_eq!(page.current_page, 5);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_list_events_rejects_unknown_sort_field() {
    let (app, _) = app();

    let response = app.oneshot(get("/?sortField=password")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_events_rejects_non_numeric_page() {
    let (app, _) = app();

    let response = app.oneshot(get("/?page=abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "INVALID_QUERY");
}

#[tokio::test]
async fn test_get_event_found_and_stable() {
    let (app, _) = app();
    let event = create(&app, "Stable").await;
    let uri = format!("/{}", event.id);

    let first: Event = json_body(app.clone().oneshot(get(&uri)).await.unwrap().into_body()).await;
    let second: Event = json_body(app.oneshot(get(&uri)).await.unwrap().into_body()).await;

    assert_eq!(first, event);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_event_malformed_id_returns_404() {
    let (app, _) = app();

    let response = app.oneshot(get("/not-an-object-id")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Event not found.");
}

#[tokio::test]
async fn test_update_event_applies_partial_fields() {
    let (app, _) = app();
    let event = create(&app, "Before").await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", event.id),
            json!({ "title": "After" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Event = json_body(response.into_body()).await;
    assert_eq!(updated.title, "After");
    assert_eq!(updated.description, event.description);
    assert_eq!(updated.created_at, event.created_at);
    assert!(updated.updated_at >= event.updated_at);
}

#[tokio::test]
async fn test_update_event_malformed_id_returns_400() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request("PATCH", "/xyz", json!({ "title": "x" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Invalid eventId format");
}

#[tokio::test]
async fn test_update_event_unknown_id_returns_404() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/507f1f77bcf86cd799439011",
            json!({ "title": "x" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_event_then_delete_again() {
    let (app, _) = app();
    let event = create(&app, "Doomed").await;
    let uri = format!("/{}", event.id);

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri(&uri)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({ "message": "Event deleted successfully", "eventId": event.id })
    );

    let response = app.oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_uppercase_id_addresses_the_same_event() {
    let (app, _) = app();
    let event = create(&app, "Shouting").await;
    let upper = event.id.to_uppercase();

    let response = app
        .clone()
        .oneshot(get(&format!("/{}", upper)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", upper),
            json!({ "title": "Quieter" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", upper))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["eventId"], upper);
}

#[tokio::test]
async fn test_delete_event_malformed_id_returns_400() {
    let (app, _) = app();

    let request = Request::builder()
        .method("DELETE")
        .uri("/xyz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn participant_body(name: &str, email: &str) -> Value {
    json!({
        "fullName": name,
        "email": email,
        "dob": "1990-01-01",
        "referral": "social media"
    })
}

#[tokio::test]
async fn test_register_participant_returns_201() {
    let (app, _) = app();
    let event = create(&app, "Party").await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/{}/register", event.id),
            participant_body("John Doe", "john@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let participant: Participant = json_body(response.into_body()).await;
    assert_eq!(participant.event_id, event.id);
    assert_eq!(participant.full_name, "John Doe");
    assert_eq!(participant.referral, "social media");
}

#[tokio::test]
async fn test_register_does_not_require_existing_event() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/507f1f77bcf86cd799439011/register",
            participant_body("Jane Roe", "jane@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_unparseable_dob_returns_400() {
    let (app, _) = app();
    let mut body = participant_body("John Doe", "john@example.com");
    body["dob"] = json!("not-a-date");

    let response = app
        .oneshot(json_request(
            "POST",
            "/507f1f77bcf86cd799439011/register",
            body,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_register_validation_messages() {
    let (app, _) = app();
    let uri = "/507f1f77bcf86cd799439011/register";

    let cases = [
        (
            json!({ "fullName": "John Doe", "email": "john@example.com", "referral": "x" }),
            "Full name, email, and date of birth are required.",
        ),
        (
            participant_body("John Doe", "invalid-email"),
            "Invalid email format.",
        ),
        (
            json!({
                "fullName": "John Doe",
                "email": "john@example.com",
                "dob": "2999-01-01",
                "referral": "x"
            }),
            "Date of birth cannot be in the future.",
        ),
    ];

    for (body, message) in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", uri, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: Value = json_body(response.into_body()).await;
        assert_eq!(error["message"], message);
    }
}

#[tokio::test]
async fn test_register_malformed_event_id_returns_400() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/xyz/register",
            participant_body("John Doe", "john@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["message"], "Invalid eventId format");
}

#[tokio::test]
async fn test_register_missing_referral_returns_500() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/507f1f77bcf86cd799439011/register",
            json!({ "fullName": "John Doe", "email": "john@example.com", "dob": "1990-01-01" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_list_participants_with_search() {
    let (app, _) = app();
    let event = create(&app, "Conference").await;
    let register_uri = format!("/{}/register", event.id);

    for (name, email) in [
        ("John Doe", "john@example.com"),
        ("Jane Roe", "jane@sample.org"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", &register_uri, participant_body(name, email)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let all: Vec<Participant> = json_body(
        app.clone()
            .oneshot(get(&format!("/{}/participants", event.id)))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(all.len(), 2);

    let filtered: Vec<Participant> = json_body(
        app.oneshot(get(&format!("/{}/participants?search=SAMPLE", event.id)))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].full_name, "Jane Roe");
}

#[tokio::test]
async fn test_list_participants_malformed_id_returns_400() {
    let (app, _) = app();

    let response = app.oneshot(get("/xyz/participants")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
