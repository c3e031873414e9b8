//! HTTP handlers for the events API

use crate::models::{CreatedEvent, Event, EventFields, ListQuery, Pagination};
use crate::repository::EventRepository;
use crate::service::EventService;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::AppError;
use std::sync::Arc;
use utoipa::OpenApi;

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, get_event, update_event, delete_event),
    components(schemas(Event, CreatedEvent)),
    tags(
        (name = "events", description = "Schemaless event documents stored in MongoDB")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service: EventsState<R> = Arc::new(service);

    Router::new()
        .route("/", get(list_events::<R>).post(create_event::<R>))
        .route(
            "/{id}",
            get(get_event::<R>)
                .put(update_event::<R>)
                .delete(delete_event::<R>),
        )
        .with_state(shared_service)
}

/// List events, most recent `schedule` first
#[utoipa::path(
    get,
    path = "",
    tag = "events",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of events", body = Vec<Event>),
        (status = 500, description = "Internal Server Error", body = String, content_type = "text/plain")
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<EventsState<R>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Event>>, AppError> {
    let query = ListQuery::from_pairs(params);
    let events = service.list(Pagination::from(query)).await?;
    Ok(Json(events))
}

/// Create an event from any JSON object
#[utoipa::path(
    post,
    path = "",
    tag = "events",
    request_body(content = Object, description = "Arbitrary event fields"),
    responses(
        (status = 201, description = "Event created", body = CreatedEvent),
        (status = 500, description = "Internal Server Error", body = String, content_type = "text/plain")
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    payload: Result<Json<EventFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(fields) = payload?;
    let event_id = service.create(fields).await?;
    Ok((StatusCode::CREATED, Json(CreatedEvent { event_id })))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal Server Error", body = String, content_type = "text/plain")
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let event = service.get(&id).await?;
    Ok(Json(event))
}

/// Merge fields into an event
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex ObjectId)")
    ),
    request_body(content = Object, description = "Fields to overwrite"),
    responses(
        (status = 204, description = "Event updated"),
        (status = 404, description = "Event not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal Server Error", body = String, content_type = "text/plain")
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<EventFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(fields) = payload?;
    service.update(&id, fields).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex ObjectId)")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal Server Error", body = String, content_type = "text/plain")
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
