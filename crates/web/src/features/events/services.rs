use sqlx::PgPool;
use storage::{
    dto::event::{CreateEventRequest, UpdateEventRequest},
    error::Result,
    models::Event,
    repository::event::EventRepository,
};
use uuid::Uuid;

use crate::error::WebError;

/// List all events
pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>> {
    let repo = EventRepository::new(pool);
    repo.list().await
}

/// Get event by ID
pub async fn get_event(pool: &PgPool, id: Uuid) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new event
pub async fn create_event(pool: &PgPool, request: &CreateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.create(request).await
}

/// Update an event; the resulting date range is checked before writing.
pub async fn update_event(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateEventRequest,
) -> std::result::Result<Event, WebError> {
    let repo = EventRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    request
        .validate_dates_against(&existing)
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    Ok(repo.update(existing.event_id, &existing, request).await?)
}

/// Delete an event
pub async fn delete_event(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = EventRepository::new(pool);
    repo.delete(id).await
}
