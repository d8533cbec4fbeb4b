use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::race_loop::{CreateLoopRequest, LoopDetailResponse, UpdateLoopRequest},
    error::Result,
    models::RaceLoop,
    repository::{event::EventRepository, race_loop::LoopRepository},
};
use uuid::Uuid;

/// List the loops of an event in display order
pub async fn list_event_loops(pool: &PgPool, event_id: Uuid) -> Result<Vec<RaceLoop>> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let repo = LoopRepository::new(pool);
    repo.list_for_event(event_id).await
}

/// Get a loop together with its current occupancy
pub async fn get_loop(pool: &PgPool, id: Uuid) -> Result<LoopDetailResponse> {
    let repo = LoopRepository::new(pool);

    let race_loop = repo.find_by_id(id).await?;
    let registered = repo.count_registrations(id).await?;

    Ok(LoopDetailResponse::new(race_loop, registered, Utc::now()))
}

/// Open a new loop under an existing event
pub async fn create_loop(
    pool: &PgPool,
    event_id: Uuid,
    request: &CreateLoopRequest,
) -> Result<RaceLoop> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let repo = LoopRepository::new(pool);
    let race_loop = repo.create(event_id, request).await?;

    tracing::info!(
        event_id = %event_id,
        loop_id = %race_loop.loop_id,
        age_class = ?race_loop.age_class,
        sex = ?race_loop.sex,
        capacity = race_loop.capacity,
        "Opened loop"
    );

    Ok(race_loop)
}

/// Update a loop
pub async fn update_loop(pool: &PgPool, id: Uuid, request: &UpdateLoopRequest) -> Result<RaceLoop> {
    let repo = LoopRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(existing.loop_id, &existing, request).await
}

/// Delete a loop
pub async fn delete_loop(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = LoopRepository::new(pool);
    repo.delete(id).await
}
