use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::registration::{DeregisterResponse, RegistrationEntry},
    error::{Result, ServiceResult},
    models::{Principal, Registration},
    repository::{race_loop::LoopRepository, registration::RegistrationRepository},
    services::registration,
    store::PgRaceStore,
};
use uuid::Uuid;

/// List the camels registered in a loop
pub async fn list_registrations(pool: &PgPool, loop_id: Uuid) -> Result<Vec<RegistrationEntry>> {
    LoopRepository::new(pool).find_by_id(loop_id).await?;

    let repo = RegistrationRepository::new(pool);
    repo.list_for_loop(loop_id).await
}

pub async fn register(
    pool: &PgPool,
    actor: &Principal,
    camel_id: i64,
    loop_id: Uuid,
) -> ServiceResult<Registration> {
    let store = PgRaceStore::new(pool);
    registration::register(&store, actor, camel_id, loop_id, Utc::now()).await
}

pub async fn deregister(
    pool: &PgPool,
    actor: &Principal,
    camel_id: i64,
    loop_id: Uuid,
) -> ServiceResult<DeregisterResponse> {
    let store = PgRaceStore::new(pool);
    let removed = registration::deregister(&store, actor, camel_id, loop_id, Utc::now()).await?;

    Ok(DeregisterResponse { removed })
}

pub async fn transfer(
    pool: &PgPool,
    actor: &Principal,
    camel_id: i64,
    new_loop_id: Uuid,
) -> ServiceResult<Registration> {
    let store = PgRaceStore::new(pool);
    registration::transfer(&store, actor, camel_id, new_loop_id, Utc::now()).await
}
