use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::race_result::{PublishedResult, ResultEntry},
    error::{Entity, RaceError, ServiceResult},
    models::{Principal, RaceResult, ResultScope},
    repository::{race_loop::LoopRepository, race_result::RaceResultRepository},
    services::ranking,
    store::PgRaceStore,
};

/// List a loop's published results in finishing order
pub async fn list_results(pool: &PgPool, scope: ResultScope) -> ServiceResult<Vec<ResultEntry>> {
    let race_loop = LoopRepository::new(pool).find_by_id(scope.loop_id).await?;
    if race_loop.event_id != scope.event_id {
        return Err(RaceError::NotFound(Entity::Loop));
    }

    let repo = RaceResultRepository::new(pool);
    Ok(repo.list_for_scope(scope).await?)
}

pub async fn publish(
    pool: &PgPool,
    actor: &Principal,
    scope: ResultScope,
    results: &[PublishedResult],
) -> ServiceResult<Vec<RaceResult>> {
    let store = PgRaceStore::new(pool);
    ranking::publish(&store, actor, scope, results, Utc::now()).await
}

pub async fn update_rank(
    pool: &PgPool,
    actor: &Principal,
    scope: ResultScope,
    camel_id: i64,
    new_rank: i32,
) -> ServiceResult<RaceResult> {
    let store = PgRaceStore::new(pool);
    ranking::update_rank(&store, actor, scope, camel_id, new_rank).await
}

pub async fn delete_result(
    pool: &PgPool,
    actor: &Principal,
    scope: ResultScope,
    camel_id: i64,
) -> ServiceResult<()> {
    let store = PgRaceStore::new(pool);
    ranking::delete_result(&store, actor, scope, camel_id).await
}
