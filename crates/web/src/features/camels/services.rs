use sqlx::PgPool;
use storage::{
    dto::camel::{CamelFilter, CreateCamelRequest, UpdateCamelRequest},
    error::Result,
    models::Camel,
    repository::camel::CamelRepository,
};

/// List camels matching the filter, with the total match count
pub async fn list_camels(pool: &PgPool, filter: &CamelFilter) -> Result<(Vec<Camel>, i64)> {
    let repo = CamelRepository::new(pool);
    repo.list(filter).await
}

/// Get camel by ID
pub async fn get_camel(pool: &PgPool, id: i64) -> Result<Camel> {
    let repo = CamelRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new camel
pub async fn create_camel(pool: &PgPool, request: &CreateCamelRequest) -> Result<Camel> {
    let repo = CamelRepository::new(pool);
    repo.create(request).await
}

/// Update a camel
pub async fn update_camel(pool: &PgPool, id: i64, request: &UpdateCamelRequest) -> Result<Camel> {
    let repo = CamelRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    let updated = repo.update(existing.camel_id, &existing, request).await?;

    if updated.age_class != existing.age_class || updated.sex != existing.sex {
        tracing::info!(
            camel_id = updated.camel_id,
            age_class = ?updated.age_class,
            sex = ?updated.sex,
            "camel class changed; existing registrations are kept"
        );
    }

    Ok(updated)
}

/// Delete a camel
pub async fn delete_camel(pool: &PgPool, id: i64) -> Result<()> {
    let repo = CamelRepository::new(pool);
    repo.delete(id).await
}
