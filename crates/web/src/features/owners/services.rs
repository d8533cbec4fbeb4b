use sqlx::PgPool;
use storage::{
    dto::owner::{CreateOwnerRequest, UpdateOwnerRequest},
    error::Result,
    models::Owner,
    repository::owner::OwnerRepository,
};

/// List all owners
pub async fn list_owners(pool: &PgPool) -> Result<Vec<Owner>> {
    let repo = OwnerRepository::new(pool);
    repo.list().await
}

/// Get owner by ID
pub async fn get_owner(pool: &PgPool, id: i64) -> Result<Owner> {
    let repo = OwnerRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new owner
pub async fn create_owner(pool: &PgPool, request: &CreateOwnerRequest) -> Result<Owner> {
    let repo = OwnerRepository::new(pool);
    repo.create(request).await
}

/// Update an owner
pub async fn update_owner(pool: &PgPool, id: i64, request: &UpdateOwnerRequest) -> Result<Owner> {
    let repo = OwnerRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(existing.owner_id, &existing, request).await
}

/// Delete an owner
pub async fn delete_owner(pool: &PgPool, id: i64) -> Result<()> {
    let repo = OwnerRepository::new(pool);
    repo.delete(id).await
}
