use sqlx::PgPool;

use crate::dto::owner::{CreateOwnerRequest, UpdateOwnerRequest};
use crate::error::{Result, StorageError};
use crate::models::Owner;

const OWNER_COLUMNS: &str = "owner_id, name, phone, bank_name, iban, account_holder, created_at";

pub struct OwnerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OwnerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all owners
    pub async fn list(&self) -> Result<Vec<Owner>> {
        let owners = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {OWNER_COLUMNS} FROM owners ORDER BY name, owner_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(owners)
    }

    /// Find owner by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Owner> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {OWNER_COLUMNS} FROM owners WHERE owner_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(owner)
    }

    /// Create a new owner
    pub async fn create(&self, req: &CreateOwnerRequest) -> Result<Owner> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            r#"
            INSERT INTO owners (name, phone, bank_name, iban, account_holder)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {OWNER_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.bank_name)
        .bind(&req.iban)
        .bind(&req.account_holder)
        .fetch_one(self.pool)
        .await?;

        Ok(owner)
    }

    /// Update an existing owner
    pub async fn update(
        &self,
        id: i64,
        existing: &Owner,
        req: &UpdateOwnerRequest,
    ) -> Result<Owner> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let phone = req.phone.as_ref().or(existing.phone.as_ref());
        let bank_name = req.bank_name.as_ref().or(existing.bank_name.as_ref());
        let iban = req.iban.as_ref().or(existing.iban.as_ref());
        let account_holder = req
            .account_holder
            .as_ref()
            .or(existing.account_holder.as_ref());

        let owner = sqlx::query_as::<_, Owner>(&format!(
            r#"
            UPDATE owners
            SET name = $2,
                phone = $3,
                bank_name = $4,
                iban = $5,
                account_holder = $6
            WHERE owner_id = $1
            RETURNING {OWNER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(bank_name)
        .bind(iban)
        .bind(account_holder)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(owner)
    }

    /// Delete an owner by ID
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM owners WHERE owner_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(StorageError::from)
            .map_err(|e| {
                e.with_constraint_message(
                    "Owner cannot be deleted",
                    "Owner still has camels or published results",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
