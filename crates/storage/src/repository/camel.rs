use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::camel::{CamelFilter, CreateCamelRequest, UpdateCamelRequest};
use crate::error::{Result, StorageError};
use crate::models::Camel;

const CAMEL_COLUMNS: &str =
    "camel_id, chip_id, name, age_class, sex, owner_id, is_disabled, created_at";

const CHIP_TAKEN: &str = "Chip id is already registered to another camel";
const UNKNOWN_OWNER: &str = "Owner does not exist";

pub struct CamelRepository<'a> {
    pool: &'a PgPool,
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &CamelFilter) {
    if let Some(owner_id) = filter.owner_id {
        query.push(" AND owner_id = ");
        query.push_bind(owner_id);
    }

    if let Some(age_class) = filter.age_class {
        query.push(" AND age_class = ");
        query.push_bind(age_class);
    }

    if let Some(sex) = filter.sex {
        query.push(" AND sex = ");
        query.push_bind(sex);
    }

    if !filter.include_disabled {
        query.push(" AND NOT is_disabled");
    }
}

impl<'a> CamelRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List camels matching the filter, with the total match count
    pub async fn list(&self, filter: &CamelFilter) -> Result<(Vec<Camel>, i64)> {
        let pagination = filter.pagination();

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM camels WHERE 1=1");
        push_filters(&mut count_query, filter);
        let total_items = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!("SELECT {CAMEL_COLUMNS} FROM camels WHERE 1=1"));
        push_filters(&mut query, filter);
        query.push(" ORDER BY name, camel_id LIMIT ");
        query.push_bind(i64::from(pagination.limit()));
        query.push(" OFFSET ");
        query.push_bind(i64::from(pagination.offset()));

        let camels = query
            .build_query_as::<Camel>()
            .fetch_all(self.pool)
            .await?;

        Ok((camels, total_items))
    }

    /// Find camel by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Camel> {
        let camel = sqlx::query_as::<_, Camel>(&format!(
            "SELECT {CAMEL_COLUMNS} FROM camels WHERE camel_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(camel)
    }

    /// Create a new camel
    pub async fn create(&self, req: &CreateCamelRequest) -> Result<Camel> {
        let camel = sqlx::query_as::<_, Camel>(&format!(
            r#"
            INSERT INTO camels (chip_id, name, age_class, sex, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CAMEL_COLUMNS}
            "#
        ))
        .bind(req.chip_id.trim())
        .bind(&req.name)
        .bind(req.age_class)
        .bind(req.sex)
        .bind(req.owner_id)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| e.with_constraint_message(CHIP_TAKEN, UNKNOWN_OWNER))?;

        Ok(camel)
    }

    /// Update an existing camel
    pub async fn update(
        &self,
        id: i64,
        existing: &Camel,
        req: &UpdateCamelRequest,
    ) -> Result<Camel> {
        let chip_id = req
            .chip_id
            .as_deref()
            .map(str::trim)
            .unwrap_or(&existing.chip_id);
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let age_class = req.age_class.unwrap_or(existing.age_class);
        let sex = req.sex.unwrap_or(existing.sex);
        let owner_id = req.owner_id.unwrap_or(existing.owner_id);
        let is_disabled = req.is_disabled.unwrap_or(existing.is_disabled);

        let camel = sqlx::query_as::<_, Camel>(&format!(
            r#"
            UPDATE camels
            SET chip_id = $2,
                name = $3,
                age_class = $4,
                sex = $5,
                owner_id = $6,
                is_disabled = $7
            WHERE camel_id = $1
            RETURNING {CAMEL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(chip_id)
        .bind(name)
        .bind(age_class)
        .bind(sex)
        .bind(owner_id)
        .bind(is_disabled)
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| e.with_constraint_message(CHIP_TAKEN, UNKNOWN_OWNER))?
        .ok_or(StorageError::NotFound)?;

        Ok(camel)
    }

    /// Delete a camel by ID
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM camels WHERE camel_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(StorageError::from)
            .map_err(|e| {
                e.with_constraint_message(
                    "Camel cannot be deleted",
                    "Camel has published race results",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
