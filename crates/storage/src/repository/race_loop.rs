use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::race_loop::{CreateLoopRequest, UpdateLoopRequest};
use crate::error::{Result, StorageError};
use crate::models::RaceLoop;

const LOOP_COLUMNS: &str = "loop_id, event_id, age_class, sex, sequence_number, capacity, \
     registration_closes_at, rank, created_at";

const SEQUENCE_TAKEN: &str = "Another loop of this event already uses this sequence number";

pub struct LoopRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LoopRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the loops of an event in display order
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<RaceLoop>> {
        let loops = sqlx::query_as::<_, RaceLoop>(&format!(
            "SELECT {LOOP_COLUMNS} FROM loops WHERE event_id = $1 \
             ORDER BY rank, sequence_number"
        ))
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(loops)
    }

    /// Find loop by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<RaceLoop> {
        let race_loop = sqlx::query_as::<_, RaceLoop>(&format!(
            "SELECT {LOOP_COLUMNS} FROM loops WHERE loop_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(race_loop)
    }

    /// Number of camels currently registered in a loop
    pub async fn count_registrations(&self, id: Uuid) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registrations WHERE loop_id = $1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Open a new loop in an event
    pub async fn create(&self, event_id: Uuid, req: &CreateLoopRequest) -> Result<RaceLoop> {
        let race_loop = sqlx::query_as::<_, RaceLoop>(&format!(
            r#"
            INSERT INTO loops (loop_id, event_id, age_class, sex, sequence_number, capacity,
                               registration_closes_at, rank)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {LOOP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(req.age_class)
        .bind(req.sex)
        .bind(req.sequence_number)
        .bind(req.capacity)
        .bind(req.registration_closes_at)
        .bind(req.rank.unwrap_or(req.sequence_number))
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| e.with_constraint_message(SEQUENCE_TAKEN, "Event does not exist"))?;

        Ok(race_loop)
    }

    /// Update an existing loop. The parent event never changes.
    pub async fn update(
        &self,
        id: Uuid,
        existing: &RaceLoop,
        req: &UpdateLoopRequest,
    ) -> Result<RaceLoop> {
        let age_class = req.age_class.unwrap_or(existing.age_class);
        let sex = req.sex.unwrap_or(existing.sex);
        let sequence_number = req.sequence_number.unwrap_or(existing.sequence_number);
        let capacity = req.capacity.unwrap_or(existing.capacity);
        let registration_closes_at = req
            .registration_closes_at
            .unwrap_or(existing.registration_closes_at);
        let rank = req.rank.unwrap_or(existing.rank);

        let race_loop = sqlx::query_as::<_, RaceLoop>(&format!(
            r#"
            UPDATE loops
            SET age_class = $2,
                sex = $3,
                sequence_number = $4,
                capacity = $5,
                registration_closes_at = $6,
                rank = $7
            WHERE loop_id = $1
            RETURNING {LOOP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(age_class)
        .bind(sex)
        .bind(sequence_number)
        .bind(capacity)
        .bind(registration_closes_at)
        .bind(rank)
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| e.with_constraint_message(SEQUENCE_TAKEN, "Event does not exist"))?
        .ok_or(StorageError::NotFound)?;

        Ok(race_loop)
    }

    /// Delete a loop with its registrations and results
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM loops WHERE loop_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
