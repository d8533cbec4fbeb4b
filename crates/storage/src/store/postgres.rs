use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{NewRaceResult, NewRegistration, RaceStore, RaceTx, RankRange};
use crate::error::{Result, StorageError};
use crate::models::{Camel, Owner, RaceLoop, RaceResult, Registration, ResultScope};

const CAMEL_COLUMNS: &str =
    "camel_id, chip_id, name, age_class, sex, owner_id, is_disabled, created_at";

const LOOP_COLUMNS: &str = "loop_id, event_id, age_class, sex, sequence_number, capacity, \
     registration_closes_at, rank, created_at";

const RESULT_COLUMNS: &str = "result_id, event_id, loop_id, camel_id, owner_id, rank, \
     prize_amount, bank_name, iban, account_holder, published_at";

pub struct PgRaceStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgRaceStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RaceStore for PgRaceStore<'_> {
    type Tx = PgRaceTx;

    async fn begin(&self) -> Result<PgRaceTx> {
        let tx = self.pool.begin().await?;
        Ok(PgRaceTx { tx })
    }
}

/// A Postgres transaction; rolled back on drop unless committed.
pub struct PgRaceTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RaceTx for PgRaceTx {
    async fn find_camel(&mut self, camel_id: i64) -> Result<Option<Camel>> {
        let camel = sqlx::query_as::<_, Camel>(&format!(
            "SELECT {CAMEL_COLUMNS} FROM camels WHERE camel_id = $1"
        ))
        .bind(camel_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(camel)
    }

    async fn find_owner(&mut self, owner_id: i64) -> Result<Option<Owner>> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            SELECT owner_id, name, phone, bank_name, iban, account_holder, created_at
            FROM owners
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(owner)
    }

    async fn lock_loop(&mut self, loop_id: Uuid) -> Result<Option<RaceLoop>> {
        // Row lock serialises concurrent capacity checks on the same loop.
        let race_loop = sqlx::query_as::<_, RaceLoop>(&format!(
            "SELECT {LOOP_COLUMNS} FROM loops WHERE loop_id = $1 FOR UPDATE"
        ))
        .bind(loop_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(race_loop)
    }

    async fn event_loop_ids(&mut self, event_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT loop_id FROM loops WHERE event_id = $1 ORDER BY sequence_number",
        )
        .bind(event_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(ids)
    }

    async fn count_registrations(&mut self, loop_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM registrations WHERE loop_id = $1",
        )
        .bind(loop_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }

    async fn camel_registrations(
        &mut self,
        camel_id: i64,
        loop_ids: &[Uuid],
    ) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            r#"
            SELECT registration_id, camel_id, loop_id, event_id, registered_at
            FROM registrations
            WHERE camel_id = $1 AND loop_id = ANY($2)
            "#,
        )
        .bind(camel_id)
        .bind(loop_ids)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(registrations)
    }

    async fn delete_registrations(&mut self, camel_id: i64, loop_ids: &[Uuid]) -> Result<u64> {
        if loop_ids.is_empty() {
            return Ok(0);
        }

        let result =
            sqlx::query("DELETE FROM registrations WHERE camel_id = $1 AND loop_id = ANY($2)")
                .bind(camel_id)
                .bind(loop_ids)
                .execute(&mut *self.tx)
                .await?;

        Ok(result.rows_affected())
    }

    async fn insert_registration(
        &mut self,
        registration: &NewRegistration,
    ) -> Result<Registration> {
        let created = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (registration_id, camel_id, loop_id, event_id, registered_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING registration_id, camel_id, loop_id, event_id, registered_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(registration.camel_id)
        .bind(registration.loop_id)
        .bind(registration.event_id)
        .bind(registration.registered_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            e.with_constraint_message(
                "Camel already holds a registration in this event",
                "Camel or loop no longer exists",
            )
        })?;

        Ok(created)
    }

    async fn list_results(&mut self, scope: ResultScope) -> Result<Vec<RaceResult>> {
        let results = sqlx::query_as::<_, RaceResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM race_results \
             WHERE event_id = $1 AND loop_id = $2 ORDER BY rank"
        ))
        .bind(scope.event_id)
        .bind(scope.loop_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(results)
    }

    async fn find_result(
        &mut self,
        scope: ResultScope,
        camel_id: i64,
    ) -> Result<Option<RaceResult>> {
        let result = sqlx::query_as::<_, RaceResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM race_results \
             WHERE event_id = $1 AND loop_id = $2 AND camel_id = $3 FOR UPDATE"
        ))
        .bind(scope.event_id)
        .bind(scope.loop_id)
        .bind(camel_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(result)
    }

    async fn clear_results(&mut self, scope: ResultScope) -> Result<u64> {
        let result = sqlx::query("DELETE FROM race_results WHERE event_id = $1 AND loop_id = $2")
            .bind(scope.event_id)
            .bind(scope.loop_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_result(
        &mut self,
        scope: ResultScope,
        result: &NewRaceResult,
    ) -> Result<RaceResult> {
        let created = sqlx::query_as::<_, RaceResult>(&format!(
            r#"
            INSERT INTO race_results (result_id, event_id, loop_id, camel_id, owner_id, rank,
                                      prize_amount, bank_name, iban, account_holder, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {RESULT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(scope.event_id)
        .bind(scope.loop_id)
        .bind(result.camel_id)
        .bind(result.owner_id)
        .bind(result.rank)
        .bind(result.prize_amount)
        .bind(&result.bank.bank_name)
        .bind(&result.bank.iban)
        .bind(&result.bank.account_holder)
        .bind(result.published_at)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(created)
    }

    async fn delete_result(&mut self, result_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM race_results WHERE result_id = $1")
            .bind(result_id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn shift_ranks(
        &mut self,
        scope: ResultScope,
        range: RankRange,
        delta: i32,
    ) -> Result<u64> {
        // The rank unique constraint is deferred, so the transient overlaps of
        // a range shift are fine until commit.
        let result = sqlx::query(
            r#"
            UPDATE race_results
            SET rank = rank + $1
            WHERE event_id = $2
              AND loop_id = $3
              AND rank >= $4
              AND ($5::INTEGER IS NULL OR rank <= $5)
            "#,
        )
        .bind(delta)
        .bind(scope.event_id)
        .bind(scope.loop_id)
        .bind(range.first)
        .bind(range.last)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn set_rank(&mut self, result_id: Uuid, rank: i32) -> Result<RaceResult> {
        let updated = sqlx::query_as::<_, RaceResult>(&format!(
            "UPDATE race_results SET rank = $2 WHERE result_id = $1 RETURNING {RESULT_COLUMNS}"
        ))
        .bind(result_id)
        .bind(rank)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(updated)
    }

    async fn commit(self) -> Result<()> {
        self.tx
            .commit()
            .await
            .map_err(StorageError::from)
            .map_err(|e| {
                e.with_constraint_message(
                    "Concurrent change left duplicate ranks in this loop",
                    "Referenced record no longer exists",
                )
            })
    }
}
