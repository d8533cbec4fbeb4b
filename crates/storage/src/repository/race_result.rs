use sqlx::PgPool;

use crate::dto::race_result::ResultEntry;
use crate::error::Result;
use crate::models::ResultScope;

pub struct RaceResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RaceResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Published results of a loop in finishing order
    pub async fn list_for_scope(&self, scope: ResultScope) -> Result<Vec<ResultEntry>> {
        let entries = sqlx::query_as::<_, ResultEntry>(
            r#"
            SELECT
                rr.result_id,
                rr.rank,
                c.camel_id,
                c.chip_id,
                c.name as camel_name,
                o.owner_id,
                o.name as owner_name,
                rr.prize_amount,
                rr.bank_name,
                rr.iban,
                rr.account_holder,
                rr.published_at
            FROM race_results rr
            JOIN camels c ON rr.camel_id = c.camel_id
            JOIN owners o ON rr.owner_id = o.owner_id
            WHERE rr.event_id = $1 AND rr.loop_id = $2
            ORDER BY rr.rank
            "#,
        )
        .bind(scope.event_id)
        .bind(scope.loop_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}
