use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::registration::RegistrationEntry;
use crate::error::Result;

pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Camels registered in a loop, in registration order
    pub async fn list_for_loop(&self, loop_id: Uuid) -> Result<Vec<RegistrationEntry>> {
        let entries = sqlx::query_as::<_, RegistrationEntry>(
            r#"
            SELECT
                r.registration_id,
                c.camel_id,
                c.chip_id,
                c.name as camel_name,
                c.age_class,
                c.sex,
                o.owner_id,
                o.name as owner_name,
                r.registered_at
            FROM registrations r
            JOIN camels c ON r.camel_id = c.camel_id
            JOIN owners o ON c.owner_id = o.owner_id
            WHERE r.loop_id = $1
            ORDER BY r.registered_at, c.camel_id
            "#,
        )
        .bind(loop_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}
