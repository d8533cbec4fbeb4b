use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub registration_id: Uuid,
    pub camel_id: i64,
    pub loop_id: Uuid,
    pub event_id: Uuid,
    pub registered_at: DateTime<Utc>,
}
