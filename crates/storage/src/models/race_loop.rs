use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{AgeClass, Sex};

/// A single race heat within an event, open to one age class and sex.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RaceLoop {
    pub loop_id: Uuid,
    pub event_id: Uuid,
    pub age_class: AgeClass,
    pub sex: Sex,
    pub sequence_number: i32,
    pub capacity: i32,
    pub registration_closes_at: DateTime<Utc>,
    pub rank: i32,
    pub created_at: DateTime<Utc>,
}

impl RaceLoop {
    pub fn is_registration_closed(&self, now: DateTime<Utc>) -> bool {
        now > self.registration_closes_at
    }
}
