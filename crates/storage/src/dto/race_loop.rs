use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{AgeClass, RaceLoop, Sex};

/// Request payload for opening a loop within an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLoopRequest {
    pub age_class: AgeClass,

    pub sex: Sex,

    #[validate(range(min = 1, message = "Sequence number must be positive"))]
    pub sequence_number: i32,

    #[validate(range(min = 0, max = 1000, message = "Capacity must be between 0 and 1000"))]
    pub capacity: i32,

    pub registration_closes_at: DateTime<Utc>,

    /// Display position among the event's loops; defaults to the sequence number.
    #[validate(range(min = 0))]
    pub rank: Option<i32>,
}

/// Request payload for updating a loop. The parent event cannot change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLoopRequest {
    pub age_class: Option<AgeClass>,

    pub sex: Option<Sex>,

    #[validate(range(min = 1))]
    pub sequence_number: Option<i32>,

    #[validate(range(min = 0, max = 1000))]
    pub capacity: Option<i32>,

    pub registration_closes_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0))]
    pub rank: Option<i32>,
}

/// Loop with its current occupancy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoopDetailResponse {
    #[serde(flatten)]
    pub race_loop: RaceLoop,
    pub registered_count: i64,
    pub remaining_capacity: i64,
    pub registration_open: bool,
}

impl LoopDetailResponse {
    pub fn new(race_loop: RaceLoop, registered_count: i64, now: DateTime<Utc>) -> Self {
        let remaining_capacity = (i64::from(race_loop.capacity) - registered_count).max(0);
        let registration_open = !race_loop.is_registration_closed(now);

        Self {
            race_loop,
            registered_count,
            remaining_capacity,
            registration_open,
        }
    }
}
