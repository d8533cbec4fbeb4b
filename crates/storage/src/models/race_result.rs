use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RaceResult {
    pub result_id: Uuid,
    pub event_id: Uuid,
    pub loop_id: Uuid,
    pub camel_id: i64,
    pub owner_id: i64,
    pub rank: i32,
    pub prize_amount: Option<Decimal>,
    pub bank_name: Option<String>,
    pub iban: Option<String>,
    pub account_holder: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// Results are ranked independently per (event, loop) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultScope {
    pub event_id: Uuid,
    pub loop_id: Uuid,
}

impl ResultScope {
    pub fn new(event_id: Uuid, loop_id: Uuid) -> Self {
        Self { event_id, loop_id }
    }
}
