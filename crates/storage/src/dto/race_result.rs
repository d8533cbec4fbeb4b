use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One finishing position as submitted by the race office
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PublishedResult {
    #[serde(alias = "camelId")]
    pub camel_id: i64,

    pub rank: i32,

    #[serde(alias = "prizeAmount")]
    #[validate(custom(function = "validate_prize"))]
    pub prize_amount: Option<Decimal>,
}

/// Full result list for one loop; replaces whatever was published before.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PublishResultsRequest {
    #[validate(nested)]
    pub results: Vec<PublishedResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRankRequest {
    #[serde(alias = "camelId")]
    pub camel_id: i64,
    #[serde(alias = "newRank")]
    pub new_rank: i32,
}

/// A race result joined with camel and owner names, as listed per loop
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResultEntry {
    pub result_id: Uuid,
    pub rank: i32,
    pub camel_id: i64,
    pub chip_id: String,
    pub camel_name: String,
    pub owner_id: i64,
    pub owner_name: String,
    pub prize_amount: Option<Decimal>,
    pub bank_name: Option<String>,
    pub iban: Option<String>,
    pub account_holder: Option<String>,
    pub published_at: DateTime<Utc>,
}

fn validate_prize(amount: &Decimal) -> Result<(), validator::ValidationError> {
    if amount.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_prize"));
    }
    Ok(())
}
