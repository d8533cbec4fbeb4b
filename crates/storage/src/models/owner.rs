use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Owner {
    pub owner_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub bank_name: Option<String>,
    pub iban: Option<String>,
    pub account_holder: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payout details copied onto a race result when it is published, so later
/// edits to the owner do not rewrite past payouts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BankDetails {
    pub bank_name: Option<String>,
    pub iban: Option<String>,
    pub account_holder: Option<String>,
}

impl Owner {
    pub fn bank_details(&self) -> BankDetails {
        BankDetails {
            bank_name: self.bank_name.clone(),
            iban: self.iban.clone(),
            account_holder: self.account_holder.clone(),
        }
    }
}
