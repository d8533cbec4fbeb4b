use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Racing age class of a camel. Loops are opened for exactly one class.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "age_class", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AgeClass {
    GradeOne,
    GradeTwo,
    GradeThree,
    GradeFour,
    GradeFive,
    GradeSix,
    GradeSeven,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "camel_sex", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Camel {
    pub camel_id: i64,
    pub chip_id: String,
    pub name: String,
    pub age_class: AgeClass,
    pub sex: Sex,
    pub owner_id: i64,
    pub is_disabled: bool,
    pub created_at: DateTime<Utc>,
}
