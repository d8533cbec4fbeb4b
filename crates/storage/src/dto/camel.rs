use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{PaginationParams, default_page, default_page_size};
use crate::models::{AgeClass, Sex};

/// Request payload for registering a camel in the system
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCamelRequest {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Chip id must be between 1 and 64 characters"
    ))]
    pub chip_id: String,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub age_class: AgeClass,

    pub sex: Sex,

    #[validate(range(min = 1, message = "Owner id must be positive"))]
    pub owner_id: i64,
}

/// Admin edit of a camel. Age class and sex only ever change through here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCamelRequest {
    #[validate(length(min = 1, max = 64))]
    pub chip_id: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub age_class: Option<AgeClass>,

    pub sex: Option<Sex>,

    #[validate(range(min = 1))]
    pub owner_id: Option<i64>,

    pub is_disabled: Option<bool>,
}

// Flattening pagination here would break numeric parsing of query strings.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CamelFilter {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub owner_id: Option<i64>,
    pub age_class: Option<AgeClass>,
    pub sex: Option<Sex>,
    #[serde(default)]
    pub include_disabled: bool,
}

impl CamelFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()
    }
}
