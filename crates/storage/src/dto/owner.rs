use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a new camel owner
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOwnerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub bank_name: Option<String>,

    #[validate(custom(function = "validate_iban"))]
    pub iban: Option<String>,

    #[validate(length(max = 255))]
    pub account_holder: Option<String>,
}

/// Request payload for updating an existing owner
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOwnerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub bank_name: Option<String>,

    #[validate(custom(function = "validate_iban"))]
    pub iban: Option<String>,

    #[validate(length(max = 255))]
    pub account_holder: Option<String>,
}

// Shape check only; checksum verification is left to the bank.
fn validate_iban(iban: &str) -> Result<(), validator::ValidationError> {
    let compact: String = iban.chars().filter(|c| !c.is_whitespace()).collect();

    let well_formed = (15..=34).contains(&compact.len())
        && compact.chars().all(|c| c.is_ascii_alphanumeric())
        && compact.chars().take(2).all(|c| c.is_ascii_alphabetic());

    if well_formed {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_iban"))
    }
}
