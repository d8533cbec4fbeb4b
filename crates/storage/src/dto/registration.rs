use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{AgeClass, Sex};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(alias = "camelId")]
    pub camel_id: i64,
    #[serde(alias = "loopId")]
    pub loop_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransferRequest {
    #[serde(alias = "camelId")]
    pub camel_id: i64,
    #[serde(alias = "newLoopId")]
    pub new_loop_id: Uuid,
}

/// Deregistration always succeeds once the loop is open; `removed` tells
/// whether there was anything to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeregisterResponse {
    pub removed: u64,
}

/// A loop entry joined with the camel it refers to
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RegistrationEntry {
    pub registration_id: Uuid,
    pub camel_id: i64,
    pub chip_id: String,
    pub camel_name: String,
    pub age_class: AgeClass,
    pub sex: Sex,
    pub owner_id: i64,
    pub owner_name: String,
    pub registered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_accept_camel_case_keys() {
        let loop_id = Uuid::new_v4();

        let register: RegisterRequest =
            serde_json::from_str(&format!(r#"{{"camelId": 4, "loopId": "{loop_id}"}}"#))
                .unwrap();
        assert_eq!(register.camel_id, 4);
        assert_eq!(register.loop_id, loop_id);

        let transfer: TransferRequest =
            serde_json::from_str(&format!(r#"{{"camel_id": 4, "newLoopId": "{loop_id}"}}"#))
                .unwrap();
        assert_eq!(transfer.new_loop_id, loop_id);
    }
}
