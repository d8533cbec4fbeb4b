use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a race event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,
}

impl CreateEventRequest {
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        check_dates(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,
}

impl UpdateEventRequest {
    /// Checks the dates the event would have after applying this update.
    pub fn validate_dates_against(
        &self,
        existing: &crate::models::Event,
    ) -> Result<(), &'static str> {
        check_dates(
            self.start_date.unwrap_or(existing.start_date),
            self.end_date.unwrap_or(existing.end_date),
        )
    }
}

fn check_dates(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if end < start {
        return Err("End date must be on or after start date");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let req = CreateEventRequest {
            name: "Al Marmoom".to_string(),
            location: None,
            start_date: date(2025, 3, 10),
            end_date: date(2025, 3, 9),
        };
        assert!(req.validate_dates().is_err());
    }

    #[test]
    fn test_single_day_event_is_valid() {
        let req = CreateEventRequest {
            name: "Al Wathba".to_string(),
            location: Some("Abu Dhabi".to_string()),
            start_date: date(2025, 3, 10),
            end_date: date(2025, 3, 10),
        };
        assert!(req.validate().is_ok());
        assert!(req.validate_dates().is_ok());
    }
}
