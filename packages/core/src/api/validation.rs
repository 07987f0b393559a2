//! Query parameter validation for the charging endpoint.
//!
//! Failures are reported as a flattened schema error:
//! `{"formErrors": [], "fieldErrors": {"hours": ["..."]}}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::energy::ChargingDuration;

pub const REQUIRED_MESSAGE: &str = "Required";
pub const HOURS_RANGE_MESSAGE: &str = "Hours must be a number between 1 and 6";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors
            .field_errors
            .insert(field.to_string(), vec![message.to_string()]);
        errors
    }
}

/// First value of `name` in the query string. Later repeats are ignored.
pub fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Parse the `hours` parameter into a [`ChargingDuration`].
pub fn parse_hours(raw: Option<&str>) -> Result<ChargingDuration, ValidationErrors> {
    let raw = raw.ok_or_else(|| ValidationErrors::field("hours", REQUIRED_MESSAGE))?;

    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(ChargingDuration::new)
        .ok_or_else(|| ValidationErrors::field("hours", HOURS_RANGE_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_hour_in_range() {
        for hours in 1..=6u8 {
            let parsed = parse_hours(Some(&hours.to_string())).unwrap();
            assert_eq!(parsed.hours(), hours);
        }
    }

    #[test]
    fn missing_hours_is_required() {
        let err = parse_hours(None).unwrap_err();
        assert_eq!(err.field_errors["hours"], vec![REQUIRED_MESSAGE.to_string()]);
        assert!(err.form_errors.is_empty());
    }

    #[test]
    fn rejects_out_of_range_and_non_numeric() {
        for raw in ["0", "7", "-1", "300", "abc", "", "2.5"] {
            let err = parse_hours(Some(raw)).unwrap_err();
            assert_eq!(
                err.field_errors["hours"],
                vec![HOURS_RANGE_MESSAGE.to_string()],
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn first_param_takes_earliest_repeat() {
        let params = vec![
            ("other".to_string(), "x".to_string()),
            ("hours".to_string(), "1".to_string()),
            ("hours".to_string(), "2".to_string()),
        ];
        assert_eq!(first_param(&params, "hours"), Some("1"));
        assert_eq!(first_param(&params, "minutes"), None);
    }

    #[test]
    fn serialises_as_flattened_schema_error() {
        let json = serde_json::to_value(ValidationErrors::field("hours", REQUIRED_MESSAGE)).unwrap();
        assert_eq!(json["formErrors"], serde_json::json!([]));
        assert_eq!(json["fieldErrors"]["hours"][0], REQUIRED_MESSAGE);
    }
}
