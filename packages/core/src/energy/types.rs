//! Core data types for generation mix analytics

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, ParseError, Timelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Length of a single upstream settlement period.
pub const INTERVAL_MINUTES: i64 = 30;

/// Minute-precision UTC format used by the upstream API.
pub const UPSTREAM_TIME_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// A point in time together with the text it was read from.
///
/// Equality, ordering and hashing use the instant only. Serialisation
/// writes the original text back unchanged.
#[derive(Debug, Clone)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    raw: String,
}

impl Timestamp {
    /// Accepts both `2024-01-01T00:30Z` and full RFC 3339.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let instant = match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => parsed.with_timezone(&Utc),
            Err(_) => NaiveDateTime::parse_from_str(raw, UPSTREAM_TIME_FORMAT)?.and_utc(),
        };

        Ok(Self {
            instant,
            raw: raw.to_string(),
        })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        let raw = if instant.second() == 0 && instant.nanosecond() == 0 {
            instant.format(UPSTREAM_TIME_FORMAT).to_string()
        } else {
            instant.to_rfc3339()
        };
        Self { instant, raw }
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}

/// Average share per fuel type, keyed by the upstream fuel identifier.
///
/// Upstream may introduce new fuel types at any time, so this stays an
/// open map rather than a fixed record.
pub type FuelMix = BTreeMap<String, f64>;

/// Share of one fuel type within a single interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelShare {
    pub fuel: String,
    pub perc: f64,
}

/// One half-hour generation sample as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub from: Timestamp,
    pub to: Timestamp,
    pub mix: Vec<FuelShare>,
}

impl IntervalRecord {
    /// UTC calendar date the interval starts on.
    pub fn date(&self) -> NaiveDate {
        self.from.instant().date_naive()
    }
}

/// Generation mix summary for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEnergyMix {
    pub date: NaiveDate,
    #[serde(rename = "cleanEnergyPerc")]
    pub clean_energy_percentage: f64,
    pub mix: FuelMix,
}

/// Best contiguous span for a flexible load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalChargingWindow {
    #[serde(rename = "startTime")]
    pub start_time: Timestamp,
    #[serde(rename = "endTime")]
    pub end_time: Timestamp,
    #[serde(rename = "cleanEnergyPerc")]
    pub clean_energy_percentage: f64,
}

/// Requested charging duration in whole hours, always within
/// [`ChargingDuration::MIN_HOURS`]..=[`ChargingDuration::MAX_HOURS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChargingDuration(u8);

impl ChargingDuration {
    pub const MIN_HOURS: u8 = 1;
    pub const MAX_HOURS: u8 = 6;

    pub fn new(hours: u8) -> Option<Self> {
        (Self::MIN_HOURS..=Self::MAX_HOURS)
            .contains(&hours)
            .then_some(Self(hours))
    }

    pub fn hours(self) -> u8 {
        self.0
    }

    /// Number of consecutive half-hour intervals the window covers.
    pub fn interval_count(self) -> usize {
        usize::from(self.0) * 2
    }

    pub fn as_duration(self) -> Duration {
        Duration::minutes(INTERVAL_MINUTES * self.interval_count() as i64)
    }
}

impl fmt::Display for ChargingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn charging_duration_rejects_out_of_range_hours() {
        assert!(ChargingDuration::new(0).is_none());
        assert!(ChargingDuration::new(7).is_none());
        assert_eq!(ChargingDuration::new(1).map(|d| d.hours()), Some(1));
        assert_eq!(ChargingDuration::new(6).map(|d| d.hours()), Some(6));
    }

    #[test]
    fn charging_duration_counts_half_hour_intervals() {
        let duration = ChargingDuration::new(3).unwrap();
        assert_eq!(duration.interval_count(), 6);
        assert_eq!(duration.as_duration(), Duration::hours(3));
    }

    #[test]
    fn daily_mix_serialises_with_camel_case_fields() {
        let day = DailyEnergyMix {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            clean_energy_percentage: 42.5,
            mix: FuelMix::from([("wind".to_string(), 30.0), ("gas".to_string(), 40.0)]),
        };

        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["cleanEnergyPerc"], 42.5);
        assert_eq!(json["mix"]["wind"], 30.0);
    }

    #[test]
    fn charging_window_serialises_times_as_received() {
        let window = OptimalChargingWindow {
            start_time: Timestamp::parse("2024-03-01T01:30Z").unwrap(),
            end_time: Timestamp::parse("2024-03-01T04:30:00+01:00").unwrap(),
            clean_energy_percentage: 71.25,
        };

        let json = serde_json::to_value(&window).unwrap();
        assert_eq!(json["startTime"], "2024-03-01T01:30Z");
        assert_eq!(json["endTime"], "2024-03-01T04:30:00+01:00");
        assert_eq!(json["cleanEnergyPerc"], 71.25);
    }

    #[test]
    fn timestamp_parses_upstream_and_rfc3339_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 30, 0).unwrap();
        assert_eq!(Timestamp::parse("2024-03-01T00:30Z").unwrap().instant(), expected);
        assert_eq!(Timestamp::parse("2024-03-01T00:30:00Z").unwrap().instant(), expected);
        assert_eq!(
            Timestamp::parse("2024-03-01T01:30:00+01:00").unwrap().instant(),
            expected
        );
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn timestamps_compare_by_instant() {
        let short = Timestamp::parse("2024-03-01T00:30Z").unwrap();
        let offset = Timestamp::parse("2024-03-01T01:30:00+01:00").unwrap();

        assert_eq!(short, offset);
        assert_ne!(short.as_str(), offset.as_str());
        assert!(short < Timestamp::parse("2024-03-01T01:00Z").unwrap());
    }

    #[test]
    fn timestamp_from_instant_uses_upstream_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 30, 0).unwrap();
        assert_eq!(Timestamp::from(at).as_str(), "2024-03-01T00:30Z");
    }

    #[test]
    fn timestamp_deserialise_rejects_garbage() {
        let err = serde_json::from_str::<Timestamp>("\"soon\"").unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }
}
