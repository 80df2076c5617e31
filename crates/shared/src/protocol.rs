use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{AccessToken, Availability, EventId};

pub fn events_route() -> &'static str {
    "/api/events"
}

pub fn event_route(event_id: &EventId) -> String {
    format!("/api/events/{event_id}")
}

pub fn participants_route(event_id: &EventId) -> String {
    format!("/api/events/{event_id}/participants")
}

pub fn healthz_route() -> &'static str {
    "/healthz"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDateTime {
    #[serde(with = "wire_datetime")]
    pub datetime: DateTime<Utc>,
    /// Server-side tally; only present on fetched events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u32>,
}

impl CandidateDateTime {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self {
            datetime,
            participant_count: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub station_name: String,
    pub candidate_datetimes: Vec<CandidateDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub event_id: EventId,
    pub organizer_token: AccessToken,
    pub participant_token: AccessToken,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_name: Option<String>,
    pub candidate_datetimes: Vec<CandidateDateTime>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub participants: Vec<ParticipantEntry>,
    #[serde(default, alias = "restaurants", deserialize_with = "null_as_empty")]
    pub recommended_restaurants: Vec<Restaurant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(deserialize_with = "availability_flags")]
    pub availabilities: Vec<bool>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ParticipantEntry {
    /// The comment unless it is absent or empty.
    pub fn visible_comment(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .filter(|comment| !comment.is_empty())
    }

    pub fn is_available_for(&self, candidate_index: usize) -> bool {
        self.availabilities
            .get(candidate_index)
            .copied()
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub address: String,
    pub distance_from_station: String,
    pub genre: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub price_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_comments: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAvailabilityRequest {
    pub token: AccessToken,
    pub availabilities: Vec<bool>,
    pub comment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitAvailabilityResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAvailability {
    Flag(bool),
    Status { status: Availability },
}

// Older backends report `{datetime, status}` objects instead of bare flags.
fn availability_flags<'de, D>(deserializer: D) -> Result<Vec<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawAvailability>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|entry| match entry {
            RawAvailability::Flag(flag) => flag,
            RawAvailability::Status { status } => status.as_submitted(),
        })
        .collect())
}

/// ISO-8601 timestamps as exchanged with the backend.
///
/// Outgoing values are UTC with millisecond precision and a `Z` suffix.
/// Incoming values may omit the offset, in which case they are read as UTC.
pub mod wire_datetime {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
            Err(err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
                .map(|naive| naive.and_utc())
                .map_err(|_| err),
        }
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|err| D::Error::custom(format!("invalid datetime '{raw}': {err}")))
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
