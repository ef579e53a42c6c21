//models.rs
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DraftError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    pub fn today() -> Day {
        Day::from(Local::now().weekday())
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Mon,
            Weekday::Tue => Day::Tue,
            Weekday::Wed => Day::Wed,
            Weekday::Thu => Day::Thu,
            Weekday::Fri => Day::Fri,
            Weekday::Sat => Day::Sat,
            Weekday::Sun => Day::Sun,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day: {0:?}")]
pub struct UnknownDay(pub String);

impl FromStr for Day {
    type Err = UnknownDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| UnknownDay(s.to_string()))
    }
}

/// Service-assigned identifier. Treated as opaque text; numeric ids are
/// rendered in decimal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WorkoutId(pub String);

impl WorkoutId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        WorkoutId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for WorkoutId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => WorkoutId(text),
            RawId::Signed(n) => WorkoutId(n.to_string()),
            RawId::Unsigned(n) => WorkoutId(n.to_string()),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: WorkoutId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub day: Option<Day>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_completed")]
    pub completed: bool,
}

// "" and null both mean no day.
fn lenient_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Day>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn lenient_completed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Body of the create request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewWorkout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Day>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub completed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CompletionPatch {
    pub completed: bool,
}

/// Raw form input for a workout that has not been created yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub title: String,
    pub sets: String,
    pub reps: String,
    pub day: Option<Day>,
    pub notes: String,
}

impl FormDraft {
    pub fn is_empty(&self) -> bool {
        *self == FormDraft::default()
    }

    pub fn to_payload(&self) -> Result<NewWorkout, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingTitle);
        }

        Ok(NewWorkout {
            title: title.to_string(),
            sets: parse_count("sets", &self.sets)?,
            reps: parse_count("reps", &self.reps)?,
            day: self.day,
            notes: (!self.notes.is_empty()).then(|| self.notes.clone()),
            completed: false,
        })
    }
}

/// Empty text means the field is absent, never zero.
pub fn parse_count(field: &'static str, text: &str) -> Result<Option<u32>, DraftError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(DraftError::InvalidCount {
            field,
            value: text.to_string(),
        }),
    }
}
