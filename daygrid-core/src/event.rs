//! Calendar event records and the changes that can be applied to them.
//!
//! Events are stored as JSON. Field names are camelCase, `date` is a plain
//! calendar day and start/end times are fixed-width `HH:MM` strings.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A timed (or untimed) entry on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to create an event; id and timestamps are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: String,
}

/// A partial update. `None` leaves a field alone; for the optional fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<Option<NaiveTime>>,
    pub end_time: Option<Option<NaiveTime>>,
    pub color: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Invalid {field} '{value}'. Expected HH:MM")]
    InvalidTime { field: &'static str, value: String },

    #[error("End time must be after start time ({start} - {end})")]
    EndNotAfterStart { start: String, end: String },
}

/// Start must be strictly before end when both are given.
pub fn check_time_order(
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start >= end => Err(ValidationError::EndNotAfterStart {
            start: hhmm::format(start),
            end: hhmm::format(end),
        }),
        _ => Ok(()),
    }
}

fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    Ok(())
}

impl NewEvent {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        NewEvent {
            title: title.into(),
            description: None,
            date,
            start_time: None,
            end_time: None,
            color: crate::constants::DEFAULT_EVENT_COLOR.to_string(),
        }
    }

    pub fn with_times(mut self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_title(&self.title)?;
        check_time_order(self.start_time, self.end_time)
    }
}

impl Event {
    pub fn from_new(new: NewEvent, id: String, now: DateTime<Utc>) -> Self {
        Event {
            id,
            title: new.title,
            description: new.description,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            color: new.color,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `patch` into a copy of this event and bump `updated_at`.
    ///
    /// The new `updated_at` is `now`, or one millisecond past the previous
    /// value if the clock has not moved beyond it.
    pub fn apply(&self, patch: &EventPatch, now: DateTime<Utc>) -> Event {
        let mut merged = self.clone();

        if let Some(title) = &patch.title {
            merged.title = title.clone();
        }
        if let Some(description) = &patch.description {
            merged.description = description.clone();
        }
        if let Some(date) = patch.date {
            merged.date = date;
        }
        if let Some(start_time) = patch.start_time {
            merged.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            merged.end_time = end_time;
        }
        if let Some(color) = &patch.color {
            merged.color = color.clone();
        }

        merged.updated_at = now.max(self.updated_at + TimeDelta::milliseconds(1));
        merged
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_title(&self.title)?;
        check_time_order(self.start_time, self.end_time)
    }
}

/// `HH:MM` (de)serialization for optional times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn format(t: NaiveTime) -> String {
        t.format(FORMAT).to_string()
    }

    pub fn parse(s: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(s.trim(), FORMAT).ok()
    }

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_str(&format(*t)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{s}'"))),
        }
    }
}

/// Calendar days are written as `YYYY-MM-DD`. Reading also accepts full
/// RFC 3339 timestamps, taking the day they fall on in local time.
pub mod calendar_day {
    use chrono::{DateTime, Local, NaiveDate, TimeZone};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(s: &str) -> Option<NaiveDate> {
        parse_in(s, &Local)
    }

    /// Like `parse`, with timestamps resolved to their calendar day in `tz`.
    pub fn parse_in<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<NaiveDate> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, FORMAT).ok().or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(tz).date_naive())
        })
    }

    pub fn serialize<S: Serializer>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&d.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
    }
}
