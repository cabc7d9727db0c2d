//! The add/edit form as plain data.
//!
//! A draft holds exactly what the user typed. Validation produces inline
//! errors that disable saving instead of failing anything.

use chrono::NaiveDate;

use crate::constants::DEFAULT_EVENT_COLOR;
use crate::event::{Event, EventPatch, NewEvent, ValidationError, check_time_order, hhmm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub color: String,
}

impl Default for EventDraft {
    fn default() -> Self {
        EventDraft {
            title: String::new(),
            description: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            color: DEFAULT_EVENT_COLOR.to_string(),
        }
    }
}

/// Fields of the draft after trimming and parsing.
struct Parsed {
    title: String,
    description: Option<String>,
    start_time: Option<chrono::NaiveTime>,
    end_time: Option<chrono::NaiveTime>,
    color: String,
}

impl EventDraft {
    /// Prefill the form from an existing event for editing.
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start_time: event.start_time.map(hhmm::format).unwrap_or_default(),
            end_time: event.end_time.map(hhmm::format).unwrap_or_default(),
            color: event.color.clone(),
        }
    }

    /// Every problem with the current input, in field order.
    pub fn errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(ValidationError::MissingTitle);
        }

        let start = parse_time("start time", &self.start_time);
        let end = parse_time("end time", &self.end_time);

        match (start, end) {
            (Ok(start), Ok(end)) => {
                if let Err(e) = check_time_order(start, end) {
                    errors.push(e);
                }
            }
            (start, end) => {
                errors.extend(start.err());
                errors.extend(end.err());
            }
        }

        errors
    }

    /// Whether the save action is enabled.
    pub fn can_save(&self) -> bool {
        self.errors().is_empty()
    }

    fn parse(&self) -> Result<Parsed, ValidationError> {
        if let Some(first) = self.errors().into_iter().next() {
            return Err(first);
        }

        let description = self.description.trim();
        Ok(Parsed {
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            start_time: parse_time("start time", &self.start_time)?,
            end_time: parse_time("end time", &self.end_time)?,
            color: self.color.clone(),
        })
    }

    /// Build the event to insert for `date`.
    pub fn to_new_event(&self, date: NaiveDate) -> Result<NewEvent, ValidationError> {
        let parsed = self.parse()?;
        Ok(NewEvent {
            title: parsed.title,
            description: parsed.description,
            date,
            start_time: parsed.start_time,
            end_time: parsed.end_time,
            color: parsed.color,
        })
    }

    /// Build a patch that sets every form field on an existing event.
    pub fn to_patch(&self) -> Result<EventPatch, ValidationError> {
        let parsed = self.parse()?;
        Ok(EventPatch {
            title: Some(parsed.title),
            description: Some(parsed.description),
            date: None,
            start_time: Some(parsed.start_time),
            end_time: Some(parsed.end_time),
            color: Some(parsed.color),
        })
    }
}

/// Empty input means "no time".
fn parse_time(
    field: &'static str,
    value: &str,
) -> Result<Option<chrono::NaiveTime>, ValidationError> {
    if value.trim().is_empty() {
        return Ok(None);
    }

    hhmm::parse(value)
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidTime {
            field,
            value: value.to_string(),
        })
}
