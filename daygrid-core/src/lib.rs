//! Core types for the daygrid calendar.
//!
//! This crate holds everything below the rendering layer:
//! - `date_math` and `month` for day arithmetic and month values
//! - `grid` for the fixed 6×7 month grid
//! - `event_index` for the persisted event collection
//! - `controller` for navigation and selection state
//! - `view` for the per-cell data a renderer needs

pub mod clock;
pub mod config;
pub mod constants;
pub mod controller;
pub mod date_math;
pub mod daygrid;
pub mod debounce;
pub mod draft;
pub mod error;
pub mod event;
pub mod event_index;
pub mod grid;
pub mod month;
pub mod storage;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{CalendarController, CalendarState, ViewMode};
pub use error::{DayGridError, DayGridResult};
pub use event::{Event, EventPatch, NewEvent, ValidationError};
pub use event_index::EventIndex;
pub use grid::{GridCell, MonthGrid};
pub use month::YearMonth;
