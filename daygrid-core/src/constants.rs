/// Key the event collection is persisted under.
pub const EVENTS_STORAGE_KEY: &str = "calendar-events";

/// Cells in a month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

pub const DAYS_PER_WEEK: usize = 7;

/// Colour given to new events when the user picks none.
pub const DEFAULT_EVENT_COLOR: &str = "#3b82f6";

/// Redraw debounce window for interactive mode, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;
