use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use daygrid_core::daygrid::DayGrid;
use daygrid_core::{CalendarController, Clock, ViewMode, YearMonth};

use crate::render::render_calendar;

pub fn run(
    daygrid: &DayGrid,
    clock: Arc<dyn Clock>,
    month: Option<YearMonth>,
    select: Option<NaiveDate>,
    week: bool,
) -> Result<()> {
    let index = daygrid.events(clock.clone());

    let anchor = month
        .map(|m| m.first_day())
        .or(select)
        .unwrap_or_else(|| clock.today());

    let mut controller = CalendarController::with_anchor(anchor, clock);
    if let Some(date) = select {
        controller.select_date(date);
    }
    if week {
        controller.set_view_mode(ViewMode::Week);
    }

    println!("{}", render_calendar(&controller, &index));
    Ok(())
}
