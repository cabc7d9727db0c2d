use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use daygrid_core::daygrid::DayGrid;
use daygrid_core::view::date_title;
use daygrid_core::Clock;
use owo_colors::OwoColorize;

use crate::render::render_event_list;

pub fn run(daygrid: &DayGrid, clock: Arc<dyn Clock>, date: NaiveDate) -> Result<()> {
    let index = daygrid.events(clock);

    println!("{}", date_title(date).bold());
    for line in render_event_list(&index.for_date(&date), true) {
        println!("{}", line);
    }

    Ok(())
}
