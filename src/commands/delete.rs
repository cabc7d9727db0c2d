use std::sync::Arc;

use anyhow::Result;
use daygrid_core::daygrid::DayGrid;
use daygrid_core::Clock;
use owo_colors::OwoColorize;

pub fn run(daygrid: &DayGrid, clock: Arc<dyn Clock>, id: &str) -> Result<()> {
    let mut index = daygrid.events(clock);

    let title = index.get(id).map(|e| e.title.clone());

    match title {
        Some(title) if index.remove(id) => {
            println!("{}", format!("  Deleted: {}", title).red());
        }
        _ => println!("{}", format!("No event with id '{}'", id).dimmed()),
    }

    Ok(())
}
