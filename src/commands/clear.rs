use std::sync::Arc;

use anyhow::Result;
use daygrid_core::daygrid::DayGrid;
use daygrid_core::Clock;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

pub fn run(daygrid: &DayGrid, clock: Arc<dyn Clock>, yes: bool) -> Result<()> {
    let mut index = daygrid.events(clock);

    // A corrupt blob loads as empty but still sits in the store
    if index.is_empty() {
        index.clear();
        println!("{}", "Nothing to clear".dimmed());
        return Ok(());
    }

    let total = index.len();

    // Confirm unless --yes
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete all {} {}?",
                total,
                if total == 1 { "event" } else { "events" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    index.clear();
    println!("{}", format!("  Deleted {} events", total).red());

    Ok(())
}
