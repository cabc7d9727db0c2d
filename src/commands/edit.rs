use std::sync::Arc;

use anyhow::Result;
use daygrid_core::daygrid::DayGrid;
use daygrid_core::view::event_label;
use daygrid_core::{Clock, EventPatch};
use owo_colors::OwoColorize;

use crate::utils::{optional_text, parse_date, parse_time};

pub struct EditArgs {
    pub id: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

pub fn run(daygrid: &DayGrid, clock: Arc<dyn Clock>, args: EditArgs) -> Result<()> {
    let today = clock.today();

    let patch = EventPatch {
        title: args.title.map(|t| t.trim().to_string()),
        description: args.description.as_deref().map(optional_text),
        date: args.date.as_deref().map(|d| parse_date(d, today)).transpose()?,
        start_time: args.start.as_deref().map(parse_time).transpose()?,
        end_time: args.end.as_deref().map(parse_time).transpose()?,
        color: args.color,
    };

    if patch == EventPatch::default() {
        anyhow::bail!("Nothing to change. Pass at least one of --title, --date, --start, --end, --color, --description");
    }

    let mut index = daygrid.events(clock);

    if !index.update(&args.id, patch)? {
        println!("{}", format!("No event with id '{}'", args.id).dimmed());
        return Ok(());
    }

    if let Some(event) = index.get(&args.id) {
        println!("{}", format!("  Updated: {}", event_label(event)).yellow());
    }

    Ok(())
}
