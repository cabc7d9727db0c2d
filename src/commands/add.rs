use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use daygrid_core::daygrid::DayGrid;
use daygrid_core::draft::EventDraft;
use daygrid_core::view::{date_title, event_label};
use daygrid_core::Clock;
use dialoguer::Input;
use owo_colors::OwoColorize;

pub struct AddArgs {
    pub title: Option<String>,
    pub date: NaiveDate,
    pub start: Option<String>,
    pub end: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

pub fn run(daygrid: &DayGrid, clock: Arc<dyn Clock>, args: AddArgs) -> Result<()> {
    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt(format!("  Title ({})", date_title(args.date)))
            .interact_text()?,
    };

    let draft = EventDraft {
        title,
        description: args.description.unwrap_or_default(),
        start_time: args.start.unwrap_or_default(),
        end_time: args.end.unwrap_or_default(),
        color: args
            .color
            .unwrap_or_else(|| daygrid.config().default_color.clone()),
    };

    let errors = draft.errors();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("  {}", e.to_string().red());
        }
        anyhow::bail!("Event not saved");
    }

    let new_event = draft.to_new_event(args.date)?;

    let mut index = daygrid.events(clock);
    let event = index.add(new_event)?;

    println!("{}", format!("  Created: {}", event_label(event)).green());
    println!("  {}", format!("[{}]", event.id).dimmed());

    Ok(())
}
