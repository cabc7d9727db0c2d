//! Terminal rendering for daygrid types.
//!
//! Extension traits that turn daygrid-core values into coloured text with
//! owo_colors.

use daygrid_core::event::Event;
use daygrid_core::event_index::EventIndex;
use daygrid_core::storage::KeyValueStore;
use daygrid_core::view::{self, CellStyle, CellView};
use daygrid_core::{CalendarController, ViewMode, YearMonth};
use owo_colors::OwoColorize;

use crate::utils::hex_to_rgb;

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for YearMonth {
    fn render(&self) -> String {
        format!("📅 {}", self.title().bold())
    }
}

impl Render for CellView<'_> {
    /// Four columns: right-aligned day number plus a marker when the day has events.
    fn render(&self) -> String {
        let marker = if self.event_count() > 0 { "•" } else { " " };
        let text = format!("{:>3}{}", self.day(), marker);

        match self.style() {
            CellStyle::Selected => text.white().on_blue().to_string(),
            CellStyle::Today => text.cyan().bold().to_string(),
            CellStyle::OutsideMonth => text.dimmed().to_string(),
            CellStyle::Weekend => text.red().to_string(),
            CellStyle::Normal => text,
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let swatch = match hex_to_rgb(&self.color) {
            Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
            None => "■".to_string(),
        };
        let time = view::time_display(self).unwrap_or_else(|| "all-day".to_string());

        let mut line = format!("{} {:>13} {}", swatch, time.dimmed(), self.title);
        if let Some(description) = &self.description {
            line.push_str(&format!("\n{:>16}{}", "", description.dimmed()));
        }
        line
    }
}

fn render_weeks(cells: &[CellView]) -> Vec<String> {
    let mut lines = vec![WEEKDAY_HEADER
        .iter()
        .map(|d| format!("{:>3} ", d.dimmed()))
        .collect::<String>()];

    for week in cells.chunks(7) {
        lines.push(week.iter().map(|c| c.render()).collect());
    }

    lines
}

/// Render a list of events with their ids, or a placeholder when empty.
pub fn render_event_list(events: &[&Event], with_ids: bool) -> Vec<String> {
    if events.is_empty() {
        return vec![format!("   {}", "No events".dimmed())];
    }

    events
        .iter()
        .map(|event| {
            let mut line = format!("   {}", event.render());
            if with_ids {
                line.push_str(&format!("  {}", format!("[{}]", event.id).dimmed()));
            }
            line
        })
        .collect()
}

/// Header, grid and the selected day's events.
pub fn render_calendar<S: KeyValueStore>(
    controller: &CalendarController,
    index: &EventIndex<S>,
) -> String {
    let mut lines = vec![controller.current_month().render()];

    if controller.view_mode() == ViewMode::Week {
        lines[0].push_str(&format!(" {}", "(week)".dimmed()));
    }

    lines.push(String::new());
    lines.extend(render_weeks(&controller.cell_views(index)));

    if let Some(selected) = controller.selected_date() {
        lines.push(String::new());
        lines.push(view::selection_caption(selected).bold().to_string());
        lines.extend(render_event_list(&controller.selected_events(index), true));
    }

    lines.join("\n")
}
