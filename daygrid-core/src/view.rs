//! What a renderer needs for each day cell and each event row.

use chrono::{Datelike, NaiveDate};

use crate::event::{Event, hhmm};
use crate::event_index::EventIndex;
use crate::grid::GridCell;
use crate::storage::KeyValueStore;

/// Visual treatment of a day cell, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Selected,
    Today,
    OutsideMonth,
    Weekend,
    Normal,
}

/// A grid cell annotated with selection and its events.
#[derive(Debug, Clone)]
pub struct CellView<'a> {
    pub cell: GridCell,
    pub is_selected: bool,
    pub events: Vec<&'a Event>,
}

impl CellView<'_> {
    pub fn day(&self) -> u32 {
        self.cell.day()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn style(&self) -> CellStyle {
        if self.is_selected {
            CellStyle::Selected
        } else if self.cell.is_today {
            CellStyle::Today
        } else if !self.cell.is_current_month {
            CellStyle::OutsideMonth
        } else if self.cell.is_weekend {
            CellStyle::Weekend
        } else {
            CellStyle::Normal
        }
    }

    pub fn label(&self) -> String {
        day_label(
            self.cell.date,
            self.cell.is_today,
            self.is_selected,
            self.event_count(),
        )
    }
}

/// Annotate `cells` with the selection and the events on each day.
pub fn cell_views<'a, S: KeyValueStore>(
    cells: &[GridCell],
    selected: Option<NaiveDate>,
    index: &'a EventIndex<S>,
) -> Vec<CellView<'a>> {
    cells
        .iter()
        .map(|cell| CellView {
            cell: *cell,
            is_selected: selected == Some(cell.date),
            events: index.for_date(&cell.date),
        })
        .collect()
}

/// `YYYY年M月D日`
pub fn date_title(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

/// Accessible label: the date, then `(今日, 選択中, イベントN件)` for
/// whichever modifiers apply, in that order.
pub fn day_label(date: NaiveDate, is_today: bool, is_selected: bool, event_count: usize) -> String {
    let mut modifiers = Vec::new();

    if is_today {
        modifiers.push("今日".to_string());
    }
    if is_selected {
        modifiers.push("選択中".to_string());
    }
    if event_count > 0 {
        modifiers.push(format!("イベント{event_count}件"));
    }

    let title = date_title(date);
    if modifiers.is_empty() {
        title
    } else {
        format!("{} ({})", title, modifiers.join(", "))
    }
}

pub fn selection_caption(date: NaiveDate) -> String {
    format!("選択中: {}", date_title(date))
}

/// `HH:MM - HH:MM`, just the start, or nothing.
pub fn time_display(event: &Event) -> Option<String> {
    match (event.start_time, event.end_time) {
        (Some(start), Some(end)) => Some(format!("{} - {}", hhmm::format(start), hhmm::format(end))),
        (Some(start), None) => Some(hhmm::format(start)),
        _ => None,
    }
}

pub fn event_label(event: &Event) -> String {
    match time_display(event) {
        Some(time) => format!("{} {}", event.title, time),
        None => event.title.clone(),
    }
}
