use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use daygrid_core::daygrid::DayGrid;
use daygrid_core::debounce::Debouncer;
use daygrid_core::draft::EventDraft;
use daygrid_core::event_index::EventIndex;
use daygrid_core::storage::KeyValueStore;
use daygrid_core::{CalendarController, Clock, ViewMode};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::render::render_calendar;
use crate::utils::parse_date;

const HELP: &str = "n next · p prev · t today · g DATE go · s DATE select · c clear · \
w week · m month · a TITLE [START] [END] add · d ID delete · q quit";

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Next,
    Previous,
    Today,
    GoTo(NaiveDate),
    Select(NaiveDate),
    ClearSelection,
    Week,
    Month,
    Add {
        title: String,
        start: String,
        end: String,
    },
    Delete(String),
    Quit,
}

fn parse_action(line: &str, today: NaiveDate) -> Result<Action> {
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let action = match command {
        "n" | "next" => Action::Next,
        "p" | "prev" => Action::Previous,
        "t" | "today" => Action::Today,
        "g" | "go" => Action::GoTo(parse_date(rest, today)?),
        "s" | "select" => Action::Select(parse_date(rest, today)?),
        "c" | "clear" => Action::ClearSelection,
        "w" | "week" => Action::Week,
        "m" | "month" => Action::Month,
        "a" | "add" => {
            // Trailing HH:MM words are times; everything before them is the title.
            let mut words: Vec<&str> = rest.split_whitespace().collect();
            let mut times = Vec::new();
            while times.len() < 2
                && words.len() > 1
                && words.last().is_some_and(|w| w.len() == 5 && w.contains(':'))
            {
                times.extend(words.pop());
            }
            times.reverse();
            Action::Add {
                title: words.join(" "),
                start: times.first().map(|s| s.to_string()).unwrap_or_default(),
                end: times.get(1).map(|s| s.to_string()).unwrap_or_default(),
            }
        }
        "d" | "delete" if !rest.is_empty() => Action::Delete(rest.to_string()),
        "q" | "quit" | "exit" => Action::Quit,
        _ => anyhow::bail!("Unknown command '{}'", line),
    };

    Ok(action)
}

/// Apply an action and return a status line for the user.
fn apply<S: KeyValueStore>(
    action: Action,
    controller: &mut CalendarController,
    index: &mut EventIndex<S>,
) -> Result<Option<String>> {
    match action {
        Action::Next => controller.go_to_next_month(),
        Action::Previous => controller.go_to_previous_month(),
        Action::Today => controller.go_to_today(),
        Action::GoTo(date) => controller.go_to_date(date),
        Action::Select(date) => controller.select_date(date),
        Action::ClearSelection => controller.clear_selection(),
        Action::Week => controller.set_view_mode(ViewMode::Week),
        Action::Month => controller.set_view_mode(ViewMode::Month),
        Action::Add { title, start, end } => {
            let Some(date) = controller.selected_date() else {
                anyhow::bail!("Select a day first (s DATE)");
            };
            let draft = EventDraft {
                title,
                start_time: start,
                end_time: end,
                ..Default::default()
            };
            let event = index.add(draft.to_new_event(date)?)?;
            return Ok(Some(format!("Created: {}", event.title)));
        }
        Action::Delete(id) => {
            let status = if index.remove(&id) {
                format!("Deleted {}", id)
            } else {
                format!("No event with id '{}'", id)
            };
            return Ok(Some(status));
        }
        Action::Quit => {}
    }

    Ok(None)
}

fn frame<S: KeyValueStore>(
    controller: &CalendarController,
    index: &EventIndex<S>,
    status: Option<&str>,
) -> String {
    let mut out = render_calendar(controller, index);
    out.push_str("\n\n");
    if let Some(status) = status {
        out.push_str(&format!("{}\n", status.yellow()));
    }
    out.push_str(&format!("{}\n> ", HELP.dimmed()));
    out
}

/// Everything a redraw reads. Input handling mutates it; the debounced
/// redraw renders whatever it holds when the burst settles.
struct Session<S> {
    controller: CalendarController,
    index: EventIndex<S>,
    status: Option<String>,
}

impl<S: KeyValueStore> Session<S> {
    fn handle(&mut self, line: &str, today: NaiveDate) -> bool {
        self.status = match parse_action(line, today) {
            Ok(Action::Quit) => return false,
            Ok(action) => match apply(action, &mut self.controller, &mut self.index) {
                Ok(status) => status,
                Err(e) => Some(e.to_string()),
            },
            Err(e) => {
                debug!(input = %line, "Unrecognised browse input");
                Some(e.to_string())
            }
        };
        true
    }

    fn frame(&self) -> String {
        frame(&self.controller, &self.index, self.status.as_deref())
    }
}

fn lock<S>(session: &Mutex<Session<S>>) -> MutexGuard<'_, Session<S>> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

fn draw(out: &mut impl Write, screen: &str) -> std::io::Result<()> {
    // Clear screen, cursor home
    write!(out, "\x1B[2J\x1B[H{}", screen)?;
    out.flush()
}

pub async fn run(daygrid: &DayGrid, clock: Arc<dyn Clock>) -> Result<()> {
    let session = Arc::new(Mutex::new(Session {
        index: daygrid.events(clock.clone()),
        controller: CalendarController::new(clock.clone()),
        status: None,
    }));

    let delay = Duration::from_millis(daygrid.config().redraw_debounce_ms);
    let redraw = Debouncer::new(delay, {
        let session = session.clone();
        move |()| {
            let screen = lock(&session).frame();
            if let Err(e) = draw(&mut std::io::stdout(), &screen) {
                warn!("Failed to draw calendar: {e}");
            }
        }
    });

    redraw.call(());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        if !lock(&session).handle(&line, clock.today()) {
            break;
        }
        redraw.call(());
    }

    redraw.flush().await;
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use daygrid_core::{FixedClock, YearMonth};
    use daygrid_core::storage::{MemoryStore, Storage};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_actions() {
        let today = date(2024, 12, 25);
        assert_eq!(parse_action("n", today).unwrap(), Action::Next);
        assert_eq!(
            parse_action("s 2024-12-31", today).unwrap(),
            Action::Select(date(2024, 12, 31))
        );
        assert_eq!(parse_action("g tomorrow", today).unwrap(), Action::GoTo(date(2024, 12, 26)));
        assert!(parse_action("s", today).is_err());
        assert!(parse_action("d", today).is_err());
        assert!(parse_action("dance", today).is_err());
    }

    #[test]
    fn test_parse_add_with_times() {
        let today = date(2024, 12, 25);
        assert_eq!(
            parse_action("a Team sync 10:00 11:00", today).unwrap(),
            Action::Add {
                title: "Team sync".to_string(),
                start: "10:00".to_string(),
                end: "11:00".to_string(),
            }
        );
        assert_eq!(
            parse_action("a Lunch 12:30", today).unwrap(),
            Action::Add {
                title: "Lunch".to_string(),
                start: "12:30".to_string(),
                end: String::new(),
            }
        );
    }

    #[test]
    fn test_add_requires_selection() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::on(date(2024, 12, 25)));
        let mut index = EventIndex::load(Storage::new(MemoryStore::new()), clock.clone());
        let mut controller = CalendarController::new(clock);

        let add = Action::Add {
            title: "Dinner".to_string(),
            start: String::new(),
            end: String::new(),
        };
        assert!(apply(add.clone(), &mut controller, &mut index).is_err());

        apply(Action::Select(date(2024, 12, 25)), &mut controller, &mut index).unwrap();
        let status = apply(add, &mut controller, &mut index).unwrap();
        assert_eq!(status.as_deref(), Some("Created: Dinner"));
        assert_eq!(index.for_date(&date(2024, 12, 25)).len(), 1);
    }

    #[test]
    fn test_session_handles_burst_and_renders_final_state() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::on(date(2024, 12, 25)));
        let mut session = Session {
            index: EventIndex::load(Storage::new(MemoryStore::new()), clock.clone()),
            controller: CalendarController::new(clock.clone()),
            status: None,
        };

        for line in ["n", "n", "p", "s 2025-01-02", "dance"] {
            assert!(session.handle(line, clock.today()));
        }
        assert_eq!(session.controller.current_month(), YearMonth::new(2025, 0).unwrap());
        assert_eq!(session.controller.selected_date(), Some(date(2025, 1, 2)));
        assert!(session.status.as_deref().is_some_and(|s| s.contains("Unknown command")));
        assert!(session.frame().contains("2025年1月"));

        assert!(!session.handle("q", clock.today()));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_draw_clears_screen_and_reports_write_errors() {
        let mut out = Vec::new();
        draw(&mut out, "grid").unwrap();
        assert_eq!(out, b"\x1B[2J\x1B[Hgrid");

        let err = draw(&mut BrokenPipe, "grid").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }
}
