use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveTime};
use daygrid_core::YearMonth;
use daygrid_core::date_math::add_days;
use daygrid_core::event::{calendar_day, hhmm};

/// Parse a day typed on the command line.
///
/// `YYYY-MM-DD` and `today`/`tomorrow`/`yesterday` resolve against `today`;
/// anything else ("fri", "next friday", "dec 31") goes through fuzzydate.
pub fn parse_date(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Missing date. Expected YYYY-MM-DD or a phrase like \"next friday\"");
    }

    if let Some(date) = calendar_day::parse(trimmed) {
        return Ok(date);
    }
    if trimmed.split('-').count() == 3 && trimmed.chars().all(|c| c.is_ascii_digit() || c == '-') {
        anyhow::bail!("Invalid date '{}'. Expected YYYY-MM-DD", s);
    }

    match trimmed.to_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return Ok(add_days(today, 1)),
        "yesterday" => return Ok(add_days(today, -1)),
        _ => {}
    }

    let expanded = expand_abbreviations(trimmed);
    fuzzydate::parse(&expanded)
        .map(|dt| dt.date())
        .map_err(|_| anyhow!("Could not parse date: \"{}\"", s))
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    const ABBREVIATIONS: [(&str, &str); 22] = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map_or(word.to_string(), |(_, full)| full.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_month(s: &str) -> Result<YearMonth> {
    YearMonth::parse(s.trim()).ok_or_else(|| anyhow!("Invalid month '{}'. Expected YYYY-MM", s))
}

/// An empty string clears the time.
pub fn parse_time(s: &str) -> Result<Option<NaiveTime>> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    hhmm::parse(s)
        .map(Some)
        .ok_or_else(|| anyhow!("Invalid time '{}'. Expected HH:MM", s))
}

/// An empty string clears the text.
pub fn optional_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `#rrggbb` → (r, g, b)
pub fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
