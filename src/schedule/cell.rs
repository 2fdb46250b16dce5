// src/schedule/cell.rs

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::types::{CellKeys, CsvRow, ParsedCell};

/// `D/M`, `D/M/YY` or `D/M/YYYY`, anywhere in the cell.
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})/([0-9]{1,2})(?:/([0-9]{2,4}))?").expect("date regex should be valid")
});

/// Build one cell of `row` from the columns named by `keys`.
pub fn parse_cell(row: &CsvRow, keys: CellKeys, default_year: i32) -> ParsedCell {
    ParsedCell {
        date: parse_date(row.get(keys.date), default_year),
        modality: row.get(keys.modality).to_string(),
        topic_lines: parse_topic_lines(row.get(keys.topics)),
        badge_labels: parse_badge_labels(row.get(keys.badge)),
    }
}

/// Find the first `D/M[/Y]` in `value`.
///
/// Two-digit years are taken as 20YY; a missing (or zero) year falls back to
/// `default_year`. Out-of-range days and months roll over into the following
/// month/year instead of failing: `31/4` is the 1st of May.
pub fn parse_date(value: &str, default_year: i32) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Some(caps) = DATE_RE.captures(trimmed) else {
        debug!(value = %trimmed, "no date in cell");
        return None;
    };

    let day: i64 = caps.get(1)?.as_str().parse().ok()?;
    let month: i64 = caps.get(2)?.as_str().parse().ok()?;
    let year = match caps.get(3).map(|m| m.as_str()) {
        Some(raw) if raw.len() == 2 => 2000 + raw.parse::<i32>().ok()?,
        Some(raw) => match raw.parse::<i32>().ok()? {
            0 => default_year,
            y => y,
        },
        None => default_year,
    };

    let date = rolled_date(year, month, day);
    trace!(value = %trimmed, ?date, "parsed date");
    date
}

/// Calendar date for (year, month, day) where month and day may overflow
/// (or be zero) and carry into the neighbouring month/year.
fn rolled_date(year: i32, month: i64, day: i64) -> Option<NaiveDate> {
    let months = month - 1;
    let year = year.checked_add(i32::try_from(months.div_euclid(12)).ok()?)?;
    let month0 = u32::try_from(months.rem_euclid(12)).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    first.checked_add_signed(Duration::days(day - 1))
}

/// `DD/MM`, zero-padded, year dropped.
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.day(), date.month())
}

/// One topic per non-blank line, trimmed.
pub fn parse_topic_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Comma-separated labels, trimmed, blanks dropped.
pub fn parse_badge_labels(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
