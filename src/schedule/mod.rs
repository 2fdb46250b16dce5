// src/schedule/mod.rs
//! CSV schedule → parsed weeks → presentation data.

pub mod cell;
pub mod csv;
pub mod summary;
pub mod types;

use tracing::{debug, info, instrument};

use crate::classify::{modality_variant, BadgeItem};
pub use cell::{format_short_date, parse_cell, parse_date};
pub use csv::{normalize_header, parse_csv, split_fields, split_records};
pub use summary::ScheduleSummary;
pub use types::{
    CellData, CsvRow, DateRange, HeaderKey, ParsedCell, ParsedScheduleRow, ScheduleData,
    ScheduleRowData, Section,
};

/// Parse the whole sheet. One row per data record, in sheet order.
#[instrument(level = "debug", skip(content), fields(content_len = content.len()))]
pub fn build_schedule(content: &str, default_year: i32) -> Vec<ParsedScheduleRow> {
    let rows: Vec<ParsedScheduleRow> = parse_csv(content)
        .iter()
        .map(|row| ParsedScheduleRow {
            week_label: row.get(HeaderKey::Semana).to_string(),
            theory: parse_cell(row, Section::Theory.keys(), default_year),
            practice: parse_cell(row, Section::Practice.keys(), default_year),
        })
        .collect();
    debug!(rows = rows.len(), "built schedule");
    rows
}

/// Earliest and latest dated cell across all rows, or `None` if nothing is dated.
pub fn date_range(rows: &[ParsedScheduleRow]) -> Option<DateRange> {
    let mut dates: Vec<_> = rows
        .iter()
        .flat_map(|r| [r.theory.date, r.practice.date])
        .flatten()
        .collect();
    dates.sort();
    Some(DateRange {
        start: *dates.first()?,
        end: *dates.last()?,
    })
}

fn cell_data(cell: &ParsedCell) -> CellData {
    CellData {
        date: cell.date.map(format_short_date),
        modality: cell.modality.clone(),
        modality_variant: modality_variant(&cell.modality),
        topic_lines: cell.topic_lines.clone(),
        badge_items: cell.badge_labels.iter().map(BadgeItem::new).collect(),
    }
}

/// Classify and format parsed rows for the page.
pub fn to_schedule_data(rows: &[ParsedScheduleRow]) -> ScheduleData {
    let range = date_range(rows);
    ScheduleData {
        rows: rows
            .iter()
            .map(|r| ScheduleRowData {
                week_label: r.week_label.clone(),
                theory: cell_data(&r.theory),
                practice: cell_data(&r.practice),
            })
            .collect(),
        start_date: range.map(|r| format_short_date(r.start)),
        end_date: range.map(|r| format_short_date(r.end)),
    }
}

/// `build_schedule` followed by `to_schedule_data`.
#[instrument(level = "info", skip(content), fields(content_len = content.len()))]
pub fn schedule_data(content: &str, default_year: i32) -> ScheduleData {
    let data = to_schedule_data(&build_schedule(content, default_year));
    info!(
        rows = data.rows.len(),
        start = ?data.start_date,
        end = ?data.end_date,
        "schedule ready"
    );
    data
}
