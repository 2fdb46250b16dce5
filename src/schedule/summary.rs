// src/schedule/summary.rs

use serde::Serialize;
use std::collections::BTreeMap;

use super::types::{CellData, ScheduleData};
use crate::classify::{BadgeVariant, ModalityVariant};

/// Counts a sheet author can eyeball to check the classification.
#[derive(Debug, Serialize, PartialEq, Eq, Default)]
pub struct ScheduleSummary {
    pub rows: usize,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Cells with a date.
    pub dated_cells: usize,
    /// Cells with neither topics nor badges.
    pub empty_cells: usize,
    pub modalities: BTreeMap<ModalityVariant, usize>,
    /// variant → labels seen with it, in sheet order, deduplicated.
    pub badges: BTreeMap<BadgeVariant, Vec<String>>,
}

impl ScheduleSummary {
    pub fn from_data(data: &ScheduleData) -> Self {
        let mut summary = ScheduleSummary {
            rows: data.rows.len(),
            start_date: data.start_date.clone(),
            end_date: data.end_date.clone(),
            ..Default::default()
        };
        for row in &data.rows {
            summary.add_cell(&row.theory);
            summary.add_cell(&row.practice);
        }
        summary
    }

    fn add_cell(&mut self, cell: &CellData) {
        if cell.date.is_some() {
            self.dated_cells += 1;
        }
        if cell.topic_lines.is_empty() && cell.badge_items.is_empty() {
            self.empty_cells += 1;
            return;
        }
        *self.modalities.entry(cell.modality_variant).or_default() += 1;
        for item in &cell.badge_items {
            let labels = self.badges.entry(item.variant).or_default();
            if !labels.contains(&item.label) {
                labels.push(item.label.clone());
            }
        }
    }
}
