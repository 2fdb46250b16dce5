// src/schedule/types.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::{BadgeItem, ModalityVariant};

/// Canonical column keys of the schedule sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderKey {
    Semana,
    TeoricaFecha,
    TeoricaTemas,
    TeoricaModalidad,
    TeoricaBadge,
    PracticaFecha,
    PracticaTemas,
    PracticaModalidad,
    PracticaBadge,
}

impl HeaderKey {
    pub const ALL: [HeaderKey; 9] = [
        HeaderKey::Semana,
        HeaderKey::TeoricaFecha,
        HeaderKey::TeoricaTemas,
        HeaderKey::TeoricaModalidad,
        HeaderKey::TeoricaBadge,
        HeaderKey::PracticaFecha,
        HeaderKey::PracticaTemas,
        HeaderKey::PracticaModalidad,
        HeaderKey::PracticaBadge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderKey::Semana => "semana",
            HeaderKey::TeoricaFecha => "teorica_fecha",
            HeaderKey::TeoricaTemas => "teorica_temas",
            HeaderKey::TeoricaModalidad => "teorica_modalidad",
            HeaderKey::TeoricaBadge => "teorica_badge",
            HeaderKey::PracticaFecha => "practica_fecha",
            HeaderKey::PracticaTemas => "practica_temas",
            HeaderKey::PracticaModalidad => "practica_modalidad",
            HeaderKey::PracticaBadge => "practica_badge",
        }
    }

    /// Look up an already-normalized header. Unknown keys yield `None`.
    pub fn from_normalized(key: &str) -> Option<Self> {
        HeaderKey::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// One data record of the sheet. `None` means the column is absent from the sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CsvRow {
    pub semana: Option<String>,
    pub teorica_fecha: Option<String>,
    pub teorica_temas: Option<String>,
    pub teorica_modalidad: Option<String>,
    pub teorica_badge: Option<String>,
    pub practica_fecha: Option<String>,
    pub practica_temas: Option<String>,
    pub practica_modalidad: Option<String>,
    pub practica_badge: Option<String>,
}

impl CsvRow {
    fn slot_mut(&mut self, key: HeaderKey) -> &mut Option<String> {
        match key {
            HeaderKey::Semana => &mut self.semana,
            HeaderKey::TeoricaFecha => &mut self.teorica_fecha,
            HeaderKey::TeoricaTemas => &mut self.teorica_temas,
            HeaderKey::TeoricaModalidad => &mut self.teorica_modalidad,
            HeaderKey::TeoricaBadge => &mut self.teorica_badge,
            HeaderKey::PracticaFecha => &mut self.practica_fecha,
            HeaderKey::PracticaTemas => &mut self.practica_temas,
            HeaderKey::PracticaModalidad => &mut self.practica_modalidad,
            HeaderKey::PracticaBadge => &mut self.practica_badge,
        }
    }

    pub fn set(&mut self, key: HeaderKey, value: String) {
        *self.slot_mut(key) = Some(value);
    }

    /// Value for `key`, or `""` when the sheet has no such column.
    pub fn get(&self, key: HeaderKey) -> &str {
        let slot = match key {
            HeaderKey::Semana => &self.semana,
            HeaderKey::TeoricaFecha => &self.teorica_fecha,
            HeaderKey::TeoricaTemas => &self.teorica_temas,
            HeaderKey::TeoricaModalidad => &self.teorica_modalidad,
            HeaderKey::TeoricaBadge => &self.teorica_badge,
            HeaderKey::PracticaFecha => &self.practica_fecha,
            HeaderKey::PracticaTemas => &self.practica_temas,
            HeaderKey::PracticaModalidad => &self.practica_modalidad,
            HeaderKey::PracticaBadge => &self.practica_badge,
        };
        slot.as_deref().unwrap_or("")
    }
}

/// Which half of a week a cell belongs to, and the columns that feed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Theory,
    Practice,
}

/// Columns a cell is read from.
#[derive(Clone, Copy, Debug)]
pub struct CellKeys {
    pub date: HeaderKey,
    pub modality: HeaderKey,
    pub topics: HeaderKey,
    pub badge: HeaderKey,
}

impl Section {
    pub fn keys(&self) -> CellKeys {
        match self {
            Section::Theory => CellKeys {
                date: HeaderKey::TeoricaFecha,
                modality: HeaderKey::TeoricaModalidad,
                topics: HeaderKey::TeoricaTemas,
                badge: HeaderKey::TeoricaBadge,
            },
            Section::Practice => CellKeys {
                date: HeaderKey::PracticaFecha,
                modality: HeaderKey::PracticaModalidad,
                topics: HeaderKey::PracticaTemas,
                badge: HeaderKey::PracticaBadge,
            },
        }
    }
}

/// Parsed cell data, before any presentation decisions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCell {
    pub date: Option<NaiveDate>,
    pub modality: String,
    /// Non-empty, trimmed, source order.
    pub topic_lines: Vec<String>,
    /// Non-empty, trimmed, source order.
    pub badge_labels: Vec<String>,
}

/// One week of the schedule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedScheduleRow {
    pub week_label: String,
    pub theory: ParsedCell,
    pub practice: ParsedCell,
}

/// First and last class dates of the course.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Presentation-ready cell: short date, classified modality and badges.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    /// `DD/MM`, no year.
    pub date: Option<String>,
    pub modality: String,
    pub modality_variant: ModalityVariant,
    pub topic_lines: Vec<String>,
    pub badge_items: Vec<BadgeItem>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRowData {
    pub week_label: String,
    pub theory: CellData,
    pub practice: CellData,
}

/// Everything the schedule page needs, serializable as-is.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    pub rows: Vec<ScheduleRowData>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
