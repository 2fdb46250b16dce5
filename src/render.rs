// src/render.rs
//! Markdown page for the schedule. Cells are inline HTML inside a markdown
//! table, so every piece of sheet text is HTML-escaped and has `|` escaped.

use crate::schedule::{CellData, ScheduleData};

const FRONTMATTER: &str = "---\ntitle: Cronograma\ndescription: Cronograma de cursada\n---\n\n# Cronograma\n\n";
const NO_DATA: &str = "No hay datos de cronograma disponibles.";

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '|' => out.push_str("\\|"),
            c => out.push(c),
        }
    }
    out
}

fn badge(label: &str, variant: &str) -> String {
    format!(
        r#"<span class="cronograma-badge cronograma-badge--{}">{}</span>"#,
        variant,
        escape_html(label)
    )
}

/// HTML for one cell. Cells without topics or badges read as "Sin clase".
pub fn render_cell(cell: &CellData) -> String {
    if cell.topic_lines.is_empty() && cell.badge_items.is_empty() {
        return r#"<span class="cronograma-empty">Sin clase</span>"#.to_string();
    }

    let mut top = Vec::new();
    if let Some(date) = &cell.date {
        top.push(format!("<strong>{}</strong>", escape_html(date)));
    }
    if !cell.modality.trim().is_empty() {
        top.push(badge(cell.modality.trim(), cell.modality_variant.as_str()));
    }

    let middle = cell
        .topic_lines
        .iter()
        .map(|t| escape_html(t))
        .collect::<Vec<_>>()
        .join("<br/>");

    let bottom = cell
        .badge_items
        .iter()
        .map(|b| badge(&b.label, b.variant.as_str()))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<div class="cronograma-cell"><div class="cronograma-cell-top">{}</div><div class="cronograma-cell-middle">{}</div><div class="cronograma-cell-bottom">{}</div></div>"#,
        top.join(" "),
        middle,
        bottom
    )
}

fn date_line(data: &ScheduleData) -> String {
    match (&data.start_date, &data.end_date) {
        (Some(start), Some(end)) => format!("Fechas: {} a {}.", start, end),
        _ => "Fechas: a definir.".to_string(),
    }
}

/// Full page. `None` renders the "no schedule data" page.
pub fn render_page(data: Option<&ScheduleData>) -> String {
    let Some(data) = data else {
        return format!("{FRONTMATTER}{NO_DATA}\n");
    };

    let mut lines = vec![
        date_line(data),
        String::new(),
        r#"<div class="cronograma-wrapper">"#.to_string(),
        String::new(),
        "| Semana | Teorica | Practica |".to_string(),
        "| --- | --- | --- |".to_string(),
    ];
    for row in &data.rows {
        lines.push(format!(
            "| {} | {} | {} |",
            escape_html(&row.week_label),
            render_cell(&row.theory),
            render_cell(&row.practice)
        ));
    }
    lines.push(String::new());
    lines.push("</div>".to_string());

    format!("{FRONTMATTER}{}\n", lines.join("\n"))
}
