// src/schedule/csv.rs
//! Quote-aware tokenizer for the schedule sheet plus header normalization
//! and positional row mapping. Only comma-separated, `"`-quoted input.

use std::mem::take;

use tracing::{debug, trace};

use super::types::{CsvRow, HeaderKey};
use crate::text::fold;

/* ---------------- Tokenizing ---------------- */

/// Split `text` into raw records. Line breaks inside an open quoted field stay
/// in the record (joined with `\n`); blank lines between records are skipped.
/// Unbalanced quotes at EOF flush whatever was accumulated.
pub fn split_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for line in text.lines() {
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);

        let mut chars = line.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '"' {
                continue;
            }
            if in_quotes && matches!(chars.peek(), Some('"')) {
                chars.next(); // escaped quote, state unchanged
                continue;
            }
            in_quotes = !in_quotes;
        }

        if !in_quotes && !current.trim().is_empty() {
            records.push(take(&mut current));
        }
    }

    if !current.trim().is_empty() {
        trace!(len = current.len(), "flushing unterminated record");
        records.push(current);
    }

    records
}

/// Split one record into fields. Quotes are removed, `""` inside quotes
/// becomes a literal `"`, and every field is trimmed.
pub fn split_fields(record: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && matches!(chars.peek(), Some('"')) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

/* ---------------- Headers ---------------- */

/// `"Teórica - Fecha "` → `"teorica_fecha"`. May return an empty string.
pub fn normalize_header(raw: &str) -> String {
    let folded = fold(raw);
    let mut out = String::with_capacity(folded.len());
    let mut last_us = false;
    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_us = false;
        } else if !last_us {
            out.push('_');
            last_us = true;
        }
    }
    out.trim_matches('_').to_string()
}

/* ---------------- Rows ---------------- */

/// Map every record after the header row onto the canonical columns.
///
/// Columns are matched by their position in the header row. Headers that
/// normalize to nothing or to an unknown key are ignored along with their
/// data; short records leave the missing columns as `""`, long records have
/// their surplus fields dropped.
pub fn map_rows(records: &[String]) -> Vec<CsvRow> {
    let Some((header, data)) = records.split_first() else {
        return Vec::new();
    };

    let columns: Vec<(usize, HeaderKey)> = split_fields(header)
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let key = normalize_header(raw);
            if key.is_empty() {
                debug!(column = idx, raw = %raw, "dropping empty header");
                return None;
            }
            match HeaderKey::from_normalized(&key) {
                Some(k) => Some((idx, k)),
                None => {
                    debug!(column = idx, key = %key, "ignoring unknown header");
                    None
                }
            }
        })
        .collect();

    data.iter()
        .enumerate()
        .map(|(n, record)| {
            let mut values = split_fields(record);
            if values.len() < columns.len() {
                trace!(record = n, fields = values.len(), "short record");
            }
            let mut row = CsvRow::default();
            for &(idx, key) in &columns {
                let value = values.get_mut(idx).map(take).unwrap_or_default();
                row.set(key, value);
            }
            row
        })
        .collect()
}

/// Tokenize and map `text` in one go.
pub fn parse_csv(text: &str) -> Vec<CsvRow> {
    map_rows(&split_records(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_keep_quoted_newlines() {
        let text = "a,b\n1,\"x\ny\"\n\n2,z\n";
        let records = split_records(text);
        assert_eq!(records, vec!["a,b", "1,\"x\ny\"", "2,z"]);
    }

    #[test]
    fn records_normalize_crlf() {
        let text = "a,b\r\n1,\"x\r\ny\"\r\n";
        assert_eq!(split_records(text), vec!["a,b", "1,\"x\ny\""]);
    }

    #[test]
    fn escaped_quotes_do_not_toggle_state() {
        let text = "a\n\"say \"\"hi\"\"\nthere\",b\nnext";
        let records = split_records(text);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], "\"say \"\"hi\"\"\nthere\",b");
        assert_eq!(split_fields(&records[1]), vec!["say \"hi\"\nthere", "b"]);
    }

    #[test]
    fn unterminated_quote_is_flushed() {
        let records = split_records("h\n\"open,\nstill open");
        assert_eq!(records, vec!["h", "\"open,\nstill open"]);
        assert_eq!(split_fields(&records[1]), vec!["open,\nstill open"]);
    }

    #[test]
    fn blank_input_has_no_records() {
        assert!(split_records("").is_empty());
        assert!(split_records("\n  \n\t\n").is_empty());
    }

    #[test]
    fn fields_are_trimmed_and_unquoted() {
        assert_eq!(
            split_fields(" a , \"b, c\" ,  ,d"),
            vec!["a", "b, c", "", "d"]
        );
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("Teórica_Fecha"), "teorica_fecha");
        assert_eq!(normalize_header("  Práctica - Modalidad "), "practica_modalidad");
        assert_eq!(normalize_header("__SEMANA__"), "semana");
        assert_eq!(normalize_header("¿?"), "");
        assert_eq!(normalize_header("Tps (tentativo)"), "tps_tentativo");
    }

    #[test]
    fn rows_follow_header_positions() {
        let text = "Práctica Fecha,Semana,Notas,Teórica Temas\n1/3,S1,ignored,\"A\nB\"\n";
        let rows = parse_csv(text);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get(HeaderKey::Semana), "S1");
        assert_eq!(row.get(HeaderKey::PracticaFecha), "1/3");
        assert_eq!(row.get(HeaderKey::TeoricaTemas), "A\nB");
        assert_eq!(row.teorica_fecha, None);
        assert_eq!(row.get(HeaderKey::TeoricaFecha), "");
    }

    #[test]
    fn short_and_long_records() {
        let text = "semana,teorica_fecha,teorica_temas\nS1\nS2,2/3,x,extra,more\n";
        let rows = parse_csv(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].teorica_fecha.as_deref(), Some(""));
        assert_eq!(rows[0].get(HeaderKey::TeoricaTemas), "");
        assert_eq!(rows[1].get(HeaderKey::TeoricaTemas), "x");
    }

    #[test]
    fn empty_header_column_is_ignored_with_its_data() {
        let text = "semana,,teorica_fecha\nS1,junk,5/3\n";
        let rows = parse_csv(text);
        assert_eq!(rows[0].get(HeaderKey::Semana), "S1");
        assert_eq!(rows[0].get(HeaderKey::TeoricaFecha), "5/3");
    }

    #[test]
    fn duplicate_header_last_column_wins() {
        let rows = parse_csv("semana,Teórica Fecha,teorica_fecha\nS1,1/3,2/3\n");
        assert_eq!(rows[0].get(HeaderKey::TeoricaFecha), "2/3");
    }

    #[test]
    fn unknown_header_between_known_ones_keeps_positions() {
        let records = split_records("semana,Observaciones,teorica_temas\nS1,ver aula,Intro\n");
        let rows = map_rows(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(HeaderKey::Semana), "S1");
        assert_eq!(rows[0].get(HeaderKey::TeoricaTemas), "Intro");
        assert_eq!(rows[0].get(HeaderKey::TeoricaModalidad), "");
    }

    #[test]
    fn header_only_sheet_has_no_rows() {
        assert!(parse_csv("semana,teorica_fecha\n").is_empty());
        assert!(parse_csv("").is_empty());
    }
}
