use super::ExtractionError;
use calamine::{Data, ExcelDateTime, Reader, Xlsx};
use chrono::{NaiveDateTime, Timelike};
use std::io::Cursor;

/// Every row of every sheet, in workbook order. Non-empty cells are joined
/// by a single space; empty cells are skipped.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Spreadsheet(e.to_string()))?;

    let mut content = String::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ExtractionError::Spreadsheet(format!("{}: {}", sheet_name, e)))?;

        for row in range.rows() {
            let cells: Vec<String> = row.iter().filter_map(cell_text).collect();
            content.push_str(&cells.join(" "));
            content.push('\n');
        }
    }

    Ok(content)
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => Some(date_text(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Date cells read like `2024-01-01 00:00:00`, time-only cells like
/// `12:30:00` and duration cells like `1 day, 2:00:00`. A value chrono cannot
/// represent falls back to the raw serial number.
fn date_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return match dt.as_duration() {
            Some(duration) => duration_text(duration.num_milliseconds()),
            None => dt.as_f64().to_string(),
        };
    }

    match dt.as_datetime() {
        Some(value) if (0.0..1.0).contains(&dt.as_f64()) => time_text(&value, "%H:%M:%S"),
        Some(value) => time_text(&value, "%Y-%m-%d %H:%M:%S"),
        None => dt.as_f64().to_string(),
    }
}

fn time_text(value: &NaiveDateTime, format: &str) -> String {
    let mut text = value.format(format).to_string();
    if value.nanosecond() != 0 {
        text.push_str(&value.format("%.6f").to_string());
    }
    text
}

fn duration_text(millis: i64) -> String {
    const DAY_MS: i64 = 86_400_000;

    let days = millis.div_euclid(DAY_MS);
    let rest = millis.rem_euclid(DAY_MS);
    let (hours, minutes, seconds) = (rest / 3_600_000, rest / 60_000 % 60, rest / 1000 % 60);

    let mut text = match days {
        0 => String::new(),
        1 | -1 => format!("{} day, ", days),
        _ => format!("{} days, ", days),
    };
    text.push_str(&format!("{}:{:02}:{:02}", hours, minutes, seconds));
    if rest % 1000 != 0 {
        text.push_str(&format!(".{:06}", rest % 1000 * 1000));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_rows_across_sheets() {
        let bytes = fixtures::xlsx(&[
            ("Candidates", vec![vec!["Name", "Role"], vec!["Ada", "Engineer"]]),
            ("Notes", vec![vec!["Shortlist"]]),
        ]);
        let text = extract(&bytes).unwrap();
        assert_eq!(text, "Name Role\nAda Engineer\nShortlist\n");
    }

    #[test]
    fn test_empty_cells_are_skipped() {
        let bytes = fixtures::xlsx(&[("Sheet1", vec![vec!["Ada", "", "7"]])]);
        let text = extract(&bytes).unwrap();
        assert_eq!(text, "Ada 7\n");
    }

    #[test]
    fn test_date_cells_render_as_datetimes() {
        // 45292 is 2024-01-01 in the 1900 date system
        let bytes = fixtures::xlsx(&[("Sheet1", vec![vec!["Start", "date:45292", "time:0.5"]])]);
        let text = extract(&bytes).unwrap();
        assert_eq!(text, "Start 2024-01-01 00:00:00 12:00:00\n");
    }

    #[test]
    fn test_duration_text() {
        assert_eq!(duration_text(2 * 3_600_000), "2:00:00");
        assert_eq!(duration_text(86_400_000 + 90_000), "1 day, 0:01:30");
        assert_eq!(duration_text(3 * 86_400_000 + 1500), "3 days, 0:00:01.500000");
    }

    #[test]
    fn test_invalid_workbook_is_rejected() {
        assert!(matches!(
            extract(b"not a workbook"),
            Err(ExtractionError::Spreadsheet(_))
        ));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::Float(3.0)), Some("3".to_string()));
        assert_eq!(cell_text(&Data::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(&Data::Bool(true)), Some("True".to_string()));
    }
}
