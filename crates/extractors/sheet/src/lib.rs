use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use scour_common::api::LocationMatch;
use scour_common::expr::Expression;

/// Accept .xlsx files.
pub fn accepts(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}

/// Scan every non-empty cell of every sheet in a workbook.
///
/// Each matching cell yields its sheet name, absolute 1-based sheet row,
/// column letter, and the cell's string representation. calamine's range is
/// relative to the used area, so the range start offsets both coordinates.
pub fn search(path: &Path, expr: &Expression) -> anyhow::Result<Vec<LocationMatch>> {
    let mut workbook = open_workbook_auto(path)?;
    let mut locations = Vec::new();

    for sheet_name in workbook.sheet_names().to_vec() {
        if let Ok(range) = workbook.worksheet_range(&sheet_name) {
            let Some((row_start, col_start)) = range.start() else {
                continue;
            };
            for (row_idx, row) in range.rows().enumerate() {
                for (col_idx, cell) in row.iter().enumerate() {
                    let value = match cell {
                        Data::Empty => continue,
                        Data::String(s) if s.trim().is_empty() => continue,
                        other => other.to_string(),
                    };
                    if expr.matches(&value) {
                        locations.push(LocationMatch::Cell {
                            sheet: sheet_name.clone(),
                            row: row_start as usize + row_idx + 1,
                            column: column_label(col_start as usize + col_idx),
                            value,
                        });
                    }
                }
            }
        }
    }

    Ok(locations)
}

/// 0-based column index to the spreadsheet letter name: 0 → A, 25 → Z, 26 → AA.
pub fn column_label(mut idx: usize) -> String {
    let mut label = String::new();
    loop {
        label.insert(0, (b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    label
}
