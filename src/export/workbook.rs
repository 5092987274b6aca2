//! XLSX rendering of projected tables.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::rows::{Cell, Table};

pub const DETAIL_SHEET: &str = "Vendas";
pub const SUMMARY_SHEET: &str = "Resumo";

const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 60;

/// Width of each column: one more than its longest rendered value (header
/// included), clamped to 10..=60.
pub fn column_widths(table: &Table) -> Vec<usize> {
    table
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let longest = table
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.to_string().chars().count())
                .fold(header.chars().count(), usize::max);
            (longest + 1).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Builds the two-sheet workbook and returns its bytes.
pub fn build_workbook(detail: &Table, summary: &Table) -> crate::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    write_sheet(workbook.add_worksheet(), DETAIL_SHEET, detail)?;
    write_sheet(workbook.add_worksheet(), SUMMARY_SHEET, summary)?;
    Ok(workbook.save_to_buffer()?)
}

/// An empty table leaves the sheet blank, without a header row.
fn write_sheet(sheet: &mut Worksheet, name: &str, table: &Table) -> crate::Result<()> {
    sheet.set_name(name)?;
    if table.is_empty() {
        return Ok(());
    }

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            write_cell(sheet, row_num, col as u16, cell)?;
        }
    }
    for (col, width) in column_widths(table).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> crate::Result<()> {
    match cell {
        Cell::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
        Cell::Amount(d) => {
            sheet.write_number(row, col, d.to_f64().unwrap_or_default())?;
        }
        Cell::Count(n) => {
            sheet.write_number(row, col, *n as f64)?;
        }
        Cell::Blank => {
            sheet.write_string(row, col, "")?;
        }
    }
    Ok(())
}
