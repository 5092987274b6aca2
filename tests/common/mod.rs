//! Shared test utilities and fixtures.

#![allow(dead_code)]

use chrono::NaiveDate;
use comissao::models::{ComissaoResponse, SellerInfo};

/// A report with three sellers (one with a contador, one without a
/// document id, one without sales) and a renewal partner.
pub const REPORT_JSON: &str = include_str!("../fixtures/report.json");

/// Parses [`REPORT_JSON`].
pub fn report() -> ComissaoResponse {
    ComissaoResponse::from_json(REPORT_JSON).expect("Failed to parse report fixture")
}

/// Fixed export date used across tests.
pub fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date")
}

/// Finds a top-level seller by name.
pub fn seller<'a>(report: &'a ComissaoResponse, name: &str) -> &'a SellerInfo {
    report
        .sellers
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("no seller named {name}"))
}

/// Reads one part of an XLSX archive as text.
pub fn xlsx_part(bytes: &[u8], name: &str) -> String {
    use std::io::Read;

    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(bytes)).expect("workbook is not a zip");
    let mut part = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"));
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("part is not UTF-8");
    xml
}

/// Sheet names listed in `xl/workbook.xml`, in order.
pub fn xlsx_sheet_names(bytes: &[u8]) -> Vec<String> {
    let xml = xlsx_part(bytes, "xl/workbook.xml");
    xml.split("<sheet ")
        .skip(1)
        .map(|chunk| attr(chunk, "name").expect("sheet without name"))
        .collect()
}

/// Text of the first row of the `index`-th sheet (1-based), resolving
/// shared strings.
pub fn xlsx_header_row(bytes: &[u8], index: usize) -> Vec<String> {
    let shared = shared_strings(bytes);
    let sheet = xlsx_part(bytes, &format!("xl/worksheets/sheet{index}.xml"));
    let Some(row) = sheet
        .split("<row ")
        .nth(1)
        .and_then(|r| r.split("</row>").next())
    else {
        return Vec::new();
    };
    row.split("<c ")
        .skip(1)
        .map(|cell| {
            let value = between(cell, "<v>", "</v>").expect("cell without value");
            let idx: usize = value.parse().expect("shared string index");
            shared[idx].clone()
        })
        .collect()
}

/// Column widths set on the `index`-th sheet, one entry per column,
/// truncated to whole characters.
pub fn xlsx_column_widths(bytes: &[u8], index: usize) -> Vec<usize> {
    let sheet = xlsx_part(bytes, &format!("xl/worksheets/sheet{index}.xml"));
    let mut widths = Vec::new();
    for col in sheet.split("<col ").skip(1) {
        let min: usize = attr(col, "min").and_then(|v| v.parse().ok()).expect("col min");
        let max: usize = attr(col, "max").and_then(|v| v.parse().ok()).expect("col max");
        let width: f64 = attr(col, "width")
            .and_then(|v| v.parse().ok())
            .expect("col width");
        widths.extend(std::iter::repeat_n(width.trunc() as usize, max - min + 1));
    }
    widths
}

fn shared_strings(bytes: &[u8]) -> Vec<String> {
    let xml = xlsx_part(bytes, "xl/sharedStrings.xml");
    xml.split("<si>")
        .skip(1)
        .map(|si| {
            let t = si.split("<t").nth(1).expect("si without t");
            let text = t.split_once('>').map(|(_, rest)| rest).unwrap_or("");
            let text = text.split("</t>").next().unwrap_or("");
            text.replace("&lt;", "<")
                .replace("&gt;", ">")
                .replace("&quot;", "\"")
                .replace("&amp;", "&")
        })
        .collect()
}

fn attr(tag: &str, name: &str) -> Option<String> {
    between(tag, &format!(" {name}=\""), "\"")
        .or_else(|| between(tag, &format!("{name}=\""), "\""))
}

fn between(s: &str, open: &str, close: &str) -> Option<String> {
    let start = s.find(open)? + open.len();
    let end = s[start..].find(close)? + start;
    Some(s[start..end].to_string())
}
