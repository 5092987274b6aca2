//! Workbook exports of a full report and its subtrees.

mod common;

use comissao::export::{
    column_widths, export_contador, export_renewal_partner, export_report, export_scope,
    export_seller,
};
use comissao::models::ComissaoResponse;
use comissao::rows::{RenewalVisibility, Scope, detail_headers, summary_headers};
use comissao::tree::{ExpandState, TreeNode, visible_lines};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[test]
fn test_report_export() {
    let report = common::report();
    let artifact = export_report(&report, common::export_date()).expect("Failed to export report");

    assert_eq!(artifact.file_name, "commissao-2025-01-31.xlsx");
    assert!(artifact.bytes.starts_with(ZIP_MAGIC));
}

#[test]
fn test_entity_export_file_names() {
    let report = common::report();
    let date = common::export_date();
    let oscar = common::seller(&report, "Óscar Lima");
    let partner = report.renewal_partner.as_ref().expect("partner");

    let seller = export_seller(oscar, date).expect("seller export");
    assert_eq!(seller.file_name, "commissao-vendedor-Óscar-Lima-2025-01-31.xlsx");

    let contador = export_contador(oscar, &oscar.contadores[0], date)
        .expect("contador export");
    assert_eq!(
        contador.file_name,
        "commissao-contador-Carla-Contábil-2025-01-31.xlsx"
    );

    let partner = export_renewal_partner(partner, date).expect("partner export");
    assert_eq!(
        partner.file_name,
        "commissao-parceiro-renovacao-Renova-Parceiros-2025-01-31.xlsx"
    );
}

#[test]
fn test_every_tree_node_exports_or_is_skipped() {
    let report = common::report();
    let mut state = ExpandState::new();
    state.expand_all(&report);

    let dir = tempfile::tempdir().expect("tempdir");
    let mut written = Vec::new();
    for line in visible_lines(&report, &state) {
        let Some(scope) = line.node.scope() else {
            continue;
        };
        let artifact =
            export_scope(scope, common::export_date()).expect("Failed to export node");
        let path = artifact.save(dir.path()).expect("Failed to save export");
        assert!(path.exists());
        written.push(artifact.file_name);
    }

    // Nested and top-level copies of Óscar and Carla share a file name
    written.sort();
    written.dedup();
    assert_eq!(written.len(), 5);
}

#[test]
fn test_summary_column_widths() {
    let report = common::report();
    let table = Scope::Report(&report).summary_table(RenewalVisibility::Shown);
    let widths = column_widths(&table);

    assert_eq!(widths.len(), 8);
    // "Parceiro de Renovação" is the longest role label
    assert_eq!(widths[1], "Parceiro de Renovação".chars().count() + 1);
    assert!(widths.iter().all(|w| (10..=60).contains(w)));
}

#[test]
fn test_workbook_round_trip_of_report() {
    let report = common::report();
    let artifact = export_report(&report, common::export_date()).expect("Failed to export report");

    assert_eq!(common::xlsx_sheet_names(&artifact.bytes), ["Vendas", "Resumo"]);

    let detail = common::xlsx_header_row(&artifact.bytes, 1);
    assert_eq!(detail, detail_headers(RenewalVisibility::Shown));
    let summary = common::xlsx_header_row(&artifact.bytes, 2);
    assert_eq!(summary, summary_headers(RenewalVisibility::Shown));

    let scope = Scope::Report(&report);
    assert_eq!(
        common::xlsx_column_widths(&artifact.bytes, 1),
        column_widths(&scope.detail_table(RenewalVisibility::Shown))
    );
    assert_eq!(
        common::xlsx_column_widths(&artifact.bytes, 2),
        column_widths(&scope.summary_table(RenewalVisibility::Shown))
    );
}

#[test]
fn test_top_level_seller_export_keeps_renewal_column() {
    let report = common::report();
    let oscar = common::seller(&report, "Óscar Lima");

    // The tree hides renewal figures for this seller; the workbook does not
    let artifact = export_seller(oscar, common::export_date()).expect("seller export");
    let detail = common::xlsx_header_row(&artifact.bytes, 1);
    assert_eq!(detail.len(), 10);
    assert_eq!(detail.last().map(String::as_str), Some("Comissão de Renovação"));
    let summary = common::xlsx_header_row(&artifact.bytes, 2);
    assert_eq!(summary.len(), 8);
    assert!(summary.iter().any(|h| h == "Comissão de Renovação"));
}

#[test]
fn test_selected_tree_node_export_keeps_renewal_column() {
    let report = common::report();
    let mut state = ExpandState::new();
    state.expand_initial(&report);

    let lines = visible_lines(&report, &state);
    let contador = lines
        .iter()
        .find(|l| {
            l.renewal == RenewalVisibility::Hidden && matches!(l.node, TreeNode::Contador { .. })
        })
        .expect("top-level contador line");
    let scope = contador.node.scope().expect("contador scope");
    let artifact = export_scope(scope, common::export_date()).expect("contador export");

    let detail = common::xlsx_header_row(&artifact.bytes, 1);
    assert_eq!(detail, detail_headers(RenewalVisibility::Shown));
}

#[test]
fn test_empty_report_writes_blank_named_sheets() {
    let report = ComissaoResponse::default();
    let artifact = export_report(&report, common::export_date()).expect("Failed to export");

    assert_eq!(common::xlsx_sheet_names(&artifact.bytes), ["Vendas", "Resumo"]);
    assert!(common::xlsx_column_widths(&artifact.bytes, 1).is_empty());
}
