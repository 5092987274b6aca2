//! Reconciliation and row projection over a full report.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use comissao::reconcile::{DirectSalesSummary, direct_sales, seller_commission_on};
use comissao::rows::{Attribution, Cell, RenewalVisibility, Role, Scope};
use comissao::rows::summary::summary_rows;

#[test]
fn test_direct_sales_exclude_contador_orders() {
    let report = common::report();
    let oscar = common::seller(&report, "Óscar Lima");

    let ids: Vec<&str> = direct_sales(oscar)
        .iter()
        .map(|s| s.order_id.as_str())
        .collect();
    assert_eq!(ids, ["P1", "P3"]);

    let summary = DirectSalesSummary::of(oscar);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.total_value, dec!(150));
    assert_eq!(summary.total_commission, dec!(15));
    assert_eq!(summary.total_renewal_commission, Decimal::ZERO);
}

#[test]
fn test_seller_commission_through_contador() {
    let report = common::report();
    let oscar = common::seller(&report, "Óscar Lima");
    let carla = oscar.contador("900").expect("contador");

    // Seller's own commission on P2, not the contador's 40
    assert_eq!(seller_commission_on(oscar, carla), dec!(20));
}

#[test]
fn test_detail_rows_add_up_to_seller_total() {
    let report = common::report();
    for seller in &report.sellers {
        let rows = Scope::Seller(seller).detail_rows();
        let total: Decimal = rows.iter().map(|r| r.seller_commission).sum();
        assert_eq!(total, seller.total_commission, "seller {}", seller.name);
        assert_eq!(rows.len(), seller.sales.len(), "seller {}", seller.name);
    }
}

#[test]
fn test_seller_detail_rows_direct_first() {
    let report = common::report();
    let oscar = common::seller(&report, "Óscar Lima");
    let rows = Scope::Seller(oscar).detail_rows();

    let layout: Vec<(&str, Attribution)> = rows.iter().map(|r| (r.order_id, r.attribution)).collect();
    assert_eq!(
        layout,
        [
            ("P1", Attribution::Direct),
            ("P3", Attribution::Direct),
            ("P2", Attribution::Contador("Carla Contábil")),
        ]
    );

    let p2 = &rows[2];
    assert_eq!(p2.seller_commission, dec!(20));
    assert_eq!(p2.contador_commission, Some(dec!(40)));
    assert_eq!(p2.renewal_commission, dec!(5));
    assert!(p2.is_renewal);
}

#[test]
fn test_report_detail_table() {
    let report = common::report();
    let table = Scope::Report(&report).detail_table(RenewalVisibility::Shown);

    assert_eq!(table.headers.len(), 10);
    assert_eq!(table.headers[1], "Contador / Vendas Diretas");
    // Óscar's three sales, Ana's one, Bruno none
    assert_eq!(table.rows.len(), 4);
    for row in &table.rows {
        assert_eq!(row.len(), table.headers.len());
    }

    let direct = &table.rows[0];
    assert_eq!(direct[1], Cell::text("Vendas Diretas"));
    assert_eq!(direct[5], Cell::text("Não"));
    assert_eq!(direct[8], Cell::Blank);

    let hidden = Scope::Report(&report).detail_table(RenewalVisibility::Hidden);
    assert_eq!(hidden.headers.len(), 9);
    assert!(hidden.rows.iter().all(|r| r.len() == 9));
}

#[test]
fn test_report_summary_order() {
    let report = common::report();
    let rows = summary_rows(&report.sellers, report.renewal_partner.as_ref());

    let layout: Vec<(&str, Role)> = rows.iter().map(|r| (r.name, r.role)).collect();
    assert_eq!(
        layout,
        [
            ("Renova Parceiros", Role::RenewalPartner),
            ("Ana Souza", Role::Seller),
            ("Bruno", Role::Seller),
            ("Óscar Lima", Role::Seller),
            ("Carla Contábil", Role::Contador),
        ]
    );

    let partner = &rows[0];
    assert_eq!(partner.sale_count, 2);
    assert_eq!(partner.seller_commission, None);
    assert_eq!(partner.renewal_commission, dec!(10));

    let carla = &rows[4];
    assert_eq!(carla.parent, Some("Óscar Lima"));
    assert_eq!(carla.seller_commission, Some(dec!(20)));
    assert_eq!(carla.contador_commission, Some(dec!(40)));
}

#[test]
fn test_summary_table_blank_cells() {
    let report = common::report();
    let table = Scope::Report(&report).summary_table(RenewalVisibility::Shown);

    assert_eq!(table.headers.len(), 8);
    let partner = &table.rows[0];
    assert_eq!(partner[1], Cell::text("Parceiro de Renovação"));
    assert_eq!(partner[2], Cell::text(""));
    assert_eq!(partner[3], Cell::Count(2));
    assert_eq!(partner[5], Cell::Blank);
    assert_eq!(partner[6], Cell::Blank);
    assert_eq!(partner[7], Cell::Amount(dec!(10)));
}

#[test]
fn test_contador_scope_tables() {
    let report = common::report();
    let oscar = common::seller(&report, "Óscar Lima");
    let carla = oscar.contador("900").expect("contador");
    let scope = Scope::Contador {
        seller: oscar,
        contador: carla,
    };

    let detail = scope.detail_table(RenewalVisibility::Hidden);
    assert_eq!(detail.rows.len(), 1);
    assert_eq!(detail.rows[0][0], Cell::text("Óscar Lima"));
    assert_eq!(detail.rows[0][7], Cell::Amount(dec!(20)));

    let summary = scope.summary_table(RenewalVisibility::Hidden);
    assert_eq!(summary.headers.len(), 7);
    assert_eq!(summary.rows.len(), 1);
    assert_eq!(summary.rows[0][0], Cell::text("Carla Contábil"));
}

#[test]
fn test_renewal_partner_scope() {
    let report = common::report();
    let partner = report.renewal_partner.as_ref().expect("partner");
    let scope = Scope::RenewalPartner(partner);

    let detail = scope.detail_rows();
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0].order_id, "P2");
    assert_eq!(detail[0].seller_commission, dec!(20));

    let summary = scope.summary_table(RenewalVisibility::Shown);
    assert_eq!(summary.rows.len(), 3);
    assert_eq!(summary.rows[0][0], Cell::text("Renova Parceiros"));
}

#[test]
fn test_empty_report_projects_nothing() {
    let report = comissao::models::ComissaoResponse::default();
    let scope = Scope::Report(&report);
    assert!(scope.detail_table(RenewalVisibility::Shown).is_empty());
    assert!(scope.summary_table(RenewalVisibility::Shown).is_empty());
}
