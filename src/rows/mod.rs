//! Tabular projections of the commission hierarchy.
//!
//! Two shapes are produced for every scope: [`DetailRow`]s (one per sale)
//! and [`SummaryRow`]s (one per renewal partner, seller and contador).
//! Rows borrow from the report; [`Cell`] is the rendered form consumed by
//! the workbook exporter.

pub mod detail;
pub mod summary;

use std::fmt;

use rust_decimal::Decimal;

use crate::models::{ComissaoResponse, ContadorInfo, RenewalPartnerInfo, SellerInfo};

pub use detail::{Attribution, DetailRow, detail_headers};
pub use summary::{ContadorSummaryRow, Role, SummaryRow, summary_headers};

/// Label used for sales not routed through a contador.
pub const DIRECT_SALES_LABEL: &str = "Vendas Diretas";

/// Whether renewal-commission figures are part of a projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenewalVisibility {
    #[default]
    Shown,
    Hidden,
}

impl RenewalVisibility {
    pub fn is_shown(self) -> bool {
        self == RenewalVisibility::Shown
    }
}

/// A rendered table cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Amount(Decimal),
    Count(usize),
    /// Empty string cell (e.g. contador commission on a direct sale).
    Blank,
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Renders an optional amount as a blank cell when absent.
    pub fn optional_amount(amount: Option<Decimal>) -> Self {
        amount.map_or(Cell::Blank, Cell::Amount)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            // Trailing zeros dropped: 100.00 renders as "100", 10.50 as "10.5".
            Cell::Amount(d) => write!(f, "{}", d.normalize()),
            Cell::Count(n) => write!(f, "{n}"),
            Cell::Blank => Ok(()),
        }
    }
}

/// Headers plus rendered rows, ready to be written as one sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The subtree a projection or export covers.
#[derive(Clone, Copy, Debug)]
pub enum Scope<'a> {
    /// Every top-level seller plus the renewal partner summary row.
    Report(&'a ComissaoResponse),
    Seller(&'a SellerInfo),
    Contador {
        seller: &'a SellerInfo,
        contador: &'a ContadorInfo,
    },
    RenewalPartner(&'a RenewalPartnerInfo),
}

impl<'a> Scope<'a> {
    /// Detail rows of the scope.
    pub fn detail_rows(&self) -> Vec<DetailRow<'a>> {
        match *self {
            Scope::Report(report) => detail::detail_rows(&report.sellers),
            Scope::Seller(seller) => detail::seller_detail_rows(seller),
            Scope::Contador { seller, contador } => detail::contador_detail_rows(seller, contador),
            Scope::RenewalPartner(partner) => detail::detail_rows(&partner.sellers),
        }
    }

    /// "Vendas" sheet content.
    pub fn detail_table(&self, visibility: RenewalVisibility) -> Table {
        Table {
            headers: detail_headers(visibility),
            rows: self
                .detail_rows()
                .iter()
                .map(|row| row.cells(visibility))
                .collect(),
        }
    }

    /// "Resumo" sheet content. The contador scope uses the reduced layout.
    pub fn summary_table(&self, visibility: RenewalVisibility) -> Table {
        match *self {
            Scope::Report(report) => Self::full_summary(
                summary::summary_rows(&report.sellers, report.renewal_partner.as_ref()),
                visibility,
            ),
            Scope::Seller(seller) => Self::full_summary(
                summary::summary_rows(std::slice::from_ref(seller), None),
                visibility,
            ),
            Scope::RenewalPartner(partner) => Self::full_summary(
                summary::summary_rows(&partner.sellers, Some(partner)),
                visibility,
            ),
            Scope::Contador { seller, contador } => Table {
                headers: summary::CONTADOR_SUMMARY_HEADERS.to_vec(),
                rows: vec![ContadorSummaryRow::new(seller, contador).cells()],
            },
        }
    }

    fn full_summary(rows: Vec<SummaryRow<'_>>, visibility: RenewalVisibility) -> Table {
        Table {
            headers: summary_headers(visibility),
            rows: rows.iter().map(|row| row.cells(visibility)).collect(),
        }
    }
}
