//! Summary rows: one per renewal partner, seller and contador.

use rust_decimal::Decimal;

use crate::collate;
use crate::models::{ContadorInfo, RenewalPartnerInfo, SellerInfo};
use crate::reconcile::seller_commission_on;

use super::{Cell, RenewalVisibility};

const SUMMARY_HEADERS: [&str; 8] = [
    "Nome",
    "Tipo",
    "Vendedor",
    "Nº Vendas",
    "Total Vendas",
    "Comissão do Vendedor",
    "Comissão do Contador",
    "Comissão de Renovação",
];

/// Reduced layout used when exporting a single contador.
pub const CONTADOR_SUMMARY_HEADERS: [&str; 7] = [
    "Nome",
    "Tipo",
    "Vendedor",
    "Nº Vendas",
    "Total Vendas",
    "Comissão do Vendedor",
    "Comissão do Contador",
];

/// Column names of the "Resumo" sheet.
pub fn summary_headers(visibility: RenewalVisibility) -> Vec<&'static str> {
    let len = if visibility.is_shown() {
        SUMMARY_HEADERS.len()
    } else {
        SUMMARY_HEADERS.len() - 1
    };
    SUMMARY_HEADERS[..len].to_vec()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    RenewalPartner,
    Seller,
    Contador,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::RenewalPartner => "Parceiro de Renovação",
            Role::Seller => "Vendedor",
            Role::Contador => "Contador",
        }
    }
}

/// One node of the hierarchy with its aggregates.
///
/// `seller_commission` and `contador_commission` are `None` where the
/// column does not apply to the role and render as blank cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryRow<'a> {
    pub name: &'a str,
    pub role: Role,
    /// Owning seller, set on contador rows only.
    pub parent: Option<&'a str>,
    pub sale_count: usize,
    pub total_value: Decimal,
    pub seller_commission: Option<Decimal>,
    pub contador_commission: Option<Decimal>,
    pub renewal_commission: Decimal,
}

impl<'a> SummaryRow<'a> {
    pub fn renewal_partner(partner: &'a RenewalPartnerInfo) -> Self {
        Self {
            name: &partner.name,
            role: Role::RenewalPartner,
            parent: None,
            sale_count: partner.sale_count(),
            total_value: partner.total_value,
            seller_commission: None,
            contador_commission: None,
            renewal_commission: partner.total_commission,
        }
    }

    pub fn seller(seller: &'a SellerInfo) -> Self {
        Self {
            name: &seller.name,
            role: Role::Seller,
            parent: None,
            sale_count: seller.sales.len(),
            total_value: seller.total_value,
            seller_commission: Some(seller.total_commission),
            contador_commission: None,
            renewal_commission: seller.total_renewal_commission,
        }
    }

    pub fn contador(seller: &'a SellerInfo, contador: &'a ContadorInfo) -> Self {
        Self {
            name: &contador.name,
            role: Role::Contador,
            parent: Some(&seller.name),
            sale_count: contador.sales.len(),
            total_value: contador.total_value,
            seller_commission: Some(seller_commission_on(seller, contador)),
            contador_commission: Some(contador.total_commission),
            renewal_commission: contador.total_renewal_commission,
        }
    }

    /// Renders the row in [`summary_headers`] order.
    pub fn cells(&self, visibility: RenewalVisibility) -> Vec<Cell> {
        let mut cells = vec![
            Cell::text(self.name),
            Cell::text(self.role.label()),
            Cell::text(self.parent.unwrap_or("")),
            Cell::Count(self.sale_count),
            Cell::Amount(self.total_value),
            Cell::optional_amount(self.seller_commission),
            Cell::optional_amount(self.contador_commission),
        ];
        if visibility.is_shown() {
            cells.push(Cell::Amount(self.renewal_commission));
        }
        cells
    }
}

/// Summary rows for a scope: the renewal partner first when given, then
/// sellers in collated name order, each followed by its contadores.
pub fn summary_rows<'a>(
    sellers: &'a [SellerInfo],
    renewal_partner: Option<&'a RenewalPartnerInfo>,
) -> Vec<SummaryRow<'a>> {
    let mut sorted: Vec<&SellerInfo> = sellers.iter().collect();
    collate::sort_by_name(&mut sorted, |s| s.name.as_str());

    let mut rows = Vec::new();
    if let Some(partner) = renewal_partner {
        rows.push(SummaryRow::renewal_partner(partner));
    }
    for seller in sorted {
        rows.push(SummaryRow::seller(seller));
        rows.extend(
            seller
                .contadores
                .iter()
                .map(|contador| SummaryRow::contador(seller, contador)),
        );
    }
    rows
}

/// The single row of a contador export's "Resumo" sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContadorSummaryRow<'a> {
    pub name: &'a str,
    pub seller: &'a str,
    pub sale_count: usize,
    pub total_value: Decimal,
    pub seller_commission: Decimal,
    pub contador_commission: Decimal,
}

impl<'a> ContadorSummaryRow<'a> {
    pub fn new(seller: &'a SellerInfo, contador: &'a ContadorInfo) -> Self {
        Self {
            name: &contador.name,
            seller: &seller.name,
            sale_count: contador.sales.len(),
            total_value: contador.total_value,
            seller_commission: seller_commission_on(seller, contador),
            contador_commission: contador.total_commission,
        }
    }

    pub fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.name),
            Cell::text(Role::Contador.label()),
            Cell::text(self.seller),
            Cell::Count(self.sale_count),
            Cell::Amount(self.total_value),
            Cell::Amount(self.seller_commission),
            Cell::Amount(self.contador_commission),
        ]
    }
}
