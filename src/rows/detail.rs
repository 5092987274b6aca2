//! Detail rows: one row per sale.

use rust_decimal::Decimal;

use crate::models::{ContadorInfo, SaleInfo, SellerInfo};
use crate::reconcile::{direct_sales, lookup_seller_commission, seller_commission_index};

use super::{Cell, DIRECT_SALES_LABEL, RenewalVisibility};

const DETAIL_HEADERS: [&str; 10] = [
    "Vendedor",
    "Contador / Vendas Diretas",
    "Nº Pedido",
    "Nº Protocolo",
    "Produto",
    "Renovação",
    "Valor Venda",
    "Comissão do Vendedor",
    "Comissão do Contador",
    "Comissão de Renovação",
];

/// Column names of the "Vendas" sheet.
pub fn detail_headers(visibility: RenewalVisibility) -> Vec<&'static str> {
    let len = if visibility.is_shown() {
        DETAIL_HEADERS.len()
    } else {
        DETAIL_HEADERS.len() - 1
    };
    DETAIL_HEADERS[..len].to_vec()
}

/// Who a sale is attributed to under its seller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribution<'a> {
    Direct,
    Contador(&'a str),
}

impl<'a> Attribution<'a> {
    pub fn label(&self) -> &'a str {
        match self {
            Attribution::Direct => DIRECT_SALES_LABEL,
            Attribution::Contador(name) => name,
        }
    }
}

/// One sale, with both sides of its commission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRow<'a> {
    pub seller: &'a str,
    pub attribution: Attribution<'a>,
    pub order_id: &'a str,
    pub protocol_id: &'a str,
    pub product: &'a str,
    pub is_renewal: bool,
    pub value: Decimal,
    /// Seller's commission, looked up in the seller's list by order id.
    pub seller_commission: Decimal,
    /// Contador's commission; `None` for direct sales.
    pub contador_commission: Option<Decimal>,
    pub renewal_commission: Decimal,
}

impl<'a> DetailRow<'a> {
    fn new(
        seller: &'a SellerInfo,
        attribution: Attribution<'a>,
        sale: &'a SaleInfo,
        seller_commission: Decimal,
        contador_commission: Option<Decimal>,
    ) -> Self {
        Self {
            seller: &seller.name,
            attribution,
            order_id: &sale.order_id,
            protocol_id: &sale.protocol_id,
            product: sale.product.as_deref().unwrap_or(""),
            is_renewal: sale.is_renewal,
            value: sale.value,
            seller_commission,
            contador_commission,
            renewal_commission: sale.effective_renewal_commission(),
        }
    }

    /// Renders the row in [`detail_headers`] order.
    pub fn cells(&self, visibility: RenewalVisibility) -> Vec<Cell> {
        let mut cells = vec![
            Cell::text(self.seller),
            Cell::text(self.attribution.label()),
            Cell::text(self.order_id),
            Cell::text(self.protocol_id),
            Cell::text(self.product),
            Cell::text(if self.is_renewal { "Sim" } else { "Não" }),
            Cell::Amount(self.value),
            Cell::Amount(self.seller_commission),
            Cell::optional_amount(self.contador_commission),
        ];
        if visibility.is_shown() {
            cells.push(Cell::Amount(self.renewal_commission));
        }
        cells
    }
}

/// Detail rows for a sequence of sellers, in the given seller order.
pub fn detail_rows(sellers: &[SellerInfo]) -> Vec<DetailRow<'_>> {
    sellers.iter().flat_map(seller_detail_rows).collect()
}

/// Detail rows of one seller: direct sales first, then each contador's
/// sales in contador order.
pub fn seller_detail_rows(seller: &SellerInfo) -> Vec<DetailRow<'_>> {
    let index = seller_commission_index(seller);
    let mut rows = Vec::with_capacity(seller.sales.len());

    for sale in direct_sales(seller) {
        let seller_commission = lookup_seller_commission(&index, &sale.order_id);
        rows.push(DetailRow::new(
            seller,
            Attribution::Direct,
            sale,
            seller_commission,
            None,
        ));
    }

    for contador in &seller.contadores {
        for sale in &contador.sales {
            let seller_commission = lookup_seller_commission(&index, &sale.order_id);
            rows.push(DetailRow::new(
                seller,
                Attribution::Contador(&contador.name),
                sale,
                seller_commission,
                Some(sale.commission),
            ));
        }
    }

    rows
}

/// Detail rows restricted to one contador of a seller.
pub fn contador_detail_rows<'a>(
    seller: &'a SellerInfo,
    contador: &'a ContadorInfo,
) -> Vec<DetailRow<'a>> {
    let index = seller_commission_index(seller);
    contador
        .sales
        .iter()
        .map(|sale| {
            let seller_commission = lookup_seller_commission(&index, &sale.order_id);
            DetailRow::new(
                seller,
                Attribution::Contador(&contador.name),
                sale,
                seller_commission,
                Some(sale.commission),
            )
        })
        .collect()
}
