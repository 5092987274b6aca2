//! Sale models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single commissioned transaction.
///
/// The same order may appear twice in a report: once in the seller's list
/// (carrying the seller's commission) and once in a contador's list
/// (carrying the contador's commission).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SaleInfo {
    /// Order identifier (`Nº Pedido`), unique within a response.
    #[serde(rename = "numero_pedido")]
    pub order_id: String,
    /// Protocol identifier (`Nº Protocolo`).
    #[serde(rename = "numero_protocolo")]
    pub protocol_id: String,
    #[serde(rename = "valor_venda")]
    pub value: Decimal,
    /// Commission earned by the owner of the list this sale sits in.
    #[serde(rename = "comissao")]
    pub commission: Decimal,
    #[serde(rename = "is_renovacao", default)]
    pub is_renewal: bool,
    /// Only meaningful when `is_renewal` is set.
    #[serde(rename = "comissao_renovacao", default)]
    pub renewal_commission: Decimal,
    #[serde(rename = "produto", default)]
    pub product: Option<String>,
    #[serde(rename = "cliente", default)]
    pub customer: Option<String>,
    #[serde(rename = "doc_cliente", default)]
    pub customer_doc: Option<String>,
}

impl SaleInfo {
    /// Renewal commission counted for this sale: zero unless it is a renewal.
    pub fn effective_renewal_commission(&self) -> Decimal {
        if self.is_renewal {
            self.renewal_commission
        } else {
            Decimal::ZERO
        }
    }
}
