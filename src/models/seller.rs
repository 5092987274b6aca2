//! Seller and contador (accounting partner) models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sale::SaleInfo;

/// An accounting partner through whom part of a seller's sales were routed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContadorInfo {
    #[serde(rename = "nome")]
    pub name: String,
    /// CNPJ/CPF, unique among the contadores of one seller.
    #[serde(rename = "cnpj_cpf")]
    pub document_id: String,
    /// Commission bracket label (`Faixa de Comissão`), e.g. `"20%"`.
    #[serde(rename = "faixa_comissao")]
    pub bracket: String,
    #[serde(rename = "total_vendas")]
    pub total_value: Decimal,
    #[serde(rename = "total_comissao")]
    pub total_commission: Decimal,
    #[serde(rename = "total_comissao_renovacao", default)]
    pub total_renewal_commission: Decimal,
    #[serde(rename = "vendas", default)]
    pub sales: Vec<SaleInfo>,
}

/// A top-level commissioned party.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SellerInfo {
    #[serde(rename = "nome")]
    pub name: String,
    /// CNPJ/CPF. Absent for some sellers.
    #[serde(rename = "cnpj_cpf", default)]
    pub document_id: Option<String>,
    #[serde(rename = "faixa_comissao")]
    pub bracket: String,
    #[serde(rename = "total_vendas")]
    pub total_value: Decimal,
    #[serde(rename = "total_comissao")]
    pub total_commission: Decimal,
    #[serde(rename = "total_comissao_renovacao", default)]
    pub total_renewal_commission: Decimal,
    #[serde(rename = "contadores", default)]
    pub contadores: Vec<ContadorInfo>,
    /// Every sale attributed to the seller, including the ones that are
    /// also listed under one of its contadores.
    #[serde(rename = "vendas", default)]
    pub sales: Vec<SaleInfo>,
}

impl SellerInfo {
    /// Looks up a contador of this seller by its document id.
    pub fn contador(&self, document_id: &str) -> Option<&ContadorInfo> {
        self.contadores
            .iter()
            .find(|c| c.document_id == document_id)
    }
}
