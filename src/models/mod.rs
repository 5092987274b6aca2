//! Commission hierarchy models.
//!
//! Mirrors the JSON document returned by the commission calculation
//! service: sellers, their contadores, the sales underneath each, and the
//! optional renewal partner with its own parallel seller tree. Amounts are
//! [`Decimal`]; wire names are kept through `serde(rename)`.

pub mod sale;
pub mod seller;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use sale::SaleInfo;
pub use seller::{ContadorInfo, SellerInfo};

/// Partner earning commission on renewal sales, over a copy of the seller
/// tree restricted to those sales.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenewalPartnerInfo {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cnpj_cpf")]
    pub document_id: String,
    #[serde(rename = "faixa_comissao")]
    pub bracket: String,
    #[serde(rename = "total_vendas")]
    pub total_value: Decimal,
    /// Renewal commission earned by the partner.
    #[serde(rename = "total_comissao")]
    pub total_commission: Decimal,
    #[serde(default)]
    pub sellers: Vec<SellerInfo>,
}

impl RenewalPartnerInfo {
    /// Number of sales under the partner: each seller's own list plus all of
    /// its contadores' lists.
    pub fn sale_count(&self) -> usize {
        self.sellers
            .iter()
            .map(|s| s.sales.len() + s.contadores.iter().map(|c| c.sales.len()).sum::<usize>())
            .sum()
    }
}

/// Root of a computed commission report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ComissaoResponse {
    #[serde(default)]
    pub sellers: Vec<SellerInfo>,
    #[serde(rename = "parceiro_renovacao", default)]
    pub renewal_partner: Option<RenewalPartnerInfo>,
}

impl ComissaoResponse {
    /// True when the period produced neither sellers nor a renewal partner.
    pub fn is_empty(&self) -> bool {
        self.sellers.is_empty() && self.renewal_partner.is_none()
    }

    /// Parses a report from the service's JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`ComissaoError::Json`](crate::ComissaoError::Json) if the
    /// document does not match the model.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a report from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &std::path::Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::ComissaoError::Io(format!("failed to read {}: {e}", path.display()))
        })?;
        let report = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            sellers = report.sellers.len(),
            renewal_partner = report.renewal_partner.is_some(),
            "loaded commission report"
        );
        Ok(report)
    }
}
