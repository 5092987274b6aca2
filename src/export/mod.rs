//! Workbook export of the commission report and its subtrees.
//!
//! Every export has two sheets: "Vendas" with the detail rows of the scope
//! and "Resumo" with its summary rows. The export date is passed in and
//! only used in the file name.

pub mod filename;
pub mod workbook;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::models::{ComissaoResponse, ContadorInfo, RenewalPartnerInfo, SellerInfo};
use crate::rows::{RenewalVisibility, Scope};

pub use filename::{Qualifier, sanitize_file_name};
pub use workbook::column_widths;

/// A rendered workbook and the name it should be saved under.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Writes the workbook into `dir` and returns the full path.
    ///
    /// # Errors
    ///
    /// Returns [`ComissaoError::Io`](crate::ComissaoError::Io) if the file
    /// cannot be written.
    pub fn save(&self, dir: &Path) -> crate::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|e| {
            crate::ComissaoError::Io(format!("failed to write {}: {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "export written");
        Ok(path)
    }
}

/// Exports every top-level seller, with the renewal partner in the summary.
pub fn export_report(report: &ComissaoResponse, date: NaiveDate) -> crate::Result<ExportArtifact> {
    render(Scope::Report(report), filename::report_file_name(date))
}

/// Exports one seller, renewal column included wherever the seller sits
/// in the tree.
pub fn export_seller(seller: &SellerInfo, date: NaiveDate) -> crate::Result<ExportArtifact> {
    render(
        Scope::Seller(seller),
        filename::entity_file_name(Qualifier::Seller, &seller.name, date),
    )
}

pub fn export_contador(
    seller: &SellerInfo,
    contador: &ContadorInfo,
    date: NaiveDate,
) -> crate::Result<ExportArtifact> {
    render(
        Scope::Contador { seller, contador },
        filename::entity_file_name(Qualifier::Contador, &contador.name, date),
    )
}

pub fn export_renewal_partner(
    partner: &RenewalPartnerInfo,
    date: NaiveDate,
) -> crate::Result<ExportArtifact> {
    render(
        Scope::RenewalPartner(partner),
        filename::entity_file_name(Qualifier::RenewalPartner, &partner.name, date),
    )
}

/// Exports whatever `scope` covers, choosing the file name from its kind.
///
/// Workbooks always carry the renewal column; hiding it is a tree display
/// choice only.
pub fn export_scope(scope: Scope<'_>, date: NaiveDate) -> crate::Result<ExportArtifact> {
    match scope {
        Scope::Report(report) => export_report(report, date),
        Scope::Seller(seller) => export_seller(seller, date),
        Scope::Contador { seller, contador } => export_contador(seller, contador, date),
        Scope::RenewalPartner(partner) => export_renewal_partner(partner, date),
    }
}

fn render(scope: Scope<'_>, file_name: String) -> crate::Result<ExportArtifact> {
    let detail = scope.detail_table(RenewalVisibility::Shown);
    let summary = scope.summary_table(RenewalVisibility::Shown);
    tracing::debug!(
        file_name = %file_name,
        detail_rows = detail.rows.len(),
        summary_rows = summary.rows.len(),
        "rendering workbook"
    );
    let bytes = workbook::build_workbook(&detail, &summary)?;
    Ok(ExportArtifact { file_name, bytes })
}
