//! Client for the commission calculation service.
//!
//! The service takes the sales and partners CSV exports plus a period and
//! answers with the full [`ComissaoResponse`] hierarchy.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use tracing::info;

use crate::Result;
use crate::config::ServiceConfig;
use crate::models::ComissaoResponse;

const CALCULATE_PATH: &str = "/calcular-comissao/";
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Reporting period, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Parses a period from two `DD/MM/YYYY` dates.
    ///
    /// # Errors
    ///
    /// Returns [`ComissaoError::InvalidDate`](crate::ComissaoError::InvalidDate)
    /// if either date is malformed or `start` is after `end`.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        if start > end {
            return Err(crate::ComissaoError::InvalidDate(format!(
                "start {} is after end {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        crate::ComissaoError::InvalidDate(format!("{s:?} is not a DD/MM/YYYY date: {e}"))
    })
}

/// Inputs of one calculation.
#[derive(Clone, Debug)]
pub struct CalculationRequest {
    pub sales_csv: PathBuf,
    pub partners_csv: PathBuf,
    pub period: Period,
}

/// HTTP client bound to one calculation service.
#[derive(Clone, Debug)]
pub struct ComissaoClient {
    http: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

impl ComissaoClient {
    /// # Errors
    ///
    /// Returns [`ComissaoError::Http`](crate::ComissaoError::Http) if the
    /// HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{CALCULATE_PATH}", self.api_url)
    }

    /// Uploads both CSV files and returns the computed report.
    ///
    /// # Errors
    ///
    /// Returns a [`ComissaoError`](crate::ComissaoError) if:
    /// - either CSV file cannot be read
    /// - the HTTP request fails
    /// - the service answers with a non-success status (its `detail`
    ///   message is carried in [`ComissaoError::Service`](crate::ComissaoError::Service))
    /// - the response body is not a valid report
    pub async fn calculate(&self, request: &CalculationRequest) -> Result<ComissaoResponse> {
        let form = Form::new()
            .part("vendas_file", csv_part(&request.sales_csv).await?)
            .part("parceiros_file", csv_part(&request.partners_csv).await?)
            .text(
                "data_inicio",
                request.period.start.format(DATE_FORMAT).to_string(),
            )
            .text("data_fim", request.period.end.format(DATE_FORMAT).to_string());

        let url = self.endpoint();
        info!(%url, "requesting commission calculation");

        let mut builder = self.http.post(&url).multipart(form);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(service_error(status.as_u16(), &body));
        }

        let report = ComissaoResponse::from_json(&body)?;
        info!(
            sellers = report.sellers.len(),
            renewal_partner = report.renewal_partner.is_some(),
            "received commission report"
        );
        Ok(report)
    }
}

async fn csv_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        crate::ComissaoError::Io(format!("failed to read {}: {e}", path.display()))
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());
    Ok(Part::bytes(bytes).file_name(file_name).mime_str("text/csv")?)
}

/// Builds the error for a rejected request, preferring the service's
/// `detail` message over the raw body.
fn service_error(status: u16, body: &str) -> crate::ComissaoError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string());
    crate::ComissaoError::Service { status, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_period() {
        let period = Period::parse("01/01/2025", "31/01/2025").unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn single_day_period_is_valid() {
        assert!(Period::parse("15/03/2025", "15/03/2025").is_ok());
    }

    #[test]
    fn rejects_inverted_period() {
        let err = Period::parse("31/01/2025", "01/01/2025").unwrap_err();
        assert!(matches!(err, crate::ComissaoError::InvalidDate(_)));
    }

    #[test]
    fn rejects_iso_and_garbage_dates() {
        assert!(Period::parse("2025-01-01", "31/01/2025").is_err());
        assert!(Period::parse("01/01/2025", "31/02/2025").is_err());
        assert!(Period::parse("", "31/01/2025").is_err());
    }

    #[test]
    fn service_error_uses_detail() {
        let err = service_error(400, r#"{"detail": "Datas inválidas. Use o formato DD/MM/YYYY"}"#);
        match err {
            crate::ComissaoError::Service { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Datas inválidas. Use o formato DD/MM/YYYY");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn service_error_falls_back_to_body() {
        let err = service_error(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "service error (502): Bad Gateway");
    }

    #[test]
    fn endpoint_joins_base_url() {
        let client = ComissaoClient::new(&ServiceConfig {
            api_url: "https://comissao.example.com".to_string(),
            api_token: None,
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://comissao.example.com/calcular-comissao/"
        );
    }

    #[tokio::test]
    async fn missing_csv_is_io_error() {
        let err = csv_part(Path::new("/nonexistent/vendas.csv")).await.unwrap_err();
        assert!(matches!(err, crate::ComissaoError::Io(_)));
    }
}
