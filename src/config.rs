//! Application configuration loaded from environment variables.
//!
//! - `COMISSAO_API_URL`: base URL of the commission calculation service
//!   (defaults to `http://localhost:8000`)
//! - `COMISSAO_API_TOKEN`: optional bearer token sent with requests
//! - `COMISSAO_OUTPUT_DIR`: directory where exported workbooks are written
//!   (defaults to the current directory)

use std::path::PathBuf;

/// Default calculation service endpoint.
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default export directory.
const DEFAULT_OUTPUT_DIR: &str = ".";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub export: ExportConfig,
}

/// Calculation service connection values.
#[derive(Debug)]
pub struct ServiceConfig {
    pub api_url: String,
    pub api_token: Option<String>,
}

/// Workbook export settings.
#[derive(Debug)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

/// Loads the application configuration from environment variables.
///
/// A trailing `/` on `COMISSAO_API_URL` is dropped so endpoint paths can be
/// appended directly.
///
/// # Errors
///
/// Returns [`ComissaoError::Config`](crate::ComissaoError::Config) if the
/// API URL is not an `http://` or `https://` URL.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let api_url = non_empty_var("COMISSAO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(crate::ComissaoError::Config(format!(
            "COMISSAO_API_URL must start with http:// or https://, got {api_url}"
        )));
    }
    let api_url = api_url.trim_end_matches('/').to_string();

    let api_token = non_empty_var("COMISSAO_API_TOKEN");
    let output_dir = non_empty_var("COMISSAO_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    Ok(AppConfig {
        service: ServiceConfig { api_url, api_token },
        export: ExportConfig { output_dir },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
