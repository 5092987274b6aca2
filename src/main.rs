use std::path::PathBuf;

use chrono::Local;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use comissao::ComissaoError;
use comissao::client::{CalculationRequest, ComissaoClient, Period};
use comissao::config::fetch_config;
use comissao::export::export_report;
use comissao::models::ComissaoResponse;
use comissao::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use comissao::tui::{Action, App, Message, render, restore_terminal, setup_terminal};
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "comissao")]
#[command(about = "Browse or export a commission hierarchy report")]
#[command(subcommand_negates_reqs = true)]
struct Args {
    /// Report JSON saved from the commission service
    #[arg(required = true)]
    report: Option<PathBuf>,

    /// Write the full-report workbook and exit instead of opening the browser
    #[arg(long, global = true)]
    export: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload the CSV files and compute the report on the service
    Fetch {
        /// Sales CSV
        vendas: PathBuf,

        /// Renewal partners CSV
        parceiros: PathBuf,

        /// Period start, DD/MM/YYYY
        inicio: String,

        /// Period end, DD/MM/YYYY
        fim: String,
    },
}

/// Where the report comes from, kept around so it can be reloaded.
enum Source {
    File(PathBuf),
    Service {
        client: ComissaoClient,
        request: CalculationRequest,
    },
}

impl Source {
    async fn load(&self) -> Result<ComissaoResponse, ComissaoError> {
        match self {
            Source::File(path) => ComissaoResponse::load(path),
            Source::Service { client, request } => client.calculate(request).await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), ComissaoError> {
    let args = Args::parse();
    let app_config = fetch_config()?;

    let source = match (args.command, args.report) {
        (
            Some(Command::Fetch {
                vendas,
                parceiros,
                inicio,
                fim,
            }),
            _,
        ) => Source::Service {
            client: ComissaoClient::new(&app_config.service)?,
            request: CalculationRequest {
                sales_csv: vendas,
                partners_csv: parceiros,
                period: Period::parse(&inicio, &fim)?,
            },
        },
        (None, Some(path)) => Source::File(path),
        (None, None) => Args::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a report path or the fetch subcommand is required",
            )
            .exit(),
    };

    let output_dir = app_config.export.output_dir;
    let export_date = Local::now().date_naive();

    if args.export {
        // Logging only outside the browser; it would draw over the TUI
        tracing_subscriber::fmt::init();
        let report = source.load().await?;
        let path = export_report(&report, export_date)?.save(&output_dir)?;
        println!("{}", path.display());
        return Ok(());
    }

    let report = source.load().await?;
    let mut app = App::new(report, output_dir, export_date);
    run_browser(&mut app, source).await
}

async fn run_browser(app: &mut App, source: Source) -> Result<(), ComissaoError> {
    let mut terminal = setup_terminal()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), 250);

    let source = std::sync::Arc::new(source);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| render(frame, app)) {
            break Err(ComissaoError::Io(format!("failed to draw: {e}")));
        }

        let Some(message) = rx.recv().await else {
            break Ok(());
        };

        match update(app, message) {
            Some(Action::Save(artifact)) => {
                let message = match artifact.save(&app.output_dir) {
                    Ok(path) => Message::Exported(path),
                    Err(e) => Message::Failed(format!("falha ao salvar: {e}")),
                };
                if tx.send(message).is_err() {
                    tracing::debug!("event channel closed, dropping save result");
                }
            }
            Some(Action::Reload) => {
                let tx = tx.clone();
                let source = std::sync::Arc::clone(&source);
                tokio::spawn(async move {
                    let message = match source.load().await {
                        Ok(report) => Message::ReportLoaded(Box::new(report)),
                        Err(e) => Message::Failed(format!("falha ao recarregar: {e}")),
                    };
                    if tx.send(message).is_err() {
                        tracing::debug!("event channel closed, dropping reloaded report");
                    }
                });
            }
            None => {}
        }

        if app.should_quit {
            break Ok(());
        }
    };

    restore_terminal(&mut terminal)?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_path_with_export() {
        let args = Args::try_parse_from(["comissao", "report.json", "--export"]).unwrap();
        assert_eq!(args.report, Some(PathBuf::from("report.json")));
        assert!(args.export);
        assert!(args.command.is_none());
    }

    #[test]
    fn parses_fetch_with_trailing_export() {
        let args = Args::try_parse_from([
            "comissao",
            "fetch",
            "vendas.csv",
            "parceiros.csv",
            "01/01/2025",
            "31/01/2025",
            "--export",
        ])
        .unwrap();
        assert!(args.export);
        assert!(args.report.is_none());
        match args.command {
            Some(Command::Fetch { vendas, inicio, .. }) => {
                assert_eq!(vendas, PathBuf::from("vendas.csv"));
                assert_eq!(inicio, "01/01/2025");
            }
            None => panic!("expected fetch"),
        }
    }

    #[test]
    fn rejects_missing_report() {
        assert!(Args::try_parse_from(["comissao"]).is_err());
        assert!(Args::try_parse_from(["comissao", "--export"]).is_err());
    }

    #[test]
    fn rejects_incomplete_fetch() {
        assert!(Args::try_parse_from(["comissao", "fetch", "vendas.csv", "parceiros.csv"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }
}
