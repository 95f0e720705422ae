//! Command line interface

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::info;

use crate::api::AppState;
use crate::config::TravelRecConfig;
use crate::error::TravelRecError;
use crate::loader::{self, DatasetHandle};
use crate::presenter::{Presenter, text};
use crate::session::{SearchOutcome, Session};
use crate::web;

/// Find beaches, temples and countries to visit
#[derive(Debug, Parser)]
#[command(name = "travelrec", version, about)]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, env = "TRAVELREC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dataset URL or file, overriding `data.source`
    #[arg(short, long)]
    pub data: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a single search and print the results
    Search {
        /// Query text; several words are joined with spaces
        #[arg(required = true)]
        query: Vec<String>,

        /// Print cards as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive search prompt
    Repl,
    /// Serve the search page and JSON API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn dataset_source(config: &TravelRecConfig) -> Result<Box<dyn loader::DatasetSource>> {
    let timeout = Duration::from_secs(config.data.timeout_seconds.into());
    loader::source_for(&config.data.source, timeout)
        .map_err(TravelRecError::from)
        .context("Failed to set up the dataset source")
}

/// Execute the parsed command line
pub async fn run(cli: Cli, mut config: TravelRecConfig) -> Result<()> {
    match cli.command {
        Some(Commands::Search { query, json }) => search(&config, &query.join(" "), json).await,
        Some(Commands::Repl) => repl(&config).await,
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(&config).await
        }
        None => {
            println!("travelrec {}", crate::VERSION);
            println!("Run `travelrec search <QUERY>`, `travelrec repl` or `travelrec serve`.");
            println!();
            println!("Effective configuration:");
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn search(config: &TravelRecConfig, query: &str, as_json: bool) -> Result<()> {
    let handle = DatasetHandle::new();
    let source = dataset_source(config)?;
    loader::load(source.as_ref(), &handle)
        .await
        .map_err(TravelRecError::from)?;

    let mut session = Session::new(handle, Presenter::from_config(&config.presentation));
    let now = Utc::now();
    let outcome = session.submit(query, now);

    if as_json {
        let message = session.page().visible_message(now).map(|m| m.text.clone());
        let output = json!({
            "query": session.page().query(),
            "count": session.page().cards().len(),
            "cards": session.page().cards(),
            "message": message,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", text::page(session.page(), now));
    }

    match outcome {
        SearchOutcome::EmptyQuery => {
            Err(TravelRecError::validation("query must not be empty").into())
        }
        _ => Ok(()),
    }
}

async fn repl(config: &TravelRecConfig) -> Result<()> {
    let handle = DatasetHandle::new();
    loader::spawn_load(dataset_source(config)?, handle.clone());

    let mut session = Session::new(handle, Presenter::from_config(&config.presentation));
    repl_loop(&mut session, tokio::io::stdin(), &mut std::io::stdout()).await
}

/// Read queries line by line until `:quit` or end of input
async fn repl_loop<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut lines = BufReader::new(input).lines();

    writeln!(out, "Search for beaches, temples or countries. `:clear` resets, `:quit` exits.")
        .map_err(TravelRecError::from)?;

    loop {
        write!(out, "> ").map_err(TravelRecError::from)?;
        out.flush().map_err(TravelRecError::from)?;

        let Some(line) = lines.next_line().await.map_err(TravelRecError::from)? else {
            break;
        };
        let now = Utc::now();

        match line.trim() {
            ":quit" | ":q" => break,
            ":clear" => {
                session.clear();
                writeln!(out, "Cleared.").map_err(TravelRecError::from)?;
                continue;
            }
            _ => {}
        }

        if !session.report_load_failure(now) {
            session.submit(&line, now);
        }
        write!(out, "{}", text::page(session.page(), now)).map_err(TravelRecError::from)?;
    }

    Ok(())
}

async fn serve(config: &TravelRecConfig) -> Result<()> {
    let handle = DatasetHandle::new();
    loader::spawn_load(dataset_source(config)?, handle.clone());

    let state = AppState::new(handle, Presenter::from_config(&config.presentation));
    info!("Serving travel recommendations from {}", config.data.source);
    web::run(&config.server, state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["travelrec", "search", "beach", "temple", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Search { query, json }) => {
                assert_eq!(query.join(" "), "beach temple");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["travelrec", "--data", "data.json", "serve", "--port", "9000"]).unwrap();
        assert_eq!(cli.data.as_deref(), Some("data.json"));
        assert!(matches!(
            cli.command,
            Some(Commands::Serve {
                host: None,
                port: Some(9000)
            })
        ));
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["travelrec", "search"]).is_err());
    }

    #[tokio::test]
    async fn test_search_command_with_file_source() {
        let mut config = TravelRecConfig::default();
        config.data.source = concat!(env!("CARGO_MANIFEST_DIR"), "/data/travel_recommendation_api.json").to_string();

        assert!(search(&config, "temple", true).await.is_ok());
        assert!(search(&config, "   ", false).await.is_err());
    }

    fn ready_session() -> Session {
        let handle = DatasetHandle::new();
        handle
            .publish(crate::models::fixtures::sample_dataset())
            .unwrap();
        Session::new(handle, Presenter::default())
    }

    #[tokio::test]
    async fn test_repl_searches_clears_and_quits() {
        let mut session = ready_session();
        let mut out = Vec::new();

        repl_loop(&mut session, &b"temple\n:clear\n:quit\nbeach\n"[..], &mut out)
            .await
            .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Found 2 recommendation(s):"));
        assert!(output.contains("Angkor Wat, Cambodia"));
        assert!(output.contains("Cleared."));
        assert!(!output.contains("Bora Bora"));
        assert_eq!(session.page(), &crate::session::Page::default());
    }

    #[tokio::test]
    async fn test_repl_shows_load_failure() {
        let handle = DatasetHandle::new();
        handle.record_failure("HTTP 500");
        let mut session = Session::new(handle, Presenter::default());
        let mut out = Vec::new();

        repl_loop(&mut session, &b"beach\n"[..], &mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Error loading travel recommendations. Please refresh the page."));
    }

    #[tokio::test]
    async fn test_repl_output_error_is_io() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut session = ready_session();
        let err = repl_loop(&mut session, &b""[..], &mut Closed).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TravelRecError>(),
            Some(TravelRecError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_command_missing_file() {
        let mut config = TravelRecConfig::default();
        config.data.source = "/nonexistent/travel.json".to_string();

        let err = search(&config, "beach", false).await.unwrap_err();
        assert!(err.downcast_ref::<TravelRecError>().is_some());
    }
}
