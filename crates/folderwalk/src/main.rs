mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use folderwalk_api::{ClientConfig, PanoptoClient};
use folderwalk_core::{ColumnSummary, HarvestOutcome, HarvestRunner, ROOT_FOLDER_ID};
use folderwalk_export::{CsvExporter, DEFAULT_FOLDERS_FILE, DEFAULT_SESSIONS_FILE};
use folderwalk_logging::{init_tracing, LogFormat, Logger};

use crate::config::{FileConfig, Overrides, ResolvedConfig};

#[derive(Parser, Debug)]
#[command(
    name = "folderwalk",
    about = "Export every Panopto folder and session to CSV",
    version,
    author
)]
struct Cli {
    /// Server name as FQDN
    #[arg(long, env = "SERVER")]
    server: Option<String>,

    /// Client ID of the OAuth2 client
    #[arg(long, env = "CLIENT_ID")]
    client_id: Option<String>,

    /// Client secret of the OAuth2 client
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Skip TLS certificate verification (never use against production)
    #[arg(long)]
    skip_verify: bool,

    /// Path to a folderwalk.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the CSV files are written to (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// File name of the folder dataset
    #[arg(long, default_value = DEFAULT_FOLDERS_FILE)]
    folders_file: String,

    /// File name of the session dataset
    #[arg(long, default_value = DEFAULT_SESSIONS_FILE)]
    sessions_file: String,

    /// Folder to start from (default: top level)
    #[arg(long, default_value = ROOT_FOLDER_ID)]
    root_folder: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Tracing level (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Also append every event as JSON to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Output final result as JSON
    #[arg(long)]
    json_output: bool,

    /// Dry run: show the resolved configuration without contacting the server
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_format: LogFormat = cli.log_format.into();
    init_tracing(&cli.log_level, log_format);

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let file_config = match cli.config {
        Some(ref path) => FileConfig::load_from(path)?,
        None => FileConfig::discover(&working_dir)?.unwrap_or_default(),
    };

    let overrides = Overrides {
        server: cli.server.clone(),
        client_id: cli.client_id.clone(),
        client_secret: cli.client_secret.clone(),
        skip_verify: cli.skip_verify,
        output_dir: cli.output_dir.clone(),
    };
    let resolved = ResolvedConfig::resolve(overrides, file_config)?;

    let client_config = ClientConfig::new(
        resolved.server.clone(),
        resolved.client_id.clone(),
        resolved.client_secret.clone(),
    )
    .with_skip_verify(resolved.skip_verify);

    let exporter = CsvExporter::new(resolved.output_dir.clone())
        .with_folders_file(cli.folders_file.clone())
        .with_sessions_file(cli.sessions_file.clone());

    if cli.dry_run {
        println!("=== Dry Run ===");
        println!("Server: {}", client_config.base_url());
        println!("Client: {:?}", client_config);
        println!("Root folder: {}", cli.root_folder);
        println!("Folders file: {}", exporter.folders_path().display());
        println!("Sessions file: {}", exporter.sessions_path().display());
        return Ok(());
    }

    let logger = match cli.log_file {
        Some(ref path) => Logger::with_file(log_format, path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?,
        None => Logger::new(log_format),
    };

    let client = PanoptoClient::new(client_config).context("Failed to create HTTP client")?;
    let runner =
        HarvestRunner::new(&client, &exporter, Arc::new(logger)).with_root(cli.root_folder.clone());

    let outcome = runner.run().await?;

    if cli.json_output {
        let json = serde_json::to_string_pretty(&outcome)?;
        println!("{}", json);
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

fn print_outcome(outcome: &HarvestOutcome) {
    eprintln!();
    eprintln!("=== DONE ===");
    eprintln!("A total of {} folders were received.", outcome.folders);
    print_columns("Folders", outcome.folders, &outcome.folder_columns);
    eprintln!("A total of {} sessions were received.", outcome.sessions);
    print_columns("Sessions", outcome.sessions, &outcome.session_columns);
    for file in &outcome.exported {
        eprintln!("Wrote {} ({} rows)", file.path.display(), file.rows);
    }
    eprintln!("Duration: {:.1}s", outcome.total_duration_secs);
}

fn print_columns(title: &str, rows: usize, columns: &[ColumnSummary]) {
    let width = columns.iter().map(|c| c.column.len()).max().unwrap_or(0);
    eprintln!("{}: {} rows, {} columns", title, rows, columns.len());
    for (index, column) in columns.iter().enumerate() {
        eprintln!(
            "  {:>2}  {:<width$}  {} non-null",
            index,
            column.column,
            column.non_null,
            width = width
        );
    }
}
