//! Probe every candidate URL of a PDF reference and print the diagnostic report.
//!
//! Origin and timeouts come from the config file and `BOOKSANSAR_*` variables.

use booksansar::shared::{PdfReference, ViewerConfig};
use booksansar::viewer::diagnostics::EnvironmentInfo;
use booksansar::viewer::network_monitor::NetworkMonitor;
use booksansar::viewer::PdfViewer;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Primary PDF URL, absolute or origin-relative
    primary_url: String,

    /// Book id, adds the streaming endpoint
    #[arg(long)]
    id: Option<String>,

    /// Book title, adds the local fallback file
    #[arg(long)]
    title: Option<String>,

    /// Viewer config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn reference(&self) -> PdfReference {
        PdfReference {
            primary_url: self.primary_url.clone(),
            book_id: self.id.clone(),
            book_title: self.title.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ViewerConfig::load(args.config.as_deref())?;
    let viewer = PdfViewer::new(config)?;

    let environment = EnvironmentInfo {
        viewport: None,
        container: None,
        network: NetworkMonitor::new().flags(),
        user_agent: Some(format!("pdf_probe/{}", env!("CARGO_PKG_VERSION"))),
    };
    let report = viewer.diagnose(&args.reference(), environment, None).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }

    if report.reachable_count() == 0 {
        std::process::exit(1);
    }
    Ok(())
}
