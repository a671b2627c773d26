use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "fetch-holdings",
    about = "Fetch a holdings CSV and print its normalized records as JSON."
)]
struct Args {
    /// Absolute URL, or a path relative to --base-url (or to the current directory)
    location: String,

    /// Base URL for relative locations; defaults to HOLDINGS_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init();
    let args = Args::parse();

    let base_url = args
        .base_url
        .or_else(|| std::env::var(settings_loader::ENV_BASE_URL).ok())
        .filter(|v| !v.trim().is_empty());
    let source = holdings_csv::HttpSource::new(base_url.as_deref())?;

    let records = source
        .fetch_csv(&args.location)
        .await
        .with_context(|| format!("fetching {}", args.location))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{json}");
    Ok(())
}
