use anyhow::{Context, Result};
use dashboard_engine::{
    RecordFilter, load_datasets, source_for, summarize_filtered, write_summary_json,
};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init();

    let settings = env::args()
        .position(|a| a == "--settings")
        .and_then(|i| env::args().nth(i + 1))
        .map(PathBuf::from);
    let out = env::args()
        .position(|a| a == "--out")
        .and_then(|i| env::args().nth(i + 1))
        .unwrap_or("dashboard/summary.json".to_string());
    let limit: usize = env::args()
        .position(|a| a == "--limit")
        .and_then(|i| env::args().nth(i + 1))
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let list = |flag: &str| -> Vec<String> {
        env::args()
            .position(|a| a == flag)
            .and_then(|i| env::args().nth(i + 1))
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    };
    let filter = RecordFilter {
        search: env::args()
            .position(|a| a == "--search")
            .and_then(|i| env::args().nth(i + 1))
            .unwrap_or_default(),
        classifications: list("--classification"),
        sectors: list("--sector"),
    };

    let settings = settings_loader::load_settings_with_fallback(settings.as_ref())
        .context("load settings")?;
    let out_path = PathBuf::from(&out);

    println!(
        "Generating summary...\n  holdings: {}\n  buys    : {}\n  sells   : {}\n  output  : {}",
        settings.holdings_url,
        settings.buys_url,
        settings.sells_url,
        out_path.display()
    );

    let source = source_for(&settings)?;
    let datasets = load_datasets(&source, &settings).await;
    let summary = summarize_filtered(&datasets, limit, &filter);
    write_summary_json(&summary, &out_path).context("write summary.json")?;

    println!("Done. Generated at {}", summary.generated_at);
    Ok(())
}
