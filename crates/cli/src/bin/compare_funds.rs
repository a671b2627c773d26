use anyhow::{Result, anyhow};
use clap::Parser;
use dashboard_engine::{RecordFilter, compare_funds, fund_names, load_dataset, source_for};
use models::DatasetKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "compare-funds", about = "Report the stock overlap between two funds.")]
struct Args {
    /// First fund, exactly as it appears in the holdings file
    #[arg(long)]
    fund_a: String,

    /// Second fund
    #[arg(long)]
    fund_b: String,

    /// Settings file with dataset locations (defaults to settings.json when present)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Only compare stocks whose name or ticker contains this text
    #[arg(long, default_value = "")]
    search: String,

    /// Only compare holdings of this classification (repeatable)
    #[arg(long = "classification")]
    classifications: Vec<String>,

    /// Only compare holdings in this sector (repeatable)
    #[arg(long = "sector")]
    sectors: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init();
    let args = Args::parse();

    let settings = settings_loader::load_settings_with_fallback(args.settings.as_ref())?;
    let source = source_for(&settings)?;
    let all_holdings = load_dataset(&source, &settings, DatasetKind::Holdings).await;
    let filter = RecordFilter {
        search: args.search,
        classifications: args.classifications,
        sectors: args.sectors,
    };

    let known = fund_names(&all_holdings);
    for fund in [&args.fund_a, &args.fund_b] {
        if !known.contains(fund) {
            eprintln!("[WARN] fund not found in holdings: {fund}");
        }
    }

    let holdings = filter.apply(&all_holdings);
    let comparison = compare_funds(&holdings, &args.fund_a, &args.fund_b)
        .ok_or_else(|| anyhow!("both --fund-a and --fund-b must be non-empty"))?;
    println!("{}", serde_json::to_string_pretty(&comparison)?);
    if comparison.is_high_overlap() {
        eprintln!("High overlap: the two funds hold many of the same stocks.");
    }
    Ok(())
}
