use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::Parser;
use media_sales_dashboard::aggregate::{
    breakdown, human_format, monthly_series, summarize, BreakdownParams, CategoryField,
};
use media_sales_dashboard::config::{resolve_breakdown, FileConfig};
use media_sales_dashboard::dataset::{load_dataset, DatasetContext};
use media_sales_dashboard::filter::{filter_dataset, ArtistSelection, FilterCriteria, YearRange};
use rust_decimal::prelude::ToPrimitive;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parses "2009-2013" or a single year "2011".
fn parse_year_range(s: &str) -> Result<YearRange> {
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .with_context(|| format!("Invalid year: {:?}", part))
    };
    match s.split_once('-') {
        Some((lower, upper)) => Ok(YearRange::new(parse(lower)?, parse(upper)?)),
        None => {
            let year = parse(s)?;
            Ok(YearRange::new(year, year))
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cli-report")]
#[command(about = "Print the dashboard figures for a Chinook sales export")]
struct Args {
    /// Path to the Chinook SQLite export
    #[arg(value_name = "DATASET")]
    dataset: PathBuf,

    /// Year range as LOWER-UPPER. Defaults to every year in the dataset.
    #[arg(long, value_parser = parse_year_range)]
    years: Option<YearRange>,

    /// Genre keys, comma separated. Defaults to every genre.
    #[arg(long, value_delimiter = ',')]
    genres: Option<Vec<String>>,

    /// Artist keys, comma separated. Defaults to every artist.
    #[arg(long, value_delimiter = ',')]
    artists: Option<Vec<String>>,

    /// TOML config file. Only its [breakdown] section is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only load and validate the dataset, then print its size
    #[arg(long, default_value_t = false)]
    check_only: bool,
}

fn criteria_from_args(args: &Args, context: &DatasetContext) -> FilterCriteria {
    let genres = match &args.genres {
        Some(keys) => keys.iter().cloned().collect(),
        None => context
            .lookups()
            .genres
            .keys()
            .map(str::to_string)
            .collect(),
    };
    let artists = match &args.artists {
        Some(keys) => keys.iter().cloned().collect(),
        None => ArtistSelection::All,
    };
    FilterCriteria {
        artists,
        genres,
        years: args
            .years
            .unwrap_or_else(|| YearRange::new(context.first_year(), context.last_year())),
    }
}

fn print_check(context: &DatasetContext) {
    let span = context.span();
    println!("rows:          {}", context.len());
    println!("genre keys:    {}", context.lookups().genres.len());
    println!("artist keys:   {}", context.lookups().artists.len());
    println!("invoice dates: {} to {}", span.first, span.last);
}

fn print_report(context: &DatasetContext, criteria: &FilterCriteria, params: &BreakdownParams) {
    let subset = filter_dataset(context, criteria);
    let summary = summarize(&subset);
    let text = summary.to_text();

    println!("Year Selected: {}", criteria.years);
    println!();
    println!("Total sales:  {} ({})", text.sales, summary.total_sales);
    println!("Tracks:       {}", text.tracks);
    println!("Countries:    {}", text.countries);
    println!("Line items:   {}", text.row_count);

    for field in CategoryField::ALL {
        let result = breakdown(&subset, field, params);
        println!();
        println!("{}", field.title());
        for entry in &result.entries {
            let share = if subset.is_empty() {
                0.0
            } else {
                entry.count as f64 * 100.0 / subset.len() as f64
            };
            println!("  {:<32} {:>6} {:>6.1}%", entry.label, entry.count, share);
        }
    }

    println!();
    println!("Monthly revenue");
    let series = monthly_series(&subset, context.span());
    for point in series.points.iter().filter(|p| criteria.years.contains(p.month_end.year())) {
        println!(
            "  {}  {:>10}  {:>5} tracks  {:>3} countries  ({})",
            point.month_end,
            point.revenue.to_string(),
            point.unique_tracks,
            point.unique_countries,
            human_format(point.revenue.to_f64().unwrap_or_default()),
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file_config = args.config.as_deref().map(FileConfig::load).transpose()?;
    let params = resolve_breakdown(file_config.as_ref().and_then(|c| c.breakdown.as_ref()))?;

    if !args.dataset.exists() {
        bail!("Dataset file not found: {}", args.dataset.display());
    }

    info!("Loading {}...", args.dataset.display());
    let context = load_dataset(&args.dataset)
        .with_context(|| format!("Failed to load dataset {}", args.dataset.display()))?;

    if args.check_only {
        print_check(&context);
        return Ok(());
    }

    let criteria = criteria_from_args(&args, &context);
    info!("Filtering with {:?}", criteria);
    print_report(&context, &criteria, &params);
    Ok(())
}
