use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ons_rs::{Client, ClientConfig, DimensionOverrides, Timeseries};
use ons_rs::{stats, storage};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "ons",
    version,
    about = "Discover, slice & fetch ONS time series"
)]
struct Cli {
    #[command(flatten)]
    conn: ConnArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct ConnArgs {
    /// API root URL.
    #[arg(long, global = true, env = "ONS_API_URL", default_value = ons_rs::config::DEFAULT_BASE_URL)]
    base_url: String,
    /// Request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
    /// Preferred dataset edition; falls back to the latest version when absent.
    #[arg(long, global = true, default_value = ons_rs::config::DEFAULT_EDITION)]
    edition: String,
    /// Page size for dimension option requests.
    #[arg(long, global = true, default_value_t = 50)]
    option_limit: usize,
    /// Fetch every page of dimension options instead of only the first.
    #[arg(long, global = true, default_value_t = false)]
    paginate_options: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all available datasets.
    Datasets,
    /// Show the valid options for every dimension of a dataset.
    Dimensions {
        /// Dataset title or part of it (case-insensitive).
        name: String,
    },
    /// Fetch a time series (and optionally save it and print stats).
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Debug)]
enum SortKey {
    Year,
    Id,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Dataset title or part of it (case-insensitive).
    name: String,
    /// Dimension choice as NAME=OPTION; repeatable (e.g. -d sex=all-adults).
    #[arg(short = 'd', long = "dim", value_parser = parse_dim)]
    dims: Vec<(String, String)>,
    /// Sort rows before printing/saving (API order otherwise).
    #[arg(long, value_enum)]
    sort: Option<SortKey>,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn parse_dim(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.trim().to_string())),
        _ => Err(format!("expected NAME=OPTION, got '{}'", s)),
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ClientConfig::default()
        .with_base_url(cli.conn.base_url)
        .with_timeout(Duration::from_secs(cli.conn.timeout))
        .with_preferred_edition(cli.conn.edition)
        .with_option_page_limit(cli.conn.option_limit)
        .with_paginate_options(cli.conn.paginate_options);
    let client = Client::new(config)?;
    match cli.cmd {
        Command::Datasets => cmd_datasets(&client),
        Command::Dimensions { name } => cmd_dimensions(&client, &name),
        Command::Get(args) => cmd_get(&client, args),
    }
}

fn cmd_datasets(client: &Client) -> Result<()> {
    for ds in client.get_list_of_datasets()? {
        println!("{}\t{}", ds.id, ds.title);
    }
    Ok(())
}

fn cmd_dimensions(client: &Client, name: &str) -> Result<()> {
    let Timeseries::Dimensions(catalog) = client.get_timeseries(name, None)? else {
        bail!("expected a dimension catalog");
    };
    for (dim, options) in catalog.iter() {
        println!("{}", dim);
        for (code, label) in options {
            println!("    {:<24} {}", code, label);
        }
    }
    for dim in catalog.truncated() {
        eprintln!(
            "warning: options of '{}' are truncated; rerun with --paginate-options",
            dim
        );
    }
    Ok(())
}

fn cmd_get(client: &Client, args: GetArgs) -> Result<()> {
    let overrides: DimensionOverrides = args.dims.into_iter().collect();
    let Timeseries::Series(mut series) = client.get_timeseries(&args.name, Some(&overrides))?
    else {
        bail!("expected a time series");
    };

    match args.sort {
        Some(SortKey::Year) => series.table.sort_by_year(),
        Some(SortKey::Id) => series.table.sort_by_id(),
        None => {}
    }

    eprintln!("{} ({})", series.dataset.title, series.edition.url());
    println!("{:<16} {:>14} {:>6}", "id", "observation", "year");
    for row in &series.table {
        println!(
            "{:<16} {:>14} {:>6}",
            row.id,
            row.observation.as_deref().unwrap_or("NA"),
            row.year().map(|y| y.to_string()).unwrap_or_default()
        );
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&series.table, path)?,
            "json" => storage::save_json(&series.table, path)?,
            other => bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", series.table.len(), path.display());
    }

    if args.stats {
        let s = stats::summary(&series.table);
        println!(
            "count={} missing={}  min={} max={} mean={} median={}",
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }

    Ok(())
}
