//! BaZi command line front end.
//!
//! ## Usage
//!
//! ```bash
//! # Chart for a lunar birth date (leap months take an `L` prefix)
//! bazi chart 1990-5-15-午
//!
//! # Compatibility of two lunar birth dates, or of two literal charts
//! bazi match 1990-5-15-午 1992-8-20-未
//! bazi match 庚午壬午癸卯戊午 壬申己酉乙未癸未 --json
//!
//! # Calendar conversion
//! bazi lunar 2020-05-23
//! bazi solar 2020 4 1 --leap
//! ```
//!
//! Log output goes to stderr. `RUST_LOG` overrides the level chosen by `-v`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{Level, debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bazi::chart::{BirthTime, Chart};
use bazi::chinese::{LunarDate, Month};
use bazi::compat::{Dimension, score_with};
use bazi::config::Config;
use bazi::Date;

#[derive(Parser, Debug)]
#[command(name = "bazi")]
#[command(about = "BaZi charts and compatibility scoring on the Chinese lunisolar calendar")]
struct Args {
    /// JSON config file. Missing keys keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive the chart of a lunar birth time, e.g. `2020-L4-01-子`.
    Chart { birth: BirthTime },
    /// Score two people, each given as a lunar birth time or as eight chart symbols.
    Match { male: String, female: String },
    /// Convert a Gregorian date (YYYY-MM-DD) to the lunar calendar.
    Lunar { date: Date },
    /// Convert a lunar date to the Gregorian calendar.
    Solar {
        year: i32,
        month: u32,
        day: u32,
        /// The month is the leap month of the year.
        #[arg(long)]
        leap: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;
    run(&args).inspect_err(|err| error!("{err:#}"))
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    debug!(?config, "configuration");

    match &args.command {
        Command::Chart { birth } => {
            info!(%birth, "deriving chart");
            let chart = birth.chart_with(&config.calendar)?;
            if args.json {
                print_json(&chart)?;
            } else {
                println!("{chart}");
            }
        }
        Command::Match { male, female } => {
            let male = resolve(male, &config)?;
            let female = resolve(female, &config)?;
            info!(%male, %female, "scoring charts");
            let report = score_with(&male, &female, &config.scoring);
            if args.json {
                print_json(&report)?;
            } else {
                println!("男方八字：{male}");
                println!("女方八字：{female}");
                println!("總分：{}（{}）", report.total_score, report.verdict());
                for dimension in Dimension::ALL {
                    println!(
                        "{}：{}/{}",
                        dimension.name(),
                        report.sub_score(dimension),
                        dimension.max()
                    );
                    println!("  {}", report.detail(dimension));
                }
            }
        }
        Command::Lunar { date } => {
            let lunar = LunarDate::from_date(*date)?;
            info!(%date, "converting to lunar");
            if args.json {
                print_json(&lunar)?;
            } else {
                println!("{lunar}（{}日）", date.sexagenary());
            }
        }
        Command::Solar {
            year,
            month,
            day,
            leap,
        } => {
            let lunar = LunarDate::new(*year, Month::new(*month, *leap), *day)?;
            let date = lunar.to_date();
            info!(%lunar, "converting to gregorian");
            if args.json {
                print_json(&date)?;
            } else {
                println!("{date}");
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    Config::from_json(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// A birth time such as `1990-5-15-午`, or eight symbols such as `庚午壬午癸卯戊午`.
fn resolve(input: &str, config: &Config) -> Result<Chart> {
    if let Ok(birth) = input.parse::<BirthTime>() {
        debug!(%birth, "input is a birth time");
        return Ok(birth.chart_with(&config.calendar)?);
    }
    match input.parse::<Chart>() {
        Ok(chart) => Ok(chart),
        Err(err) => bail!("{input:?} is neither a birth time nor a chart: {err}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
