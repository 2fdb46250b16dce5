use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use cronograma::{config, schedule::ScheduleSummary, source};

#[derive(Parser)]
#[command(name = "schedule_check")]
#[command(about = "Print a YAML summary of how a schedule sheet parses and classifies")]
struct Args {
    /// Schedule sheet (CSV)
    csv: PathBuf,

    /// Year for dates written without one (default: current year)
    year: Option<i32>,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let year = args.year.unwrap_or_else(config::current_year);

    let Some(data) = source::load_schedule(&args.csv, year)? else {
        bail!("{} does not exist", args.csv.display());
    };

    let summary = ScheduleSummary::from_data(&data);
    print!("{}", serde_yaml::to_string(&summary)?);
    Ok(())
}
