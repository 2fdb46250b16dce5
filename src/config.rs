// src/config.rs

use chrono::{Datelike, Local};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_CSV_PATH: &str = "data/cronograma.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "src/pages/cronograma.md";

pub const ENV_CSV: &str = "CRONOGRAMA_CSV";
pub const ENV_OUT: &str = "CRONOGRAMA_OUT";
pub const ENV_YEAR: &str = "CRONOGRAMA_YEAR";
pub const ENV_FORMAT: &str = "CRONOGRAMA_FORMAT";

/// What the generator writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The schedule page (frontmatter + table).
    #[value(alias = "md")]
    Markdown,
    /// The serialized schedule data, for a page that renders it itself.
    Json,
}

/// Current calendar year, local time.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Generator settings. Each value comes from the command line, then its
/// `CRONOGRAMA_*` variable, then the default.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(
    name = "cronograma",
    version,
    about = "Generate the course schedule page from the schedule sheet"
)]
pub struct Config {
    /// Schedule sheet (CSV)
    #[arg(value_name = "CSV", env = ENV_CSV, default_value = DEFAULT_CSV_PATH)]
    pub csv_path: PathBuf,

    /// Generated page
    #[arg(value_name = "OUT", env = ENV_OUT, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: PathBuf,

    /// Year for sheet dates written without one
    #[arg(short = 'y', long = "year", env = ENV_YEAR, default_value_t = current_year())]
    pub default_year: i32,

    #[arg(
        short,
        long,
        env = ENV_FORMAT,
        value_enum,
        ignore_case = true,
        default_value = "markdown"
    )]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("cronograma").chain(args.iter().copied()))
    }

    // The environment is process-wide, so every step that touches it lives in
    // this one test.
    #[test]
    fn args_then_env_then_defaults() -> Result<(), clap::Error> {
        for key in [ENV_CSV, ENV_OUT, ENV_YEAR, ENV_FORMAT] {
            env::remove_var(key);
        }

        let cfg = parse(&[])?;
        assert_eq!(cfg.csv_path, PathBuf::from(DEFAULT_CSV_PATH));
        assert_eq!(cfg.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(cfg.default_year, current_year());
        assert_eq!(cfg.format, OutputFormat::Markdown);

        env::set_var(ENV_CSV, "sheet.csv");
        env::set_var(ENV_OUT, "out.json");
        env::set_var(ENV_YEAR, "2024");
        env::set_var(ENV_FORMAT, "JSON");

        let cfg = parse(&[])?;
        assert_eq!(cfg.csv_path, PathBuf::from("sheet.csv"));
        assert_eq!(cfg.output_path, PathBuf::from("out.json"));
        assert_eq!(cfg.default_year, 2024);
        assert_eq!(cfg.format, OutputFormat::Json);

        let cfg = parse(&["a.csv", "b.md", "--year", "2023", "-f", "md"])?;
        assert_eq!(cfg.csv_path, PathBuf::from("a.csv"));
        assert_eq!(cfg.output_path, PathBuf::from("b.md"));
        assert_eq!(cfg.default_year, 2023);
        assert_eq!(cfg.format, OutputFormat::Markdown);

        env::set_var(ENV_YEAR, "x");
        assert!(parse(&[]).is_err());

        for key in [ENV_CSV, ENV_OUT, ENV_YEAR, ENV_FORMAT] {
            env::remove_var(key);
        }
        Ok(())
    }

    #[test]
    fn short_flags_and_one_path() -> Result<(), clap::Error> {
        let cfg = parse(&["-y", "2026", "--format", "markdown", "mine.csv"])?;
        assert_eq!(cfg.csv_path, PathBuf::from("mine.csv"));
        assert_eq!(cfg.default_year, 2026);
        assert_eq!(cfg.format, OutputFormat::Markdown);
        Ok(())
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(parse(&["--year", "dos mil"]).is_err());
        assert!(parse(&["--year"]).is_err());
        assert!(parse(&["--format", "html"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a", "b", "c"]).is_err());
    }
}
