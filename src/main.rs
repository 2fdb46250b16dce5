use anyhow::{Context, Result};
use clap::Parser;
use cronograma::{
    config::{Config, OutputFormat},
    render, source,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cronograma=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) resolve config ───────────────────────────────────────────
    let cfg = Config::parse();
    info!(
        csv = %cfg.csv_path.display(),
        out = %cfg.output_path.display(),
        year = cfg.default_year,
        format = ?cfg.format,
        "config"
    );

    // ─── 3) read + parse the sheet ───────────────────────────────────
    let data = source::load_schedule(&cfg.csv_path, cfg.default_year)?;
    if data.is_none() {
        warn!(
            "no schedule sheet at {}; writing the no-data page",
            cfg.csv_path.display()
        );
    }

    // ─── 4) render ───────────────────────────────────────────────────
    let output = match cfg.format {
        OutputFormat::Markdown => render::render_page(data.as_ref()),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&data).context("serializing schedule data")?;
            json.push('\n');
            json
        }
    };

    // ─── 5) write only if something changed ──────────────────────────
    let written = source::write_if_changed(&cfg.output_path, &output)?;
    info!(written, "all done");
    Ok(())
}
