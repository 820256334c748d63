mod bootstrap;

use anyhow::{Context, Result};
use pulse_core::settings::Settings;
use pulse_data::reader::DataSource;
use pulse_runtime::session::DashboardSession;
use pulse_ui::app::App;

fn data_source(settings: &Settings) -> DataSource {
    match &settings.input {
        Some(path) => DataSource::Path(path.clone()),
        None => DataSource::Demo {
            seed: settings.seed,
            rows: settings.rows as usize,
        },
    }
}

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(
        &settings.log_level,
        settings.log_file.as_deref(),
        settings.view == "report",
    )?;

    tracing::info!("Retail Pulse v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Trend: {}",
        settings.view,
        settings.theme,
        settings.trend_mode
    );

    let source = data_source(&settings);
    let config = settings.pass_config().context("invalid configuration")?;
    let label = source.label();
    let session = DashboardSession::open(source, config)
        .with_context(|| format!("failed to open data source: {label}"))?;

    match settings.view.as_str() {
        "report" => {
            let json = serde_json::to_string_pretty(session.report())
                .context("failed to serialise the report")?;
            println!("{json}");
        }
        _ => {
            App::new(&settings.theme, session).run()?;
        }
    }

    Ok(())
}
