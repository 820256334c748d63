use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::assumptions::BusinessAssumptions;
use crate::config::PassConfig;
use crate::error::Result;
use crate::models::{FilterSelection, Selection, ALL_LABEL};
use crate::trend::TrendMode;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

const VIEWS: [&str; 2] = ["dashboard", "report"];
const THEMES: [&str; 4] = ["light", "dark", "classic", "auto"];

/// Retail sales dashboard with demand forecasting and ABC classification
#[derive(Parser, Debug, Clone)]
#[command(
    name = "retail-pulse",
    about = "Retail sales dashboard with demand forecasting and ABC classification",
    version
)]
pub struct Settings {
    /// CSV file or directory of CSV files (demo data is generated when omitted)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Seed for the demo data generator
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of demo rows to generate
    #[arg(long, default_value = "5000", value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
    pub rows: u32,

    /// Category filter ("all" for every category)
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Shopping-mall filter ("all" for every location)
    #[arg(long, default_value = "all")]
    pub location: String,

    /// Forecast series shown next to monthly revenue
    #[arg(long, default_value = "moving-average", value_parser = ["moving-average", "flat-increment"])]
    pub trend_mode: String,

    /// Moving-average window in months (1-24)
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..=24))]
    pub window: u32,

    /// Share of revenue counted as potential savings
    #[arg(long, default_value = "0.10")]
    pub savings_rate: f64,

    /// Share of revenue counted as recoverable sales
    #[arg(long, default_value = "0.02")]
    pub recovery_rate: f64,

    /// Annual impact spread over months by the flat-increment projection
    #[arg(long, default_value = "10000000")]
    pub annual_impact: f64,

    /// Output view
    #[arg(long, default_value = "dashboard", value_parser = VIEWS)]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = THEMES)]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used display parameters saved to
/// `~/.retail-pulse/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

impl LastUsedParams {
    /// Default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// `<base_dir>/.retail-pulse/last_used.json`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".retail-pulse").join("last_used.json")
    }

    /// Read the saved parameters. A missing or corrupt file yields the
    /// defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Write the parameters through a sibling temp file and a rename so a
    /// crash never leaves a half-written file behind.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let body = serde_json::to_vec_pretty(self).map_err(std::io::Error::other)?;
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, body)?;
        std::fs::rename(&staging, path)
    }

    /// Remove the saved file; a missing file is not an error.
    pub fn clear_at(path: &Path) -> std::io::Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("could not clear {}: {}", config_path.display(), e);
            }
            return settings.apply_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins. Data source and filters are never restored.
        // Saved values are hand-editable; anything the CLI would reject is
        // ignored.
        restore(
            &matches,
            "theme",
            &mut settings.theme,
            last.theme.filter(|t| THEMES.contains(&t.as_str())),
        );
        restore(
            &matches,
            "trend_mode",
            &mut settings.trend_mode,
            last.trend_mode.filter(|m| m.parse::<TrendMode>().is_ok()),
        );
        restore(
            &matches,
            "window",
            &mut settings.window,
            last.window.filter(|w| (1..=24).contains(w)),
        );
        restore(
            &matches,
            "view",
            &mut settings.view,
            last.view.filter(|v| VIEWS.contains(&v.as_str())),
        );

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::debug!("could not persist last-used params: {}", e);
        }

        settings.apply_debug()
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }

    /// Filters requested on the command line.
    pub fn filters(&self) -> FilterSelection {
        FilterSelection::new(
            cli_selection(&self.category),
            cli_selection(&self.location),
        )
    }

    /// Build the configuration for the first analysis pass.
    pub fn pass_config(&self) -> Result<PassConfig> {
        let config = PassConfig {
            filters: self.filters(),
            trend_mode: self.trend_mode.parse::<TrendMode>()?,
            window: self.window as usize,
            assumptions: BusinessAssumptions {
                savings_rate: self.savings_rate,
                recovery_rate: self.recovery_rate,
                annual_impact: self.annual_impact,
            },
            ..PassConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            trend_mode: Some(s.trend_mode.clone()),
            window: Some(s.window),
            view: Some(s.view.clone()),
        }
    }
}

/// The exact keyword `all` selects everything; any other text names one
/// value, including a value spelled `All`.
fn cli_selection(value: &str) -> Selection {
    if value == ALL_LABEL {
        Selection::All
    } else {
        Selection::Only(value.to_string())
    }
}

/// Overwrite `slot` with the saved value unless `name` was typed on the
/// command line.
fn restore<T>(matches: &clap::ArgMatches, name: &str, slot: &mut T, saved: Option<T>) {
    let from_cli = matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine);
    if let (false, Some(value)) = (from_cli, saved) {
        *slot = value;
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
