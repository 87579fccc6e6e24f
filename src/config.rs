use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use sheetcal_core::options::{DEFAULT_ALERT_MINUTES, DEFAULT_TIMEZONE, DEFAULT_TRAVEL_MINUTES};

static DEFAULT_OUTPUT_DIR: &str = "ics_output";

/// Environment variable prefix, e.g. SHEETCAL_TIMEZONE=Europe/Berlin
static ENV_PREFIX: &str = "SHEETCAL";

/// Resolved settings for a conversion run.
///
/// Minutes stay signed here so a negative value in a config file reaches
/// option validation with a useful message instead of a type error.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub output_directory: PathBuf,
    pub timezone: String,
    pub alert_minutes: i64,
    pub travel_minutes: i64,
    #[serde(default)]
    pub sheet: Option<String>,
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub output_directory: Option<PathBuf>,
    pub timezone: Option<String>,
    pub alert_minutes: Option<i64>,
    pub travel_minutes: Option<i64>,
    pub sheet: Option<String>,
}

/// Get the config file path (~/.config/sheetcal/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("sheetcal");
    Ok(config_dir.join("config.toml"))
}

impl Settings {
    /// Layer defaults, the config file, SHEETCAL_* variables and CLI flags.
    ///
    /// An explicitly given config file must exist; the default one is optional.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::from(config_path()?).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("output_directory", DEFAULT_OUTPUT_DIR)?
            .set_default("timezone", DEFAULT_TIMEZONE)?
            .set_default("alert_minutes", i64::from(DEFAULT_ALERT_MINUTES))?
            .set_default("travel_minutes", i64::from(DEFAULT_TRAVEL_MINUTES))?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option(
                "output_directory",
                overrides
                    .output_directory
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("timezone", overrides.timezone.clone())?
            .set_override_option("alert_minutes", overrides.alert_minutes)?
            .set_override_option("travel_minutes", overrides.travel_minutes)?
            .set_override_option("sheet", overrides.sheet.clone())?
            .build()
            .context("Could not load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(settings)
    }

    /// Output directory with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.output_directory.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }
}

/// Write a config file with every option commented out.
/// Returns false if the file already exists.
pub fn create_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    let contents = format!(
        "\
# sheetcal configuration

# Where .ics files are written (created if missing):
# output_directory = \"{}\"

# IANA timezone the spreadsheet times are in:
# timezone = \"{}\"

# Minutes before the start that the travel alert fires:
# alert_minutes = {}

# Travel time shown by Apple Calendar, in minutes:
# travel_minutes = {}

# Worksheet to read (defaults to the first one):
# sheet = \"Events\"
",
        DEFAULT_OUTPUT_DIR, DEFAULT_TIMEZONE, DEFAULT_ALERT_MINUTES, DEFAULT_TRAVEL_MINUTES
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create config directory {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Could not write config file {}", path.display()))?;

    Ok(true)
}
