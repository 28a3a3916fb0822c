//! User configuration.
//!
//! Settings live in a flat JSON object at `<config dir>/bondcalc/config.json`,
//! or wherever `BONDCALC_CONFIG` points. Unset keys fall back to their
//! defaults; command-line flags override both.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "BONDCALC_CONFIG";

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Precision for decimal output
    DecimalPrecision,
    /// Face value used when `--principal` is omitted
    DefaultPrincipal,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    /// Canonical key name, as stored in the file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DecimalPrecision => "decimal_precision",
            Self::DefaultPrincipal => "default_principal",
            Self::UseColors => "use_colors",
        }
    }

    /// One-line help for `config list`.
    pub fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DecimalPrecision => "Number of decimal places for output (2-10)",
            Self::DefaultPrincipal => "Face value when --principal is omitted",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    /// Value in effect when the key is unset.
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DecimalPrecision => "6",
            Self::DefaultPrincipal => "1000",
            Self::UseColors => "true",
        }
    }

    /// Every key, in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DecimalPrecision,
            Self::DefaultPrincipal,
            Self::UseColors,
        ]
    }

    /// Checks that `value` is acceptable for this key.
    pub fn validate(&self, value: &str) -> CliResult<()> {
        let invalid = |reason: String| CliError::InvalidValue {
            key: self.as_str(),
            reason,
        };

        match self {
            Self::DefaultFormat => {
                parse_format(value)
                    .ok_or_else(|| invalid(format!("{value}. Use table, json, csv, or minimal.")))?;
            }
            Self::DecimalPrecision => {
                let precision =
                    parse_precision(value).ok_or_else(|| invalid(format!("{value}. Must be a number.")))?;
                if !(2..=10).contains(&precision) {
                    return Err(invalid(format!("{precision}. Must be between 2 and 10.")));
                }
            }
            Self::DefaultPrincipal => {
                parse_principal(value)
                    .ok_or_else(|| invalid(format!("{value}. Must be a positive number.")))?;
            }
            Self::UseColors => {
                parse_bool(value).ok_or_else(|| invalid(format!("{value}. Use true or false.")))?;
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Ok(Self::DefaultFormat),
            "decimal_precision" | "precision" => Ok(Self::DecimalPrecision),
            "default_principal" | "principal" => Ok(Self::DefaultPrincipal),
            "use_colors" | "colors" => Ok(Self::UseColors),
            _ => Err(CliError::UnknownKey(s.to_string())),
        }
    }
}

/// Stored user settings.
///
/// Values are kept as text. A hand-edited file may also hold numbers or
/// booleans, which are read as their JSON text.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct Config {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl From<BTreeMap<String, serde_json::Value>> for Config {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                serde_json::Value::Number(n) => Some((key, n.to_string())),
                serde_json::Value::Bool(b) => Some((key, b.to_string())),
                other => {
                    warn!(key = %key, value = %other, "Ignoring non-scalar configuration value");
                    None
                }
            })
            .collect();
        Self { values }
    }
}

impl Config {
    /// Location of the config file.
    pub fn path() -> CliResult<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| CliError::Config("Could not determine config directory".to_string()))?;
        Ok(base.join("bondcalc").join("config.json"))
    }

    /// Loads the config file, or defaults when it does not exist yet.
    pub fn load() -> CliResult<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Like [`Config::load`], but an unreadable file yields defaults so
    /// `config reset` can still repair it.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            warn!(%err, "Ignoring unreadable configuration, using defaults");
            Self::default()
        })
    }

    /// Loads settings from `path`.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }

    /// Writes the config file, creating its directory.
    pub fn save(&self) -> CliResult<()> {
        self.save_to(&Self::path()?)
    }

    /// Writes settings to `path`.
    pub fn save_to(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Stored value of `key`, or its default.
    pub fn get(&self, key: ConfigKey) -> &str {
        self.values
            .get(key.as_str())
            .map_or(key.default_value(), String::as_str)
    }

    /// Validates and stores `value` under `key`.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> CliResult<()> {
        key.validate(value)?;
        self.values.insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }

    /// Drops a stored value so the default applies again.
    pub fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    /// Drops every stored value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Configured output format.
    pub fn output_format(&self) -> OutputFormat {
        self.typed(ConfigKey::DefaultFormat, parse_format, OutputFormat::Table)
    }

    /// Configured number of decimal places.
    pub fn decimal_precision(&self) -> usize {
        self.typed(
            ConfigKey::DecimalPrecision,
            |v| parse_precision(v).filter(|p| (2..=10).contains(p)),
            6,
        )
    }

    /// Configured default face value.
    pub fn default_principal(&self) -> f64 {
        self.typed(ConfigKey::DefaultPrincipal, parse_principal, 1000.0)
    }

    /// Whether colored output is enabled.
    pub fn use_colors(&self) -> bool {
        self.typed(ConfigKey::UseColors, parse_bool, true)
    }

    /// Parses the stored value of `key`, falling back to `default` when a
    /// hand-edited file holds something unusable.
    fn typed<T>(&self, key: ConfigKey, parse: impl Fn(&str) -> Option<T>, default: T) -> T {
        let value = self.get(key);
        parse(value).unwrap_or_else(|| {
            warn!(key = key.as_str(), value, "Ignoring invalid configuration value");
            default
        })
    }
}

fn parse_format(value: &str) -> Option<OutputFormat> {
    <OutputFormat as ValueEnum>::from_str(value.trim(), true).ok()
}

fn parse_precision(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

fn parse_principal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
