use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use taxcmp_core::{RegimeConfig, RegimeError, TaxBracket};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading regime data.
#[derive(Debug, Error)]
pub enum RegimeLoaderError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid regime: {0}")]
    Regime(#[from] RegimeError),
}

impl From<csv::Error> for RegimeLoaderError {
    fn from(err: csv::Error) -> Self {
        RegimeLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a bracket schedule CSV.
///
/// - `upper_bound`: inclusive upper edge of the bracket (empty for the
///   open-ended top bracket)
/// - `rate`: marginal rate as a decimal (e.g., 0.19 for 19%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket {
            upper_bound: record.upper_bound,
            rate: record.rate,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn open(path: &Path) -> Result<File, RegimeLoaderError> {
    File::open(path).map_err(|source| RegimeLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loader for bracket schedules stored as CSV.
///
/// Rows must appear lowest bracket first; ordering is checked when the
/// schedule is validated as part of a [`RegimeConfig`].
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, RegimeLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Read a schedule file into brackets.
    pub fn load_file(path: &Path) -> Result<Vec<TaxBracket>, RegimeLoaderError> {
        let records = Self::parse(open(path)?)?;
        debug!(path = %path.display(), brackets = records.len(), "bracket schedule parsed");
        Ok(records.into_iter().map(TaxBracket::from).collect())
    }
}

/// Loader for whole regime descriptions stored as TOML.
///
/// ```toml
/// name = "es-autonomo"
/// consumption_tax_rate = "0.21"
/// rounding = "per_component"
///
/// [social_security]
/// rate = "0.30"
/// floor = "3600"
/// ceiling = "16000"
///
/// [[brackets]]
/// upper_bound = "12450"
/// rate = "0.19"
///
/// [[brackets]]
/// rate = "0.47"
/// ```
pub struct RegimeLoader;

impl RegimeLoader {
    /// Parse and validate a regime from TOML text.
    pub fn parse_str(input: &str) -> Result<RegimeConfig, RegimeLoaderError> {
        let config: RegimeConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a regime file.
    pub fn load_file(path: &Path) -> Result<RegimeConfig, RegimeLoaderError> {
        let mut contents = String::new();
        open(path)?
            .read_to_string(&mut contents)
            .map_err(|source| RegimeLoaderError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse_str(&contents)
    }

    /// Builds a regime from optional sources.
    ///
    /// Starts from `regime_file` (or the built-in Spanish regime when absent)
    /// and, when `schedule_file` is given, replaces its brackets with the
    /// CSV schedule. The result is validated once all sources are merged.
    pub fn load(
        regime_file: Option<&Path>,
        schedule_file: Option<&Path>,
    ) -> Result<RegimeConfig, RegimeLoaderError> {
        let mut config = match regime_file {
            Some(path) => Self::load_file(path)?,
            None => RegimeConfig::spanish_autonomo(),
        };

        if let Some(path) = schedule_file {
            config.brackets = ScheduleLoader::load_file(path)?;
            config.validate()?;
        }

        info!(
            regime = %config.name,
            brackets = config.brackets.len(),
            "regime loaded"
        );
        Ok(config)
    }
}
