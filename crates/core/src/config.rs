use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::{NullPlacement, PagingPolicy, QueryOptions};
use crate::urgency::{UrgencyPolicy, DEFAULT_URGENCY_WINDOW_DAYS};

pub const DEFAULT_CONFIG_FILE: &str = "assetdesk.toml";
pub const NESTED_CONFIG_FILE: &str = "config/assetdesk.toml";

pub const MAX_PAGE_SIZE: usize = 500;
const MAX_URGENCY_WINDOW_DAYS: i64 = 365;
const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub listing: ListingConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ListingConfig {
    pub page_size: usize,
    pub null_placement: NullPlacement,
    pub reset_page_on_sort: bool,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub urgency_window_days: i64,
    /// Fixed offset for rendering dates; the system timezone when unset.
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub page_size: Option<usize>,
    pub null_placement: Option<NullPlacement>,
    pub reset_page_on_sort: Option<bool>,
    pub urgency_window_days: Option<i64>,
    pub utc_offset_minutes: Option<i32>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listing: ListingConfig {
                page_size: 10,
                null_placement: NullPlacement::Lowest,
                reset_page_on_sort: false,
            },
            display: DisplayConfig {
                urgency_window_days: DEFAULT_URGENCY_WINDOW_DAYS,
                utc_offset_minutes: None,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions { null_placement: self.listing.null_placement }
    }

    pub fn paging_policy(&self) -> PagingPolicy {
        PagingPolicy { reset_page_on_sort: self.listing.reset_page_on_sort }
    }

    pub fn urgency_policy(&self) -> UrgencyPolicy {
        UrgencyPolicy { window_days: self.display.urgency_window_days }
    }

    /// Offset used to render dates and to read date-only deadlines.
    pub fn display_offset(&self) -> FixedOffset {
        self.display
            .utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
            .unwrap_or_else(|| *Local::now().offset())
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(listing) = patch.listing {
            if let Some(page_size) = listing.page_size {
                self.listing.page_size = page_size;
            }
            if let Some(null_placement) = listing.null_placement {
                self.listing.null_placement = null_placement;
            }
            if let Some(reset_page_on_sort) = listing.reset_page_on_sort {
                self.listing.reset_page_on_sort = reset_page_on_sort;
            }
        }

        if let Some(display) = patch.display {
            if let Some(urgency_window_days) = display.urgency_window_days {
                self.display.urgency_window_days = urgency_window_days;
            }
            if let Some(utc_offset_minutes) = display.utc_offset_minutes {
                self.display.utc_offset_minutes = Some(utc_offset_minutes);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("ASSETDESK_LISTING_PAGE_SIZE") {
            self.listing.page_size = parse_env("ASSETDESK_LISTING_PAGE_SIZE", &value)?;
        }
        if let Some(value) = read_env("ASSETDESK_LISTING_NULL_PLACEMENT") {
            self.listing.null_placement = parse_env("ASSETDESK_LISTING_NULL_PLACEMENT", &value)?;
        }
        if let Some(value) = read_env("ASSETDESK_LISTING_RESET_PAGE_ON_SORT") {
            self.listing.reset_page_on_sort =
                parse_env("ASSETDESK_LISTING_RESET_PAGE_ON_SORT", &value)?;
        }

        if let Some(value) = read_env("ASSETDESK_DISPLAY_URGENCY_WINDOW_DAYS") {
            self.display.urgency_window_days =
                parse_env("ASSETDESK_DISPLAY_URGENCY_WINDOW_DAYS", &value)?;
        }
        if let Some(value) = read_env("ASSETDESK_DISPLAY_UTC_OFFSET_MINUTES") {
            self.display.utc_offset_minutes =
                Some(parse_env("ASSETDESK_DISPLAY_UTC_OFFSET_MINUTES", &value)?);
        }

        let log_level =
            read_env("ASSETDESK_LOGGING_LEVEL").or_else(|| read_env("ASSETDESK_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("ASSETDESK_LOGGING_FORMAT").or_else(|| read_env("ASSETDESK_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(page_size) = overrides.page_size {
            self.listing.page_size = page_size;
        }
        if let Some(null_placement) = overrides.null_placement {
            self.listing.null_placement = null_placement;
        }
        if let Some(reset_page_on_sort) = overrides.reset_page_on_sort {
            self.listing.reset_page_on_sort = reset_page_on_sort;
        }
        if let Some(urgency_window_days) = overrides.urgency_window_days {
            self.display.urgency_window_days = urgency_window_days;
        }
        if let Some(utc_offset_minutes) = overrides.utc_offset_minutes {
            self.display.utc_offset_minutes = Some(utc_offset_minutes);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_listing(&self.listing)?;
        validate_display(&self.display)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(NESTED_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_listing(listing: &ListingConfig) -> Result<(), ConfigError> {
    if listing.page_size == 0 || listing.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::Validation(format!(
            "listing.page_size must be in range 1..={MAX_PAGE_SIZE}"
        )));
    }

    Ok(())
}

fn validate_display(display: &DisplayConfig) -> Result<(), ConfigError> {
    if !(0..=MAX_URGENCY_WINDOW_DAYS).contains(&display.urgency_window_days) {
        return Err(ConfigError::Validation(format!(
            "display.urgency_window_days must be in range 0..={MAX_URGENCY_WINDOW_DAYS}"
        )));
    }

    if let Some(minutes) = display.utc_offset_minutes {
        if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::Validation(format!(
                "display.utc_offset_minutes must be within ±{MAX_UTC_OFFSET_MINUTES}"
            )));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    listing: Option<ListingPatch>,
    display: Option<DisplayPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ListingPatch {
    page_size: Option<usize>,
    null_placement: Option<NullPlacement>,
    reset_page_on_sort: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct DisplayPatch {
    urgency_window_days: Option<i64>,
    utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
    use crate::listing::NullPlacement;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_are_valid() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.listing.page_size == 10, "default page size should be 10")?;
        ensure(
            config.listing.null_placement == NullPlacement::Lowest,
            "missing sort keys should compare lowest by default",
        )?;
        ensure(!config.listing.reset_page_on_sort, "sort should keep the page by default")?;
        ensure(config.display.urgency_window_days == 5, "default urgency window is five days")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_ASSETDESK_PAGE_SIZE", "25");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("assetdesk.toml");
            fs::write(
                &path,
                r#"
[listing]
page_size = ${TEST_ASSETDESK_PAGE_SIZE}
null_placement = "last"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.listing.page_size == 25, "page size should come from the environment")?;
            ensure(
                config.listing.null_placement == NullPlacement::Last,
                "null placement should be read from file",
            )
        })();

        clear_vars(&["TEST_ASSETDESK_PAGE_SIZE"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ASSETDESK_LOG_LEVEL", "warn");
        env::set_var("ASSETDESK_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["ASSETDESK_LOG_LEVEL", "ASSETDESK_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ASSETDESK_LISTING_PAGE_SIZE", "30");
        env::set_var("ASSETDESK_DISPLAY_URGENCY_WINDOW_DAYS", "7");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("assetdesk.toml");
            fs::write(
                &path,
                r#"
[listing]
page_size = 20
reset_page_on_sort = true

[display]
urgency_window_days = 3

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    page_size: Some(50),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.listing.page_size == 50, "override page size should win")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.display.urgency_window_days == 7, "env urgency window should win over file")?;
            ensure(config.listing.reset_page_on_sort, "file value should win over default")
        })();

        clear_vars(&["ASSETDESK_LISTING_PAGE_SIZE", "ASSETDESK_DISPLAY_URGENCY_WINDOW_DAYS"]);
        result
    }

    #[test]
    fn invalid_env_override_is_reported_with_key() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ASSETDESK_LISTING_NULL_PLACEMENT", "middle");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected env override failure".to_string()),
                Err(error) => error,
            };
            ensure(
                matches!(
                    error,
                    ConfigError::InvalidEnvOverride { ref key, .. }
                        if key == "ASSETDESK_LISTING_NULL_PLACEMENT"
                ),
                "failure should name the offending variable",
            )
        })();

        clear_vars(&["ASSETDESK_LISTING_NULL_PLACEMENT"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let error = match AppConfig::load(LoadOptions {
            overrides: ConfigOverrides { page_size: Some(0), ..ConfigOverrides::default() },
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected validation failure but config load succeeded".to_string()),
            Err(error) => error,
        };
        let has_message = matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("listing.page_size")
        );
        ensure(has_message, "validation failure should mention listing.page_size")
    }

    #[test]
    fn missing_required_file_is_an_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("absent.toml");
        let result = AppConfig::load(LoadOptions {
            config_path: Some(path),
            require_file: true,
            ..LoadOptions::default()
        });
        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(_))),
            "absent required file should be reported",
        )
    }

    #[test]
    fn fixed_offset_is_used_for_display() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                utc_offset_minutes: Some(540),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .map_err(|err| format!("config load failed: {err}"))?;

        ensure(
            config.display_offset().local_minus_utc() == 9 * 3600,
            "display offset should follow configuration",
        )
    }
}
