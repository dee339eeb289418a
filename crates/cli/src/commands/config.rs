use std::env;
use std::fs;
use std::path::Path;

use assetdesk_core::config::{resolve_config_path, AppConfig, ConfigOverrides};
use toml::Value;

const OVERRIDE_SOURCE: &str = "override";
const LOG_LEVEL_OVERRIDE_SOURCE: &str = "override (--log-level)";

pub fn run(config: &AppConfig, overrides: &ConfigOverrides) -> String {
    render(config, resolve_config_path(None).as_deref(), overrides)
}

pub fn render(
    config: &AppConfig,
    config_file_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> String {
    let config_file_doc = load_config_file_doc(config_file_path);
    let source = |key_path: &str, overridden: Option<&str>, env_keys: &[&str]| {
        field_source(key_path, overridden, env_keys, config_file_doc.as_ref(), config_file_path)
    };
    let overridden = |is_set: bool| is_set.then_some(OVERRIDE_SOURCE);

    let utc_offset = config
        .display
        .utc_offset_minutes
        .map(|minutes| minutes.to_string())
        .unwrap_or_else(|| "<system>".to_string());

    let lines = vec![
        "effective config (source precedence: override > env > file > default):".to_string(),
        render_line(
            "listing.page_size",
            &config.listing.page_size.to_string(),
            source(
                "listing.page_size",
                overridden(overrides.page_size.is_some()),
                &["ASSETDESK_LISTING_PAGE_SIZE"],
            ),
        ),
        render_line(
            "listing.null_placement",
            &format!("{:?}", config.listing.null_placement),
            source(
                "listing.null_placement",
                overridden(overrides.null_placement.is_some()),
                &["ASSETDESK_LISTING_NULL_PLACEMENT"],
            ),
        ),
        render_line(
            "listing.reset_page_on_sort",
            &config.listing.reset_page_on_sort.to_string(),
            source(
                "listing.reset_page_on_sort",
                overridden(overrides.reset_page_on_sort.is_some()),
                &["ASSETDESK_LISTING_RESET_PAGE_ON_SORT"],
            ),
        ),
        render_line(
            "display.urgency_window_days",
            &config.display.urgency_window_days.to_string(),
            source(
                "display.urgency_window_days",
                overridden(overrides.urgency_window_days.is_some()),
                &["ASSETDESK_DISPLAY_URGENCY_WINDOW_DAYS"],
            ),
        ),
        render_line(
            "display.utc_offset_minutes",
            &utc_offset,
            source(
                "display.utc_offset_minutes",
                overridden(overrides.utc_offset_minutes.is_some()),
                &["ASSETDESK_DISPLAY_UTC_OFFSET_MINUTES"],
            ),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            source(
                "logging.level",
                overrides.log_level.is_some().then_some(LOG_LEVEL_OVERRIDE_SOURCE),
                &["ASSETDESK_LOGGING_LEVEL", "ASSETDESK_LOG_LEVEL"],
            ),
        ),
        render_line(
            "logging.format",
            &format!("{:?}", config.logging.format),
            source(
                "logging.format",
                overridden(overrides.log_format.is_some()),
                &["ASSETDESK_LOGGING_FORMAT", "ASSETDESK_LOG_FORMAT"],
            ),
        ),
    ];

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    overridden: Option<&str>,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(overridden) = overridden {
        return overridden.to_string();
    }

    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
