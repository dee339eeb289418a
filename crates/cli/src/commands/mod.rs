pub mod approvals;
pub mod config;
pub mod devices;
pub mod list;
pub mod users;

use assetdesk_core::{ApplicationError, Page};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    hint: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListingOutcome<'a, T> {
    command: &'a str,
    status: &'static str,
    page: usize,
    page_size: usize,
    total_items: usize,
    total_pages: usize,
    rows: &'a [T],
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            hint: None,
        };
        Self { exit_code: 0, output: serialize_payload(&payload) }
    }

    pub fn listing<T: Serialize>(command: &str, page: &Page<T>) -> Self {
        let payload = ListingOutcome {
            command,
            status: "ok",
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
            rows: &page.items,
        };
        Self { exit_code: 0, output: serialize_payload(&payload) }
    }

    pub fn from_error(command: &str, error: ApplicationError) -> Self {
        let (error_class, exit_code) = classify(&error);
        let message = error.to_string();
        let interface = error.into_interface(command);

        tracing::warn!(
            event_name = "cli.command.failed",
            correlation_id = command,
            error_class,
            exit_code,
            error = %message,
            "command failed"
        );

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message,
            hint: Some(interface.user_message().to_string()),
        };
        Self { exit_code, output: serialize_payload(&payload) }
    }
}

fn classify(error: &ApplicationError) -> (&'static str, u8) {
    match error {
        ApplicationError::Configuration(_) => ("config_validation", 2),
        ApplicationError::InputRead { .. } => ("input_read", 3),
        ApplicationError::InputParse { .. } => ("input_parse", 4),
        ApplicationError::Domain(_) => ("invalid_query", 5),
    }
}

fn serialize_payload<T: Serialize>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
