use assetdesk_core::config::AppConfig;
use assetdesk_core::listing::ALL_FIELDS;
use assetdesk_core::{query, ApplicationError, DeviceRecord, DeviceRow};
use chrono::{DateTime, FixedOffset};

use crate::commands::list::{load_records, ListArgs};
use crate::commands::CommandResult;

const COMMAND: &str = "devices";

pub fn run(args: &ListArgs, config: &AppConfig, now: DateTime<FixedOffset>) -> CommandResult {
    match list(args, config, &now) {
        Ok(result) => result,
        Err(error) => CommandResult::from_error(COMMAND, error),
    }
}

fn list(
    args: &ListArgs,
    config: &AppConfig,
    now: &DateTime<FixedOffset>,
) -> Result<CommandResult, ApplicationError> {
    let records: Vec<DeviceRecord> = load_records(&args.input)?;
    let state = args.filter_state::<DeviceRecord>(ALL_FIELDS, true, config)?;
    let page = query(&records, &state, config.query_options());

    let policy = config.urgency_policy();
    let page = page.map(|record| DeviceRow::from_record(record, now, policy));

    tracing::info!(
        event_name = "cli.devices.listed",
        correlation_id = COMMAND,
        input = %args.input.display(),
        total_items = page.total_items,
        page = page.page,
        "device ledger listed"
    );

    Ok(CommandResult::listing(COMMAND, &page))
}
