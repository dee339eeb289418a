use assetdesk_core::config::AppConfig;
use assetdesk_core::{query, ApplicationError, ApprovalRecord, ApprovalRow};
use chrono::{DateTime, FixedOffset};

use crate::commands::list::{load_records, ListArgs};
use crate::commands::CommandResult;

const COMMAND: &str = "approvals";
const DEFAULT_FIELD: &str = "approvalInfo";

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
    let records: Vec<ApprovalRecord> = load_records(&args.input)?;
    let state = args.filter_state::<ApprovalRecord>(DEFAULT_FIELD, false, config)?;
    let page = query(&records, &state, config.query_options());

    let policy = config.urgency_policy();
    let page = page.map(|record| ApprovalRow::from_record(record, now, policy));
    let urgent = page.items.iter().filter(|row| row.urgency.urgent).count();

    tracing::info!(
        event_name = "cli.approvals.listed",
        correlation_id = COMMAND,
        input = %args.input.display(),
        total_items = page.total_items,
        page = page.page,
        urgent_rows = urgent,
        "approval snapshot listed"
    );

    Ok(CommandResult::listing(COMMAND, &page))
}
