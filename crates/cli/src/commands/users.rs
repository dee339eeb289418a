use assetdesk_core::config::AppConfig;
use assetdesk_core::{query, ApplicationError, LdapUserRecord};

use crate::commands::list::{load_records, ListArgs};
use crate::commands::CommandResult;

const COMMAND: &str = "users";
const DEFAULT_FIELD: &str = "username";

pub fn run(args: &ListArgs, config: &AppConfig) -> CommandResult {
    match list(args, config) {
        Ok(result) => result,
        Err(error) => CommandResult::from_error(COMMAND, error),
    }
}

fn list(args: &ListArgs, config: &AppConfig) -> Result<CommandResult, ApplicationError> {
    let records: Vec<LdapUserRecord> = load_records(&args.input)?;
    let state = args.filter_state::<LdapUserRecord>(DEFAULT_FIELD, true, config)?;
    let page = query(&records, &state, config.query_options());

    tracing::info!(
        event_name = "cli.users.listed",
        correlation_id = COMMAND,
        input = %args.input.display(),
        total_items = page.total_items,
        page = page.page,
        "directory users listed"
    );

    Ok(CommandResult::listing(COMMAND, &page))
}
