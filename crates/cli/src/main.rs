use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    assetdesk_cli::run()
}
