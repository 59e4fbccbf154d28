use std::process::ExitCode;

use build_check::util::telemetry;
use build_check::Config;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let config = Config::parse();
    telemetry::init(config.log_format)?;

    let result = build_check::run(&config).await;

    // Ansible reads exactly one JSON document from stdout
    println!("{}", serde_json::to_string(&result)?);
    Ok(ExitCode::from(result.exit_code()))
}
