use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, Level};

use userdesk::cli::{self, Cli};
use userdesk::clock::SystemClock;
use userdesk::config::Settings;
use userdesk::gateway::HttpGateway;
use userdesk::orchestrator::Orchestrator;
use userdesk::schema::user_schema;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    let level: Level = settings.log.level.parse()?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    debug!(base_url = %settings.api.base_url, "using collection");

    let gateway = HttpGateway::new(settings.api.base_url.clone());
    let mut app = Orchestrator::new(user_schema(), Arc::new(SystemClock))
        .with_notification_ttl(settings.notifications.ttl_ms);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let ok = cli::run(&cli.command, &settings, &mut app, &gateway, &mut out, &mut input).await?;
    out.flush()?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
