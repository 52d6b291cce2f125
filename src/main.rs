use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::time::Duration;

mod api;
mod cli;
mod config;
mod error;
mod logging;
mod notify;
mod poll;
mod response;
mod status;
#[cfg(test)]
mod test_support;

use api::{http_agent, PracticumClient};
use cli::RootArgs;
use config::{check_tokens, Config, RawCredentials};
use notify::TelegramNotifier;
use poll::PollDriver;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    logging::init(args.log_file())?;

    let raw = RawCredentials::from_env(args.endpoint.clone());
    if !check_tokens(&raw) {
        return Err(anyhow!(
            "required configuration is missing or empty; refusing to start"
        ));
    }
    let config = Config::from_raw(
        raw,
        args.telegram_api.clone(),
        Duration::from_secs(args.interval_secs),
    )
    .context("build runtime configuration")?;

    let agent = http_agent();
    let source = PracticumClient::new(agent.clone(), &config);
    let notifier = TelegramNotifier::new(agent, &config);
    let from_date = args
        .from_date
        .unwrap_or_else(|| chrono::Utc::now().timestamp());

    tracing::info!(
        endpoint = %config.endpoint,
        from_date,
        interval_secs = args.interval_secs,
        max_cycles = ?args.max_cycles,
        "review watcher started"
    );

    let mut driver = PollDriver::new(&source, &notifier, config.poll_interval, from_date);
    let cycles = driver.run(args.max_cycles, std::thread::sleep);
    tracing::info!(
        cycles,
        watermark = driver.watermark(),
        state = ?driver.state(),
        "review watcher stopped"
    );
    Ok(())
}
