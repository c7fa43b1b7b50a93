mod actor_system;
mod config;
mod hello;
mod types;

use anyhow::Context;
use config::HelloConfig;
use hello::Console;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = HelloConfig::from_env();
    log::debug!("Starting with {:?}", config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(config.worker_threads)
        .thread_name("hello-actor-worker")
        .build()
        .context("failed to build the tokio runtime")?;

    runtime.block_on(hello::run(&config, Console::Stdout))
}
