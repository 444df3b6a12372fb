use anyhow::Result;
use rolimons::{Collector, Config, HttpClient, Ledger};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    common::setup_env();
    start_collector().await
}

async fn start_collector() -> Result<()> {
    let config = Config::from_env()?;
    let ledger = Ledger::load(&config.csv_path)?;
    let client = HttpClient::new(&config);
    let mut collector = Collector::new(client, ledger, config);

    tokio::select! {
        result = collector.run() => result?,
        _ = signal::ctrl_c() => log::info!("Interrupted, stopping collection"),
    }

    Ok(())
}
