//! Runs each todo operation once against the configured endpoint and prints
//! the outcomes.
//!
//! `TODO_API_BASE_URL` and `TODO_API_TIMEOUT_SECS` select the endpoint;
//! `RUST_LOG=debug` shows each exchange.

use todo_api_client::{ClientConfig, ConfigError, Task, TodoApiClient};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "using todo API");
    let api = TodoApiClient::from_config(&config);

    println!("{:?}", api.list_all().map(|tasks| tasks.len()));
    println!("{:?}", api.get_by_id("1"));
    println!("{:?}", api.delete_by_id("1"));

    let task = Task::new("1", "1", "Finish this kata", false);
    println!("{:?}", api.update_by_id(&task));
    println!("{:?}", api.create(&task));

    Ok(())
}
