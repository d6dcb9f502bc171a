//! One-shot maintenance job that writes AI-generated summaries from the
//! local side table back into the remote company table.

use std::path::Path;
use std::process;

use staydex::airtable::Client;
use staydex::service::summary::{backfill_summaries, SummaryStore};
use staydex::Config;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let store = match SummaryStore::load(Path::new(&config.summaries_path)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "Failed to load summary side table from {}: {}",
                config.summaries_path, e
            );
            process::exit(1);
        }
    };

    if store.is_empty() {
        tracing::warn!("Summary side table is empty, nothing to write back");
        return;
    }

    let client = Client::new(&config.api_url, &config.api_key, &config.base_id);

    match backfill_summaries(&client, &store).await {
        Ok(updated) => {
            tracing::info!("Wrote summaries back to {} company records", updated);
        }
        Err(e) => {
            eprintln!("Summary backfill failed: {}", e);
            process::exit(1);
        }
    }
}
