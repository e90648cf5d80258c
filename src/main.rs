use freshcart::assistant::{replies, Assistant};
use freshcart::catalog::{Catalog, CatalogProvider, FileCatalogProvider, HttpCatalogProvider};
use freshcart::config::{load_config, AppConfig};
use freshcart::model::{ProviderError, Session};
use freshcart::parser::GroceryListParser;
use freshcart::storage::SqliteStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let catalog = match load_catalog(&config).await {
        Ok(c) => c,
        Err(e) => {
            warn!("Catalog fetch failed, falling back to the default assortment: {}", e);
            Catalog::seeded()
        }
    };

    // Cart, session and requests live in SQLite
    let store = match SqliteStore::new(&config.db_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return;
        }
    };

    let session = Session::start(&config.customer_email, &config.customer_name, config.role);
    let parser = GroceryListParser::with_config(config.parser.clone());
    let mut assistant = match Assistant::new(catalog, store, parser, session) {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to start session: {}", e);
            return;
        }
    };

    println!("{}", replies::help());

    // Each line is handled to completion before the next one is read
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("stdin read error: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match assistant.handle_line(&line) {
            Ok(reply) => println!("{}", reply),
            Err(e) => warn!("Storage error while handling input: {}", e),
        }
    }

    info!("Input closed, bye.");
}

/// Picks the configured catalog source; without one the default assortment is used.
async fn load_catalog(config: &AppConfig) -> Result<Catalog, ProviderError> {
    if let Some(url) = &config.catalog_url {
        HttpCatalogProvider::new(url)?.fetch().await
    } else if let Some(path) = &config.catalog_path {
        FileCatalogProvider::new(path).fetch().await
    } else {
        info!("No catalog source configured, using the default assortment");
        Ok(Catalog::seeded())
    }
}
