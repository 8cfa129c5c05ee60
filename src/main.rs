use std::env;
use std::process;
use std::sync::Arc;

use anyhow::Result;

use storesearch::{
    Category, HttpFetcher, SearchConfig, SearchCoordinator, SearchResult, SearchState, logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let mut args = env::args().skip(1);
    let Some(query) = args.next() else {
        eprintln!("Usage: storesearch <query> [all|music|software|ebook]");
        process::exit(2);
    };
    let category = match args.next().as_deref() {
        None | Some("all") => Category::All,
        Some("music") => Category::Music,
        Some("software") => Category::Software,
        Some("ebook") => Category::EBook,
        Some(other) => {
            eprintln!("Unknown category: {}", other);
            process::exit(2);
        }
    };

    tracing::info!(query = %query, category = ?category, "=== StoreSearch Starting ===");

    let config = SearchConfig::default();
    let fetcher = Arc::new(HttpFetcher::new(config.timeout)?);
    let coordinator = SearchCoordinator::new(fetcher, config);

    let mut states = coordinator.subscribe();
    coordinator.perform_search(&query, category);

    loop {
        states.changed().await?;
        let state = states.borrow_and_update().clone();
        match state {
            SearchState::Loading => println!("Searching..."),
            SearchState::NotSearched => {
                // The coordinator reverts here on a network failure.
                eprintln!("There was an error accessing the iTunes Store. Please try again.");
                process::exit(1);
            }
            SearchState::NoResults => {
                println!("Nothing found");
                break;
            }
            SearchState::Results(results) => {
                for result in &results {
                    println!(
                        "{} | {} | {}",
                        result.name,
                        format_artist(result),
                        format_price(result)
                    );
                }
                break;
            }
        }
    }

    Ok(())
}

fn format_artist(result: &SearchResult) -> String {
    if result.artist.is_empty() {
        "Unknown".to_string()
    } else {
        format!("{} ({})", result.artist, result.type_label)
    }
}

fn format_price(result: &SearchResult) -> String {
    if result.price == 0.0 {
        "Free".to_string()
    } else {
        format!("{:.2} {}", result.price, result.currency)
    }
}
