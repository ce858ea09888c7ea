use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use sk_core::{ArticleRecord, ArticleStore, Result};
use sk_scraper::{Crawler, HttpFetcher, LISTING_URL};
use tracing::{error, info};

const RECENT_COUNT: usize = 5;
const SNIPPET_LEN: usize = 200;

#[derive(Parser, Debug)]
#[command(author, version, about = "Harvest skift.com news into a local article store", long_about = None)]
struct Cli {
    /// Storage backend (sqlite or memory)
    #[arg(long, default_value = "sqlite")]
    storage: String,
    /// SQLite database path
    #[arg(long, default_value = "skift_articles.db")]
    db: PathBuf,
    /// Listing page to crawl
    #[arg(long, default_value = LISTING_URL)]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = sk_storage::create_store(&cli.storage, &cli.db).await?;
    info!("💾 storage initialized (using {})", cli.storage);

    let fetcher = Arc::new(HttpFetcher::new()?);
    let crawler = Crawler::new(fetcher);

    let records = crawler.run(&cli.url, Local::now().naive_local()).await;
    if records.is_empty() {
        println!("No articles found or failed to fetch.");
    } else {
        let added = store_records(store.as_ref(), &records).await;
        println!("Added {} new articles.", added);
    }

    show_recent(store.as_ref()).await?;
    Ok(())
}

/// Persist the batch, counting fresh inserts. A duplicate url is benign and
/// simply not counted; any other storage failure is reported per record and
/// the rest of the batch still goes through.
async fn store_records(store: &dyn ArticleStore, records: &[ArticleRecord]) -> usize {
    let mut added = 0;
    for record in records {
        match store.upsert_if_absent(record).await {
            Ok(true) => added += 1,
            Ok(false) => {}
            Err(e) => error!("DB error for {}: {}", record.url, e),
        }
    }
    added
}

async fn show_recent(store: &dyn ArticleStore) -> Result<()> {
    let rows = store.recent(RECENT_COUNT).await?;
    println!("\n{} Most Recent Articles:", RECENT_COUNT);
    for row in rows {
        println!(
            "- {} ({})",
            row.title,
            row.publication_timestamp.as_deref().unwrap_or("")
        );
        println!("  {}", row.url);
        println!("  Snippet: {}\n", snippet(&row.content, SNIPPET_LEN));
    }
    Ok(())
}

/// First `max` characters of the content, with an ellipsis marker only when
/// something was cut off.
fn snippet(content: &str, max: usize) -> String {
    let mut out: String = content.chars().take(max).collect();
    if content.chars().count() > max {
        out.push_str("...");
    }
    out
}
