//! Terminal movie feed
//!
//! Mounts a feed against TMDB and scrolls through it, printing each page as
//! it loads.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TMDB_API_KEY` | TMDB v3 key | required |
//! | `BROWSE_LANGUAGE` | original-language filter (ISO-639-1) | none |
//! | `BROWSE_GENRE` | TMDB genre id | none |
//! | `BROWSE_SEARCH` | title search instead of discover | none |
//! | `BROWSE_PAGES` | pages to scroll through | `3` |
//!
//! Run with: `BROWSE_LANGUAGE=ml BROWSE_GENRE=18 cargo run --bin marquee-browse`

use anyhow::Context;
use marquee_core::SystemClock;
use marquee_feed::config::parse_var;
use marquee_feed::{FeedConfig, FeedEnvironment, FeedQuery, FeedState, PagedFeedController};
use marquee_runtime::StoreConfig;
use marquee_tmdb::{ImageUrl, PosterSize, TmdbClient, genre_names, language_name};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PAGE_TIMEOUT: Duration = Duration::from_secs(45);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "marquee_browse=debug,marquee_feed=debug,marquee_runtime=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let feed_config = FeedConfig::from_env().context("invalid feed configuration")?;
    let client = TmdbClient::from_env().context("cannot create TMDB client")?;
    let images = client.images().clone();

    let query = initial_query()?;
    let pages: u32 = parse_var("BROWSE_PAGES")?.unwrap_or(3);
    tracing::info!(?query, pages, "Browsing");

    let feed = PagedFeedController::with_config(
        FeedEnvironment::new(client, feed_config, SystemClock),
        query,
        StoreConfig::default().with_shutdown_timeout(SHUTDOWN_TIMEOUT),
    );

    feed.mount().await?.wait_with_timeout(PAGE_TIMEOUT).await?;
    let mut printed = print_new_items(&feed.snapshot().await, 0, &images);

    for _ in 1..pages {
        if !feed.state(|s| s.has_more).await {
            break;
        }
        feed.on_scrolled_near_bottom()
            .await?
            .wait_with_timeout(PAGE_TIMEOUT)
            .await?;
        printed = print_new_items(&feed.snapshot().await, printed, &images);
    }

    let state = feed.snapshot().await;
    if let Some(error) = &state.last_error {
        println!("\n!! last fetch failed: {error}");
    }
    println!(
        "\n{} movies across {} page(s){}",
        state.items.len(),
        state.page_number,
        if state.has_more { "" } else { ", end of results" }
    );

    feed.unmount().await?;
    Ok(())
}

fn initial_query() -> anyhow::Result<FeedQuery> {
    let language: Option<String> = parse_var("BROWSE_LANGUAGE")?;
    let genre: Option<u32> = parse_var("BROWSE_GENRE")?;
    let query = FeedQuery::filtered(language, genre);

    Ok(match parse_var::<String>("BROWSE_SEARCH")? {
        Some(text) if !text.trim().is_empty() => FeedQuery {
            free_text: Some(text),
            ..query
        },
        _ => query,
    })
}

/// Print items from index `from` onwards, returning the new item count
fn print_new_items(state: &FeedState, from: usize, images: &ImageUrl) -> usize {
    println!("\n--- page {} ---", state.page_number);

    for item in state.items.iter().skip(from) {
        // Cards without a poster are not rendered.
        let Some(poster) = &item.poster_ref else {
            continue;
        };
        println!(
            "{:>8}  {}  [{}; {}]\n          {}",
            item.id,
            item.title,
            genre_names(&item.tag_ids),
            language_name(&item.language_code),
            images.poster(poster, PosterSize::W500),
        );
    }

    state.items.len()
}
