//! One-shot CLI driver over the state managers.
//!
//! This is deliberately not a view layer: it composes the storage adapter,
//! the live catalog client, and [`AppState`], runs a single action, and prints
//! what the derived getters expose.

use std::sync::Arc;

use tracing::info;

use crate::args::Args;
use crate::sources::{Catalog, CatalogClient, SearchCriteria, SearchError};
use crate::state::{AppState, Entity, MediaItem, SearchPage};
use crate::storage::{FileStore, StorageAdapter};
use crate::util::paths;

/// Build the query for a direct catalog request with an explicit limit.
///
/// The gateway clamps the requested count through
/// [`SearchCriteria::effective_limit`], so overshoot is tolerated here.
fn build_criteria(term: &str, entity: Entity, limit: Option<u32>) -> SearchCriteria {
    SearchCriteria {
        limit,
        ..SearchCriteria::new(term, entity)
    }
}

/// One-line summary for a page fetched outside the search state manager.
fn page_summary(page: &SearchPage) -> String {
    match page.result_count {
        0 => "No results".to_owned(),
        1 => "1 result found".to_owned(),
        n => format!("{n} results found"),
    }
}

fn print_items(items: &[MediaItem]) {
    for item in items {
        let name = item.display_name();
        let artist = item.artist_name.as_deref().unwrap_or("unknown artist");
        match item.primary_genre_name.as_deref() {
            Some(genre) => println!("  {name} by {artist} ({genre})"),
            None => println!("  {name} by {artist}"),
        }
    }
}

/// Execute one CLI invocation against the live catalog.
///
/// # Errors
///
/// Returns [`SearchError::InvalidInput`] for a missing term or unknown entity
/// key, and propagates classified gateway failures from the search itself.
pub async fn run(args: &Args) -> Result<(), SearchError> {
    let storage: Arc<dyn StorageAdapter> = Arc::new(FileStore::new(paths::lists_dir()));
    let mut app = AppState::load(storage);

    if args.history {
        if app.search.history().is_empty() {
            println!("No recent searches.");
        } else {
            for term in app.search.history() {
                println!("{term}");
            }
        }
        return Ok(());
    }

    let Some(term) = args.term.as_deref() else {
        eprintln!("A search term is required (or use --history).");
        return Err(SearchError::InvalidInput);
    };
    let Some(entity) = Entity::from_key(&args.entity) else {
        eprintln!(
            "Unknown entity {:?}; expected one of: album, artist, song, video, podcast.",
            args.entity
        );
        return Err(SearchError::InvalidInput);
    };

    let catalog = CatalogClient::new();

    // An explicit --limit goes straight to the gateway; the state manager's
    // cache keys ignore the limit, so mixing counts through it would cross-feed
    // cached pages of the wrong size.
    if args.limit.is_some() {
        let page = catalog
            .search(build_criteria(term, entity, args.limit))
            .await?;
        info!(
            term,
            entity = %entity,
            limit = args.limit,
            result_count = page.result_count,
            "direct search finished"
        );
        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&page.results).unwrap_or_default()
            );
        } else {
            println!("{}", page_summary(&page));
            print_items(&page.results);
        }
        return Ok(());
    }

    app.search
        .search(&catalog, Some(term), Some(entity), args.refresh)
        .await?;
    info!(
        term,
        entity = %entity,
        result_count = app.search.result_count(),
        "search finished"
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(app.search.results()).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", app.search.search_summary());
    print_items(app.search.results());
    Ok(())
}
