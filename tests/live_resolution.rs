//! Network-gated integration tests for the full resolution chain.

// Ensure this test only runs when integration tests are explicitly enabled,
// but provide feedback if skipped.
#![cfg(feature = "integration_test")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use lyricflow::config::Config;
use lyricflow::resolver::LyricsResolver;
use lyricflow::types::Query;

// Helper function to set up the resolver for tests
fn setup_resolver() -> Option<LyricsResolver> {
    match Config::load() {
        Ok(config) => {
            if config.has_genius_token() {
                Some(LyricsResolver::new(&config))
            } else {
                println!(r#"Skipping integration test: GENIUS_ACCESS_TOKEN not found in environment/".env" file."#);
                None
            }
        }
        Err(e) => {
            println!("Skipping integration test: Failed to load config: {}", e);
            None
        }
    }
}

// Test resolving a well-known song end to end
#[tokio::test]
async fn test_resolve_known_song() {
    if let Some(resolver) = setup_resolver() {
        let query = Query::new("Lose Yourself", "Eminem");
        let result = resolver.resolve(&query).await;

        match result.text {
            Some(text) => {
                println!(
                    "Resolved {} chars via {:?}",
                    text.len(),
                    result.source
                );
                assert!(!text.trim().is_empty(), "Expected non-empty lyric text.");
            }
            None => {
                // All providers can legitimately miss (rate limits, blocks);
                // the contract is only that resolution completes.
                println!("No lyrics found; chain completed without error.");
            }
        }
    }
    // If resolver is None, the test implicitly passes by being skipped.
}

// Test the multi-artist fallback scenario end to end
#[tokio::test]
async fn test_resolve_multi_artist_query() {
    if let Some(resolver) = setup_resolver() {
        let query = Query::new("Как есть", "Баста, ГУФ");
        let result = resolver.resolve(&query).await;
        println!("Multi-artist resolution source: {:?}", result.source);
        // Must complete without panicking regardless of outcome
    }
}
