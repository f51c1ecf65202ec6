//! Search action: list available subtitles for the playing video.

use anyhow::Result;
use tracing::{debug, info};

use rosub_core::SearchQuery;
use rosub_player::Player;
use rosub_provider::SubtitleProvider;

use crate::config::CredentialStore;
use crate::credentials::obtain_api_key;
use crate::listing::{Listing, ListingEntry};
use crate::notify::report_provider_error;
use crate::prompt::Prompt;

/// Run the search action. The returned listing is already finalized; every
/// failure has either been reported to the user or deliberately kept quiet.
pub async fn run_search<P, F>(
    player: &dyn Player,
    store: &CredentialStore,
    prompt: &dyn Prompt,
    make_provider: F,
) -> Listing
where
    P: SubtitleProvider,
    F: FnOnce(String) -> P,
{
    let mut listing = Listing::new();
    if let Err(error) = populate(player, store, prompt, make_provider, &mut listing).await {
        debug!(error = %error, "search aborted");
    }
    listing.finish();
    listing
}

async fn populate<P, F>(
    player: &dyn Player,
    store: &CredentialStore,
    prompt: &dyn Prompt,
    make_provider: F,
    listing: &mut Listing,
) -> Result<()>
where
    P: SubtitleProvider,
    F: FnOnce(String) -> P,
{
    let Some(api_key) = obtain_api_key(store, prompt, player).await? else {
        return Ok(());
    };

    let Some(playing) = player.now_playing().await? else {
        debug!("no video playing, nothing to search for");
        return Ok(());
    };

    let query = SearchQuery::from_now_playing(&playing);
    info!(field = %query.field, value = %query.value, "searching subtitles");

    let provider = make_provider(api_key);
    match provider.search(&query).await {
        Ok(items) => {
            for item in &items {
                listing.push(ListingEntry::from_listing(item));
            }
        }
        Err(error) => report_provider_error(player, store, &error).await,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rosub_core::{NowPlaying, QueryField};
    use rosub_provider::SubtitleListing;

    use super::*;
    use crate::testing::{RecordingPlayer, ScriptedPrompt, StaticProvider, temp_store};

    fn playing_movie(imdb: &str) -> NowPlaying {
        NowPlaying {
            imdb_id: Some(imdb.to_string()),
            season: -1,
            episode: -1,
            title: Some("Movie.2020".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn lists_results_with_download_targets() {
        let store = temp_store("search_lists");
        store.save("key").unwrap();
        let player = RecordingPlayer {
            playing: Some(playing_movie("tt1234567")),
            ..Default::default()
        };
        let provider = StaticProvider {
            items: vec![
                SubtitleListing {
                    id: "11".to_string(),
                    title: "Movie.2020.1080p".to_string(),
                    poster: None,
                },
                SubtitleListing {
                    id: "12".to_string(),
                    title: "Movie.2020.720p".to_string(),
                    poster: None,
                },
            ],
            ..Default::default()
        };

        let listing = run_search(
            &player,
            &store,
            &ScriptedPrompt::refusing_everything(),
            |_key| provider.clone(),
        )
        .await;

        assert!(listing.is_finished());
        assert_eq!(listing.entries().len(), 2);
        assert_eq!(listing.entries()[0].target, "action=download&id=11");

        let calls = provider.search_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].field, QueryField::ImdbId);
        assert_eq!(calls[0].value, "tt1234567");
    }

    #[tokio::test]
    async fn no_video_playing_is_a_quiet_noop() {
        let store = temp_store("search_idle");
        store.save("key").unwrap();
        let player = RecordingPlayer::default();
        let provider = StaticProvider::default();

        let listing = run_search(
            &player,
            &store,
            &ScriptedPrompt::refusing_everything(),
            |_key| provider.clone(),
        )
        .await;

        assert!(listing.is_finished());
        assert!(listing.entries().is_empty());
        assert!(provider.search_calls.lock().unwrap().is_empty());
        assert!(player.notifications.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mapped_api_failure_is_reported_and_listing_stays_empty() {
        let store = temp_store("search_api_error");
        store.save("key").unwrap();
        let player = RecordingPlayer {
            playing: Some(playing_movie("tt1234567")),
            ..Default::default()
        };
        let provider = StaticProvider {
            search_error: Some(500),
            ..Default::default()
        };

        let listing = run_search(
            &player,
            &store,
            &ScriptedPrompt::refusing_everything(),
            |_key| provider.clone(),
        )
        .await;

        assert!(listing.is_finished());
        assert!(listing.entries().is_empty());
        let notes = player.notifications.lock().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Eroare de server Subs.ro. Revenim imediat.");
    }

    #[tokio::test]
    async fn missing_credential_aborts_before_searching() {
        let store = temp_store("search_no_key");
        let player = RecordingPlayer {
            playing: Some(playing_movie("tt1234567")),
            ..Default::default()
        };
        let provider = StaticProvider::default();

        let listing = run_search(
            &player,
            &store,
            &ScriptedPrompt::refusing_everything(),
            |_key| provider.clone(),
        )
        .await;

        assert!(listing.is_finished());
        assert!(listing.entries().is_empty());
        assert!(provider.search_calls.lock().unwrap().is_empty());
        // The missing-key warning is the only user-visible feedback.
        assert_eq!(player.notifications.lock().unwrap().len(), 1);
    }
}
