//! Download action: fetch the archive, extract and normalize the chosen
//! subtitle, then bind and activate it on the player.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::sleep;
use tracing::{debug, info};

use rosub_extract::{archive, encoding};
use rosub_player::activate::activate_external_stream;
use rosub_player::{NotifyLevel, Player};
use rosub_provider::SubtitleProvider;

use crate::config::CredentialStore;
use crate::credentials::obtain_api_key;
use crate::notify::{self, report_provider_error};
use crate::prompt::Prompt;

const ARCHIVE_FILENAME: &str = "subs_download.zip";
const SUBTITLE_FILENAME: &str = "forced.romanian.subsro.srt";
const SELECT_TITLE: &str = "Alege episodul srt:";
const DISPLAY_NAME_LIMIT: usize = 30;

/// Pause between closing the search overlay and binding the file, so the
/// player UI has settled.
const UI_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Fixed working paths under the OS temp directory, overwritten on every
/// download and never cleaned up.
pub(crate) struct WorkPaths {
    pub archive: PathBuf,
    pub subtitle: PathBuf,
}

impl Default for WorkPaths {
    fn default() -> Self {
        let tmp = std::env::temp_dir();
        Self {
            archive: tmp.join(ARCHIVE_FILENAME),
            subtitle: tmp.join(SUBTITLE_FILENAME),
        }
    }
}

/// How the download action ended. Every variant short of `Activated` leaves
/// the player untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Activated { file: String },
    NoCredential,
    ApiErrorReported,
    NoCandidates,
    SelectionCancelled,
}

pub async fn run_download<P, F>(
    player: &dyn Player,
    store: &CredentialStore,
    prompt: &dyn Prompt,
    make_provider: F,
    subtitle_id: &str,
) -> Result<DownloadOutcome>
where
    P: SubtitleProvider,
    F: FnOnce(String) -> P,
{
    download_with_paths(
        player,
        store,
        prompt,
        make_provider,
        subtitle_id,
        &WorkPaths::default(),
    )
    .await
}

pub(crate) async fn download_with_paths<P, F>(
    player: &dyn Player,
    store: &CredentialStore,
    prompt: &dyn Prompt,
    make_provider: F,
    subtitle_id: &str,
    paths: &WorkPaths,
) -> Result<DownloadOutcome>
where
    P: SubtitleProvider,
    F: FnOnce(String) -> P,
{
    let Some(api_key) = obtain_api_key(store, prompt, player).await? else {
        return Ok(DownloadOutcome::NoCredential);
    };

    let provider = make_provider(api_key);
    let bytes = match provider.download(subtitle_id).await {
        Ok(bytes) => bytes,
        Err(error) => {
            report_provider_error(player, store, &error).await;
            return Ok(DownloadOutcome::ApiErrorReported);
        }
    };

    std::fs::write(&paths.archive, &bytes)
        .with_context(|| format!("failed to write {}", paths.archive.display()))?;

    let mut archive = archive::open_archive(&paths.archive)?;
    let candidates = archive::subtitle_candidates(&archive);
    if candidates.is_empty() {
        debug!("archive holds no subtitle entries");
        return Ok(DownloadOutcome::NoCandidates);
    }

    let Some(chosen) = choose_candidate(prompt, &candidates) else {
        debug!("subtitle selection cancelled");
        return Ok(DownloadOutcome::SelectionCancelled);
    };

    let raw = archive::read_entry(&mut archive, &chosen)?;
    let (text, encoding_name) = encoding::decode_subtitle(&raw);
    debug!(entry = %chosen, encoding = %encoding_name, "decoded subtitle");

    std::fs::write(&paths.subtitle, text.as_bytes())
        .with_context(|| format!("failed to write {}", paths.subtitle.display()))?;

    player.close_subtitle_dialog().await?;
    sleep(UI_SETTLE_DELAY).await;
    player.load_subtitle(&paths.subtitle).await?;

    activate_external_stream(player).await?;

    let file = truncate_display_name(archive::entry_basename(&chosen));
    info!(file = %file, "subtitle activated");
    player
        .notify(
            NotifyLevel::Info,
            notify::NOTIFY_TITLE,
            &format!("Activat: {file}"),
            notify::SUCCESS_MILLIS,
        )
        .await?;

    Ok(DownloadOutcome::Activated { file })
}

/// A single candidate is taken as-is; several put up a selection dialog
/// over their basenames.
fn choose_candidate(prompt: &dyn Prompt, candidates: &[String]) -> Option<String> {
    if candidates.len() == 1 {
        return Some(candidates[0].clone());
    }

    let display: Vec<String> = candidates
        .iter()
        .map(|name| archive::entry_basename(name).to_string())
        .collect();
    let index = prompt.select(SELECT_TITLE, &display)?;
    candidates.get(index).cloned()
}

fn truncate_display_name(name: &str) -> String {
    name.chars().take(DISPLAY_NAME_LIMIT).collect()
}
