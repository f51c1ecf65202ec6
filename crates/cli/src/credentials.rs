//! Credential acquisition.
//!
//! Load-or-prompt at the start of each action: a stored key is used as-is,
//! otherwise the user is asked once and a non-empty answer is persisted.

use anyhow::Result;
use tracing::warn;

use rosub_player::{NotifyLevel, Player};

use crate::config::CredentialStore;
use crate::notify::{NOTIFY_TITLE, WARNING_MILLIS};
use crate::prompt::Prompt;

const MISSING_KEY_MESSAGE: &str = "Cheie API necesară! Configurează în setări.";

/// The API key for this action, or `None` when the user declined to supply
/// one (they have already been warned; the caller aborts).
pub async fn obtain_api_key(
    store: &CredentialStore,
    prompt: &dyn Prompt,
    player: &dyn Player,
) -> Result<Option<String>> {
    if let Some(key) = store.load() {
        return Ok(Some(key));
    }

    match prompt.input_api_key() {
        Some(key) => {
            store.save(&key)?;
            Ok(Some(key))
        }
        None => {
            warn!("no api key entered");
            if let Err(e) = player
                .notify(NotifyLevel::Warning, NOTIFY_TITLE, MISSING_KEY_MESSAGE, WARNING_MILLIS)
                .await
            {
                warn!(error = %e, "failed to show missing-key warning");
            }
            Ok(None)
        }
    }
}
