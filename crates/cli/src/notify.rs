//! On-screen feedback for provider failures.

use tracing::{debug, warn};

use rosub_player::{NotifyLevel, Player};
use rosub_provider::ProviderError;

use crate::config::CredentialStore;

pub const NOTIFY_TITLE: &str = "Subs.ro";
pub const ERROR_TITLE: &str = "Eroare Subs.ro";

pub const ERROR_MILLIS: u64 = 5000;
pub const WARNING_MILLIS: u64 = 5000;
pub const SUCCESS_MILLIS: u64 = 2000;

/// Surface a provider failure according to its class: mapped HTTP errors
/// notify the user, a 401 additionally drops the stored credential, and
/// transport errors only log.
pub async fn report_provider_error(
    player: &dyn Player,
    store: &CredentialStore,
    error: &ProviderError,
) {
    if let Some(message) = error.user_message() {
        if let Err(e) = player
            .notify(NotifyLevel::Error, ERROR_TITLE, &message, ERROR_MILLIS)
            .await
        {
            warn!(error = %e, "failed to show error notification");
        }
    } else {
        debug!(error = %error, "provider error with no user-facing message");
    }

    if error.invalidates_credential()
        && let Err(e) = store.clear()
    {
        warn!(error = %e, "failed to clear stored api key");
    }
}
