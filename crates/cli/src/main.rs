use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rosub_cli::config::CredentialStore;
use rosub_cli::params::{self, Action};
use rosub_cli::prompt::TerminalPrompt;
use rosub_cli::{download, search};
use rosub_player::kodi::{DEFAULT_ENDPOINT, KodiClient};
use rosub_provider::subsro::SubsRoClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let endpoint =
        std::env::var("ROSUB_KODI_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    let credentials = match (
        std::env::var("ROSUB_KODI_USER"),
        std::env::var("ROSUB_KODI_PASS"),
    ) {
        (Ok(user), Ok(pass)) => Some((user, pass)),
        _ => None,
    };
    info!(endpoint = %endpoint, "using kodi endpoint");
    let player = KodiClient::new(endpoint, credentials);

    let store = CredentialStore::new(CredentialStore::default_path());
    let prompt = TerminalPrompt;

    let arg = std::env::args().nth(1);
    let action = params::parse_action(arg.as_deref())?;

    // Actions either fully succeed or abort quietly; mapped API failures
    // have already been shown as player notifications by the time the flow
    // returns, so remaining errors are only logged.
    match action {
        Action::Search => {
            search::run_search(&player, &store, &prompt, SubsRoClient::new).await;
        }
        Action::Download { id } => {
            match download::run_download(&player, &store, &prompt, SubsRoClient::new, &id).await {
                Ok(outcome) => debug!(outcome = ?outcome, "download finished"),
                Err(error) => debug!(error = %error, "download aborted"),
            }
        }
    }

    Ok(())
}
