pub mod subsro;

use thiserror::Error;

use rosub_core::SearchQuery;

/// Errors from the subtitle provider API.
///
/// The HTTP-status variants carry the localized message shown to the user;
/// `Network` and `Parse` stay silent (logged only).
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("api key rejected (401)")]
    Unauthorized,
    #[error("access denied or download limit reached (403)")]
    Forbidden,
    #[error("subtitle not found (404)")]
    NotFound,
    #[error("rate limited (429)")]
    RateLimited,
    #[error("provider server error (500)")]
    Server,
    #[error("unexpected http status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Map a non-success HTTP status to its error variant.
    pub fn from_status(code: u16) -> Self {
        match code {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500 => Self::Server,
            other => Self::Status(other),
        }
    }

    /// Localized message to surface in the player UI, when this error class
    /// is user-visible at all.
    pub fn user_message(&self) -> Option<String> {
        let msg = match self {
            Self::Unauthorized => "Cheie API invalidă! Verifică setările addon-ului.".to_string(),
            Self::Forbidden => "Acces interzis sau limită de download atinsă.".to_string(),
            Self::NotFound => "Subtitrarea nu a fost găsită.".to_string(),
            Self::RateLimited => "Prea multe cereri! Încearcă mai târziu.".to_string(),
            Self::Server => "Eroare de server Subs.ro. Revenim imediat.".to_string(),
            Self::Status(code) => format!("Eroare API necunoscută (Cod: {code})"),
            Self::Network(_) | Self::Parse(_) => return None,
        };
        Some(msg)
    }

    /// Whether the stored credential should be discarded after this error.
    pub fn invalidates_credential(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// One subtitle search hit.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubtitleListing {
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
}

/// A provider that can search for subtitles and download them as archives.
#[async_trait::async_trait]
pub trait SubtitleProvider: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SubtitleListing>, ProviderError>;

    async fn download(&self, subtitle_id: &str) -> Result<Vec<u8>, ProviderError>;
}
