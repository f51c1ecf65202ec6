pub mod activate;
pub mod kodi;
pub mod poll;

use std::path::Path;

use thiserror::Error;

use rosub_core::NowPlaying;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("network error: {0}")]
    Network(String),
    #[error("rpc {method} failed: {message}")]
    Rpc { method: String, message: String },
    #[error("no video is playing")]
    NotPlaying,
    #[error("unexpected response: {0}")]
    Protocol(String),
}

/// An entry in the player's subtitle-stream list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubtitleStream {
    pub index: i64,
    pub name: String,
    pub language: String,
}

/// Severity of an on-screen notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
}

impl NotifyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Control surface of the host media player.
#[async_trait::async_trait]
pub trait Player: Send + Sync {
    /// Whether a video is currently playing.
    async fn is_playing_video(&self) -> Result<bool, PlayerError>;

    /// Metadata of the playing video, or `None` when nothing plays.
    async fn now_playing(&self) -> Result<Option<NowPlaying>, PlayerError>;

    /// Bind a subtitle file to the playing video.
    async fn load_subtitle(&self, path: &Path) -> Result<(), PlayerError>;

    /// List the subtitle streams the player currently offers.
    async fn subtitle_streams(&self) -> Result<Vec<SubtitleStream>, PlayerError>;

    /// Index of the active subtitle stream, if any.
    async fn current_subtitle_stream(&self) -> Result<Option<i64>, PlayerError>;

    /// Switch the active subtitle stream.
    async fn set_subtitle_stream(&self, index: i64) -> Result<(), PlayerError>;

    /// Toggle subtitle visibility.
    async fn show_subtitles(&self, visible: bool) -> Result<(), PlayerError>;

    /// Dismiss the subtitle-search overlay, if one is open.
    async fn close_subtitle_dialog(&self) -> Result<(), PlayerError>;

    /// Show a transient on-screen notification.
    async fn notify(
        &self,
        level: NotifyLevel,
        title: &str,
        message: &str,
        millis: u64,
    ) -> Result<(), PlayerError>;
}
