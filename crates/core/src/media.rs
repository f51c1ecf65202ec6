use serde::{Deserialize, Serialize};

/// Metadata of the video currently playing, as reported by the player.
///
/// `season` is `-1` when the playing item is not an episode (the player
/// reports `-1` rather than omitting the field).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub imdb_id: Option<String>,
    pub show_title: Option<String>,
    pub season: i64,
    pub episode: i64,
    pub title: Option<String>,
}

impl NowPlaying {
    /// Show title, if present and non-blank.
    pub fn show_title_trimmed(&self) -> Option<&str> {
        self.show_title
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
