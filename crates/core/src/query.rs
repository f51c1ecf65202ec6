//! Search-query derivation from now-playing metadata.
//!
//! Exactly one identifying field is sent per search request, picked in
//! strict priority order:
//! 1. IMDB id, when it matches `tt` + digits
//! 2. `"{show} SxxEyy"` for episodes (zero-padded to 2 digits)
//! 3. the plain title

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::media::NowPlaying;

static RE_IMDB_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^tt\d+$").unwrap());

/// The search field sent to the subtitle provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryField {
    ImdbId,
    Title,
}

impl QueryField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ImdbId => "imdbid",
            Self::Title => "title",
        }
    }
}

impl std::fmt::Display for QueryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field/value pair identifying the playing video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub field: QueryField,
    pub value: String,
}

impl SearchQuery {
    /// Derive the query from now-playing metadata.
    pub fn from_now_playing(playing: &NowPlaying) -> Self {
        if let Some(imdb_id) = playing.imdb_id.as_deref()
            && RE_IMDB_ID.is_match(imdb_id)
        {
            return Self {
                field: QueryField::ImdbId,
                value: imdb_id.to_string(),
            };
        }

        let value = match playing.show_title_trimmed() {
            Some(show) if playing.season != -1 => {
                format!("{show} S{:02}E{:02}", playing.season, playing.episode)
            }
            _ => playing.title.clone().unwrap_or_default(),
        };

        Self {
            field: QueryField::Title,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(imdb: Option<&str>, show: &str, season: i64, episode: i64) -> NowPlaying {
        NowPlaying {
            imdb_id: imdb.map(str::to_string),
            show_title: Some(show.to_string()),
            season,
            episode,
            title: Some("Some.Release.Title".to_string()),
        }
    }

    #[test]
    fn imdb_id_wins_over_everything() {
        let q = SearchQuery::from_now_playing(&episode(Some("tt1234567"), "Show", 1, 2));
        assert_eq!(q.field, QueryField::ImdbId);
        assert_eq!(q.value, "tt1234567");
    }

    #[test]
    fn malformed_imdb_id_falls_through() {
        for bad in ["1234567", "tt", "ttabc", "tt12 34", " tt123"] {
            let q = SearchQuery::from_now_playing(&episode(Some(bad), "Show", 1, 2));
            assert_eq!(q.field, QueryField::Title, "{bad} should not pass as imdb id");
        }
    }

    #[test]
    fn episode_query_is_zero_padded() {
        let q = SearchQuery::from_now_playing(&episode(None, "The Wire", 3, 7));
        assert_eq!(q.field, QueryField::Title);
        assert_eq!(q.value, "The Wire S03E07");
    }

    #[test]
    fn wide_numbers_keep_their_digits() {
        let q = SearchQuery::from_now_playing(&episode(None, "One Piece", 11, 104));
        assert_eq!(q.value, "One Piece S11E104");
    }

    #[test]
    fn season_minus_one_means_movie() {
        let q = SearchQuery::from_now_playing(&episode(None, "Not A Show", -1, -1));
        assert_eq!(q.field, QueryField::Title);
        assert_eq!(q.value, "Some.Release.Title");
    }

    #[test]
    fn blank_show_title_uses_plain_title() {
        let playing = NowPlaying {
            show_title: Some("   ".to_string()),
            season: 1,
            episode: 1,
            title: Some("Movie.2020".to_string()),
            ..Default::default()
        };
        let q = SearchQuery::from_now_playing(&playing);
        assert_eq!(q.value, "Movie.2020");
    }

    #[test]
    fn empty_metadata_yields_empty_title_value() {
        let q = SearchQuery::from_now_playing(&NowPlaying {
            season: -1,
            episode: -1,
            ..Default::default()
        });
        assert_eq!(q.field, QueryField::Title);
        assert_eq!(q.value, "");
    }
}
