//! Kodi JSON-RPC client.
//!
//! Drives a running Kodi instance over the HTTP transport
//! (Settings → Services → Control → "Allow remote control via HTTP").
//! Subtitle files are passed as local paths, so this assumes Kodi runs on
//! the same host the files are written on.

use std::path::Path;

use serde_json::{Value, json};
use tracing::debug;

use rosub_core::NowPlaying;

use crate::{NotifyLevel, Player, PlayerError, SubtitleStream};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/jsonrpc";

const NOW_PLAYING_PROPERTIES: &[&str] = &["imdbnumber", "showtitle", "season", "episode", "title"];
const SUBTITLE_PROPERTIES: &[&str] = &["subtitles", "currentsubtitle", "subtitleenabled"];

pub struct KodiClient {
    endpoint: String,
    credentials: Option<(String, String)>,
    client: reqwest::Client,
}

impl KodiClient {
    pub fn new(endpoint: String, credentials: Option<(String, String)>) -> Self {
        Self {
            endpoint,
            credentials,
            client: reqwest::Client::new(),
        }
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, PlayerError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        debug!(method = %method, "kodi rpc");

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, Some(pass));
        }

        let resp = request
            .send()
            .await
            .map_err(|e| PlayerError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PlayerError::Rpc {
                method: method.to_string(),
                message: format!("http status {}", resp.status()),
            });
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| PlayerError::Protocol(format!("rpc response: {e}")))?;

        if let Some(err) = body.get("error") {
            return Err(PlayerError::Rpc {
                method: method.to_string(),
                message: err["message"].as_str().unwrap_or("unknown error").to_string(),
            });
        }

        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }

    async fn active_video_player(&self) -> Result<Option<i64>, PlayerError> {
        let players = self.call("Player.GetActivePlayers", json!({})).await?;
        Ok(find_video_player(&players))
    }

    async fn require_video_player(&self) -> Result<i64, PlayerError> {
        self.active_video_player()
            .await?
            .ok_or(PlayerError::NotPlaying)
    }

    async fn subtitle_properties(&self, player_id: i64) -> Result<Value, PlayerError> {
        self.call(
            "Player.GetProperties",
            json!({ "playerid": player_id, "properties": SUBTITLE_PROPERTIES }),
        )
        .await
    }
}

#[async_trait::async_trait]
impl Player for KodiClient {
    async fn is_playing_video(&self) -> Result<bool, PlayerError> {
        Ok(self.active_video_player().await?.is_some())
    }

    async fn now_playing(&self) -> Result<Option<NowPlaying>, PlayerError> {
        let Some(player_id) = self.active_video_player().await? else {
            return Ok(None);
        };

        let result = self
            .call(
                "Player.GetItem",
                json!({ "playerid": player_id, "properties": NOW_PLAYING_PROPERTIES }),
            )
            .await?;

        Ok(Some(parse_now_playing(&result["item"])))
    }

    async fn load_subtitle(&self, path: &Path) -> Result<(), PlayerError> {
        let player_id = self.require_video_player().await?;
        self.call(
            "Player.AddSubtitle",
            json!({ "playerid": player_id, "subtitle": path.to_string_lossy() }),
        )
        .await?;
        Ok(())
    }

    async fn subtitle_streams(&self) -> Result<Vec<SubtitleStream>, PlayerError> {
        let player_id = self.require_video_player().await?;
        let props = self.subtitle_properties(player_id).await?;
        Ok(parse_subtitle_streams(&props))
    }

    async fn current_subtitle_stream(&self) -> Result<Option<i64>, PlayerError> {
        let player_id = self.require_video_player().await?;
        let props = self.subtitle_properties(player_id).await?;
        Ok(parse_current_subtitle(&props))
    }

    async fn set_subtitle_stream(&self, index: i64) -> Result<(), PlayerError> {
        let player_id = self.require_video_player().await?;
        self.call(
            "Player.SetSubtitle",
            json!({ "playerid": player_id, "subtitle": index, "enable": true }),
        )
        .await?;
        Ok(())
    }

    async fn show_subtitles(&self, visible: bool) -> Result<(), PlayerError> {
        let player_id = self.require_video_player().await?;
        let subtitle = if visible { "on" } else { "off" };
        self.call(
            "Player.SetSubtitle",
            json!({ "playerid": player_id, "subtitle": subtitle }),
        )
        .await?;
        Ok(())
    }

    async fn close_subtitle_dialog(&self) -> Result<(), PlayerError> {
        self.call("Input.ExecuteAction", json!({ "action": "close" }))
            .await?;
        Ok(())
    }

    async fn notify(
        &self,
        level: NotifyLevel,
        title: &str,
        message: &str,
        millis: u64,
    ) -> Result<(), PlayerError> {
        self.call(
            "GUI.ShowNotification",
            json!({
                "title": title,
                "message": message,
                "image": level.as_str(),
                "displaytime": millis,
            }),
        )
        .await?;
        Ok(())
    }
}

fn find_video_player(players: &Value) -> Option<i64> {
    players.as_array().and_then(|players| {
        players
            .iter()
            .find(|p| p["type"].as_str() == Some("video"))
            .and_then(|p| p["playerid"].as_i64())
    })
}

fn non_empty(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::to_string)
        .filter(|s| !s.is_empty())
}

fn parse_now_playing(item: &Value) -> NowPlaying {
    NowPlaying {
        imdb_id: non_empty(&item["imdbnumber"]),
        show_title: non_empty(&item["showtitle"]),
        season: item["season"].as_i64().unwrap_or(-1),
        episode: item["episode"].as_i64().unwrap_or(-1),
        // Info-tag title first, falling back to the player's display label.
        title: non_empty(&item["title"]).or_else(|| non_empty(&item["label"])),
    }
}

fn parse_subtitle_streams(props: &Value) -> Vec<SubtitleStream> {
    let streams = props["subtitles"].as_array().cloned().unwrap_or_default();

    streams
        .iter()
        .filter_map(|s| {
            Some(SubtitleStream {
                index: s["index"].as_i64()?,
                name: s["name"].as_str().unwrap_or("").to_string(),
                language: s["language"].as_str().unwrap_or("").to_string(),
            })
        })
        .collect()
}

fn parse_current_subtitle(props: &Value) -> Option<i64> {
    props["currentsubtitle"]["index"].as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_video_player_among_active_players() {
        let players = json!([
            { "playerid": 0, "type": "audio" },
            { "playerid": 1, "type": "video" },
        ]);
        assert_eq!(find_video_player(&players), Some(1));
    }

    #[test]
    fn no_video_player_when_only_audio_is_active() {
        assert_eq!(find_video_player(&json!([{ "playerid": 0, "type": "audio" }])), None);
        assert_eq!(find_video_player(&json!([])), None);
        assert_eq!(find_video_player(&json!(null)), None);
    }

    #[test]
    fn parse_now_playing_episode_item() {
        let item = json!({
            "imdbnumber": "tt0306414",
            "showtitle": "The Wire",
            "season": 3,
            "episode": 7,
            "title": "Back Burners",
            "label": "Back Burners",
        });
        let playing = parse_now_playing(&item);
        assert_eq!(playing.imdb_id.as_deref(), Some("tt0306414"));
        assert_eq!(playing.show_title.as_deref(), Some("The Wire"));
        assert_eq!(playing.season, 3);
        assert_eq!(playing.episode, 7);
        assert_eq!(playing.title.as_deref(), Some("Back Burners"));
    }

    #[test]
    fn parse_now_playing_blank_fields_become_none() {
        let item = json!({
            "imdbnumber": "",
            "showtitle": "",
            "title": "",
            "label": "stream.mkv",
        });
        let playing = parse_now_playing(&item);
        assert!(playing.imdb_id.is_none());
        assert!(playing.show_title.is_none());
        assert_eq!(playing.season, -1);
        assert_eq!(playing.episode, -1);
        // Falls back to the display label when the title is blank.
        assert_eq!(playing.title.as_deref(), Some("stream.mkv"));
    }

    #[test]
    fn parse_subtitle_streams_from_properties() {
        let props = json!({
            "subtitles": [
                { "index": 0, "language": "eng", "name": "English" },
                { "index": 1, "language": "rum", "name": "forced.romanian.subsro" },
                { "language": "rum", "name": "missing index" },
            ],
            "currentsubtitle": { "index": 0, "language": "eng", "name": "English" },
        });

        let streams = parse_subtitle_streams(&props);
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[1].index, 1);
        assert_eq!(streams[1].name, "forced.romanian.subsro");
        assert_eq!(parse_current_subtitle(&props), Some(0));
    }

    #[test]
    fn parse_current_subtitle_absent() {
        assert_eq!(parse_current_subtitle(&json!({})), None);
        assert_eq!(parse_current_subtitle(&json!({ "currentsubtitle": {} })), None);
    }
}
