//! Shared test doubles for the action flows.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rosub_core::{NowPlaying, SearchQuery};
use rosub_player::{NotifyLevel, Player, PlayerError, SubtitleStream};
use rosub_provider::{ProviderError, SubtitleListing, SubtitleProvider};

use crate::config::CredentialStore;
use crate::prompt::Prompt;

pub(crate) fn temp_store(case: &str) -> CredentialStore {
    let dir = std::env::temp_dir().join(format!("rosub_cli_test_{}", std::process::id()));
    CredentialStore::new(dir.join(case).join("config.json"))
}

pub(crate) struct Notification {
    pub level: NotifyLevel,
    pub title: String,
    pub message: String,
}

/// A player that answers from fixed state and records every side effect.
#[derive(Default)]
pub(crate) struct RecordingPlayer {
    pub playing: Option<NowPlaying>,
    pub streams: Vec<SubtitleStream>,
    pub current: Mutex<Option<i64>>,
    pub notifications: Mutex<Vec<Notification>>,
    pub loaded: Mutex<Vec<PathBuf>>,
    pub dialog_closes: Mutex<u32>,
    pub switches: Mutex<Vec<i64>>,
}

#[async_trait::async_trait]
impl Player for RecordingPlayer {
    async fn is_playing_video(&self) -> Result<bool, PlayerError> {
        Ok(self.playing.is_some())
    }

    async fn now_playing(&self) -> Result<Option<NowPlaying>, PlayerError> {
        Ok(self.playing.clone())
    }

    async fn load_subtitle(&self, path: &Path) -> Result<(), PlayerError> {
        self.loaded.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn subtitle_streams(&self) -> Result<Vec<SubtitleStream>, PlayerError> {
        Ok(self.streams.clone())
    }

    async fn current_subtitle_stream(&self) -> Result<Option<i64>, PlayerError> {
        Ok(*self.current.lock().unwrap())
    }

    async fn set_subtitle_stream(&self, index: i64) -> Result<(), PlayerError> {
        self.switches.lock().unwrap().push(index);
        *self.current.lock().unwrap() = Some(index);
        Ok(())
    }

    async fn show_subtitles(&self, _visible: bool) -> Result<(), PlayerError> {
        Ok(())
    }

    async fn close_subtitle_dialog(&self) -> Result<(), PlayerError> {
        *self.dialog_closes.lock().unwrap() += 1;
        Ok(())
    }

    async fn notify(
        &self,
        level: NotifyLevel,
        title: &str,
        message: &str,
        _millis: u64,
    ) -> Result<(), PlayerError> {
        self.notifications.lock().unwrap().push(Notification {
            level,
            title: title.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

/// A prompt with canned answers; records the selection dialogs it shows.
pub(crate) struct ScriptedPrompt {
    pub api_key: Option<String>,
    pub selection: Option<usize>,
    pub select_calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedPrompt {
    pub fn refusing_everything() -> Self {
        Self {
            api_key: None,
            selection: None,
            select_calls: Mutex::new(Vec::new()),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn input_api_key(&self) -> Option<String> {
        self.api_key.clone()
    }

    fn select(&self, title: &str, options: &[String]) -> Option<usize> {
        self.select_calls
            .lock()
            .unwrap()
            .push((title.to_string(), options.to_vec()));
        self.selection
    }
}

/// A provider with canned responses; clones share their call recorders.
#[derive(Clone, Default)]
pub(crate) struct StaticProvider {
    pub items: Vec<SubtitleListing>,
    pub search_error: Option<u16>,
    pub archive: Vec<u8>,
    pub download_error: Option<u16>,
    pub search_calls: Arc<Mutex<Vec<SearchQuery>>>,
    pub download_calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl SubtitleProvider for StaticProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SubtitleListing>, ProviderError> {
        self.search_calls.lock().unwrap().push(query.clone());
        match self.search_error {
            Some(code) => Err(ProviderError::from_status(code)),
            None => Ok(self.items.clone()),
        }
    }

    async fn download(&self, subtitle_id: &str) -> Result<Vec<u8>, ProviderError> {
        self.download_calls.lock().unwrap().push(subtitle_id.to_string());
        match self.download_error {
            Some(code) => Err(ProviderError::from_status(code)),
            None => Ok(self.archive.clone()),
        }
    }
}

pub(crate) fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::Write;

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
