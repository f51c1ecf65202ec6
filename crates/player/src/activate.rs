//! External-subtitle stream activation.
//!
//! After a subtitle file is bound, the player takes a moment to expose it in
//! its stream list. The activation poll re-scans the list for the bounded
//! window and keeps the external stream selected while the video plays.

use std::time::Duration;

use tracing::debug;

use crate::poll::{PollOutcome, PollPolicy, PollTick, poll_until};
use crate::{Player, PlayerError};

pub const STREAM_POLL_ATTEMPTS: u32 = 15;
pub const STREAM_POLL_INTERVAL: Duration = Duration::from_millis(400);

/// Name fragments that identify the freshly loaded subtitle stream.
const EXTERNAL_STREAM_MARKERS: &[&str] = &["forced.romanian", "external"];

pub fn is_external_stream(name: &str) -> bool {
    let lower = name.to_lowercase();
    EXTERNAL_STREAM_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// One scan over the stream list. Returns `true` when playback has stopped.
async fn enforce_external_stream<P: Player + ?Sized>(player: &P) -> Result<bool, PlayerError> {
    if !player.is_playing_video().await? {
        return Ok(true);
    }

    let streams = player.subtitle_streams().await?;
    if let Some(stream) = streams.iter().find(|s| is_external_stream(&s.name))
        && player.current_subtitle_stream().await? != Some(stream.index)
    {
        debug!(index = stream.index, name = %stream.name, "switching to external subtitle stream");
        player.set_subtitle_stream(stream.index).await?;
        player.show_subtitles(true).await?;
    }

    Ok(false)
}

/// Keep the external stream active until the window closes or playback stops.
///
/// The poll never reports `Satisfied`: the stream selection is re-checked on
/// every tick for the whole window, so a player that reverts the selection is
/// corrected.
pub async fn activate_external_stream<P: Player + ?Sized>(
    player: &P,
) -> Result<PollOutcome, PlayerError> {
    let policy = PollPolicy {
        attempts: STREAM_POLL_ATTEMPTS,
        interval: STREAM_POLL_INTERVAL,
    };

    let mut failure: Option<PlayerError> = None;
    let outcome = poll_until(&policy, async || {
        match enforce_external_stream(player).await {
            Ok(true) => PollTick::Cancelled,
            Ok(false) => PollTick::Pending,
            Err(e) => {
                failure = Some(e);
                PollTick::Cancelled
            }
        }
    })
    .await;

    match failure {
        Some(e) => Err(e),
        None => Ok(outcome),
    }
}
