//! Wire protocol for the music helper: newline-delimited UTF-8 JSON, one
//! object per line in both directions.
//!
//! Outbound lines are `{"command": ...}` objects; inbound lines are
//! `{"event": ..., "data": {...}}` objects. Field names are the helper's
//! contract and must not drift.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transport command sent to the helper's stdin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlayerCommand {
    Toggle,
    Next,
    Prev,
    Seek { position: f64 },
    SetVolume { volume: f64 },
    GetStatus,
    GetDevices,
    SetDevice { device_id: i64 },
}

/// One audio output device as reported by the helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioDevice {
    pub id: i64,
    pub name: String,
    pub hostapi: i64,
    pub is_default: bool,
}

/// Payload of the `devices` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicesPayload {
    pub devices: Vec<AudioDevice>,
    /// Currently selected device id; absent when the default is in use.
    #[serde(default)]
    pub current: Option<i64>,
}

/// Push event decoded from the helper's stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Ready,
    Status {
        playing: bool,
        name: String,
        current: f64,
        duration: f64,
    },
    TrackChange {
        name: String,
        duration: f64,
    },
    PlayState {
        playing: bool,
    },
    Progress {
        current: f64,
        duration: f64,
    },
    Devices(DevicesPayload),
}

#[derive(Deserialize)]
struct RawMessage {
    event: String,
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct StatusData {
    #[serde(default)]
    playing: bool,
    #[serde(default)]
    name: String,
    #[serde(default)]
    current: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Deserialize)]
struct TrackData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    duration: f64,
}

#[derive(Deserialize)]
struct PlayStateData {
    #[serde(default)]
    playing: bool,
}

#[derive(Deserialize)]
struct ProgressData {
    #[serde(default)]
    current: f64,
    #[serde(default)]
    duration: f64,
}

impl PlayerEvent {
    /// Decode one protocol line.
    ///
    /// `Ok(None)` means the line was well-formed JSON with an event name
    /// this version does not know; callers log and drop it, the stream
    /// continues. Malformed JSON is an error carrying the parse failure.
    pub fn parse_line(line: &str) -> Result<Option<PlayerEvent>, serde_json::Error> {
        let raw: RawMessage = serde_json::from_str(line)?;
        let event = match raw.event.as_str() {
            "ready" => PlayerEvent::Ready,
            "status" => {
                let d: StatusData = serde_json::from_value(raw.data)?;
                PlayerEvent::Status {
                    playing: d.playing,
                    name: d.name,
                    current: d.current,
                    duration: d.duration,
                }
            }
            "track_change" => {
                let d: TrackData = serde_json::from_value(raw.data)?;
                PlayerEvent::TrackChange {
                    name: d.name,
                    duration: d.duration,
                }
            }
            "play_state" => {
                let d: PlayStateData = serde_json::from_value(raw.data)?;
                PlayerEvent::PlayState { playing: d.playing }
            }
            "progress" => {
                let d: ProgressData = serde_json::from_value(raw.data)?;
                PlayerEvent::Progress {
                    current: d.current,
                    duration: d.duration,
                }
            }
            "devices" => {
                let d: DevicesPayload = serde_json::from_value(raw.data)?;
                PlayerEvent::Devices(d)
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

/// Locally mirrored player state, refreshed by push events.
///
/// Between pushes the UI free-runs `current_secs` at 1 Hz while playing
/// so the progress display does not stall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub playing: bool,
    pub track_name: String,
    pub current_secs: f64,
    pub duration_secs: f64,
}

impl PlayerStatus {
    /// Fold a push event into the mirror.
    pub fn apply(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::Status {
                playing,
                name,
                current,
                duration,
            } => {
                self.playing = *playing;
                self.track_name = name.clone();
                self.current_secs = *current;
                self.duration_secs = *duration;
            }
            PlayerEvent::TrackChange { name, duration } => {
                self.track_name = name.clone();
                self.duration_secs = *duration;
                self.current_secs = 0.0;
            }
            PlayerEvent::PlayState { playing } => self.playing = *playing,
            PlayerEvent::Progress { current, duration } => {
                self.current_secs = *current;
                self.duration_secs = *duration;
            }
            PlayerEvent::Ready | PlayerEvent::Devices(_) => {}
        }
    }

    /// Local 1 Hz extrapolation between pushes, clamped to the track end.
    pub fn tick_second(&mut self) {
        if self.playing {
            self.current_secs = (self.current_secs + 1.0).min(self.duration_secs);
        }
    }
}
