//! # Tomata Core Library
//!
//! Core business logic for the Tomata Pomodoro timer. The desktop shell
//! and the CLI are both thin layers over this crate: all state lives in
//! explicit owned objects constructed at startup, and every behavioral
//! surface is driven through typed commands and events.
//!
//! ## Architecture
//!
//! - **Countdown**: a caller-driven state machine; the host loop invokes
//!   `tick()` once per second and consumes [`TimerEvent`]s
//! - **Plan sequencer**: ordered step list with an execution cursor that
//!   advances on each completed countdown
//! - **Orchestration**: [`App`] dispatches on the top-level mode
//!   (single vs. plan) and turns timer lifecycle events into
//!   [`AppEvent`]s for the shell
//! - **Storage**: one JSON data document (stats, presets, plan list)
//!   with debounced writes, plus TOML configuration
//! - **Player bridge**: child-process control of the bundled music
//!   helper over newline-delimited JSON on its standard streams

pub mod app;
pub mod error;
pub mod events;
pub mod mode;
pub mod plan;
pub mod player;
pub mod presets;
pub mod stats;
pub mod storage;
pub mod timer;

pub use app::{App, AppMode};
pub use error::{BridgeError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::{AppEvent, StatusLabel, TimerEvent, TopMode};
pub use mode::SessionKind;
pub use plan::{PlanSequencer, PlanStatus, PlanStep};
pub use player::{PlayerCommand, PlayerEvent, PlayerProcess, PlayerStatus};
pub use presets::PresetSet;
pub use stats::Stats;
pub use storage::{AppConfig, DataStore};
pub use timer::{Countdown, TimerState};
