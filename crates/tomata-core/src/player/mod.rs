//! Music helper integration: wire protocol types and the child-process
//! bridge that speaks it.

mod process;
mod protocol;

pub use process::{PlayerProcess, TerminateTree};
pub use protocol::{AudioDevice, DevicesPayload, PlayerCommand, PlayerEvent, PlayerStatus};
