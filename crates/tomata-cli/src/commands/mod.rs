pub mod config;
pub mod plan;
pub mod player;
pub mod presets;
pub mod run;
pub mod stats;

use clap::ValueEnum;
use tomata_core::{DataStore, SessionKind};

/// Work/break selector for command arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Work,
    Break,
}

impl From<KindArg> for SessionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Work => SessionKind::Work,
            KindArg::Break => SessionKind::Break,
        }
    }
}

/// Open the data store at the default location, stamped with today.
pub fn open_store() -> Result<DataStore, Box<dyn std::error::Error>> {
    let today = chrono::Local::now().date_naive();
    Ok(DataStore::open_default(today)?)
}
