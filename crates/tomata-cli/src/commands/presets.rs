use clap::Subcommand;

use super::{open_store, KindArg};

#[derive(Subcommand)]
pub enum PresetsAction {
    /// Add a duration preset
    Add {
        /// Minutes (1-120)
        minutes: u32,
        #[arg(long, value_enum, default_value = "work")]
        kind: KindArg,
    },
    /// Remove a duration preset
    Remove {
        minutes: u32,
        #[arg(long, value_enum, default_value = "work")]
        kind: KindArg,
    },
    /// Print both preset lists as JSON
    List,
}

pub fn run(action: PresetsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        PresetsAction::Add { minutes, kind } => {
            let mut added = false;
            store.update_presets(|p| added = p.add(kind.into(), minutes));
            if !added {
                return Err(format!("preset {minutes} not added (duplicate or out of 1..=120)").into());
            }
            println!("{}", serde_json::to_string_pretty(store.presets())?);
        }
        PresetsAction::Remove { minutes, kind } => {
            let mut removed = false;
            store.update_presets(|p| removed = p.remove(kind.into(), minutes));
            if !removed {
                return Err(format!("no such preset: {minutes}").into());
            }
            println!("{}", serde_json::to_string_pretty(store.presets())?);
        }
        PresetsAction::List => {
            println!("{}", serde_json::to_string_pretty(store.presets())?);
        }
    }
    Ok(())
}
