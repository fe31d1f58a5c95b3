use std::time::Instant;

use clap::Subcommand;
use tomata_core::PlanSequencer;

use super::{open_store, KindArg};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Append a step to the plan
    Add {
        /// Step duration in minutes (1-120)
        minutes: u32,
        /// Step kind
        #[arg(long, value_enum, default_value = "work")]
        kind: KindArg,
    },
    /// Print the plan as JSON
    List,
    /// Remove the step at a position
    Remove {
        /// Zero-based position
        index: usize,
    },
    /// Move a step to a new position
    Move { from: usize, to: usize },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    let mut seq = PlanSequencer::from_steps(store.plan_list().to_vec());

    match action {
        PlanAction::Add { minutes, kind } => {
            if !(1..=120).contains(&minutes) {
                return Err("minutes must be 1..=120".into());
            }
            let step = seq.add_item(minutes, kind.into());
            println!("{}", serde_json::to_string_pretty(&step)?);
        }
        PlanAction::List => {
            println!("{}", serde_json::to_string_pretty(seq.steps())?);
            return Ok(());
        }
        PlanAction::Remove { index } => {
            let removed = seq.delete_item(index)?;
            println!("{}", serde_json::to_string_pretty(&removed)?);
        }
        PlanAction::Move { from, to } => {
            seq.reorder(from, to)?;
            println!("{}", serde_json::to_string_pretty(seq.steps())?);
        }
    }

    store.set_plan_list(seq.steps().to_vec(), Instant::now());
    store.flush();
    Ok(())
}
