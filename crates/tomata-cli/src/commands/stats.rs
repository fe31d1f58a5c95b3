use clap::Subcommand;

use super::open_store;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's count and the all-time minutes
    Show,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;

    match action {
        StatsAction::Show => {
            println!("{}", serde_json::to_string_pretty(store.stats())?);
        }
    }
    Ok(())
}
