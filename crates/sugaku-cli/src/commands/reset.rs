//! The `sugaku reset` command.

use anyhow::Result;
use sugaku_core::player::{ResetOutcome, StatsStore};

/// Message shown to the player for a reset outcome.
pub fn describe(outcome: ResetOutcome) -> &'static str {
    match outcome {
        ResetOutcome::Removed => "Statistics have been reset.",
        ResetOutcome::NothingToReset => "No statistics to reset.",
    }
}

pub fn execute(store: &StatsStore) -> Result<()> {
    let outcome = store.reset()?;
    println!("{}", describe(outcome));
    Ok(())
}
