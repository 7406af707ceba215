//! The `sugaku init` command.

use std::path::Path;

use anyhow::{Context, Result};
use sugaku_core::config::CONFIG_FILE;

pub fn execute() -> Result<()> {
    write_sample(Path::new(CONFIG_FILE))?;

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to choose rounds and problem kinds");
    println!("  2. Run: sugaku");
    Ok(())
}

fn write_sample(path: &Path) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    std::fs::write(path, SAMPLE_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# sugaku configuration

# Where lifetime statistics are kept. SUGAKU_STATS_FILE overrides this.
stats_file = "player_stats.json"

# Questions per game.
rounds = 5

# Pause after each verdict, in milliseconds.
pause_ms = 2000

# Width of the console panels.
interface_width = 120

# Problem kinds on offer. Leave empty for all of:
# equation, expand, mode, integration, derivative, median, standard_deviation
kinds = []

# Uncomment for a reproducible sequence of problems.
# seed = 42
"#;
