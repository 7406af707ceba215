//! The `sugaku stats` command.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use sugaku_core::player::{PlayerStatistics, StatsStore};

pub const NO_STATISTICS: &str = "No statistics available. Play the game first.";

/// Lifetime statistics as a two-column table. Requires at least one attempt
/// for the derived rows to be meaningful.
pub fn stats_table(stats: &PlayerStatistics) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec!["Statistic", "Value"]);

    table.add_row(vec![
        Cell::new("Total problems attempted"),
        Cell::new(stats.problems_attempted),
    ]);
    table.add_row(vec![
        Cell::new("Total correct answers"),
        Cell::new(stats.problems_correct),
    ]);
    table.add_row(vec![
        Cell::new("Accuracy"),
        Cell::new(format!("{:.2}%", stats.accuracy().unwrap_or(0.0))),
    ]);
    table.add_row(vec![
        Cell::new("Average time per problem"),
        Cell::new(format!("{:.2} seconds", stats.average_time().unwrap_or(0.0))),
    ]);
    if let Some(grade) = stats.grade() {
        table.add_row(vec![Cell::new("Current level"), Cell::new(grade)]);
    }
    table
}

pub fn execute(store: &StatsStore) -> Result<()> {
    let (stats, load_error) = store.load_or_default();
    if let Some(e) = load_error {
        eprintln!("Error loading statistics: {e:#}");
    }

    if stats.problems_attempted == 0 {
        println!("{NO_STATISTICS}");
    } else {
        println!("{}", stats_table(&stats));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_shows_derived_values() {
        let stats = PlayerStatistics {
            problems_attempted: 4,
            problems_correct: 3,
            total_time: 10.0,
        };
        let rendered = stats_table(&stats).to_string();
        assert!(rendered.contains("Total problems attempted"));
        assert!(rendered.contains("75.00%"));
        assert!(rendered.contains("2.50 seconds"));
        assert!(rendered.contains("Current level"));
        assert!(rendered.contains('B'));
    }

    #[test]
    fn perfect_record_is_level_s() {
        let stats = PlayerStatistics {
            problems_attempted: 10,
            problems_correct: 10,
            total_time: 5.0,
        };
        let rendered = stats_table(&stats).to_string();
        assert!(rendered.contains("100.00%"));
        assert!(rendered.contains("0.50 seconds"));
    }
}
