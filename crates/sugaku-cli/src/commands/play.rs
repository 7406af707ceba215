//! The interactive menu and quiz game.

use std::io::{self, BufRead, IsTerminal, Write};
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use crossterm::style::Color;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sugaku_core::config::SugakuConfig;
use sugaku_core::engine::{QuizEngine, QuizFrontend, RoundOutcome};
use sugaku_core::generator::ProblemGenerator;
use sugaku_core::model::Problem;
use sugaku_core::player::{PlayerStatistics, StatsStore};

use super::{reset, stats};
use crate::ui::Console;

/// A main menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    StartGame,
    ViewStatistics,
    ResetStatistics,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::StartGame),
            "2" => Ok(MenuChoice::ViewStatistics),
            "3" => Ok(MenuChoice::ResetStatistics),
            "4" => Ok(MenuChoice::Exit),
            other => Err(format!("invalid menu choice: {other}")),
        }
    }
}

const MENU: [&str; 4] = [
    "1. Start Game",
    "2. View Statistics",
    "3. Reset Statistics",
    "4. Exit",
];

pub fn execute(config: &SugakuConfig) -> Result<()> {
    let stdout = io::stdout();
    let clear_screen = stdout.is_terminal();
    let mut console = Console::new(io::stdin().lock(), stdout.lock(), config.interface_width)
        .with_pause(Duration::from_millis(config.pause_ms))
        .with_clear_screen(clear_screen);

    let rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let generator = ProblemGenerator::with_kinds(rng, config.kinds.clone());
    tracing::debug!(kinds = ?generator.kinds(), rounds = config.rounds, "starting menu");
    let mut engine = QuizEngine::new(generator, config.rounds);
    let store = StatsStore::new(&config.stats_file);

    run_menu(&mut console, &mut engine, &store)
}

/// Drive the main menu until the player exits or input runs out.
pub fn run_menu<R: BufRead, W: Write, G: Rng>(
    console: &mut Console<R, W>,
    engine: &mut QuizEngine<G>,
    store: &StatsStore,
) -> Result<()> {
    let (mut player, load_error) = store.load_or_default();
    if let Some(e) = load_error {
        console.notice(&format!("Error loading statistics: {e:#}"), Color::Red)?;
        console.pause()?;
    }

    loop {
        console.header()?;
        let menu: Vec<String> = MENU.iter().map(|line| line.to_string()).collect();
        console.panel("MAIN MENU", &menu, Color::Green)?;

        let Some(input) = console.read_line("Enter your choice: ")? else {
            tracing::debug!("input closed at the main menu");
            return Ok(());
        };

        match input.parse::<MenuChoice>() {
            Ok(MenuChoice::StartGame) => start_game(console, engine, store, &mut player)?,
            Ok(MenuChoice::ViewStatistics) => view_statistics(console, &player)?,
            Ok(MenuChoice::ResetStatistics) => {
                reset_statistics(console, store)?;
                player = PlayerStatistics::default();
            }
            Ok(MenuChoice::Exit) => {
                console.notice("Thank you for playing!", Color::Green)?;
                return Ok(());
            }
            Err(reason) => {
                tracing::debug!("{reason}");
                console.notice("Invalid choice. Please try again.", Color::Red)?;
                console.pause()?;
                console.clear()?;
            }
        }
    }
}

fn start_game<R: BufRead, W: Write, G: Rng>(
    console: &mut Console<R, W>,
    engine: &mut QuizEngine<G>,
    store: &StatsStore,
    player: &mut PlayerStatistics,
) -> Result<()> {
    console.header()?;
    let summary = engine.run(player, console)?;

    let report = vec![
        format!(
            "You answered {} out of {} correctly.",
            summary.correct(),
            summary.total()
        ),
        format!("Your accuracy: {:.2}%", summary.accuracy()),
        format!("Your level: {}", summary.grade()),
    ];
    console.panel("GAME OVER!", &report, Color::Green)?;

    if let Err(e) = store.save(player) {
        tracing::warn!("could not save statistics: {e:#}");
        console.notice(&format!("Error saving statistics: {e:#}"), Color::Red)?;
    }

    console.wait_for_enter()?;
    console.clear()
}

fn view_statistics<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    player: &PlayerStatistics,
) -> Result<()> {
    console.header()?;
    if player.problems_attempted > 0 {
        let table = stats::stats_table(player).to_string();
        console.panel("STATISTICS", &[table], Color::Green)?;
    } else {
        console.panel("STATISTICS", &[stats::NO_STATISTICS.to_string()], Color::Yellow)?;
    }
    console.wait_for_enter()?;
    console.clear()
}

fn reset_statistics<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &StatsStore,
) -> Result<()> {
    console.header()?;
    match store.reset() {
        Ok(outcome) => console.notice(reset::describe(outcome), Color::Green)?,
        Err(e) => console.notice(&format!("Error resetting statistics: {e:#}"), Color::Red)?,
    }
    console.wait_for_enter()?;
    console.clear()
}

impl<R: BufRead, W: Write> QuizFrontend for Console<R, W> {
    fn ask(&mut self, round: usize, total: usize, problem: &Problem) -> Result<String> {
        self.panel(
            &format!("Question {round} of {total}:"),
            &[problem.prompt.clone()],
            Color::Yellow,
        )?;
        match self.read_line("Your answer: ")? {
            Some(answer) => Ok(answer),
            None => anyhow::bail!("input closed before the game finished"),
        }
    }

    fn on_answer(&mut self, outcome: &RoundOutcome) -> Result<()> {
        if outcome.verdict.is_correct() {
            self.notice("Correct!", Color::Green)?;
        } else {
            let message = format!(
                "Incorrect! The correct answer was {}.",
                outcome.problem.answer
            );
            self.notice(&message, Color::Red)?;
        }
        self.pause()?;
        self.header()
    }
}
