//! Quiz session orchestration.
//!
//! The engine owns problem generation, timing and scoring. Everything the
//! player sees goes through a [`QuizFrontend`], so the same loop drives the
//! console and scripted tests.

use std::time::{Duration, Instant};

use anyhow::Result;
use rand::Rng;

use crate::checker::Verdict;
use crate::generator::ProblemGenerator;
use crate::grade::Grade;
use crate::model::Problem;
use crate::player::PlayerStatistics;

/// Default number of questions per game.
pub const DEFAULT_ROUNDS: usize = 5;

/// The result of one question.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// 1-based round number.
    pub round: usize,
    pub problem: Problem,
    /// The player's response, as typed.
    pub response: String,
    pub verdict: Verdict,
    /// Think time, from showing the question to receiving the answer.
    pub elapsed: Duration,
}

/// Everything that happened in one game.
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub rounds: Vec<RoundOutcome>,
}

impl SessionSummary {
    pub fn total(&self) -> usize {
        self.rounds.len()
    }

    pub fn correct(&self) -> usize {
        self.rounds
            .iter()
            .filter(|r| r.verdict.is_correct())
            .count()
    }

    /// Percentage of this session's questions answered correctly.
    pub fn accuracy(&self) -> f64 {
        if self.rounds.is_empty() {
            return 0.0;
        }
        self.correct() as f64 / self.total() as f64 * 100.0
    }

    pub fn grade(&self) -> Grade {
        Grade::from_accuracy(self.accuracy())
    }

    pub fn elapsed(&self) -> Duration {
        self.rounds.iter().map(|r| r.elapsed).sum()
    }
}

/// Presentation hooks for a quiz session.
pub trait QuizFrontend {
    /// Show a question and block until the player answers.
    fn ask(&mut self, round: usize, total: usize, problem: &Problem) -> Result<String>;

    /// React to a checked answer.
    fn on_answer(&mut self, outcome: &RoundOutcome) -> Result<()>;
}

/// Runs fixed-length quiz sessions.
pub struct QuizEngine<R> {
    generator: ProblemGenerator<R>,
    rounds: usize,
}

impl<R: Rng> QuizEngine<R> {
    pub fn new(generator: ProblemGenerator<R>, rounds: usize) -> Self {
        Self {
            generator,
            rounds: rounds.max(1),
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Play one game, recording every answer into `stats` as it happens.
    ///
    /// Persisting `stats` is left to the caller.
    pub fn run(
        &mut self,
        stats: &mut PlayerStatistics,
        frontend: &mut dyn QuizFrontend,
    ) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        for round in 1..=self.rounds {
            let problem = self.generator.next_problem()?;

            let start = Instant::now();
            let response = frontend.ask(round, self.rounds, &problem)?;
            let elapsed = start.elapsed();

            let verdict = problem.answer.check(&response);
            if let Verdict::Invalid { reason } = &verdict {
                tracing::debug!(round, "unreadable answer: {reason}");
            }
            stats.record(verdict.is_correct(), elapsed);

            let outcome = RoundOutcome {
                round,
                problem,
                response,
                verdict,
                elapsed,
            };
            frontend.on_answer(&outcome)?;
            summary.rounds.push(outcome);
        }

        tracing::info!(
            correct = summary.correct(),
            total = summary.total(),
            grade = %summary.grade(),
            "session complete"
        );
        Ok(summary)
    }
}
