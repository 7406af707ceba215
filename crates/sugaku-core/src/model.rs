//! Core data model types for sugaku.
//!
//! A [`Problem`] is created fresh for every question and never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::expr::Polynomial;

/// The kinds of problem the quiz can pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Equation,
    Expand,
    Mode,
    Integration,
    Derivative,
    Median,
    StandardDeviation,
}

impl ProblemKind {
    /// Every kind, in menu order.
    pub const ALL: [ProblemKind; 7] = [
        ProblemKind::Equation,
        ProblemKind::Expand,
        ProblemKind::Mode,
        ProblemKind::Integration,
        ProblemKind::Derivative,
        ProblemKind::Median,
        ProblemKind::StandardDeviation,
    ];
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemKind::Equation => write!(f, "equation"),
            ProblemKind::Expand => write!(f, "expand"),
            ProblemKind::Mode => write!(f, "mode"),
            ProblemKind::Integration => write!(f, "integration"),
            ProblemKind::Derivative => write!(f, "derivative"),
            ProblemKind::Median => write!(f, "median"),
            ProblemKind::StandardDeviation => write!(f, "standard_deviation"),
        }
    }
}

impl FromStr for ProblemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "equation" => Ok(ProblemKind::Equation),
            "expand" => Ok(ProblemKind::Expand),
            "mode" => Ok(ProblemKind::Mode),
            "integration" | "integral" => Ok(ProblemKind::Integration),
            "derivative" => Ok(ProblemKind::Derivative),
            "median" => Ok(ProblemKind::Median),
            "standard_deviation" | "stdev" => Ok(ProblemKind::StandardDeviation),
            other => Err(format!("unknown problem kind: {other}")),
        }
    }
}

/// The expected answer to a problem.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Accepted within a small absolute tolerance.
    Number(f64),
    /// Accepted when the typed expression simplifies to the same polynomial.
    Expression(Polynomial),
    /// Accepted on exact match only.
    Text(String),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0".
            Answer::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{n:.0}"),
            Answer::Number(n) => write!(f, "{n}"),
            Answer::Expression(p) => write!(f, "{p}"),
            Answer::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub kind: ProblemKind,
    /// Question text shown to the player. May span several lines.
    pub prompt: String,
    pub answer: Answer,
}
