//! sugaku-core — problem generation, answer checking and player statistics.
//!
//! This crate holds everything the quiz does apart from drawing the screen:
//! symbolic and descriptive maths, the session loop, and JSON persistence.

pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod expr;
pub mod generator;
pub mod grade;
pub mod model;
pub mod player;
pub mod statistics;
