//! Accuracy-to-level mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter level derived from an accuracy percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Map an accuracy percentage (0–100) to a level.
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 90.0 {
            Grade::S
        } else if accuracy >= 80.0 {
            Grade::A
        } else if accuracy >= 70.0 {
            Grade::B
        } else if accuracy >= 60.0 {
            Grade::C
        } else {
            Grade::D
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        };
        f.write_str(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        let cases = [
            (100.0, Grade::S),
            (90.0, Grade::S),
            (89.99, Grade::A),
            (80.0, Grade::A),
            (79.99, Grade::B),
            (70.0, Grade::B),
            (69.99, Grade::C),
            (60.0, Grade::C),
            (59.99, Grade::D),
            (0.0, Grade::D),
        ];
        for (accuracy, expected) in cases {
            assert_eq!(Grade::from_accuracy(accuracy), expected, "{accuracy}");
        }
    }

    #[test]
    fn monotonic() {
        // Higher accuracy never yields a worse grade (S sorts first).
        let mut previous = Grade::from_accuracy(0.0);
        for step in 0..=1000 {
            let grade = Grade::from_accuracy(step as f64 / 10.0);
            assert!(grade <= previous, "{step}");
            previous = grade;
        }
    }

    #[test]
    fn display_is_the_letter() {
        assert_eq!(Grade::S.to_string(), "S");
        assert_eq!(Grade::D.to_string(), "D");
    }
}
