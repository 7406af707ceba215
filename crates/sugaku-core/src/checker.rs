//! Answer checking.
//!
//! A typed answer is never an error: anything that cannot be compared with
//! the expected answer is a wrong answer. [`Verdict::Invalid`] keeps the reason
//! around for logging.

use crate::expr;
use crate::model::Answer;

/// Absolute tolerance for numeric answers.
pub const NUMERIC_TOLERANCE: f64 = 0.01;

/// Outcome of checking one typed answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The input could not be read as the expected type of answer.
    Invalid { reason: String },
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }

    fn from_bool(correct: bool) -> Self {
        if correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }
}

impl Answer {
    /// Compare a typed response against this answer using the rule for its type.
    pub fn check(&self, input: &str) -> Verdict {
        let input = input.trim();
        let verdict = match self {
            Answer::Number(expected) => match input.parse::<f64>() {
                Ok(typed) if typed.is_finite() => {
                    Verdict::from_bool((typed - expected).abs() < NUMERIC_TOLERANCE)
                }
                Ok(_) => Verdict::Invalid {
                    reason: format!("not a finite number: {input}"),
                },
                Err(e) => Verdict::Invalid {
                    reason: format!("not a number: {e}"),
                },
            },
            Answer::Text(expected) => Verdict::from_bool(input == expected),
            Answer::Expression(expected) => {
                match expr::parse(input).and_then(|tree| tree.to_expanded_polynomial()) {
                    Ok(typed) => Verdict::from_bool(&typed == expected),
                    Err(e) if e.is_syntax_error() => Verdict::Invalid {
                        reason: format!("malformed expression: {e}"),
                    },
                    Err(e) => Verdict::Invalid {
                        reason: e.to_string(),
                    },
                }
            }
        };
        tracing::debug!(input, expected = %self, ?verdict, "checked answer");
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Polynomial;
    use crate::model::Problem;
    use num_rational::Rational64;

    #[test]
    fn numeric_tolerance_boundaries() {
        let answer = Answer::Number(5.0);
        assert_eq!(answer.check("4.999"), Verdict::Correct);
        assert_eq!(answer.check("5"), Verdict::Correct);
        assert_eq!(answer.check(" 5.005 "), Verdict::Correct);
        assert_eq!(answer.check("4.98"), Verdict::Incorrect);
        assert_eq!(answer.check("5.02"), Verdict::Incorrect);
    }

    #[test]
    fn non_numeric_input_is_wrong_not_an_error() {
        let answer = Answer::Number(2.5);
        assert!(matches!(answer.check("two and a half"), Verdict::Invalid { .. }));
        assert!(matches!(answer.check(""), Verdict::Invalid { .. }));
        assert!(matches!(answer.check("NaN"), Verdict::Invalid { .. }));
        assert!(matches!(answer.check("inf"), Verdict::Invalid { .. }));
        assert!(!answer.check("5/2").is_correct());
    }

    #[test]
    fn text_requires_exact_match() {
        let answer = Answer::Text("Yes".into());
        assert!(answer.check("Yes").is_correct());
        assert!(answer.check("  Yes\n").is_correct());
        assert!(!answer.check("yes").is_correct());
    }

    #[test]
    fn expression_accepts_equivalent_forms() {
        let problem = Problem::expand(2, 3).unwrap();
        for typed in ["x^2 - x - 6", "x**2-x-6", "-6 - x + x^2", "x*x - x - 6"] {
            assert!(problem.answer.check(typed).is_correct(), "{typed}");
        }
        assert_eq!(problem.answer.check("x^2 + x - 6"), Verdict::Incorrect);
    }

    #[test]
    fn expand_rejects_the_unexpanded_prompt() {
        let problem = Problem::expand(2, 3).unwrap();
        for typed in ["(x + 2)*(x - 3)", "(x-3)*(x+2)", "x*(x - 1) - 6"] {
            let verdict = problem.answer.check(typed);
            assert!(!verdict.is_correct(), "{typed}");
            assert!(
                matches!(&verdict, Verdict::Invalid { reason } if reason.contains("not expanded")),
                "{typed}: {verdict:?}"
            );
        }
    }

    #[test]
    fn oversized_coefficients_are_invalid_not_a_panic() {
        let problem = Problem::expand(2, 3).unwrap();
        for typed in ["(-9223372036854775807-1)^2", "1/(x - 9223372036854775807 - 1)"] {
            assert!(
                matches!(problem.answer.check(typed), Verdict::Invalid { .. }),
                "{typed}"
            );
        }
    }

    #[test]
    fn malformed_expressions_are_labelled() {
        let answer = Answer::Expression("x".parse().unwrap());
        assert!(matches!(
            answer.check("x +"),
            Verdict::Invalid { reason } if reason.starts_with("malformed expression")
        ));
        assert!(matches!(
            answer.check("y"),
            Verdict::Invalid { reason } if reason == "unknown symbol: y"
        ));
    }

    #[test]
    fn unparseable_expression_is_invalid() {
        let answer = Answer::Expression("x^3".parse().unwrap());
        assert!(matches!(answer.check("x^^3"), Verdict::Invalid { .. }));
        assert!(matches!(answer.check("3x^2"), Verdict::Invalid { .. }));
        assert!(matches!(answer.check("y^3"), Verdict::Invalid { .. }));
    }

    #[test]
    fn exact_fractions_for_equation_roots() {
        let answer = Answer::Expression(Polynomial::constant(Rational64::new(-2, 3)));
        assert!(answer.check("-2/3").is_correct());
        assert!(answer.check("-4/6").is_correct());
        assert!(!answer.check("-0.67").is_correct());

        let half = Answer::Expression(Polynomial::constant(Rational64::new(-1, 2)));
        assert!(half.check("-0.5").is_correct());
    }

    #[test]
    fn integration_without_constant() {
        let problem = Problem::integration(2, 3).unwrap();
        assert!(problem.answer.check("x^4/2").is_correct());
        assert!(problem.answer.check("0.5*x**4").is_correct());
        assert!(!problem.answer.check("x^4/2 + 1").is_correct());
    }
}
