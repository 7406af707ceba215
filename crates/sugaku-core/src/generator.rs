//! Random problem generation.
//!
//! Each kind samples small integers and computes its answer with the
//! symbolic ([`crate::expr`]) or descriptive ([`crate::statistics`]) helpers.
//! The `Problem::*` constructors are deterministic so tests can pin inputs.

use std::ops::RangeInclusive;

use num_rational::Rational64;
use rand::Rng;

use crate::error::ProblemError;
use crate::expr::Polynomial;
use crate::model::{Answer, Problem, ProblemKind};
use crate::statistics;

const EQUATION_RANGE: RangeInclusive<i64> = 1..=10;
const EXPAND_RANGE: RangeInclusive<i64> = 1..=5;
const COEFFICIENT_RANGE: RangeInclusive<i64> = 1..=5;
const POWER_RANGE: RangeInclusive<u32> = 1..=5;
const MODE_RANGE: RangeInclusive<i64> = 1..=10;
const MODE_SAMPLE: usize = 10;
const MEDIAN_RANGE: RangeInclusive<i64> = 1..=20;
const MEDIAN_SAMPLE: usize = 9;
const STD_DEV_RANGE: RangeInclusive<i64> = 1..=20;
const STD_DEV_SAMPLE: usize = 10;

impl Problem {
    /// `a*x + b = 0`, answered with the exact root `-b/a`.
    pub fn equation(a: i64, b: i64) -> Result<Self, ProblemError> {
        let lhs = Polynomial::monomial(Rational64::from_integer(a), 1)
            .checked_add(&Polynomial::integer(b))?;
        let root = lhs.linear_root().ok_or(ProblemError::NoUniqueSolution)?;
        Ok(Self {
            kind: ProblemKind::Equation,
            prompt: format!("Solve for x: {a}*x + {b} = 0"),
            answer: Answer::Expression(Polynomial::constant(root)),
        })
    }

    /// `(x + n1)*(x - n2)`, answered with its expansion.
    pub fn expand(n1: i64, n2: i64) -> Result<Self, ProblemError> {
        let x = Polynomial::x();
        let lhs = x.checked_add(&Polynomial::integer(n1))?;
        let rhs = x.checked_sub(&Polynomial::integer(n2))?;
        Ok(Self {
            kind: ProblemKind::Expand,
            prompt: format!("Expand the expression: (x + {n1})*(x - {n2})"),
            answer: Answer::Expression(lhs.checked_mul(&rhs)?),
        })
    }

    /// Antiderivative of `a*x**b`, without a constant of integration.
    pub fn integration(a: i64, b: u32) -> Result<Self, ProblemError> {
        let integrand = Polynomial::monomial(Rational64::from_integer(a), b);
        Ok(Self {
            kind: ProblemKind::Integration,
            prompt: format!("Integrate the expression: {a}*x**{b}"),
            answer: Answer::Expression(integrand.integral()?),
        })
    }

    /// Derivative of `a*x**b`.
    pub fn derivative(a: i64, b: u32) -> Result<Self, ProblemError> {
        let f = Polynomial::monomial(Rational64::from_integer(a), b);
        Ok(Self {
            kind: ProblemKind::Derivative,
            prompt: format!("Find the derivative of the expression: {a}*x**{b}"),
            answer: Answer::Expression(f.derivative()?),
        })
    }

    pub fn mode(data: Vec<i64>) -> Result<Self, ProblemError> {
        let answer = statistics::mode(&data).ok_or(ProblemError::SampleTooSmall {
            needed: 1,
            got: data.len(),
        })?;
        Ok(Self {
            kind: ProblemKind::Mode,
            prompt: data_prompt("mode", &data),
            answer: Answer::Number(answer),
        })
    }

    pub fn median(data: Vec<i64>) -> Result<Self, ProblemError> {
        let answer = statistics::median(&data).ok_or(ProblemError::SampleTooSmall {
            needed: 1,
            got: data.len(),
        })?;
        Ok(Self {
            kind: ProblemKind::Median,
            prompt: data_prompt("median", &data),
            answer: Answer::Number(answer),
        })
    }

    /// Sample standard deviation, rounded to two decimals.
    pub fn standard_deviation(data: Vec<i64>) -> Result<Self, ProblemError> {
        let sd = statistics::sample_std_dev(&data).ok_or(ProblemError::SampleTooSmall {
            needed: 2,
            got: data.len(),
        })?;
        Ok(Self {
            kind: ProblemKind::StandardDeviation,
            prompt: data_prompt("standard deviation", &data),
            answer: Answer::Number(statistics::round_to(sd, 2)),
        })
    }
}

fn data_prompt(statistic: &str, data: &[i64]) -> String {
    let values: Vec<String> = data.iter().map(i64::to_string).collect();
    format!(
        "Find the {statistic} of the following numbers:\n{}",
        values.join(", ")
    )
}

/// Draws problems uniformly from a set of enabled kinds.
pub struct ProblemGenerator<R> {
    rng: R,
    kinds: Vec<ProblemKind>,
}

impl<R: Rng> ProblemGenerator<R> {
    /// A generator offering every kind.
    pub fn new(rng: R) -> Self {
        Self::with_kinds(rng, ProblemKind::ALL.to_vec())
    }

    /// A generator restricted to `kinds`. An empty list means every kind.
    pub fn with_kinds(rng: R, mut kinds: Vec<ProblemKind>) -> Self {
        if kinds.is_empty() {
            kinds = ProblemKind::ALL.to_vec();
        }
        let mut seen = Vec::with_capacity(kinds.len());
        kinds.retain(|k| {
            let fresh = !seen.contains(k);
            seen.push(*k);
            fresh
        });
        Self { rng, kinds }
    }

    pub fn kinds(&self) -> &[ProblemKind] {
        &self.kinds
    }

    /// Generate a problem of a uniformly chosen kind.
    pub fn next_problem(&mut self) -> Result<Problem, ProblemError> {
        let kind = self.kinds[self.rng.random_range(0..self.kinds.len())];
        self.generate(kind)
    }

    /// Generate a problem of a specific kind.
    pub fn generate(&mut self, kind: ProblemKind) -> Result<Problem, ProblemError> {
        let problem = match kind {
            ProblemKind::Equation => {
                let a = self.rng.random_range(EQUATION_RANGE);
                let b = self.rng.random_range(EQUATION_RANGE);
                Problem::equation(a, b)?
            }
            ProblemKind::Expand => {
                let n1 = self.rng.random_range(EXPAND_RANGE);
                let n2 = self.rng.random_range(EXPAND_RANGE);
                Problem::expand(n1, n2)?
            }
            ProblemKind::Integration => {
                let (a, b) = self.calculus_params();
                Problem::integration(a, b)?
            }
            ProblemKind::Derivative => {
                let (a, b) = self.calculus_params();
                Problem::derivative(a, b)?
            }
            ProblemKind::Mode => Problem::mode(self.sample(MODE_RANGE, MODE_SAMPLE))?,
            ProblemKind::Median => Problem::median(self.sample(MEDIAN_RANGE, MEDIAN_SAMPLE))?,
            ProblemKind::StandardDeviation => {
                Problem::standard_deviation(self.sample(STD_DEV_RANGE, STD_DEV_SAMPLE))?
            }
        };
        tracing::debug!(kind = %problem.kind, answer = %problem.answer, "generated problem");
        Ok(problem)
    }

    fn calculus_params(&mut self) -> (i64, u32) {
        let a = self.rng.random_range(COEFFICIENT_RANGE);
        let b = self.rng.random_range(POWER_RANGE);
        (a, b)
    }

    fn sample(&mut self, range: RangeInclusive<i64>, len: usize) -> Vec<i64> {
        (0..len)
            .map(|_| self.rng.random_range(range.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn expression(problem: &Problem) -> &Polynomial {
        match &problem.answer {
            Answer::Expression(p) => p,
            other => panic!("expected expression answer, got {other:?}"),
        }
    }

    #[test]
    fn expand_two_three() {
        let problem = Problem::expand(2, 3).unwrap();
        assert_eq!(problem.prompt, "Expand the expression: (x + 2)*(x - 3)");
        let expected: Polynomial = "x^2 - x - 6".parse().unwrap();
        assert_eq!(expression(&problem), &expected);
    }

    #[test]
    fn equation_answer_is_exact_root() {
        let problem = Problem::equation(3, 2).unwrap();
        assert_eq!(problem.prompt, "Solve for x: 3*x + 2 = 0");
        assert_eq!(problem.answer.to_string(), "-2/3");

        let whole = Problem::equation(4, 8).unwrap();
        assert_eq!(whole.answer.to_string(), "-2");
    }

    #[test]
    fn equation_without_slope_is_rejected() {
        assert!(matches!(
            Problem::equation(0, 3),
            Err(ProblemError::NoUniqueSolution)
        ));
    }

    #[test]
    fn calculus_answers() {
        let integral = Problem::integration(3, 2).unwrap();
        assert_eq!(integral.prompt, "Integrate the expression: 3*x**2");
        assert_eq!(integral.answer.to_string(), "x**3");
        assert_eq!(
            Problem::integration(5, 5).unwrap().answer.to_string(),
            "5*x**6/6"
        );

        let derivative = Problem::derivative(4, 3).unwrap();
        assert_eq!(
            derivative.prompt,
            "Find the derivative of the expression: 4*x**3"
        );
        assert_eq!(derivative.answer.to_string(), "12*x**2");
        assert_eq!(Problem::derivative(2, 1).unwrap().answer.to_string(), "2");
    }

    #[test]
    fn data_problems() {
        let mode = Problem::mode(vec![1, 2, 2, 5, 5, 7, 8, 9, 10, 3]).unwrap();
        assert_eq!(mode.answer, Answer::Number(3.5));
        assert_eq!(
            mode.prompt,
            "Find the mode of the following numbers:\n1, 2, 2, 5, 5, 7, 8, 9, 10, 3"
        );

        let median = Problem::median(vec![20, 1, 7, 3, 15, 2, 9, 11, 4]).unwrap();
        assert_eq!(median.answer, Answer::Number(7.0));

        let sd = Problem::standard_deviation(vec![2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
        assert_eq!(sd.answer, Answer::Number(2.14));
    }

    #[test]
    fn undersized_samples_are_errors() {
        assert!(Problem::mode(vec![]).is_err());
        assert!(matches!(
            Problem::standard_deviation(vec![4]),
            Err(ProblemError::SampleTooSmall { needed: 2, got: 1 })
        ));
    }

    #[test]
    fn seeded_generators_agree() {
        let mut a = ProblemGenerator::new(SmallRng::seed_from_u64(42));
        let mut b = ProblemGenerator::new(SmallRng::seed_from_u64(42));
        for _ in 0..20 {
            assert_eq!(a.next_problem().unwrap(), b.next_problem().unwrap());
        }
    }

    #[test]
    fn restricted_kinds_are_respected() {
        let mut generator = ProblemGenerator::with_kinds(
            SmallRng::seed_from_u64(7),
            vec![ProblemKind::Median, ProblemKind::Median],
        );
        assert_eq!(generator.kinds(), &[ProblemKind::Median]);
        for _ in 0..10 {
            assert_eq!(generator.next_problem().unwrap().kind, ProblemKind::Median);
        }
    }

    #[test]
    fn generated_values_stay_in_range() {
        let mut generator = ProblemGenerator::new(SmallRng::seed_from_u64(1));
        for _ in 0..200 {
            let problem = generator.next_problem().unwrap();
            if let Answer::Number(n) = problem.answer {
                assert!(n.is_finite());
                assert!((0.0..=20.0).contains(&n), "{problem:?}");
            }
        }
    }

    #[test]
    fn every_kind_can_be_generated() {
        let mut generator = ProblemGenerator::new(SmallRng::seed_from_u64(3));
        for kind in ProblemKind::ALL {
            assert_eq!(generator.generate(kind).unwrap().kind, kind);
        }
    }
}
