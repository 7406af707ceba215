//! Symbolic answers: polynomials in `x` with exact rational coefficients.
//!
//! Typed answers are tokenized, parsed with a Pratt parser into an [`Expr`]
//! tree, then lowered into a canonical [`Polynomial`]. Two answers are equal
//! when their canonical forms are equal, so `x^2 - x - 6`, `x**2-x-6` and
//! `-6 - x + x**2` all compare equal. Typed answers are lowered with
//! [`Expr::to_expanded_polynomial`], which refuses factored forms such as
//! `(x+2)*(x-3)`.
//!
//! Grammar (informal):
//!   expr   = prefix (OP prefix)*      (Pratt-driven)
//!   prefix = '-' prefix | '+' prefix | atom
//!   atom   = NUMBER | IDENT | '(' expr ')'
//!   OP     = '+' | '-' | '*' | '/' | '^' | '**'

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, One, Signed, Zero};

use crate::error::ExprError;

/// The only symbol a polynomial answer may contain.
pub const VARIABLE: &str = "x";

/// Highest degree the checker will build. Keeps `(x+1)^1000000` from
/// turning an answer check into a benchmark.
pub const MAX_DEGREE: u32 = 64;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(Rational64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {n}"),
            Token::Ident(name) => write!(f, "symbol '{name}'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Caret => write!(f, "'^'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, ExprError> {
        let mut tokens = Vec::new();
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.pos += 1;
            }
            let Some(ch) = self.peek() else {
                tokens.push(Token::Eof);
                return Ok(tokens);
            };
            let tok = match ch {
                '+' => self.single(Token::Plus),
                '-' => self.single(Token::Minus),
                '/' => self.single(Token::Slash),
                '^' => self.single(Token::Caret),
                '(' => self.single(Token::LParen),
                ')' => self.single(Token::RParen),
                '*' => {
                    self.pos += 1;
                    if self.peek() == Some('*') {
                        self.pos += 1;
                        Token::Caret
                    } else {
                        Token::Star
                    }
                }
                c if c.is_ascii_digit() || c == '.' => self.read_number()?,
                c if c.is_alphabetic() || c == '_' => self.read_ident(),
                other => return Err(ExprError::UnexpectedChar(other)),
            };
            tokens.push(tok);
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn single(&mut self, tok: Token) -> Token {
        self.pos += 1;
        tok
    }

    /// Read a decimal literal as an exact rational: `2.75` becomes `11/4`.
    fn read_number(&mut self) -> Result<Token, ExprError> {
        let start = self.pos;
        let mut digits = String::new();
        let mut fraction_len = 0u32;
        let mut seen_point = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                if seen_point {
                    fraction_len += 1;
                }
            } else if c == '.' && !seen_point {
                seen_point = true;
            } else {
                break;
            }
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        if digits.is_empty() {
            return Err(ExprError::InvalidNumber(literal));
        }
        let numer: i64 = digits
            .parse()
            .map_err(|_| ExprError::InvalidNumber(literal.clone()))?;
        let denom = 10i64
            .checked_pow(fraction_len)
            .ok_or(ExprError::InvalidNumber(literal))?;
        Ok(Token::Number(Rational64::new(numer, denom)))
    }

    fn read_ident(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        Token::Ident(self.chars[start..self.pos].iter().collect())
    }
}

/// Binary operators with Pratt binding powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
            BinOp::Pow => 3,
        }
    }

    fn is_right_assoc(self) -> bool {
        matches!(self, BinOp::Pow)
    }
}

/// A parsed expression tree, before simplification.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Rational64),
    Symbol(String),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn parse(mut self) -> Result<Expr, ExprError> {
        let expr = self.parse_expr(0)?;
        match self.peek() {
            Token::Eof => Ok(expr),
            tok => Err(ExprError::UnexpectedToken(tok.to_string())),
        }
    }

    fn parse_expr(&mut self, min_bp: u8) -> Result<Expr, ExprError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::Caret => BinOp::Pow,
                _ => break,
            };
            let prec = op.precedence();
            if prec < min_bp {
                break;
            }
            self.pos += 1;

            let next_bp = if op.is_right_assoc() { prec } else { prec + 1 };
            let rhs = self.parse_expr(next_bp)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ExprError> {
        match self.peek() {
            // Binds looser than `^` so `-x^2` is `-(x^2)`.
            Token::Minus => {
                self.pos += 1;
                let inner = self.parse_expr(BinOp::Pow.precedence())?;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Token::Plus => {
                self.pos += 1;
                self.parse_expr(BinOp::Pow.precedence())
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Result<Expr, ExprError> {
        let tok = self.peek().clone();
        match tok {
            Token::Number(n) => {
                self.pos += 1;
                Ok(Expr::Number(n))
            }
            Token::Ident(name) => {
                self.pos += 1;
                if self.peek() == &Token::LParen {
                    return Err(ExprError::NotPolynomial(format!("function call {name}(...)")));
                }
                Ok(Expr::Symbol(name))
            }
            Token::LParen => {
                self.pos += 1;
                let inner = self.parse_expr(0)?;
                match self.peek() {
                    Token::RParen => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Token::Eof => Err(ExprError::UnexpectedEnd),
                    other => Err(ExprError::UnexpectedToken(other.to_string())),
                }
            }
            Token::Eof => Err(ExprError::UnexpectedEnd),
            other => Err(ExprError::UnexpectedToken(other.to_string())),
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }
}

/// Parse an expression without simplifying it.
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser { tokens, pos: 0 }.parse()
}

impl Expr {
    /// Simplify the tree into canonical polynomial form.
    pub fn to_polynomial(&self) -> Result<Polynomial, ExprError> {
        self.lower(false)
    }

    /// Like [`Expr::to_polynomial`], but a sum of terms in `x` may not be
    /// multiplied by another term in `x` or raised to a power above one.
    /// Multiplying a sum by a constant is still allowed.
    pub fn to_expanded_polynomial(&self) -> Result<Polynomial, ExprError> {
        self.lower(true)
    }

    fn lower(&self, expanded_only: bool) -> Result<Polynomial, ExprError> {
        match self {
            Expr::Number(n) => Ok(Polynomial::constant(*n)),
            Expr::Symbol(name) if name == VARIABLE => Ok(Polynomial::x()),
            Expr::Symbol(name) => Err(ExprError::UnknownSymbol(name.clone())),
            Expr::Neg(inner) => inner.lower(expanded_only)?.checked_neg(),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.lower(expanded_only)?;
                let rhs = rhs.lower(expanded_only)?;
                match op {
                    BinOp::Add => lhs.checked_add(&rhs),
                    BinOp::Sub => lhs.checked_sub(&rhs),
                    BinOp::Mul if expanded_only && is_factored_product(&lhs, &rhs) => {
                        Err(ExprError::NotExpanded(format!("({lhs})*({rhs})")))
                    }
                    BinOp::Pow if expanded_only && is_factored_power(&lhs, &rhs) => {
                        Err(ExprError::NotExpanded(format!("({lhs})**{rhs}")))
                    }
                    BinOp::Mul => lhs.checked_mul(&rhs),
                    BinOp::Div => match rhs.as_constant() {
                        Some(divisor) => lhs.checked_div_constant(divisor),
                        None => Err(ExprError::NotPolynomial(format!("division by {rhs}"))),
                    },
                    BinOp::Pow => power(&lhs, &rhs),
                }
            }
        }
    }
}

fn is_factored_product(lhs: &Polynomial, rhs: &Polynomial) -> bool {
    (lhs.is_sum() && rhs.has_variable()) || (rhs.is_sum() && lhs.has_variable())
}

fn is_factored_power(base: &Polynomial, exponent: &Polynomial) -> bool {
    base.is_sum()
        && exponent
            .as_constant()
            .is_some_and(|e| e > Rational64::one())
}

fn power(base: &Polynomial, exponent: &Polynomial) -> Result<Polynomial, ExprError> {
    let Some(exp) = exponent.as_constant() else {
        return Err(ExprError::NotPolynomial(format!("exponent {exponent}")));
    };
    if !exp.is_integer() {
        return Err(ExprError::NotPolynomial(format!("exponent {exp}")));
    }
    let n = *exp.numer();
    let magnitude = u32::try_from(n.unsigned_abs()).map_err(|_| ExprError::Overflow)?;
    if n >= 0 {
        return base.checked_pow(magnitude);
    }
    // Negative powers only make sense for constants.
    match base.as_constant() {
        Some(c) if c.is_zero() => Err(ExprError::DivisionByZero),
        Some(c) => {
            let denominator = Polynomial::constant(c)
                .checked_pow(magnitude)?
                .as_constant()
                .unwrap_or_else(Rational64::one);
            Polynomial::constant(Rational64::one()).checked_div_constant(denominator)
        }
        None => Err(ExprError::NotPolynomial(format!("negative power of {base}"))),
    }
}

/// A univariate polynomial in [`VARIABLE`] in canonical form.
///
/// Only non-zero coefficients are stored, so structural equality is
/// mathematical equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    terms: BTreeMap<u32, Rational64>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: Rational64) -> Self {
        Self::monomial(value, 0)
    }

    pub fn integer(value: i64) -> Self {
        Self::constant(Rational64::from_integer(value))
    }

    pub fn monomial(coefficient: Rational64, degree: u32) -> Self {
        let mut terms = BTreeMap::new();
        if !coefficient.is_zero() {
            terms.insert(degree, coefficient);
        }
        Self { terms }
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self::monomial(Rational64::one(), 1)
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// More than one term, hence at least one in `x`.
    fn is_sum(&self) -> bool {
        self.terms.len() > 1
    }

    fn has_variable(&self) -> bool {
        self.degree().is_some_and(|d| d > 0)
    }

    /// Degree of the polynomial, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<u32> {
        self.terms.keys().next_back().copied()
    }

    pub fn coefficient(&self, degree: u32) -> Rational64 {
        self.terms
            .get(&degree)
            .copied()
            .unwrap_or_else(Rational64::zero)
    }

    /// The value of a constant polynomial (zero included).
    pub fn as_constant(&self) -> Option<Rational64> {
        match self.degree() {
            None => Some(Rational64::zero()),
            Some(0) => Some(self.coefficient(0)),
            Some(_) => None,
        }
    }

    /// Terms as `(degree, coefficient)`, highest degree first.
    pub fn terms(&self) -> impl Iterator<Item = (u32, Rational64)> + '_ {
        self.terms.iter().rev().map(|(&d, &c)| (d, c))
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self, ExprError> {
        let mut terms = self.terms.clone();
        for (&degree, coefficient) in &other.terms {
            accumulate(&mut terms, degree, *coefficient)?;
        }
        Ok(Self { terms })
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self, ExprError> {
        self.checked_add(&other.checked_neg()?)
    }

    pub fn checked_neg(&self) -> Result<Self, ExprError> {
        self.checked_scale(-Rational64::one())
    }

    pub fn checked_scale(&self, factor: Rational64) -> Result<Self, ExprError> {
        let mut terms = BTreeMap::new();
        for (&degree, coefficient) in &self.terms {
            let scaled = coefficient
                .checked_mul(&factor)
                .ok_or(ExprError::Overflow)?;
            accumulate(&mut terms, degree, scaled)?;
        }
        Ok(Self { terms })
    }

    pub fn checked_div_constant(&self, divisor: Rational64) -> Result<Self, ExprError> {
        if divisor.is_zero() {
            return Err(ExprError::DivisionByZero);
        }
        let reciprocal = Rational64::one()
            .checked_div(&divisor)
            .ok_or(ExprError::Overflow)?;
        self.checked_scale(reciprocal)
    }

    pub fn checked_mul(&self, other: &Self) -> Result<Self, ExprError> {
        let mut terms = BTreeMap::new();
        for (&d1, c1) in &self.terms {
            for (&d2, c2) in &other.terms {
                let degree = d1 + d2;
                if degree > MAX_DEGREE {
                    return Err(ExprError::Overflow);
                }
                let product = c1.checked_mul(c2).ok_or(ExprError::Overflow)?;
                accumulate(&mut terms, degree, product)?;
            }
        }
        Ok(Self { terms })
    }

    pub fn checked_pow(&self, exponent: u32) -> Result<Self, ExprError> {
        match self.as_constant() {
            Some(c) if c.is_zero() => {
                return Ok(if exponent == 0 {
                    Self::integer(1)
                } else {
                    Self::zero()
                });
            }
            Some(c) if c.denom().is_one() && c.numer().unsigned_abs() == 1 => {
                let odd = exponent % 2 == 1;
                return Ok(Self::integer(if c.is_negative() && odd { -1 } else { 1 }));
            }
            // Any other constant overflows long before the loop gets expensive.
            Some(_) => {}
            None if exponent > MAX_DEGREE => return Err(ExprError::Overflow),
            None => {}
        }
        let mut result = Self::integer(1);
        for _ in 0..exponent {
            result = result.checked_mul(self)?;
        }
        Ok(result)
    }

    pub fn derivative(&self) -> Result<Self, ExprError> {
        let mut terms = BTreeMap::new();
        for (&degree, coefficient) in &self.terms {
            if degree == 0 {
                continue;
            }
            let factor = Rational64::from_integer(i64::from(degree));
            let c = coefficient.checked_mul(&factor).ok_or(ExprError::Overflow)?;
            accumulate(&mut terms, degree - 1, c)?;
        }
        Ok(Self { terms })
    }

    /// Antiderivative with a zero constant of integration.
    pub fn integral(&self) -> Result<Self, ExprError> {
        let mut terms = BTreeMap::new();
        for (&degree, coefficient) in &self.terms {
            let next = degree.checked_add(1).ok_or(ExprError::Overflow)?;
            let divisor = Rational64::from_integer(i64::from(next));
            let c = coefficient.checked_div(&divisor).ok_or(ExprError::Overflow)?;
            accumulate(&mut terms, next, c)?;
        }
        Ok(Self { terms })
    }

    /// Solve `self = 0` for a degree-one polynomial.
    pub fn linear_root(&self) -> Option<Rational64> {
        if self.degree() != Some(1) {
            return None;
        }
        let slope = self.coefficient(1);
        let intercept = self.coefficient(0);
        (-intercept).checked_div(&slope)
    }
}

fn accumulate(
    terms: &mut BTreeMap<u32, Rational64>,
    degree: u32,
    coefficient: Rational64,
) -> Result<(), ExprError> {
    let current = terms.get(&degree).copied().unwrap_or_else(Rational64::zero);
    let sum = current
        .checked_add(&coefficient)
        .ok_or(ExprError::Overflow)?;
    // Keeps every stored coefficient negatable.
    if *sum.numer() == i64::MIN {
        return Err(ExprError::Overflow);
    }
    if sum.is_zero() {
        terms.remove(&degree);
    } else {
        terms.insert(degree, sum);
    }
    Ok(())
}

impl FromStr for Polynomial {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)?.to_polynomial()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, (degree, coefficient)) in self.terms().enumerate() {
            let negative = coefficient.is_negative();
            if i == 0 {
                if negative {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {} ", if negative { '-' } else { '+' })?;
            }
            write_term(f, coefficient.numer().unsigned_abs(), *coefficient.denom(), degree)?;
        }
        Ok(())
    }
}

// `3*x**4/4`, `x**2/2`, `5*x`, `7/2`
fn write_term(f: &mut fmt::Formatter<'_>, numer: u64, denom: i64, degree: u32) -> fmt::Result {
    let power = match degree {
        0 => None,
        1 => Some(VARIABLE.to_string()),
        d => Some(format!("{VARIABLE}**{d}")),
    };
    match power {
        None if denom == 1 => write!(f, "{numer}"),
        None => write!(f, "{numer}/{denom}"),
        Some(power) => {
            if numer == 1 {
                write!(f, "{power}")?;
            } else {
                write!(f, "{numer}*{power}")?;
            }
            if denom != 1 {
                write!(f, "/{denom}")?;
            }
            Ok(())
        }
    }
}
