//! Amounts of pitch and speed change, expressed in musically meaningful units.
//!
//! Every [RelativeChange] normalises to a multiplier via [RelativeChange::as_percent], where `1.0`
//! means "no change". Comparisons between changes (and between a change and a plain number) go
//! through that multiplier, so `Semitones(12.0) == Octaves(1.0) == 2.0`. Arithmetic lives in
//! [arithmetic].

use std::{cmp::Ordering, fmt, ops, str::FromStr};

use num_traits::ToPrimitive;
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

pub mod arithmetic;
pub mod unit;

pub use arithmetic::{ArithOp, Operand};
pub use unit::Unit;

/// A signed amount of change in one of the [Unit]s.
///
/// The interval variants ([Semitones][RelativeChange::Semitones],
/// [Tones][RelativeChange::Tones], [Octaves][RelativeChange::Octaves]) measure the change in
/// fractions of an octave, so that an amount of zero means "no change". For
/// [Percent][RelativeChange::Percent], the amount is the new speed in parts per hundred, so "no
/// change" is `Percent(100.0)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeChange {
    Semitones(f64),
    Tones(f64),
    Octaves(f64),
    Percent(f64),
}

impl RelativeChange {
    pub fn amount(&self) -> f64 {
        match *self {
            RelativeChange::Semitones(x)
            | RelativeChange::Tones(x)
            | RelativeChange::Octaves(x)
            | RelativeChange::Percent(x) => x,
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            RelativeChange::Semitones(_) => Unit::Semitones,
            RelativeChange::Tones(_) => Unit::Tones,
            RelativeChange::Octaves(_) => Unit::Octaves,
            RelativeChange::Percent(_) => Unit::Percent,
        }
    }

    pub fn is_interval(&self) -> bool {
        self.unit().is_interval()
    }

    /// The factor by which speed and pitch are multiplied: `1.0` is no change, values above `1.0`
    /// speed up, values between `0.0` and `1.0` slow down.
    ///
    /// For interval units this is `2^(amount / steps_per_octave)` and therefore always positive.
    /// [Percent][RelativeChange::Percent] amounts at or below `-100` are the only way to obtain a
    /// non-positive result.
    pub fn as_percent(&self) -> f64 {
        match self.unit().steps_per_octave() {
            Some(n) => 2.0_f64.powf(self.amount() / n as f64),
            None {} => self.amount() / 100.0,
        }
    }

    /// The mirror image of negation: makes a negative amount positive, and leaves non-negative
    /// amounts alone.
    pub fn positive(self) -> Self {
        if self.amount() < 0.0 {
            self.unit().with_amount(-self.amount())
        } else {
            self
        }
    }
}

impl ops::Neg for RelativeChange {
    type Output = Self;

    /// Flips the sign of a positive amount. Amounts that are already negative (or zero) are left
    /// alone, so `-(-x)` is the same as `-x`.
    fn neg(self) -> Self {
        if self.amount() > 0.0 {
            self.unit().with_amount(-self.amount())
        } else {
            self
        }
    }
}

impl PartialEq for RelativeChange {
    fn eq(&self, other: &Self) -> bool {
        self.as_percent() == other.as_percent()
    }
}

impl PartialEq<f64> for RelativeChange {
    fn eq(&self, other: &f64) -> bool {
        self.as_percent() == *other
    }
}

impl PartialOrd for RelativeChange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_percent().partial_cmp(&other.as_percent())
    }
}

impl PartialOrd<f64> for RelativeChange {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.as_percent().partial_cmp(other)
    }
}

impl From<RelativeChange> for f64 {
    fn from(value: RelativeChange) -> Self {
        value.as_percent()
    }
}

/// Integer conversions truncate [as_percent][RelativeChange::as_percent] towards zero.
impl ToPrimitive for RelativeChange {
    fn to_i64(&self) -> Option<i64> {
        self.as_percent().to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.as_percent().to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.as_percent())
    }
}

impl fmt::Display for RelativeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount(), self.unit())
    }
}

impl FromStr for RelativeChange {
    type Err = ChangeErr;

    /// Parses `"<amount>"` or `"<amount> <unit>"`. Without a unit, the amount is in
    /// [semitones][Unit::Semitones].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let amount_str = words.next().unwrap_or("");
        let amount = amount_str
            .parse::<f64>()
            .map_err(|_| ChangeErr::InvalidAmount(amount_str.into()))?;
        let unit = match words.next() {
            Some(name) => name.parse()?,
            None {} => Unit::default(),
        };
        if let Some(extra) = words.next() {
            return Err(ChangeErr::InvalidAmount(format!(
                "unexpected '{}' after '{} {}'",
                extra, amount_str, unit
            )));
        }
        Ok(unit.with_amount(amount))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChangeErr {
    #[error("unsupported operands for {op}: '{lhs}' and '{rhs}'")]
    UnsupportedOperand {
        op: ArithOp,
        lhs: String,
        rhs: String,
    },
    #[error("division by zero in '{lhs} {op} {rhs}'")]
    DivisionByZero { op: ArithOp, lhs: f64, rhs: f64 },
    #[error("'{0}' is not a unit; expected one of semitones, tones, octaves, percent")]
    UnknownUnit(String),
    #[error("'{0}' is not a well-formed amount")]
    InvalidAmount(String),
}
