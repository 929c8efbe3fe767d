//! Arithmetic on [RelativeChange]s.
//!
//! The rules differ between the two families of units:
//!
//! * If the left operand is an interval (semitones, tones, octaves), a right operand that is also
//! an interval is first converted into the left operand's unit, and the result always has the
//! left operand's unit. A plain number on the right is combined with the amount directly. There
//! is no way to put a plain number on the left, since a number has no unit to convert into.
//!
//! * [Percent][RelativeChange::Percent] amounts are "percentage points". Adding and subtracting
//! works on these points, also when the plain number is on the left. Multiplication, division,
//! floor division and remainder with a plain number on the left, or between two percentages, work
//! on the fraction [as_percent][RelativeChange::as_percent] instead, because scaling a change
//! means scaling the ratio.
//!
//! Percentages and intervals can't be combined with each other.
//!
//! The named functions ([add], [sub], ..., [radd], [rsub], ...) are the interface; the
//! [std::ops] impls at the bottom are shorthands for them.

use std::{fmt, ops};

use crate::{
    change::{unit::rescale, ChangeErr, RelativeChange},
    util::floored::{floor_div as floored_div, floor_rem},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Rem,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::FloorDiv => "//",
            ArithOp::Rem => "%",
        };
        write!(f, "{}", symbol)
    }
}

/// Right-hand operands of [apply].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Change(RelativeChange),
    Number(f64),
}

impl From<RelativeChange> for Operand {
    fn from(value: RelativeChange) -> Self {
        Operand::Change(value)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Change(c) => write!(f, "{}", c),
            Operand::Number(x) => write!(f, "{}", x),
        }
    }
}

/// private: `op` on plain numbers. Division, floor division and remainder by zero are errors.
fn combine(op: ArithOp, l: f64, r: f64) -> Result<f64, ChangeErr> {
    match op {
        ArithOp::Add => Ok(l + r),
        ArithOp::Sub => Ok(l - r),
        ArithOp::Mul => Ok(l * r),
        ArithOp::Div | ArithOp::FloorDiv | ArithOp::Rem if r == 0.0 => {
            Err(ChangeErr::DivisionByZero { op, lhs: l, rhs: r })
        }
        ArithOp::Div => Ok(l / r),
        ArithOp::FloorDiv => Ok(floored_div(l, r)),
        ArithOp::Rem => Ok(floor_rem(l, r)),
    }
}

fn unsupported(op: ArithOp, lhs: impl fmt::Display, rhs: impl fmt::Display) -> ChangeErr {
    ChangeErr::UnsupportedOperand {
        op,
        lhs: lhs.to_string(),
        rhs: rhs.to_string(),
    }
}

/// Compute `lhs op rhs`. The result always has the unit of `lhs`.
pub fn apply(
    op: ArithOp,
    lhs: RelativeChange,
    rhs: impl Into<Operand>,
) -> Result<RelativeChange, ChangeErr> {
    let rhs = rhs.into();
    let unit = lhs.unit();
    match rhs {
        Operand::Number(x) => Ok(unit.with_amount(combine(op, lhs.amount(), x)?)),
        Operand::Change(RelativeChange::Percent(r)) if !lhs.is_interval() => match op {
            ArithOp::Add | ArithOp::Sub => Ok(unit.with_amount(combine(op, lhs.amount(), r)?)),
            _ => Ok(unit.with_amount(
                combine(op, lhs.as_percent(), r / 100.0)? * 100.0,
            )),
        },
        Operand::Change(r) => match rescale(r.amount(), r.unit(), unit) {
            Some(converted) => Ok(unit.with_amount(combine(op, lhs.amount(), converted)?)),
            None {} => Err(unsupported(op, lhs, rhs)),
        },
    }
}

/// Compute `lhs op rhs` for a plain number on the left. Only defined for
/// [Percent][RelativeChange::Percent]: see the module documentation.
pub fn reflected(op: ArithOp, lhs: f64, rhs: RelativeChange) -> Result<f64, ChangeErr> {
    match rhs {
        RelativeChange::Percent(amount) => match op {
            ArithOp::Add | ArithOp::Sub => combine(op, lhs, amount),
            _ => combine(op, lhs, rhs.as_percent()),
        },
        _ => Err(unsupported(op, lhs, rhs)),
    }
}

pub fn add(lhs: RelativeChange, rhs: impl Into<Operand>) -> Result<RelativeChange, ChangeErr> {
    apply(ArithOp::Add, lhs, rhs)
}

pub fn sub(lhs: RelativeChange, rhs: impl Into<Operand>) -> Result<RelativeChange, ChangeErr> {
    apply(ArithOp::Sub, lhs, rhs)
}

pub fn mul(lhs: RelativeChange, rhs: impl Into<Operand>) -> Result<RelativeChange, ChangeErr> {
    apply(ArithOp::Mul, lhs, rhs)
}

pub fn div(lhs: RelativeChange, rhs: impl Into<Operand>) -> Result<RelativeChange, ChangeErr> {
    apply(ArithOp::Div, lhs, rhs)
}

pub fn floor_div(
    lhs: RelativeChange,
    rhs: impl Into<Operand>,
) -> Result<RelativeChange, ChangeErr> {
    apply(ArithOp::FloorDiv, lhs, rhs)
}

pub fn rem(lhs: RelativeChange, rhs: impl Into<Operand>) -> Result<RelativeChange, ChangeErr> {
    apply(ArithOp::Rem, lhs, rhs)
}

pub fn radd(lhs: f64, rhs: RelativeChange) -> Result<f64, ChangeErr> {
    reflected(ArithOp::Add, lhs, rhs)
}

pub fn rsub(lhs: f64, rhs: RelativeChange) -> Result<f64, ChangeErr> {
    reflected(ArithOp::Sub, lhs, rhs)
}

pub fn rmul(lhs: f64, rhs: RelativeChange) -> Result<f64, ChangeErr> {
    reflected(ArithOp::Mul, lhs, rhs)
}

pub fn rdiv(lhs: f64, rhs: RelativeChange) -> Result<f64, ChangeErr> {
    reflected(ArithOp::Div, lhs, rhs)
}

pub fn rfloor_div(lhs: f64, rhs: RelativeChange) -> Result<f64, ChangeErr> {
    reflected(ArithOp::FloorDiv, lhs, rhs)
}

pub fn rrem(lhs: f64, rhs: RelativeChange) -> Result<f64, ChangeErr> {
    reflected(ArithOp::Rem, lhs, rhs)
}

macro_rules! forward_ops {
    ($($tr:ident $method:ident => $op:expr),* $(,)?) => {
        $(
            impl<R: Into<Operand>> ops::$tr<R> for RelativeChange {
                type Output = Result<RelativeChange, ChangeErr>;

                fn $method(self, rhs: R) -> Self::Output {
                    apply($op, self, rhs)
                }
            }

            impl ops::$tr<RelativeChange> for f64 {
                type Output = Result<f64, ChangeErr>;

                fn $method(self, rhs: RelativeChange) -> Self::Output {
                    reflected($op, self, rhs)
                }
            }
        )*
    };
}

// There's no operator for floor division; use [floor_div] and [rfloor_div].
forward_ops! {
    Add add => ArithOp::Add,
    Sub sub => ArithOp::Sub,
    Mul mul => ArithOp::Mul,
    Div div => ArithOp::Div,
    Rem rem => ArithOp::Rem,
}
