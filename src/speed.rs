//! Turning a change into a new sample rate.
//!
//! Declaring the unchanged samples to have been recorded at a different rate is the whole
//! effect: played back, the audio is faster (or slower) and higher (or lower) by the same factor.

use std::{fmt, str::FromStr};

use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use crate::change::{ChangeErr, RelativeChange};

/// How much to change the speed by: either a [RelativeChange], or a plain multiplier, where
/// `1.0` means "no change".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChangeSpec {
    Relative(RelativeChange),
    Multiplier(f64),
}

impl ChangeSpec {
    /// The factor by which the sample rate is to be multiplied. Only finite, positive factors
    /// describe a playable result.
    pub fn multiplier(&self) -> Result<f64, SpeedErr> {
        let x = match self {
            ChangeSpec::Relative(c) => c.as_percent(),
            ChangeSpec::Multiplier(x) => *x,
        };
        if !x.is_finite() {
            return Err(SpeedErr::NotNumeric(self.to_string()));
        }
        if x <= 0.0 {
            warn!("rejecting change by {}: multiplier {} is not positive", self, x);
            return Err(SpeedErr::Degenerate {
                change: self.to_string(),
                multiplier: x,
            });
        }
        Ok(x)
    }
}

impl From<RelativeChange> for ChangeSpec {
    fn from(value: RelativeChange) -> Self {
        ChangeSpec::Relative(value)
    }
}

impl From<f64> for ChangeSpec {
    fn from(value: f64) -> Self {
        ChangeSpec::Multiplier(value)
    }
}

impl fmt::Display for ChangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeSpec::Relative(c) => write!(f, "{}", c),
            ChangeSpec::Multiplier(x) => write!(f, "{}", x),
        }
    }
}

impl FromStr for ChangeSpec {
    type Err = SpeedErr;

    /// A lone number is a [Multiplier][ChangeSpec::Multiplier]; a number followed by a unit is a
    /// [Relative][ChangeSpec::Relative] change.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.split_whitespace().count() == 1 {
            return s
                .parse::<f64>()
                .map(ChangeSpec::Multiplier)
                .map_err(|_| SpeedErr::NotNumeric(s.into()));
        }
        match s.parse::<RelativeChange>() {
            Ok(c) => Ok(ChangeSpec::Relative(c)),
            Err(ChangeErr::InvalidAmount(_)) => Err(SpeedErr::NotNumeric(s.into())),
            Err(e) => Err(e.into()),
        }
    }
}

/// The sample rate at which `source_rate` samples per second must be played to realise `change`.
/// Rounds to the nearest integer, with ties going away from zero.
pub fn new_sample_rate(source_rate: u32, change: impl Into<ChangeSpec>) -> Result<u32, SpeedErr> {
    let change = change.into();
    if source_rate == 0 {
        return Err(SpeedErr::ZeroSourceRate);
    }
    let multiplier = change.multiplier()?;
    let rate = (source_rate as f64 * multiplier).round();
    if rate < 1.0 || rate > u32::MAX as f64 {
        warn!(
            "rejecting change by {}: {} Hz would become {} Hz",
            change, source_rate, rate
        );
        return Err(SpeedErr::RateOutOfRange {
            source_rate,
            change: change.to_string(),
            rate,
        });
    }
    debug!(
        "change by {} (x{}): {} Hz -> {} Hz",
        change, multiplier, source_rate, rate
    );
    Ok(rate as u32)
}

/// A bass boost and treble cut, to make up for the thinner sound of sped-up audio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCompensation {
    pub bass_gain_db: f64,
    pub treble_gain_db: f64,
}

impl Default for ToneCompensation {
    fn default() -> Self {
        Self {
            bass_gain_db: 2.0,
            treble_gain_db: -1.0,
        }
    }
}

impl ToneCompensation {
    /// The filter description handed to the audio engine, e.g. `bass=g=2, treble=g=-1`.
    pub fn filter(&self) -> String {
        format!(
            "bass=g={}, treble=g={}",
            self.bass_gain_db, self.treble_gain_db
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "kebab-case")]
#[serde(default)]
pub struct ToneCompensationConfig {
    pub enabled: bool,
    pub bass_gain_db: f64,
    pub treble_gain_db: f64,
}

impl Default for ToneCompensationConfig {
    fn default() -> Self {
        let gains = ToneCompensation::default();
        Self {
            enabled: true,
            bass_gain_db: gains.bass_gain_db,
            treble_gain_db: gains.treble_gain_db,
        }
    }
}

impl ToneCompensationConfig {
    pub fn gains(&self) -> ToneCompensation {
        ToneCompensation {
            bass_gain_db: self.bass_gain_db,
            treble_gain_db: self.treble_gain_db,
        }
    }
}

/// Slowed-down audio doesn't get thinner, so compensation only applies to speed-ups, i.e.
/// multipliers strictly greater than one.
pub fn compensation_for(
    multiplier: f64,
    config: &ToneCompensationConfig,
) -> Option<ToneCompensation> {
    if config.enabled && multiplier > 1.0 {
        Some(config.gains())
    } else {
        None {}
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeedErr {
    #[error("cannot change audio speed by '{0}'")]
    NotNumeric(String),
    #[error("cannot change audio speed by '{change}': the multiplier {multiplier} is not positive")]
    Degenerate { change: String, multiplier: f64 },
    #[error("the source sample rate is zero")]
    ZeroSourceRate,
    #[error("changing {source_rate} Hz by '{change}' gives {rate} Hz, which is not a usable sample rate")]
    RateOutOfRange {
        source_rate: u32,
        change: String,
        rate: f64,
    },
    #[error(transparent)]
    Change(#[from] ChangeErr),
}
