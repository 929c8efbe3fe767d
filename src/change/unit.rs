use std::{fmt, str::FromStr};

use num_rational::Ratio;
use serde_derive::{Deserialize, Serialize};

use crate::change::{ChangeErr, RelativeChange};

/// The units in which a [RelativeChange] can be expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Semitones,
    Tones,
    Octaves,
    Percent,
}

impl Unit {
    /// Every unit, in the order they are usually presented to users.
    pub const ALL: [Unit; 4] = [Unit::Semitones, Unit::Tones, Unit::Octaves, Unit::Percent];

    /// How many steps of this unit make up an octave. Only the interval units (semitones, tones,
    /// octaves) have such a number; [Unit::Percent] is not measured in fractions of an octave.
    pub fn steps_per_octave(&self) -> Option<u32> {
        match self {
            Unit::Semitones => Some(12),
            Unit::Tones => Some(6),
            Unit::Octaves => Some(1),
            Unit::Percent => None {},
        }
    }

    pub fn is_interval(&self) -> bool {
        self.steps_per_octave().is_some()
    }

    /// The lower-case name, as accepted by [Unit::from_str].
    pub fn name(&self) -> &'static str {
        match self {
            Unit::Semitones => "semitones",
            Unit::Tones => "tones",
            Unit::Octaves => "octaves",
            Unit::Percent => "percent",
        }
    }

    /// Construct a [RelativeChange] of this unit.
    pub fn with_amount(&self, amount: f64) -> RelativeChange {
        match self {
            Unit::Semitones => RelativeChange::Semitones(amount),
            Unit::Tones => RelativeChange::Tones(amount),
            Unit::Octaves => RelativeChange::Octaves(amount),
            Unit::Percent => RelativeChange::Percent(amount),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Unit {
    type Err = ChangeErr;

    /// Case-insensitive lookup by [Unit::name].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Unit::ALL
            .iter()
            .find(|u| u.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| ChangeErr::UnknownUnit(wanted.into()))
    }
}

/// The factor that converts an amount in `right` units into `left` units, i.e. the ratio of their
/// [steps_per_octave][Unit::steps_per_octave]. One octave is twelve semitones, so
/// `unit_ratio(Semitones, Octaves)` is `12/1`.
///
/// Returns `None` unless both units are interval units.
pub fn unit_ratio(left: Unit, right: Unit) -> Option<Ratio<u32>> {
    match (left.steps_per_octave(), right.steps_per_octave()) {
        (Some(l), Some(r)) => Some(Ratio::new(l, r)),
        _ => None {},
    }
}

/// Express `amount` (given in `from` units) in `to` units. The multiplication by the numerator
/// happens first, so conversions between whole numbers of steps are exact.
pub fn rescale(amount: f64, from: Unit, to: Unit) -> Option<f64> {
    let ratio = unit_ratio(to, from)?;
    Some(amount * *ratio.numer() as f64 / *ratio.denom() as f64)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!("semitones".parse::<Unit>().unwrap(), Unit::Semitones);
        assert_eq!("Tones".parse::<Unit>().unwrap(), Unit::Tones);
        assert_eq!(" OCTAVES ".parse::<Unit>().unwrap(), Unit::Octaves);
        assert_eq!("PerCent".parse::<Unit>().unwrap(), Unit::Percent);
        assert!(matches!(
            "cents".parse::<Unit>(),
            Err(ChangeErr::UnknownUnit(name)) if name == "cents"
        ));
    }

    #[test]
    fn test_names_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(unit.name().parse::<Unit>().unwrap(), unit);
            assert_eq!(unit.with_amount(3.0).unit(), unit);
        }
        assert_eq!(Unit::default(), Unit::Semitones);
    }

    #[test]
    fn test_steps_per_octave() {
        // a hundred cents per semitone, two hundred per tone, twelve hundred per octave
        let cents_per_octave = 1200;
        assert_eq!(cents_per_octave / Unit::Semitones.steps_per_octave().unwrap(), 100);
        assert_eq!(cents_per_octave / Unit::Tones.steps_per_octave().unwrap(), 200);
        assert_eq!(cents_per_octave / Unit::Octaves.steps_per_octave().unwrap(), 1200);
        assert_eq!(Unit::Percent.steps_per_octave(), None {});
    }

    #[test]
    fn test_unit_ratio() {
        assert_eq!(
            unit_ratio(Unit::Semitones, Unit::Octaves),
            Some(Ratio::new(12, 1))
        );
        assert_eq!(unit_ratio(Unit::Octaves, Unit::Semitones), Some(Ratio::new(1, 12)));
        assert_eq!(unit_ratio(Unit::Tones, Unit::Semitones), Some(Ratio::new(1, 2)));
        assert_eq!(unit_ratio(Unit::Tones, Unit::Tones), Some(Ratio::new(1, 1)));
        assert_eq!(unit_ratio(Unit::Percent, Unit::Tones), None {});
        assert_eq!(unit_ratio(Unit::Tones, Unit::Percent), None {});
    }

    #[test]
    fn test_rescale() {
        assert_eq!(rescale(6.0, Unit::Semitones, Unit::Octaves), Some(0.5));
        assert_eq!(rescale(1.0, Unit::Octaves, Unit::Tones), Some(6.0));
        assert_eq!(rescale(3.0, Unit::Tones, Unit::Semitones), Some(6.0));
        assert_eq!(rescale(3.0, Unit::Percent, Unit::Semitones), None {});
    }
}
