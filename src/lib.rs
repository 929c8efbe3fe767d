//! Change the speed and pitch of audio by an amount given in semitones, tones, octaves or
//! percent.
//!
//! ```
//! use nightcore::{change::RelativeChange, speed::new_sample_rate};
//!
//! assert_eq!(new_sample_rate(44100, RelativeChange::Semitones(12.0)).unwrap(), 88200);
//! assert!(RelativeChange::Octaves(1.0) == RelativeChange::Tones(6.0));
//! ```
pub mod change;
pub mod config;
pub mod engine;
pub mod nightcore;
pub mod speed;
pub mod util;

pub use crate::{
    change::{RelativeChange, Unit},
    nightcore::{Nightcore, NightcoreErr},
    speed::{new_sample_rate, ChangeSpec},
};
