use std::{fs, io, path::Path};

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    change::{RelativeChange, Unit},
    engine::EncodeParams,
    speed::ToneCompensationConfig,
};

/// Defaults for a front end, read from YAML. Every field may be omitted:
///
/// ```yaml
/// unit: semitones
/// amount: 2
/// format: mp3
/// tone-compensation:
///   enabled: true
///   bass-gain-db: 2
///   treble-gain-db: -1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "kebab-case")]
#[serde(default)]
pub struct Config {
    pub unit: Unit,
    pub amount: f64,
    /// overrides the format the engine would infer, see [decode_format][Config::decode_format]
    /// and [encode_params][Config::encode_params]
    pub format: Option<String>,
    pub codec: Option<String>,
    pub tone_compensation: ToneCompensationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit: Unit::Semitones,
            amount: 2.0,
            format: None {},
            codec: None {},
            tone_compensation: ToneCompensationConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigErr> {
        Ok(serde_yml::from_str(s)?)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, ConfigErr> {
        Ok(serde_yml::from_reader(reader)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigErr> {
        Self::from_reader(fs::File::open(path)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigErr> {
        Ok(serde_yml::to_string(self)?)
    }

    pub fn default_change(&self) -> RelativeChange {
        self.unit.with_amount(self.amount)
    }

    /// The `format` argument for [AudioEngine::decode][crate::engine::AudioEngine::decode].
    pub fn decode_format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn encode_params(&self) -> EncodeParams {
        EncodeParams {
            format: self.format.clone(),
            codec: self.codec.clone(),
            filters: vec![],
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigErr {
    #[error("could not read configuration: {0}")]
    Io(#[from] io::Error),
    #[error("malformed configuration: {0}")]
    Yaml(#[from] serde_yml::Error),
}
