//! The nightcore effect: speed up (or slow down) audio and shift its pitch by the same factor.

use log::{debug, info};
use thiserror::Error;

use crate::{
    engine::{AudioDestination, AudioEngine, AudioSegment, AudioSource, EncodeParams, EngineErr},
    speed::{
        compensation_for, new_sample_rate, ChangeSpec, SpeedErr, ToneCompensation,
        ToneCompensationConfig,
    },
};

/// Audio with a [ChangeSpec] applied. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Nightcore {
    change: ChangeSpec,
    multiplier: f64,
    source_rate: u32,
    audio: AudioSegment,
}

impl Nightcore {
    /// Apply `change` to `audio`. Fails without touching anything if the change doesn't yield a
    /// usable sample rate.
    pub fn new(audio: &AudioSegment, change: impl Into<ChangeSpec>) -> Result<Self, NightcoreErr> {
        let (change, multiplier, new_rate) = Self::prepare(audio, change)?;
        Ok(Self {
            change,
            multiplier,
            source_rate: audio.sample_rate(),
            audio: audio.with_sample_rate(new_rate)?,
        })
    }

    /// Like [Nightcore::new], but lets `engine` do the reinterpretation.
    pub fn with_engine<E: AudioEngine>(
        engine: &E,
        audio: &AudioSegment,
        change: impl Into<ChangeSpec>,
    ) -> Result<Self, NightcoreErr> {
        let (change, multiplier, new_rate) = Self::prepare(audio, change)?;
        Ok(Self {
            change,
            multiplier,
            source_rate: audio.sample_rate(),
            audio: engine.reinterpret_rate(audio, new_rate)?,
        })
    }

    /// Decode `source` with `engine` (see [AudioEngine::decode]) and apply `change`.
    pub fn from_source<E: AudioEngine>(
        engine: &E,
        source: &AudioSource,
        format: Option<&str>,
        change: impl Into<ChangeSpec>,
    ) -> Result<Self, NightcoreErr> {
        let audio = engine.decode(source, format)?;
        debug!("decoded {}: {:?}", source, audio.spec());
        Self::with_engine(engine, &audio, change)
    }

    /// Apply `change` to whatever `produce` returns. The change is checked first, so a degenerate
    /// one fails without running `produce`.
    pub fn using<F, E>(change: impl Into<ChangeSpec>, produce: F) -> Result<Self, NightcoreErr>
    where
        F: FnOnce() -> Result<AudioSegment, E>,
        E: Into<NightcoreErr>,
    {
        let change = change.into();
        change.multiplier()?;
        let audio = produce().map_err(Into::<NightcoreErr>::into)?;
        Self::new(&audio, change)
    }

    fn prepare(
        audio: &AudioSegment,
        change: impl Into<ChangeSpec>,
    ) -> Result<(ChangeSpec, f64, u32), SpeedErr> {
        let change = change.into();
        let multiplier = change.multiplier()?;
        let new_rate = new_sample_rate(audio.sample_rate(), change)?;
        Ok((change, multiplier, new_rate))
    }

    pub fn audio(&self) -> &AudioSegment {
        &self.audio
    }

    pub fn change(&self) -> ChangeSpec {
        self.change
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// The sample rate of the audio before the change.
    pub fn source_rate(&self) -> u32 {
        self.source_rate
    }

    pub fn compensation(&self, config: &ToneCompensationConfig) -> Option<ToneCompensation> {
        compensation_for(self.multiplier, config)
    }

    /// Encode the changed audio. If [compensation][Nightcore::compensation] applies, its filter
    /// is appended to the ones in `params`.
    pub fn export<E: AudioEngine>(
        &self,
        engine: &E,
        destination: AudioDestination<'_>,
        params: &EncodeParams,
        config: &ToneCompensationConfig,
    ) -> Result<(), NightcoreErr> {
        let mut params = params.clone();
        if let Some(eq) = self.compensation(config) {
            info!("applying tone compensation: {}", eq.filter());
            params.filters.push(eq.filter());
        }
        debug!(
            "encoding {} frames at {} Hz to {}",
            self.audio.frame_count(),
            self.audio.sample_rate(),
            destination
        );
        engine.encode(&self.audio, destination, &params)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum NightcoreErr {
    #[error(transparent)]
    Speed(#[from] SpeedErr),
    #[error(transparent)]
    Engine(#[from] EngineErr),
}
