use crate::engine::{AudioDestination, AudioSegment, AudioSource, EncodeParams, EngineErr};

/// The audio library doing the actual decoding and encoding.
///
/// Implementations are free in which containers and codecs they support. The one thing they
/// must not do is resample in [reinterpret_rate][AudioEngine::reinterpret_rate]: the samples stay
/// the same, only their declared rate changes.
pub trait AudioEngine {
    /// Read audio from a file or from bytes. `format` overrides whatever format the engine would
    /// infer.
    fn decode(&self, source: &AudioSource, format: Option<&str>)
        -> Result<AudioSegment, EngineErr>;

    /// Write audio out, applying the [filters][EncodeParams::filters], if the engine supports
    /// them.
    fn encode(
        &self,
        segment: &AudioSegment,
        destination: AudioDestination<'_>,
        params: &EncodeParams,
    ) -> Result<(), EngineErr>;

    /// The same samples, declared to have been recorded at `new_rate` samples per second. Fails
    /// with [EngineErr::InvalidData] if `new_rate` is zero.
    fn reinterpret_rate(
        &self,
        segment: &AudioSegment,
        new_rate: u32,
    ) -> Result<AudioSegment, EngineErr> {
        segment.with_sample_rate(new_rate)
    }
}
