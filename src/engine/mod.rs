//! The boundary to the audio library that decodes and encodes files. This crate only ever
//! changes the declared sample rate of decoded audio; everything else is delegated to an
//! [AudioEngine][r#trait::AudioEngine].

use std::{fmt, io, path::PathBuf, sync::Arc, time::Duration};

use log::debug;
use thiserror::Error;

pub mod r#trait;

pub use r#trait::AudioEngine;

/// How to interpret the bytes of an [AudioSegment].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioSpec {
    /// samples per second (per channel)
    pub sample_rate: u32,
    pub channels: u16,
    /// bytes per sample
    pub sample_width: u16,
}

impl AudioSpec {
    /// The number of bytes that make up one sample on every channel.
    pub fn frame_width(&self) -> usize {
        self.channels as usize * self.sample_width as usize
    }
}

/// Decoded, interleaved sample data together with its [AudioSpec].
///
/// The data is shared between segments created with [with_sample_rate][Self::with_sample_rate],
/// so changing the declared rate never copies the samples.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    data: Arc<[u8]>,
    spec: AudioSpec,
}

impl AudioSegment {
    /// Checks that the spec is usable and that `data` consists of whole frames.
    pub fn new(data: impl Into<Arc<[u8]>>, spec: AudioSpec) -> Result<Self, EngineErr> {
        let data = data.into();
        if spec.sample_rate == 0 {
            return Err(EngineErr::InvalidData("the sample rate is zero".into()));
        }
        if spec.frame_width() == 0 {
            return Err(EngineErr::InvalidData(format!(
                "a frame of {} channels with {} bytes per sample is empty",
                spec.channels, spec.sample_width
            )));
        }
        if data.len() % spec.frame_width() != 0 {
            return Err(EngineErr::InvalidData(format!(
                "{} bytes are not a whole number of {}-byte frames",
                data.len(),
                spec.frame_width()
            )));
        }
        Ok(Self { data, spec })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn spec(&self) -> AudioSpec {
        self.spec
    }

    pub fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    pub fn frame_count(&self) -> usize {
        self.data.len() / self.spec.frame_width()
    }

    /// The playing time at the declared sample rate.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / self.spec.sample_rate as f64)
    }

    /// See [AudioEngine::reinterpret_rate]. A rate of zero is rejected, like in
    /// [new][Self::new].
    pub fn with_sample_rate(&self, sample_rate: u32) -> Result<Self, EngineErr> {
        if sample_rate == 0 {
            return Err(EngineErr::InvalidData(format!(
                "cannot reinterpret {} frames at 0 Hz",
                self.frame_count()
            )));
        }
        debug!(
            "reinterpreting {} frames: {} Hz -> {} Hz",
            self.frame_count(),
            self.spec.sample_rate,
            sample_rate
        );
        Ok(Self {
            data: Arc::clone(&self.data),
            spec: AudioSpec {
                sample_rate,
                ..self.spec
            },
        })
    }

    /// Whether the two segments share their sample data.
    pub fn shares_data_with(&self, other: &AudioSegment) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

/// Where to decode audio from.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl From<PathBuf> for AudioSource {
    fn from(value: PathBuf) -> Self {
        AudioSource::Path(value)
    }
}

impl From<&str> for AudioSource {
    fn from(value: &str) -> Self {
        AudioSource::Path(value.into())
    }
}

impl From<Vec<u8>> for AudioSource {
    fn from(value: Vec<u8>) -> Self {
        AudioSource::Bytes(value)
    }
}

impl fmt::Display for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioSource::Path(p) => write!(f, "{}", p.display()),
            AudioSource::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Where to encode audio to. A [Stream][AudioDestination::Stream] is typically standard output.
pub enum AudioDestination<'a> {
    Path(PathBuf),
    Stream(&'a mut dyn io::Write),
}

impl fmt::Display for AudioDestination<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioDestination::Path(p) => write!(f, "{}", p.display()),
            AudioDestination::Stream(_) => write!(f, "<stream>"),
        }
    }
}

/// Options for [AudioEngine::encode]. Unset fields leave the choice to the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodeParams {
    pub format: Option<String>,
    pub codec: Option<String>,
    /// filter descriptions in the engine's syntax, like `bass=g=2, treble=g=-1`
    pub filters: Vec<String>,
}

#[derive(Error, Debug)]
pub enum EngineErr {
    #[error("failed to decode {source_name}: {reason}")]
    Decode { source_name: String, reason: String },
    #[error("failed to encode to {destination}: {reason}")]
    Encode { destination: String, reason: String },
    #[error("invalid audio data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// An engine for tests: "decodes" raw little-endian PCM handed in as bytes, and "encodes" by
/// writing the raw bytes back out.
#[cfg(test)]
pub mod mock {
    use std::{cell::RefCell, collections::HashMap};

    use super::*;

    pub struct MockEngine {
        pub files: HashMap<PathBuf, AudioSegment>,
        pub raw_spec: AudioSpec,
        pub encoded: RefCell<Vec<(AudioSpec, EncodeParams)>>,
    }

    impl MockEngine {
        pub fn new() -> Self {
            Self {
                files: HashMap::new(),
                raw_spec: AudioSpec {
                    sample_rate: 44100,
                    channels: 2,
                    sample_width: 2,
                },
                encoded: RefCell::new(vec![]),
            }
        }
    }

    impl AudioEngine for MockEngine {
        fn decode(
            &self,
            source: &AudioSource,
            format: Option<&str>,
        ) -> Result<AudioSegment, EngineErr> {
            let fail = |reason: &str| EngineErr::Decode {
                source_name: source.to_string(),
                reason: reason.into(),
            };
            match (source, format) {
                (AudioSource::Path(p), None {}) => {
                    self.files.get(p).cloned().ok_or_else(|| fail("no such file"))
                }
                (AudioSource::Bytes(b), Some("raw")) => AudioSegment::new(b.clone(), self.raw_spec),
                (_, Some(f)) => Err(fail(&format!("unknown format '{}'", f))),
                (AudioSource::Bytes(_), None {}) => Err(fail("cannot infer format")),
            }
        }

        fn encode(
            &self,
            segment: &AudioSegment,
            destination: AudioDestination<'_>,
            params: &EncodeParams,
        ) -> Result<(), EngineErr> {
            match destination {
                AudioDestination::Stream(w) => w.write_all(segment.data())?,
                AudioDestination::Path(p) => {
                    return Err(EngineErr::Encode {
                        destination: p.display().to_string(),
                        reason: "read-only file system".into(),
                    })
                }
            }
            self.encoded
                .borrow_mut()
                .push((segment.spec(), params.clone()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::{mock::MockEngine, *};
    use pretty_assertions::assert_eq;

    fn stereo16(sample_rate: u32) -> AudioSpec {
        AudioSpec {
            sample_rate,
            channels: 2,
            sample_width: 2,
        }
    }

    #[test]
    fn test_segment_validation() {
        assert!(AudioSegment::new(vec![0u8; 8], stereo16(44100)).is_ok());
        assert!(matches!(
            AudioSegment::new(vec![0u8; 6], stereo16(44100)),
            Err(EngineErr::InvalidData(_))
        ));
        assert!(AudioSegment::new(vec![0u8; 8], stereo16(0)).is_err());
        let no_channels = AudioSpec {
            channels: 0,
            ..stereo16(44100)
        };
        assert!(AudioSegment::new(Vec::<u8>::new(), no_channels).is_err());
    }

    #[test]
    fn test_frames_and_duration() {
        let seg = AudioSegment::new(vec![0u8; 4 * 44100], stereo16(44100)).unwrap();
        assert_eq!(seg.frame_count(), 44100);
        assert_eq!(seg.duration(), Duration::from_secs(1));
        assert_eq!(
            seg.with_sample_rate(88200).unwrap().duration(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_reinterpret_keeps_samples() {
        let engine = MockEngine::new();
        let seg = AudioSegment::new(vec![1u8, 2, 3, 4, 5, 6, 7, 8], stereo16(44100)).unwrap();
        let faster = engine.reinterpret_rate(&seg, 88200).unwrap();
        assert_eq!(faster.sample_rate(), 88200);
        assert_eq!(faster.data(), seg.data());
        assert_eq!(faster.frame_count(), seg.frame_count());
        assert_eq!(faster.spec().channels, 2);
        assert!(faster.shares_data_with(&seg));
        assert_eq!(seg.sample_rate(), 44100);
    }

    #[test]
    fn test_reinterpret_at_zero_hz() {
        let engine = MockEngine::new();
        let seg = AudioSegment::new(vec![0u8; 8], stereo16(44100)).unwrap();
        assert!(matches!(
            engine.reinterpret_rate(&seg, 0),
            Err(EngineErr::InvalidData(_))
        ));
        assert!(matches!(
            seg.with_sample_rate(0),
            Err(EngineErr::InvalidData(_))
        ));
        // the original is still intact and usable
        assert_eq!(seg.sample_rate(), 44100);
        assert_eq!(seg.with_sample_rate(1).unwrap().duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_mock_engine() {
        let engine = MockEngine::new();
        let seg = engine
            .decode(&AudioSource::Bytes(vec![0u8; 8]), Some("raw"))
            .unwrap();
        assert_eq!(seg.frame_count(), 2);

        let err = engine.decode(&"missing.mp3".into(), None {}).unwrap_err();
        assert_eq!(err.to_string(), "failed to decode missing.mp3: no such file");

        let mut out = vec![];
        engine
            .encode(
                &seg,
                AudioDestination::Stream(&mut out),
                &EncodeParams::default(),
            )
            .unwrap();
        assert_eq!(out, vec![0u8; 8]);
    }
}
