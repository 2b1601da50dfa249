//! WAV checks.

use std::io::Cursor;

use hound::{SampleFormat, WavReader};

use super::{REQUIRED_CHANNELS, REQUIRED_SAMPLE_RATE};
use crate::error::AudioFormatError;

const CODEC: &str = "WAV";
const REQUIRED_BITS: u16 = 16;

pub(super) fn validate(bytes: &[u8]) -> Result<(), AudioFormatError> {
    let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| AudioFormatError::Malformed {
        codec: CODEC,
        reason: e.to_string(),
    })?;
    let spec = reader.spec();

    if spec.channels != REQUIRED_CHANNELS {
        return Err(AudioFormatError::Channels {
            codec: CODEC,
            found: spec.channels,
        });
    }
    if spec.bits_per_sample != REQUIRED_BITS {
        return Err(AudioFormatError::SampleWidth {
            found: spec.bits_per_sample,
        });
    }
    if spec.sample_rate != REQUIRED_SAMPLE_RATE {
        return Err(AudioFormatError::SampleRate {
            codec: CODEC,
            found: spec.sample_rate,
        });
    }
    if spec.sample_format != SampleFormat::Int {
        return Err(AudioFormatError::Compressed);
    }

    Ok(())
}
