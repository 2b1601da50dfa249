//! MP3 checks.
//!
//! Stream properties come from lofty, which takes the average bitrate of a
//! VBR stream from its Xing or VBRI header.

use std::io::Cursor;

use lofty::{AudioFile, FileType, Probe, TaggedFileExt};
use tracing::info;

use super::{MIN_MP3_KBPS, REQUIRED_CHANNELS, REQUIRED_SAMPLE_RATE, VBR_NOTE};
use crate::error::AudioFormatError;

const CODEC: &str = "MP3";

/// Bytes after the ID3v2 tag searched for a VBR header.
const VBR_SNIFF_WINDOW: usize = 2048;

/// Stream properties of an MP3 file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mp3Info {
    pub channels: u16,
    pub sample_rate: u32,
    pub bitrate_kbps: u32,
    pub vbr: bool,
}

impl Mp3Info {
    /// Inspect an MP3 stream.
    pub fn read(bytes: &[u8]) -> Result<Self, AudioFormatError> {
        let tagged_file = Probe::new(Cursor::new(bytes))
            .guess_file_type()
            .map_err(|e| malformed(e.to_string()))?
            .read()
            .map_err(|e| malformed(e.to_string()))?;

        if tagged_file.file_type() != FileType::Mpeg {
            return Err(malformed(format!(
                "not an MPEG audio stream ({:?})",
                tagged_file.file_type()
            )));
        }

        let properties = tagged_file.properties();
        let missing = |what: &str| malformed(format!("no {} in stream header", what));

        Ok(Mp3Info {
            channels: properties
                .channels()
                .map(u16::from)
                .ok_or_else(|| missing("channel count"))?,
            sample_rate: properties
                .sample_rate()
                .ok_or_else(|| missing("sample rate"))?,
            bitrate_kbps: properties
                .audio_bitrate()
                .ok_or_else(|| missing("bitrate"))?,
            vbr: has_vbr_header(bytes),
        })
    }
}

pub(super) fn validate(bytes: &[u8]) -> Result<Option<&'static str>, AudioFormatError> {
    let info = Mp3Info::read(bytes)?;

    if info.channels != REQUIRED_CHANNELS {
        return Err(AudioFormatError::Channels {
            codec: CODEC,
            found: info.channels,
        });
    }
    if info.sample_rate != REQUIRED_SAMPLE_RATE {
        return Err(AudioFormatError::SampleRate {
            codec: CODEC,
            found: info.sample_rate,
        });
    }
    if info.bitrate_kbps < MIN_MP3_KBPS {
        return Err(AudioFormatError::Bitrate {
            found: info.bitrate_kbps,
        });
    }

    if info.vbr {
        info!(bitrate_kbps = info.bitrate_kbps, "{}", VBR_NOTE);
        return Ok(Some(VBR_NOTE));
    }
    Ok(None)
}

fn malformed(reason: String) -> AudioFormatError {
    AudioFormatError::Malformed {
        codec: CODEC,
        reason,
    }
}

/// A `Xing` or `VBRI` marker in the first frame. `Info` (LAME's CBR tag) is not VBR.
fn has_vbr_header(bytes: &[u8]) -> bool {
    let start = id3v2_len(bytes).min(bytes.len());
    let end = (start + VBR_SNIFF_WINDOW).min(bytes.len());
    bytes[start..end]
        .windows(4)
        .any(|w| w == b"Xing" || w == b"VBRI")
}

fn id3v2_len(bytes: &[u8]) -> usize {
    match bytes.get(..10) {
        Some(tag) if &tag[..3] == b"ID3" => {
            let size = tag[6..10]
                .iter()
                .fold(0usize, |acc, b| (acc << 7) | usize::from(b & 0x7F));
            let footer = if tag[5] & 0x10 != 0 { 10 } else { 0 };
            10 + size + footer
        }
        _ => 0,
    }
}
