//! WAV container assembly for raw PCM payloads.
//!
//! The synthesis API streams either a self-describing container or raw PCM
//! whose sample rate and bit depth ride along in the MIME type parameters
//! (e.g. `audio/L16;rate=24000`). Raw PCM gets a 44-byte RIFF header
//! prepended; unparseable parameters keep the defaults rather than failing.

use crate::llm::SynthesizedAudio;

const NUM_CHANNELS: u16 = 1;

/// Sample parameters for a mono PCM payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    pub bits_per_sample: u16,
    pub sample_rate: u32,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            bits_per_sample: 16,
            sample_rate: 24_000,
        }
    }
}

/// Extracts bit depth and sample rate from an audio MIME type. Lenient by
/// design: anything unparseable keeps the default.
pub fn parse_audio_mime_type(mime_type: &str) -> WavSpec {
    let mut spec = WavSpec::default();

    for param in mime_type.split(';') {
        let param = param.trim();
        // `get` rather than indexing: the parameter may carry multi-byte noise
        if param
            .get(..5)
            .is_some_and(|head| head.eq_ignore_ascii_case("rate="))
        {
            if let Ok(rate) = param[5..].parse() {
                spec.sample_rate = rate;
            }
        } else if let Some(bits) = param.strip_prefix("audio/L") {
            if let Ok(bits) = bits.parse() {
                spec.bits_per_sample = bits;
            }
        }
    }

    spec
}

/// Prepends a RIFF/WAVE/fmt/data header to a raw PCM payload.
pub fn wrap_pcm_in_wav(pcm: &[u8], spec: WavSpec) -> Vec<u8> {
    let bytes_per_sample = spec.bits_per_sample / 8;
    let block_align = NUM_CHANNELS * bytes_per_sample;
    let byte_rate = spec.sample_rate.saturating_mul(u32::from(block_align));
    let data_size = pcm.len() as u32;
    let chunk_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&chunk_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format tag
    wav.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    wav.extend_from_slice(&spec.sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&spec.bits_per_sample.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}

fn is_wav_container(mime_type: &str) -> bool {
    let base = mime_type.split(';').next().unwrap_or("").trim();
    matches!(base, "audio/wav" | "audio/x-wav" | "audio/wave")
}

impl SynthesizedAudio {
    /// Returns the payload as a complete WAV file, passing self-describing
    /// containers through untouched.
    pub fn into_wav(self) -> Vec<u8> {
        match self.mime_type.as_deref() {
            Some(mime) if is_wav_container(mime) => self.data,
            Some(mime) => wrap_pcm_in_wav(&self.data, parse_audio_mime_type(mime)),
            None => wrap_pcm_in_wav(&self.data, WavSpec::default()),
        }
    }
}
