use std::{fmt::Debug, future::Future};

/// Converts a transcript into speech via a streaming synthesis model.
pub trait SpeechSynthesizer {
    type Error: Debug;

    fn synthesize(
        &self,
        script: &str,
    ) -> impl Future<Output = Result<SynthesizedAudio, Self::Error>> + Send;
}

/// The accumulated binary payload of a synthesis stream plus the first-seen
/// MIME type, which carries the sample-rate and bit-depth parameters needed
/// when the payload is raw PCM.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}
