use std::sync::LazyLock;

use arxiv_client::Paper;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use futures::StreamExt;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::llm::{PaperSelector, ScriptWriter, Selection, SpeechSynthesizer, SynthesizedAudio};

/// Accepts an arXiv abs/pdf URL or a bare id like `2401.12345v1`. Fallback
/// only; the primary selection contract is structured JSON output.
static ARXIV_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:arxiv\.org/(?:abs|pdf)/)?(\d{4}\.\d{4,5}(?:v\d+)?)").unwrap()
});

/// Client for the Gemini `generateContent` family of endpoints. Handles
/// paper selection, script generation and speech synthesis; hence one
/// instance serves three pipeline seams.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    selector_model: String,
    script_model: String,
    tts_model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("invalid JSON in model response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base64 in audio chunk: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("model response contains no recognizable paper selection")]
    SelectionParse,
    #[error("model returned an empty script")]
    EmptyScript,
    #[error("synthesis stream carried no audio data")]
    NoAudio,
}

impl GeminiClient {
    const SELECT_PROMPT: &'static str = include_str!("./prompts/select_paper.txt");
    const SCRIPT_PROMPT: &'static str = include_str!("./prompts/write_script.txt");

    const VOICE_SPEAKER_ONE: &'static str = "Leda";
    const VOICE_SPEAKER_TWO: &'static str = "Puck";

    pub fn new(
        api_key: impl Into<String>,
        selector_model: impl Into<String>,
        script_model: impl Into<String>,
        tts_model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            selector_model: selector_model.into(),
            script_model: script_model.into(),
            tts_model: tts_model.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Single non-streaming `generateContent` request.
    async fn generate_content(
        &self,
        model: &str,
        parts: serde_json::Value,
        generation_config: serde_json::Value,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": generation_config,
        });

        let resp = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, message });
        }

        Ok(resp.json::<GenerateContentResponse>().await?)
    }

    /// Streaming `streamGenerateContent` request consumed to completion.
    /// Inline audio payloads are decoded and accumulated; incidental text
    /// chunks are logged and ignored.
    async fn stream_audio(
        &self,
        model: &str,
        parts: serde_json::Value,
        generation_config: serde_json::Value,
    ) -> Result<SynthesizedAudio, GeminiError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": generation_config,
        });

        let resp = self
            .client
            .post(format!(
                "{}/models/{}:streamGenerateContent?alt=sse",
                self.base_url, model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, message });
        }

        let mut audio = SynthesizedAudio {
            data: Vec::new(),
            mime_type: None,
        };

        let mut stream = resp.bytes_stream();
        let mut buf = Vec::new();
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
            drain_sse_lines(&mut buf, &mut audio)?;
        }
        if !buf.is_empty() {
            let tail = String::from_utf8_lossy(&buf);
            absorb_sse_line(tail.trim_end(), &mut audio)?;
        }

        Ok(audio)
    }
}

/// Drains every complete line out of the raw byte buffer. Bytes after the
/// last newline stay buffered, so a multi-byte character split across two
/// network chunks is only decoded once its line is complete.
fn drain_sse_lines(buf: &mut Vec<u8>, audio: &mut SynthesizedAudio) -> Result<(), GeminiError> {
    while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
        let line: Vec<u8> = buf.drain(..=pos).collect();
        let text = String::from_utf8_lossy(&line);
        absorb_sse_line(text.trim_end_matches(['\r', '\n']), audio)?;
    }
    Ok(())
}

/// One SSE line; only `data: {json}` payloads carry content.
fn absorb_sse_line(line: &str, audio: &mut SynthesizedAudio) -> Result<(), GeminiError> {
    let Some(payload) = line.strip_prefix("data: ") else {
        return Ok(());
    };
    if payload == "[DONE]" {
        return Ok(());
    }

    let resp: GenerateContentResponse = serde_json::from_str(payload)?;
    for candidate in resp.candidates {
        let Some(content) = candidate.content else {
            continue;
        };
        for part in content.parts {
            if let Some(inline) = part.inline_data {
                if let Some(data) = inline.data {
                    audio.data.extend_from_slice(&BASE64.decode(data.as_bytes())?);
                    if audio.mime_type.is_none() {
                        audio.mime_type = inline.mime_type;
                    }
                }
            } else if let Some(text) = part.text {
                tracing::info!(%text, "Synthesis stream text");
            }
        }
    }

    Ok(())
}

fn first_text(resp: &GenerateContentResponse) -> Option<&str> {
    resp.candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.iter().find_map(|p| p.text.as_deref()))
}

/// Free-text fallback when the structured selection cannot be parsed.
fn fallback_selection(text: &str) -> Option<Selection> {
    let arxiv_id = ARXIV_ID_RE.captures(text).map(|c| c[1].to_string())?;
    Some(Selection {
        title: String::new(),
        reason_for_choice: "extracted from free-text model response".into(),
        arxiv_id,
    })
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: Option<String>,
    pub data: Option<String>,
}

impl PaperSelector for GeminiClient {
    type Error = GeminiError;

    #[tracing::instrument(skip_all, fields(candidates = candidates.len()))]
    async fn select_paper(&self, candidates: &[Paper]) -> Result<Selection, Self::Error> {
        let blocks: String = candidates.iter().map(Paper::prompt_block).collect();
        let prompt = format!("{}\n<papers>\n{}</papers>", Self::SELECT_PROMPT, blocks);

        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "reason_for_choice": { "type": "STRING" },
                "arxiv_id": { "type": "STRING" },
            },
            "required": ["title", "reason_for_choice", "arxiv_id"],
        });

        let resp = self
            .generate_content(
                &self.selector_model,
                json!([{ "text": prompt }]),
                json!({
                    "responseMimeType": "application/json",
                    "responseSchema": schema,
                }),
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to select paper"))?;

        let text = first_text(&resp).ok_or(GeminiError::SelectionParse)?;

        match serde_json::from_str::<Selection>(text) {
            Ok(selection) => {
                tracing::info!(
                    arxiv_id = %selection.arxiv_id,
                    reason = %selection.reason_for_choice,
                    "Selected paper"
                );
                Ok(selection)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Structured selection unparseable, trying free text");
                fallback_selection(text).ok_or(GeminiError::SelectionParse)
            }
        }
    }
}

impl ScriptWriter for GeminiClient {
    type Error = GeminiError;

    #[tracing::instrument(skip_all, fields(pdf_bytes = pdf_bytes.len()))]
    async fn write_script(&self, pdf_bytes: &[u8]) -> Result<String, Self::Error> {
        let parts = json!([
            { "text": Self::SCRIPT_PROMPT },
            {
                "inlineData": {
                    "mimeType": "application/pdf",
                    "data": BASE64.encode(pdf_bytes),
                }
            },
        ]);

        let resp = self
            .generate_content(
                &self.script_model,
                parts,
                json!({ "responseMimeType": "text/plain" }),
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate script"))?;

        let script = first_text(&resp).map(str::trim).unwrap_or_default();
        if script.is_empty() {
            tracing::warn!("Model returned an empty script");
            return Err(GeminiError::EmptyScript);
        }

        tracing::info!(chars = script.len(), "Script generation complete");
        Ok(script.to_string())
    }
}

impl SpeechSynthesizer for GeminiClient {
    type Error = GeminiError;

    #[tracing::instrument(skip_all, fields(script_chars = script.len()))]
    async fn synthesize(&self, script: &str) -> Result<SynthesizedAudio, Self::Error> {
        let speech_config = json!({
            "multiSpeakerVoiceConfig": {
                "speakerVoiceConfigs": [
                    {
                        "speaker": "Speaker 1",
                        "voiceConfig": {
                            "prebuiltVoiceConfig": { "voiceName": Self::VOICE_SPEAKER_ONE }
                        }
                    },
                    {
                        "speaker": "Speaker 2",
                        "voiceConfig": {
                            "prebuiltVoiceConfig": { "voiceName": Self::VOICE_SPEAKER_TWO }
                        }
                    },
                ]
            }
        });

        let audio = self
            .stream_audio(
                &self.tts_model,
                json!([{ "text": script }]),
                json!({
                    "temperature": 1,
                    "responseModalities": ["AUDIO"],
                    "speechConfig": speech_config,
                }),
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to synthesize audio"))?;

        if audio.data.is_empty() {
            tracing::error!("Synthesis stream ended without audio data");
            return Err(GeminiError::NoAudio);
        }

        tracing::info!(
            bytes = audio.data.len(),
            mime_type = audio.mime_type.as_deref().unwrap_or("unknown"),
            "Synthesis complete"
        );
        Ok(audio)
    }
}
