use serde::Deserialize;

use crate::error::{GatewayError, Result};

/// A modality request reduced to what the pipeline needs: the model
/// slug, the raw billable quantity, and the body to forward upstream
#[derive(Debug, Clone)]
pub struct BillableRequest {
    /// Requested model slug
    pub model: String,
    /// Billable quantity in the modality's natural measure
    pub quantity: f64,
    /// Payload forwarded to the upstream provider
    pub upstream_body: serde_json::Value,
}

fn require_model(model: Option<String>) -> Result<String> {
    model
        .filter(|m| !m.trim().is_empty())
        .ok_or(GatewayError::MissingModel)
}

/// Audio transcription request, billed by audio duration
#[derive(Debug, Deserialize)]
pub struct TranscriptionRequest {
    pub model: Option<String>,
    pub duration_seconds: Option<f64>,
    /// Location of the audio to transcribe, forwarded upstream
    pub audio_url: Option<String>,
    /// Optional language hint (ISO 639-1), forwarded upstream
    pub language: Option<String>,
}

impl TranscriptionRequest {
    pub fn validate(self) -> Result<BillableRequest> {
        let model = require_model(self.model)?;
        let duration = validate_duration(self.duration_seconds)?;

        let mut body = serde_json::json!({
            "model": model,
            "duration_seconds": duration,
        });
        let fields = body.as_object_mut().expect("body is an object");
        if let Some(audio_url) = self.audio_url {
            fields.insert("audio_url".to_owned(), serde_json::Value::String(audio_url));
        }
        if let Some(language) = self.language {
            fields.insert("language".to_owned(), serde_json::Value::String(language));
        }

        Ok(BillableRequest {
            model,
            quantity: duration,
            upstream_body: body,
        })
    }
}

/// Image generation request, billed per image
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub model: Option<String>,
    pub prompt: Option<String>,
    /// Number of images to generate, 1 to 10
    pub num_images: Option<i64>,
    /// Size of generated images (e.g. "1024x1024"), forwarded upstream
    pub size: Option<String>,
}

impl ImageRequest {
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(self) -> Result<BillableRequest> {
        let model = require_model(self.model)?;

        let prompt = self
            .prompt
            .filter(|p| !p.trim().is_empty())
            .ok_or(GatewayError::MissingPrompt)?;

        let count = self.num_images.unwrap_or(1);
        if !(1..=10).contains(&count) {
            return Err(GatewayError::InvalidImageCount(count));
        }

        let mut body = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "n": count,
        });
        if let Some(size) = self.size {
            body.as_object_mut()
                .expect("body is an object")
                .insert("size".to_owned(), serde_json::Value::String(size));
        }

        Ok(BillableRequest {
            model,
            quantity: count as f64,
            upstream_body: body,
        })
    }
}

/// Text-to-speech request, billed by character count
///
/// The billed length is the text's character length when text is
/// present, else the explicit count.
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    pub model: Option<String>,
    pub text: Option<String>,
    /// Explicit character count, used when no text is supplied
    pub characters: Option<i64>,
    /// Voice identifier, forwarded upstream
    pub voice: Option<String>,
}

impl SpeechRequest {
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(self) -> Result<BillableRequest> {
        let model = require_model(self.model)?;

        let text = self.text.filter(|t| !t.is_empty());

        let length = match (&text, self.characters) {
            (Some(text), _) => text.chars().count() as f64,
            (None, Some(count)) if count > 0 => count as f64,
            (None, Some(count)) => return Err(GatewayError::InvalidCharacters(count)),
            (None, None) => return Err(GatewayError::MissingText),
        };

        let mut body = serde_json::json!({
            "model": model,
        });
        let fields = body.as_object_mut().expect("body is an object");
        if let Some(text) = text {
            fields.insert("input".to_owned(), serde_json::Value::String(text));
        }
        if let Some(voice) = self.voice {
            fields.insert("voice".to_owned(), serde_json::Value::String(voice));
        }

        Ok(BillableRequest {
            model,
            quantity: length,
            upstream_body: body,
        })
    }
}

/// Video generation request, billed by requested duration
#[derive(Debug, Deserialize)]
pub struct VideoRequest {
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub duration_seconds: Option<f64>,
}

impl VideoRequest {
    pub fn validate(self) -> Result<BillableRequest> {
        let model = require_model(self.model)?;

        let prompt = self
            .prompt
            .filter(|p| !p.trim().is_empty())
            .ok_or(GatewayError::MissingPrompt)?;

        let duration = validate_duration(self.duration_seconds)?;

        Ok(BillableRequest {
            model: model.clone(),
            quantity: duration,
            upstream_body: serde_json::json!({
                "model": model,
                "prompt": prompt,
                "duration_seconds": duration,
            }),
        })
    }
}

fn validate_duration(duration: Option<f64>) -> Result<f64> {
    let duration = duration.ok_or_else(|| GatewayError::InvalidDuration("missing".to_owned()))?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(GatewayError::InvalidDuration(duration.to_string()));
    }

    Ok(duration)
}
