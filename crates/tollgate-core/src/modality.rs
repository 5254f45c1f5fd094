use serde::Serialize;

/// One of the four metered request kinds
///
/// Each modality has its own billing unit family and upstream path set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Audio transcription, billed per minute or per second
    Transcription,
    /// Image generation, billed per image
    ImageGeneration,
    /// Text-to-speech, billed per character or per 1000 characters
    Speech,
    /// Video generation, billed per second
    VideoGeneration,
}

impl Modality {
    /// Stable wire name used in logs, usage-log entries, and ledger metadata
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transcription => "transcription",
            Self::ImageGeneration => "image_generation",
            Self::Speech => "speech",
            Self::VideoGeneration => "video_generation",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
