use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use http::HeaderMap;
use tollgate_core::Modality;

use crate::error::{GatewayError, Result};
use crate::pipeline::GatewayState;
use crate::requests::{ImageRequest, SpeechRequest, TranscriptionRequest, VideoRequest};

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(http::header::AUTHORIZATION).and_then(|v| v.to_str().ok())
}

fn parse_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(request)| request)
        .map_err(|e| GatewayError::InvalidBody(e.body_text()))
}

/// Handle audio transcription requests
pub async fn transcribe(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    body: std::result::Result<Json<TranscriptionRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let identity = state.authenticate(authorization(&headers)).await?;
    let request = parse_body(body)?.validate()?;

    let response = state.execute(Modality::Transcription, &identity, request).await?;

    Ok(Json(response))
}

/// Handle image generation requests
pub async fn generate_image(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    body: std::result::Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let identity = state.authenticate(authorization(&headers)).await?;
    let request = parse_body(body)?.validate()?;

    let response = state.execute(Modality::ImageGeneration, &identity, request).await?;

    Ok(Json(response))
}

/// Handle text-to-speech requests
pub async fn synthesize_speech(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    body: std::result::Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let identity = state.authenticate(authorization(&headers)).await?;
    let request = parse_body(body)?.validate()?;

    let response = state.execute(Modality::Speech, &identity, request).await?;

    Ok(Json(response))
}

/// Handle video generation requests
pub async fn generate_video(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    body: std::result::Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let identity = state.authenticate(authorization(&headers)).await?;
    let request = parse_body(body)?.validate()?;

    let response = state.execute(Modality::VideoGeneration, &identity, request).await?;

    Ok(Json(response))
}
