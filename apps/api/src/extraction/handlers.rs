use axum::extract::{Multipart, State};
use axum::Json;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::loader::{LoadError, MediaType, RawDocument};
use crate::extraction::models::ExtractionResult;
use crate::state::AppState;

/// POST /api/v1/documents/parse
///
/// Multipart upload with a single `file` part. Validation (media type, size)
/// happens before any decode work; the pipeline itself runs on a blocking
/// thread under a wall-clock budget so a pathological document cannot pin
/// the runtime.
pub async fn handle_parse_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        let media_type = MediaType::from_upload(&filename, content_type.as_deref())
            .ok_or_else(|| {
                LoadError::UnsupportedMediaType(format!(
                    "'{}' ({})",
                    filename,
                    content_type.as_deref().unwrap_or("unknown content type")
                ))
            })
            .map_err(AppError::from)?;

        info!(
            %filename,
            ?media_type,
            bytes = data.len(),
            "parsing uploaded document"
        );

        let raw = RawDocument::new(data, media_type, state.config.max_upload_bytes)?;
        let lexicon = state.lexicon.clone();
        let budget = Duration::from_secs(state.config.parse_timeout_secs);

        let result = tokio::time::timeout(
            budget,
            tokio::task::spawn_blocking(move || crate::extraction::extract(&raw, &lexicon)),
        )
        .await
        .map_err(|_| {
            warn!(%filename, "document parse exceeded {}s budget", budget.as_secs());
            AppError::Timeout
        })?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("parse task failed: {e}")))??;

        info!(
            %filename,
            overall = result.confidence_scores.get("overall").copied().unwrap_or(0.0),
            "document parsed"
        );
        return Ok(Json(result));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}
