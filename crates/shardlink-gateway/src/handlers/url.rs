use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use shardlink_core::{ShortCode, ShortenParams};
use std::time::Duration;
use tracing::{debug, info};

pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>)> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let url = request
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("url is required".to_string()))?;

    let mut params = ShortenParams::new(url);
    if let Some(ttl) = request.ttl {
        params = params.with_ttl(Duration::from_secs(ttl));
    }

    let code = state.shortlinker().shorten(params).await?;
    info!(code = %code, "created shortlink");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: code.to_url(state.base_url()),
        }),
    ))
}

pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    // A malformed id can never have been issued.
    let Ok(code) = ShortCode::new(id) else {
        return Err(AppError::NotFound);
    };

    match state.shortlinker().resolve(&code).await? {
        Some(url) => Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response()),
        None => {
            debug!(code = %code, "shortlink not found");
            Err(AppError::NotFound)
        }
    }
}
