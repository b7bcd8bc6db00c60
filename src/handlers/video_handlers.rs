//! HTTP handlers for the video catalogue.
//! Each handler parses the request, delegates to `VideoStore` and maps the
//! outcome onto a status code.

use crate::{
    errors::AppError,
    models::{input::VideoInput, video::Video},
    services::video_store::VideoStore,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

/// Path ids that are not unsigned integers cannot name a video.
fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.parse::<u64>()
        .map_err(|_| AppError::not_found(format!("video `{raw}` not found")))
}

/// GET `/videos` — every video in insertion order.
pub async fn list_videos(State(store): State<VideoStore>) -> Result<Json<Vec<Video>>, AppError> {
    Ok(Json(store.list()?))
}

/// GET `/videos/{id}`
pub async fn get_video(
    State(store): State<VideoStore>,
    Path(id): Path<String>,
) -> Result<Json<Video>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(store.get(id)?))
}

/// POST `/videos` — 201 with the created record, 400 with every failed rule.
pub async fn create_video(
    State(store): State<VideoStore>,
    payload: Result<Json<VideoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Video>), AppError> {
    let Json(input) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let video = store.create(&input)?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// PUT `/videos/{id}` — 204 on success.
///
/// The id is resolved before the body is looked at, so an unknown id is a
/// 404 whatever the payload.
pub async fn update_video(
    State(store): State<VideoStore>,
    Path(id): Path<String>,
    payload: Result<Json<VideoInput>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let Json(input) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            store.get(id)?;
            return Err(AppError::bad_request(rejection.body_text()));
        }
    };
    store.update(id, &input)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE `/videos/{id}` — 204 on success.
pub async fn delete_video(
    State(store): State<VideoStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE `/testing/all-data` — wipe the catalogue. Only routed when testing
/// routes are enabled.
pub async fn reset_all(State(store): State<VideoStore>) -> Result<StatusCode, AppError> {
    store.reset()?;
    Ok(StatusCode::NO_CONTENT)
}
