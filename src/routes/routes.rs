//! Defines routes for the video catalogue.
//!
//! ## Structure
//! - **Probes** (always at the root)
//!   - `GET    /healthz` — liveness
//!   - `GET    /readyz` — readiness
//!
//! - **Video endpoints** (under the configured base path)
//!   - `GET    /videos` — list videos
//!   - `POST   /videos` — create video
//!   - `GET    /videos/{id}` — fetch one video
//!   - `PUT    /videos/{id}` — update video
//!   - `DELETE /videos/{id}` — delete video
//!
//! - **Testing endpoints** (only when enabled)
//!   - `DELETE /testing/all-data` — remove every video

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        video_handlers::{
            create_video, delete_video, get_video, list_videos, reset_all, update_video,
        },
    },
    services::video_store::VideoStore,
};
use axum::{
    Router,
    routing::{delete, get},
};

/// Options that shape the router.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    /// Mount point for the API, either empty or `/segment[/segment]`.
    pub base_path: String,
    /// Expose `DELETE /testing/all-data`.
    pub enable_testing_routes: bool,
}

/// Build and return the router for the video API.
///
/// The router carries `VideoStore` as shared state; the caller supplies it
/// with `.with_state(...)`.
pub fn routes(options: &RouteOptions) -> Router<VideoStore> {
    let mut api = Router::new()
        .route("/videos", get(list_videos).post(create_video))
        .route(
            "/videos/{id}",
            get(get_video).put(update_video).delete(delete_video),
        );

    if options.enable_testing_routes {
        api = api.route("/testing/all-data", delete(reset_all));
    }

    let probes = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz));

    if options.base_path.is_empty() {
        probes.merge(api)
    } else {
        probes.nest(&options.base_path, api)
    }
}
