//! Fyyur: a directory of music venues, artists and the shows that
//! connect them.

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use fyyur_db::AppState;

pub mod api;
pub mod classify;
pub mod config;
pub mod datetime;
pub mod directory;
pub mod error;
pub mod flash;
pub mod forms;
pub mod records;
pub mod search;
pub mod views;

/// Build the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let venue_routes = Router::new()
        .route("/", get(api::venues::list_venues))
        .route("/search", post(api::venues::search_venues))
        .route(
            "/create",
            get(api::venues::create_venue_form).post(api::venues::create_venue_submission),
        )
        .route(
            "/{venue_id}",
            get(api::venues::show_venue).post(api::venues::delete_venue),
        )
        .route(
            "/{venue_id}/edit",
            get(api::venues::edit_venue_form).post(api::venues::edit_venue_submission),
        );

    let artist_routes = Router::new()
        .route("/", get(api::artists::list_artists))
        .route("/search", post(api::artists::search_artists))
        .route(
            "/create",
            get(api::artists::create_artist_form).post(api::artists::create_artist_submission),
        )
        .route("/{artist_id}", get(api::artists::show_artist))
        .route(
            "/{artist_id}/edit",
            get(api::artists::edit_artist_form).post(api::artists::edit_artist_submission),
        );

    let show_routes = Router::new()
        .route("/", get(api::shows::list_shows))
        .route(
            "/create",
            get(api::shows::create_show_form).post(api::shows::create_show_submission),
        );

    Router::new()
        .route("/", get(api::home::index))
        .nest("/venues", venue_routes)
        .nest("/artists", artist_routes)
        .nest("/shows", show_routes)
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
