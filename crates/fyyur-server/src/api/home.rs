use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;

use fyyur_db::AppState;

use super::{page, Page};

#[derive(Debug, Serialize)]
pub struct Home {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<Page<Home>>) {
    page(
        &state,
        jar,
        Home {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}
