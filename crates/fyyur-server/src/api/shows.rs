use axum::{extract::State, response::Redirect, Json};
use axum_extra::{extract::cookie::CookieJar, extract::Form};
use serde::Serialize;
use std::sync::Arc;

use fyyur_db::AppState;

use super::{page, redirect_with_flash, ApiError, FormPage, Page};
use crate::datetime;
use crate::directory;
use crate::forms::ShowForm;
use crate::records;
use crate::views::ShowView;

#[derive(Debug, Serialize)]
pub struct ShowList {
    pub shows: Vec<ShowView>,
}

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<ShowList>>), ApiError> {
    let shows = directory::show_list(&state.db)
        .await
        .map_err(ApiError::database)?;
    Ok(page(&state, jar, ShowList { shows }))
}

/// GET /shows/create
pub async fn create_show_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<Page<FormPage<ShowForm>>>) {
    page(
        &state,
        jar,
        FormPage {
            id: None,
            choices: None,
            form: ShowForm::with_default_start(datetime::now()),
        },
    )
}

/// POST /shows/create
pub async fn create_show_submission(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ShowForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    match records::create_show(&state.db, &form).await {
        Ok(show) => {
            tracing::info!(
                show_id = show.id,
                venue_id = show.venue_id,
                artist_id = show.artist_id,
                "show listed"
            );
            Ok(redirect_with_flash(&state, jar, "/", "Show successfully listed!"))
        }
        Err(err) => Err(ApiError::from_record(
            err,
            "Show",
            "Show could not be listed.".to_string(),
            &form,
        )),
    }
}
