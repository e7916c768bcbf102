use axum::{
    extract::State,
    response::Redirect,
    Json,
};
use axum_extra::{extract::cookie::CookieJar, extract::Form};
use serde::Serialize;
use std::sync::Arc;

use fyyur_db::AppState;

use super::venues::SearchPage;
use super::{page, redirect_with_flash, ApiError, EntityId, FormPage, Page};
use crate::datetime;
use crate::directory;
use crate::forms::{self, ArtistForm};
use crate::records;
use crate::search::{self, EntityKind, SearchForm};
use crate::views::{ArtistSummary, ArtistView};

#[derive(Debug, Serialize)]
pub struct ArtistList {
    pub artists: Vec<ArtistSummary>,
}

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<ArtistList>>), ApiError> {
    let artists = directory::artist_list(&state.db)
        .await
        .map_err(ApiError::database)?;
    Ok(page(&state, jar, ArtistList { artists }))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SearchForm>,
) -> Result<(CookieJar, Json<Page<SearchPage>>), ApiError> {
    let results = search::search(
        &state.db,
        EntityKind::Artist,
        &form.search_term,
        datetime::now(),
    )
    .await
    .map_err(ApiError::database)?;
    Ok(page(
        &state,
        jar,
        SearchPage {
            search_term: form.search_term,
            results,
        },
    ))
}

/// GET /artists/{artist_id}
pub async fn show_artist(
    State(state): State<Arc<AppState>>,
    EntityId(artist_id): EntityId,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<ArtistView>>), ApiError> {
    let artist = directory::artist_detail(&state.db, artist_id, datetime::now())
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::NotFound("Artist not found".to_string()))?;
    Ok(page(&state, jar, artist))
}

/// GET /artists/create
pub async fn create_artist_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<Page<FormPage<ArtistForm>>>) {
    page(
        &state,
        jar,
        FormPage {
            id: None,
            choices: Some(forms::choices()),
            form: ArtistForm::default(),
        },
    )
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    match records::create_artist(&state.db, &form).await {
        Ok(artist) => {
            tracing::info!(artist_id = artist.id, name = %artist.name, "artist listed");
            Ok(redirect_with_flash(
                &state,
                jar,
                "/",
                format!("Artist {} was successfully listed!", artist.name),
            ))
        }
        Err(err) => Err(ApiError::from_record(
            err,
            "Artist",
            format!("Artist {} could not be listed.", form.name.trim()),
            &form,
        )),
    }
}

/// GET /artists/{artist_id}/edit
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    EntityId(artist_id): EntityId,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<FormPage<ArtistForm>>>), ApiError> {
    let (artist, genres) = directory::artist_for_edit(&state.db, artist_id)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::NotFound("Artist not found".to_string()))?;
    Ok(page(
        &state,
        jar,
        FormPage {
            id: Some(artist.id),
            choices: Some(forms::choices()),
            form: ArtistForm::from_model(&artist, genres),
        },
    ))
}

/// POST /artists/{artist_id}/edit
pub async fn edit_artist_submission(
    State(state): State<Arc<AppState>>,
    EntityId(artist_id): EntityId,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    match records::update_artist(&state.db, artist_id, &form).await {
        Ok(artist) => {
            tracing::info!(artist_id, name = %artist.name, "artist updated");
            Ok(redirect_with_flash(
                &state,
                jar,
                &format!("/artists/{artist_id}"),
                format!("Artist {} was successfully listed!", artist.name),
            ))
        }
        Err(err) => Err(ApiError::from_record(
            err,
            "Artist",
            format!("Artist {} could not be listed.", form.name.trim()),
            &form,
        )),
    }
}
