use axum::{
    extract::State,
    response::Redirect,
    Json,
};
use axum_extra::{extract::cookie::CookieJar, extract::Form};
use serde::Serialize;
use std::sync::Arc;

use fyyur_db::AppState;

use super::{page, redirect_with_flash, ApiError, EntityId, FormPage, Page};
use crate::datetime;
use crate::directory;
use crate::forms::{self, VenueForm};
use crate::records;
use crate::search::{self, EntityKind, SearchForm, SearchResults};
use crate::views::{AreaView, VenueView};

#[derive(Debug, Serialize)]
pub struct VenueAreas {
    pub areas: Vec<AreaView>,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub search_term: String,
    #[serde(flatten)]
    pub results: SearchResults,
}

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<VenueAreas>>), ApiError> {
    let areas = directory::venue_areas(&state.db, datetime::now())
        .await
        .map_err(ApiError::database)?;
    Ok(page(&state, jar, VenueAreas { areas }))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SearchForm>,
) -> Result<(CookieJar, Json<Page<SearchPage>>), ApiError> {
    let results = search::search(
        &state.db,
        EntityKind::Venue,
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

/// GET /venues/{venue_id}
pub async fn show_venue(
    State(state): State<Arc<AppState>>,
    EntityId(venue_id): EntityId,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<VenueView>>), ApiError> {
    let venue = directory::venue_detail(&state.db, venue_id, datetime::now())
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::NotFound("Venue not found".to_string()))?;
    Ok(page(&state, jar, venue))
}

/// GET /venues/create
pub async fn create_venue_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<Page<FormPage<VenueForm>>>) {
    page(
        &state,
        jar,
        FormPage {
            id: None,
            choices: Some(forms::choices()),
            form: VenueForm::default(),
        },
    )
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    match records::create_venue(&state.db, &form).await {
        Ok(venue) => {
            tracing::info!(venue_id = venue.id, name = %venue.name, "venue listed");
            Ok(redirect_with_flash(
                &state,
                jar,
                "/",
                format!("Venue {} was successfully listed!", venue.name),
            ))
        }
        Err(err) => Err(ApiError::from_record(
            err,
            "Venue",
            format!("Venue {} could not be listed.", form.name.trim()),
            &form,
        )),
    }
}

/// GET /venues/{venue_id}/edit
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    EntityId(venue_id): EntityId,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<FormPage<VenueForm>>>), ApiError> {
    let (venue, genres) = directory::venue_for_edit(&state.db, venue_id)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::NotFound("Venue not found".to_string()))?;
    Ok(page(
        &state,
        jar,
        FormPage {
            id: Some(venue.id),
            choices: Some(forms::choices()),
            form: VenueForm::from_model(&venue, genres),
        },
    ))
}

/// POST /venues/{venue_id}/edit
pub async fn edit_venue_submission(
    State(state): State<Arc<AppState>>,
    EntityId(venue_id): EntityId,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    match records::update_venue(&state.db, venue_id, &form).await {
        Ok(venue) => {
            tracing::info!(venue_id, name = %venue.name, "venue updated");
            Ok(redirect_with_flash(
                &state,
                jar,
                &format!("/venues/{venue_id}"),
                format!("Venue {} was successfully listed!", venue.name),
            ))
        }
        Err(err) => Err(ApiError::from_record(
            err,
            "Venue",
            format!("Venue {} could not be listed.", form.name.trim()),
            &form,
        )),
    }
}

/// POST /venues/{venue_id}
///
/// Deletes the venue and its shows. A missing venue is reported, not an error.
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    EntityId(venue_id): EntityId,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    match records::delete_venue(&state.db, venue_id).await {
        Ok(Some(venue)) => Ok(redirect_with_flash(
            &state,
            jar,
            "/venues",
            format!("successfully deleted venue {}!", venue.name),
        )),
        Ok(None) => Ok(redirect_with_flash(
            &state,
            jar,
            "/venues",
            "The requested venue doesn't exist.",
        )),
        Err(err) => Err(ApiError::from_record(
            err,
            "Venue",
            format!("An error occurred while deleting venue {venue_id}."),
            &(),
        )),
    }
}
