//! Read queries behind the listing and detail pages.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};

use fyyur_db::entities::{artist, genre, show, venue};

use crate::views::{self, AreaView, ArtistSummary, ArtistView, ShowView, VenueView};

/// All venues grouped by (city, state).
pub async fn venue_areas(
    db: &DatabaseConnection,
    now: NaiveDateTime,
) -> Result<Vec<AreaView>, DbErr> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .find_with_related(show::Entity)
        .all(db)
        .await?;
    Ok(views::group_by_area(venues, now))
}

pub async fn artist_list(db: &DatabaseConnection) -> Result<Vec<ArtistSummary>, DbErr> {
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?;
    Ok(artists.into_iter().map(ArtistSummary::from).collect())
}

pub async fn venue_detail(
    db: &DatabaseConnection,
    id: i32,
    now: NaiveDateTime,
) -> Result<Option<VenueView>, DbErr> {
    let Some(venue) = venue::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let genres = venue
        .find_related(genre::Entity)
        .order_by_asc(genre::Column::Name)
        .all(db)
        .await?;
    let rows = show::Entity::find()
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(artist::Entity)
        .all(db)
        .await?;

    let shows = rows
        .into_iter()
        .filter_map(|(show, artist)| match artist {
            Some(artist) => Some(ShowView::new(&show, &venue, &artist)),
            None => {
                tracing::warn!(show_id = show.id, "show references a missing artist");
                None
            }
        })
        .collect();
    Ok(Some(VenueView::new(venue, genres, shows, now)))
}

pub async fn artist_detail(
    db: &DatabaseConnection,
    id: i32,
    now: NaiveDateTime,
) -> Result<Option<ArtistView>, DbErr> {
    let Some(artist) = artist::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let genres = artist
        .find_related(genre::Entity)
        .order_by_asc(genre::Column::Name)
        .all(db)
        .await?;
    let rows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(venue::Entity)
        .all(db)
        .await?;

    let shows = rows
        .into_iter()
        .filter_map(|(show, venue)| match venue {
            Some(venue) => Some(ShowView::new(&show, &venue, &artist)),
            None => {
                tracing::warn!(show_id = show.id, "show references a missing venue");
                None
            }
        })
        .collect();
    Ok(Some(ArtistView::new(artist, genres, shows, now)))
}

/// Every show with its venue and artist, ordered by start time.
pub async fn show_list(db: &DatabaseConnection) -> Result<Vec<ShowView>, DbErr> {
    let rows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .find_also_related(venue::Entity)
        .all(db)
        .await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let artist_ids: Vec<i32> = rows.iter().map(|(show, _)| show.artist_id).collect();
    let artists: HashMap<i32, artist::Model> = artist::Entity::find()
        .filter(artist::Column::Id.is_in(artist_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(rows
        .into_iter()
        .filter_map(|(show, venue)| {
            let venue = venue?;
            let artist = artists.get(&show.artist_id)?;
            Some(ShowView::new(&show, &venue, artist))
        })
        .collect())
}

/// Venue row plus its genre names, for prefilling the edit form.
pub async fn venue_for_edit(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<(venue::Model, Vec<String>)>, DbErr> {
    let Some(venue) = venue::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let genres = venue
        .find_related(genre::Entity)
        .order_by_asc(genre::Column::Name)
        .all(db)
        .await?;
    Ok(Some((venue, genres.into_iter().map(|g| g.name).collect())))
}

pub async fn artist_for_edit(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<(artist::Model, Vec<String>)>, DbErr> {
    let Some(artist) = artist::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let genres = artist
        .find_related(genre::Entity)
        .order_by_asc(genre::Column::Name)
        .all(db)
        .await?;
    Ok(Some((artist, genres.into_iter().map(|g| g.name).collect())))
}
