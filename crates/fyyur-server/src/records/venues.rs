use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use fyyur_db::entities::{genre, show, venue, venue_genre};

use super::{finish, genres};
use crate::error::RecordError;
use crate::forms::{VenueForm, VenueRecord};

/// Validate and store a new venue together with its genre links.
pub async fn create_venue(
    db: &DatabaseConnection,
    form: &VenueForm,
) -> Result<venue::Model, RecordError> {
    let record = form.validate().map_err(RecordError::Validation)?;
    let txn = db.begin().await?;
    let result = insert_venue(&txn, record).await;
    finish(txn, result).await
}

/// Overwrite every field of venue `id` and replace its genre links.
pub async fn update_venue(
    db: &DatabaseConnection,
    id: i32,
    form: &VenueForm,
) -> Result<venue::Model, RecordError> {
    let record = form.validate().map_err(RecordError::Validation)?;
    let txn = db.begin().await?;
    let result = overwrite_venue(&txn, id, record).await;
    finish(txn, result).await
}

/// Delete venue `id` with its shows and genre links.
///
/// Returns the removed venue, or `None` when no venue has that id.
pub async fn delete_venue(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<venue::Model>, RecordError> {
    let txn = db.begin().await?;
    let result = remove_venue(&txn, id).await;
    finish(txn, result).await
}

async fn insert_venue(
    txn: &DatabaseTransaction,
    record: VenueRecord,
) -> Result<venue::Model, RecordError> {
    let genres = genres::resolve(txn, &record.genres).await?;

    let model = venue::ActiveModel {
        name: Set(record.name),
        city: Set(record.city),
        state: Set(record.state),
        address: Set(record.address),
        phone: Set(record.phone),
        image_link: Set(record.image_link),
        facebook_link: Set(record.facebook_link),
        website: Set(record.website),
        seeking_talent: Set(record.seeking_talent),
        seeking_description: Set(record.seeking_description),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    link_genres(txn, model.id, &genres).await?;
    Ok(model)
}

async fn overwrite_venue(
    txn: &DatabaseTransaction,
    id: i32,
    record: VenueRecord,
) -> Result<venue::Model, RecordError> {
    let existing = venue::Entity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or(RecordError::NotFound { entity: "Venue", id })?;
    let genres = genres::resolve(txn, &record.genres).await?;

    let mut active: venue::ActiveModel = existing.into();
    active.name = Set(record.name);
    active.city = Set(record.city);
    active.state = Set(record.state);
    active.address = Set(record.address);
    active.phone = Set(record.phone);
    active.image_link = Set(record.image_link);
    active.facebook_link = Set(record.facebook_link);
    active.website = Set(record.website);
    active.seeking_talent = Set(record.seeking_talent);
    active.seeking_description = Set(record.seeking_description);
    let model = active.update(txn).await?;

    venue_genre::Entity::delete_many()
        .filter(venue_genre::Column::VenueId.eq(id))
        .exec(txn)
        .await?;
    link_genres(txn, id, &genres).await?;
    Ok(model)
}

async fn remove_venue(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<Option<venue::Model>, RecordError> {
    let Some(existing) = venue::Entity::find_by_id(id).one(txn).await? else {
        return Ok(None);
    };

    let shows = show::Entity::delete_many()
        .filter(show::Column::VenueId.eq(id))
        .exec(txn)
        .await?;
    venue_genre::Entity::delete_many()
        .filter(venue_genre::Column::VenueId.eq(id))
        .exec(txn)
        .await?;
    venue::Entity::delete_by_id(id).exec(txn).await?;

    tracing::info!(
        venue_id = id,
        shows_removed = shows.rows_affected,
        "venue deleted"
    );
    Ok(Some(existing))
}

async fn link_genres(
    txn: &DatabaseTransaction,
    venue_id: i32,
    genres: &[genre::Model],
) -> Result<(), RecordError> {
    if genres.is_empty() {
        return Ok(());
    }
    venue_genre::Entity::insert_many(genres.iter().map(|g| venue_genre::ActiveModel {
        venue_id: Set(venue_id),
        genre_id: Set(g.id),
    }))
    .exec_without_returning(txn)
    .await?;
    Ok(())
}
