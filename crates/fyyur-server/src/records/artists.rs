use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use fyyur_db::entities::{artist, artist_genre, genre};

use super::{finish, genres};
use crate::error::RecordError;
use crate::forms::{ArtistForm, ArtistRecord};

/// Validate and store a new artist together with its genre links.
pub async fn create_artist(
    db: &DatabaseConnection,
    form: &ArtistForm,
) -> Result<artist::Model, RecordError> {
    let record = form.validate().map_err(RecordError::Validation)?;
    let txn = db.begin().await?;
    let result = insert_artist(&txn, record).await;
    finish(txn, result).await
}

/// Overwrite every field of artist `id` and replace its genre links.
pub async fn update_artist(
    db: &DatabaseConnection,
    id: i32,
    form: &ArtistForm,
) -> Result<artist::Model, RecordError> {
    let record = form.validate().map_err(RecordError::Validation)?;
    let txn = db.begin().await?;
    let result = overwrite_artist(&txn, id, record).await;
    finish(txn, result).await
}

async fn insert_artist(
    txn: &DatabaseTransaction,
    record: ArtistRecord,
) -> Result<artist::Model, RecordError> {
    let genres = genres::resolve(txn, &record.genres).await?;

    let model = artist::ActiveModel {
        name: Set(record.name),
        city: Set(record.city),
        state: Set(record.state),
        phone: Set(record.phone),
        image_link: Set(record.image_link),
        facebook_link: Set(record.facebook_link),
        website: Set(record.website),
        seeking_venue: Set(record.seeking_venue),
        seeking_description: Set(record.seeking_description),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    link_genres(txn, model.id, &genres).await?;
    Ok(model)
}

async fn overwrite_artist(
    txn: &DatabaseTransaction,
    id: i32,
    record: ArtistRecord,
) -> Result<artist::Model, RecordError> {
    let existing = artist::Entity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or(RecordError::NotFound { entity: "Artist", id })?;
    let genres = genres::resolve(txn, &record.genres).await?;

    let mut active: artist::ActiveModel = existing.into();
    active.name = Set(record.name);
    active.city = Set(record.city);
    active.state = Set(record.state);
    active.phone = Set(record.phone);
    active.image_link = Set(record.image_link);
    active.facebook_link = Set(record.facebook_link);
    active.website = Set(record.website);
    active.seeking_venue = Set(record.seeking_venue);
    active.seeking_description = Set(record.seeking_description);
    let model = active.update(txn).await?;

    artist_genre::Entity::delete_many()
        .filter(artist_genre::Column::ArtistId.eq(id))
        .exec(txn)
        .await?;
    link_genres(txn, id, &genres).await?;
    Ok(model)
}

async fn link_genres(
    txn: &DatabaseTransaction,
    artist_id: i32,
    genres: &[genre::Model],
) -> Result<(), RecordError> {
    if genres.is_empty() {
        return Ok(());
    }
    artist_genre::Entity::insert_many(genres.iter().map(|g| artist_genre::ActiveModel {
        artist_id: Set(artist_id),
        genre_id: Set(g.id),
    }))
    .exec_without_returning(txn)
    .await?;
    Ok(())
}
