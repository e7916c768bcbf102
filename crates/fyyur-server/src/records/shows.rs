use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Set, TransactionTrait,
};

use fyyur_db::entities::{artist, show, venue};

use super::finish;
use crate::error::RecordError;
use crate::forms::{FormErrors, ShowForm, ShowRecord};

/// Validate and store a new show.
///
/// Venue and artist ids are checked inside the write transaction; an id
/// with no matching row is reported against its form field.
pub async fn create_show(
    db: &DatabaseConnection,
    form: &ShowForm,
) -> Result<show::Model, RecordError> {
    let record = form.validate().map_err(RecordError::Validation)?;
    let txn = db.begin().await?;
    let result = insert_show(&txn, record).await;
    finish(txn, result).await
}

async fn insert_show(
    txn: &DatabaseTransaction,
    record: ShowRecord,
) -> Result<show::Model, RecordError> {
    let mut errors = FormErrors::new();
    if venue::Entity::find_by_id(record.venue_id)
        .one(txn)
        .await?
        .is_none()
    {
        errors.add("venue_id", format!("Venue {} does not exist.", record.venue_id));
    }
    if artist::Entity::find_by_id(record.artist_id)
        .one(txn)
        .await?
        .is_none()
    {
        errors.add(
            "artist_id",
            format!("Artist {} does not exist.", record.artist_id),
        );
    }
    if !errors.is_empty() {
        return Err(RecordError::Validation(errors));
    }

    let model = show::ActiveModel {
        venue_id: Set(record.venue_id),
        artist_id: Set(record.artist_id),
        start_time: Set(record.start_time),
        ..Default::default()
    }
    .insert(txn)
    .await?;
    Ok(model)
}
