use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};

use fyyur_db::entities::genre;

/// Resolve genre names to rows, creating any name the table does not hold yet.
///
/// Output order follows `names`.
pub(crate) async fn resolve<C: ConnectionTrait>(
    conn: &C,
    names: &[String],
) -> Result<Vec<genre::Model>, DbErr> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let existing = genre::Entity::find()
        .filter(genre::Column::Name.is_in(names.iter().cloned()))
        .all(conn)
        .await?;

    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        match existing.iter().find(|g| &g.name == name) {
            Some(found) => resolved.push(found.clone()),
            None => {
                tracing::info!(genre = %name, "creating missing genre");
                let created = genre::ActiveModel {
                    name: Set(name.clone()),
                    ..Default::default()
                }
                .insert(conn)
                .await?;
                resolved.push(created);
            }
        }
    }
    Ok(resolved)
}
