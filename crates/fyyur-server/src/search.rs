//! Case-insensitive substring search over venue and artist names.

use chrono::NaiveDateTime;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use fyyur_db::entities::{artist, show, venue};

use crate::views::EntitySummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Venue,
    Artist,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub results: Vec<EntitySummary>,
}

/// LIKE pattern matching `term` anywhere in a name.
///
/// `%`, `_` and `\` in the term match literally. An empty term matches
/// every name. Case folding happens in SQL, on both sides of the LIKE.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `LOWER(column) LIKE LOWER(pattern) ESCAPE '\'`.
///
/// Both sides fold through the same backend `LOWER`.
fn name_matches<E, C>(entity: E, column: C, pattern: &str) -> SimpleExpr
where
    E: EntityTrait,
    C: ColumnTrait,
{
    Expr::cust_with_exprs(
        "LOWER($1) LIKE LOWER($2) ESCAPE '\\'",
        [Expr::col((entity, column)).into(), Expr::val(pattern).into()],
    )
}

/// Find venues or artists whose name contains `term`, ignoring case.
///
/// Results are ordered by id and carry their upcoming-show counts.
pub async fn search(
    db: &DatabaseConnection,
    kind: EntityKind,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults, DbErr> {
    let pattern = like_pattern(term);
    let results: Vec<EntitySummary> = match kind {
        EntityKind::Venue => venue::Entity::find()
            .filter(name_matches(venue::Entity, venue::Column::Name, &pattern))
            .order_by_asc(venue::Column::Id)
            .find_with_related(show::Entity)
            .all(db)
            .await?
            .into_iter()
            .map(|(v, shows)| EntitySummary::new(v.id, v.name, &shows, now))
            .collect(),
        EntityKind::Artist => artist::Entity::find()
            .filter(name_matches(artist::Entity, artist::Column::Name, &pattern))
            .order_by_asc(artist::Column::Id)
            .find_with_related(show::Entity)
            .all(db)
            .await?
            .into_iter()
            .map(|(a, shows)| EntitySummary::new(a.id, a.name, &shows, now))
            .collect(),
    };

    tracing::debug!(?kind, term, count = results.len(), "search");
    Ok(SearchResults {
        count: results.len(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_trims_and_wraps() {
        assert_eq!(like_pattern("Hop"), "%Hop%");
        assert_eq!(like_pattern("  Music  "), "%Music%");
    }

    #[test]
    fn test_like_pattern_empty_term_matches_all() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("   "), "%%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn test_name_matches_folds_both_sides() {
        use sea_orm::{DbBackend, QueryTrait};

        let sql = venue::Entity::find()
            .filter(name_matches(venue::Entity, venue::Column::Name, "%Hop%"))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(
            sql.contains(r#"LOWER("venues"."name") LIKE LOWER('%Hop%') ESCAPE '\'"#),
            "{sql}"
        );
    }
}
