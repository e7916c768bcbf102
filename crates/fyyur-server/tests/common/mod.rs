// Shared test utilities for integration tests
#![allow(dead_code)]

use fyyur_db::AppState;
use fyyur_migration::Migrator;
use fyyur_server::forms::{ArtistForm, ShowForm, VenueForm};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

pub const TEST_SECRET_KEY: &str = "test-secret-key-for-testing-only";

/// A migrated in-memory database. One pooled connection keeps every query
/// on the same in-memory store.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn test_app_state(db: DatabaseConnection) -> Arc<AppState> {
    Arc::new(AppState {
        db,
        secret_key: TEST_SECRET_KEY.to_string(),
    })
}

pub fn musical_hop() -> VenueForm {
    VenueForm {
        name: "The Musical Hop".into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        address: "1015 Folsom Street".into(),
        phone: "123-123-1234".into(),
        genres: vec!["Jazz".into(), "Folk".into()],
        facebook_link: "https://www.facebook.com/TheMusicalHop".into(),
        website: "https://www.themusicalhop.com".into(),
        image_link: String::new(),
        seeking_talent: "Yes".into(),
        seeking_description: "We are on the lookout for a local artist.".into(),
    }
}

pub fn venue_named(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: name.into(),
        city: city.into(),
        state: state.into(),
        ..musical_hop()
    }
}

pub fn guns_n_petals() -> ArtistForm {
    ArtistForm {
        name: "Guns N Petals".into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        phone: "326-123-5000".into(),
        genres: vec!["Rock n Roll".into()],
        facebook_link: "https://www.facebook.com/GunsNPetals".into(),
        website: "https://www.gunsnpetalsband.com".into(),
        image_link: String::new(),
        seeking_venue: "No".into(),
        seeking_description: String::new(),
    }
}

pub fn show_form(artist_id: i32, venue_id: i32, start_time: &str) -> ShowForm {
    ShowForm {
        artist_id: artist_id.to_string(),
        venue_id: venue_id.to_string(),
        start_time: start_time.into(),
    }
}
