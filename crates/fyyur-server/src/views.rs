//! Response payloads for the read pages.

use chrono::NaiveDateTime;
use serde::Serialize;

use fyyur_db::entities::{artist, genre, show, venue};

use crate::classify::{classify_shows, count_shows, ClassifiedShows, Scheduled};
use crate::datetime::{self, DisplayFormat};

/// A show joined with its venue and artist, as listed on detail pages.
#[derive(Debug, Clone, Serialize)]
pub struct ShowView {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(serialize_with = "datetime::serialize_start_time")]
    pub start_time: NaiveDateTime,
    pub start_time_full: String,
    pub start_time_medium: String,
}

impl ShowView {
    pub fn new(show: &show::Model, venue: &venue::Model, artist: &artist::Model) -> Self {
        Self {
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            venue_image_link: venue.image_link.clone(),
            artist_id: artist.id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: show.start_time,
            start_time_full: datetime::display(show.start_time, DisplayFormat::Full),
            start_time_medium: datetime::display(show.start_time, DisplayFormat::Medium),
        }
    }
}

impl Scheduled for ShowView {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueView {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    #[serde(flatten)]
    pub shows: ClassifiedShows<ShowView>,
}

impl VenueView {
    pub fn new(
        venue: venue::Model,
        genres: Vec<genre::Model>,
        shows: Vec<ShowView>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            genres: genre_names(genres),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            shows: classify_shows(shows, now),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistView {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    #[serde(flatten)]
    pub shows: ClassifiedShows<ShowView>,
}

impl ArtistView {
    pub fn new(
        artist: artist::Model,
        genres: Vec<genre::Model>,
        shows: Vec<ShowView>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            genres: genre_names(genres),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            shows: classify_shows(shows, now),
        }
    }
}

/// A venue or artist as it appears in listings and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

impl EntitySummary {
    pub fn new(id: i32, name: String, shows: &[show::Model], now: NaiveDateTime) -> Self {
        Self {
            id,
            name,
            num_upcoming_shows: count_shows(shows, now).upcoming,
        }
    }
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaView {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// Group venues by (city, state), in the order each pair is first seen.
pub fn group_by_area(
    venues: Vec<(venue::Model, Vec<show::Model>)>,
    now: NaiveDateTime,
) -> Vec<AreaView> {
    let mut areas: Vec<AreaView> = Vec::new();
    for (venue, shows) in venues {
        let summary = EntitySummary::new(venue.id, venue.name, &shows, now);
        match areas
            .iter_mut()
            .find(|a| a.city == venue.city && a.state == venue.state)
        {
            Some(area) => area.venues.push(summary),
            None => areas.push(AreaView {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }
    areas
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

impl From<artist::Model> for ArtistSummary {
    fn from(artist: artist::Model) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

fn genre_names(genres: Vec<genre::Model>) -> Vec<String> {
    genres.into_iter().map(|g| g.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, 15)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn venue(id: i32, name: &str, city: &str, state: &str) -> venue::Model {
        venue::Model {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "1231231234".to_string(),
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn artist(id: i32, name: &str) -> artist::Model {
        artist::Model {
            id,
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "3261235000".to_string(),
            image_link: Some("https://img.example.com/a.jpg".to_string()),
            facebook_link: None,
            website: None,
            seeking_venue: true,
            seeking_description: None,
        }
    }

    fn show(id: i32, venue_id: i32, start_time: NaiveDateTime) -> show::Model {
        show::Model {
            id,
            venue_id,
            artist_id: 1,
            start_time,
        }
    }

    #[test]
    fn test_group_by_area_keeps_first_seen_order() {
        let now = now();
        let venues = vec![
            (venue(1, "The Musical Hop", "San Francisco", "CA"), vec![]),
            (
                venue(2, "The Dueling Pianos Bar", "New York", "NY"),
                vec![show(1, 2, now + Duration::days(3))],
            ),
            (
                venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
                vec![
                    show(2, 3, now - Duration::days(3)),
                    show(3, 3, now + Duration::days(1)),
                ],
            ),
        ];

        let areas = group_by_area(venues, now);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[0].venues[0].name, "The Musical Hop");
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 1);
        assert_eq!(areas[1].state, "NY");
        assert_eq!(areas[1].venues[0].num_upcoming_shows, 1);
    }

    #[test]
    fn test_same_city_different_state_is_separate_area() {
        let venues = vec![
            (venue(1, "A", "Portland", "OR"), vec![]),
            (venue(2, "B", "Portland", "ME"), vec![]),
        ];
        assert_eq!(group_by_area(venues, now()).len(), 2);
    }

    #[test]
    fn test_show_view_display_strings() {
        let start = NaiveDate::from_ymd_opt(2035, 5, 21)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap();
        let view = ShowView::new(
            &show(1, 1, start),
            &venue(1, "The Musical Hop", "San Francisco", "CA"),
            &artist(1, "Guns N Petals"),
        );
        assert_eq!(view.start_time_full, "Monday May, 21, 2035 at 9:30PM");
        assert_eq!(view.start_time_medium, "Mon 05, 21, 2035 9:30PM");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["start_time"], "2035-05-21 21:30:00");
        assert_eq!(json["artist_name"], "Guns N Petals");
        assert_eq!(json["venue_image_link"], serde_json::Value::Null);
    }

    #[test]
    fn test_venue_view_flattens_show_partitions() {
        let now = now();
        let hop = venue(1, "The Musical Hop", "San Francisco", "CA");
        let petals = artist(1, "Guns N Petals");
        let shows = vec![
            ShowView::new(&show(1, 1, now - Duration::days(1)), &hop, &petals),
            ShowView::new(&show(2, 1, now + Duration::days(1)), &hop, &petals),
            ShowView::new(&show(3, 1, now + Duration::days(2)), &hop, &petals),
        ];
        let genres = vec![
            genre::Model {
                id: 1,
                name: "Jazz".into(),
            },
            genre::Model {
                id: 2,
                name: "Folk".into(),
            },
        ];

        let view = VenueView::new(hop, genres, shows, now);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["genres"], serde_json::json!(["Jazz", "Folk"]));
        assert_eq!(json["past_shows_count"], 1);
        assert_eq!(json["upcoming_shows_count"], 2);
        assert_eq!(json["upcoming_shows"].as_array().unwrap().len(), 2);
        assert!(json.get("shows").is_none());
    }
}
