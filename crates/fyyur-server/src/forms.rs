//! Submitted venue/artist/show forms and their validation rules.
//!
//! Validation collects every failure instead of stopping at the first one.
//! A valid form turns into a cleaned record: free text trimmed, phone reduced
//! to digits, Yes/No mapped to a boolean, blank optional fields dropped.

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::datetime;
use fyyur_db::entities::{artist, venue};

pub const STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const GENRES: [&str; 20] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Swing",
    "Other",
];

pub const SEEKING_CHOICES: [&str; 2] = ["Yes", "No"];

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";
pub const PHONE_FORMAT: &str = "Error, phone number must be in format xxx-xxx-xxxx";
pub const INVALID_DATETIME: &str = "Not a valid datetime value.";
pub const INVALID_INTEGER: &str = "Not a valid integer value.";
const FACEBOOK_INVALID: &str = "Facebook link is invalid!";
const WEBSITE_INVALID: &str = "Website URL is invalid!";
const IMAGE_INVALID: &str = "Image link is invalid!";

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{3})-[0-9]{3}-[0-9]{4}$").expect("phone pattern compiles")
});

/// Per-field validation messages, in submission order per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// The first message of every invalid field.
    pub fn first_messages(&self) -> Vec<&str> {
        self.0
            .values()
            .filter_map(|messages| messages.first().map(String::as_str))
            .collect()
    }

    fn finish<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Choices offered by the venue and artist forms.
#[derive(Debug, Serialize)]
pub struct Choices {
    pub states: &'static [&'static str],
    pub genres: &'static [&'static str],
    pub seeking: &'static [&'static str],
}

pub fn choices() -> Choices {
    Choices {
        states: &STATES,
        genres: &GENRES,
        seeking: &SEEKING_CHOICES,
    }
}

/// Strip every non-digit character.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Re-dash a stored ten-digit phone so it passes validation when resubmitted.
pub fn format_phone(digits: &str) -> String {
    if digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        digits.to_string()
    }
}

// ─── Field rules ────────────────────────────────────────────────────

fn required(errors: &mut FormErrors, field: &str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, REQUIRED);
    }
    trimmed.to_string()
}

fn state(errors: &mut FormErrors, value: &str) -> String {
    let value = required(errors, "state", value);
    if !value.is_empty() && !STATES.contains(&value.as_str()) {
        errors.add("state", INVALID_CHOICE);
    }
    value
}

fn phone(errors: &mut FormErrors, value: &str) -> String {
    let value = required(errors, "phone", value);
    if !value.is_empty() && !PHONE_PATTERN.is_match(&value) {
        errors.add("phone", PHONE_FORMAT);
    }
    normalize_phone(&value)
}

fn genres(errors: &mut FormErrors, values: &[String]) -> Vec<String> {
    let mut selected: Vec<String> = Vec::with_capacity(values.len());
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if !GENRES.contains(&value) {
            errors.add("genres", format!("'{value}' is not a valid choice for this field."));
        } else if !selected.iter().any(|s| s == value) {
            selected.push(value.to_string());
        }
    }
    if values.iter().all(|v| v.trim().is_empty()) {
        errors.add("genres", REQUIRED);
    }
    selected
}

fn optional_url(errors: &mut FormErrors, field: &str, value: &str, message: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match url::Url::parse(trimmed) {
        Ok(parsed) if parsed.has_host() => Some(trimmed.to_string()),
        _ => {
            errors.add(field, message);
            None
        }
    }
}

fn seeking(errors: &mut FormErrors, field: &str, value: &str) -> bool {
    let value = required(errors, field, value);
    if !value.is_empty() && !SEEKING_CHOICES.contains(&value.as_str()) {
        errors.add(field, INVALID_CHOICE);
    }
    value == "Yes"
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn yes_no(flag: bool) -> String {
    let choice = if flag { "Yes" } else { "No" };
    choice.to_string()
}

// ─── Venue ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website: String,
    pub image_link: String,
    pub seeking_talent: String,
    pub seeking_description: String,
}

/// A validated venue submission, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueRecord {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn validate(&self) -> Result<VenueRecord, FormErrors> {
        let mut errors = FormErrors::new();
        let record = VenueRecord {
            name: required(&mut errors, "name", &self.name),
            city: required(&mut errors, "city", &self.city),
            state: state(&mut errors, &self.state),
            address: required(&mut errors, "address", &self.address),
            phone: phone(&mut errors, &self.phone),
            genres: genres(&mut errors, &self.genres),
            image_link: optional_url(&mut errors, "image_link", &self.image_link, IMAGE_INVALID),
            facebook_link: optional_url(
                &mut errors,
                "facebook_link",
                &self.facebook_link,
                FACEBOOK_INVALID,
            ),
            website: optional_url(&mut errors, "website", &self.website, WEBSITE_INVALID),
            seeking_talent: seeking(&mut errors, "seeking_talent", &self.seeking_talent),
            seeking_description: optional_text(&self.seeking_description),
        };
        errors.finish(record)
    }

    /// Prefill an edit form from a stored venue.
    pub fn from_model(model: &venue::Model, genres: Vec<String>) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            address: model.address.clone(),
            phone: format_phone(&model.phone),
            genres,
            facebook_link: model.facebook_link.clone().unwrap_or_default(),
            website: model.website.clone().unwrap_or_default(),
            image_link: model.image_link.clone().unwrap_or_default(),
            seeking_talent: yes_no(model.seeking_talent),
            seeking_description: model.seeking_description.clone().unwrap_or_default(),
        }
    }
}

// ─── Artist ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website: String,
    pub image_link: String,
    pub seeking_venue: String,
    pub seeking_description: String,
}

/// A validated artist submission, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRecord {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn validate(&self) -> Result<ArtistRecord, FormErrors> {
        let mut errors = FormErrors::new();
        let record = ArtistRecord {
            name: required(&mut errors, "name", &self.name),
            city: required(&mut errors, "city", &self.city),
            state: state(&mut errors, &self.state),
            phone: phone(&mut errors, &self.phone),
            genres: genres(&mut errors, &self.genres),
            image_link: optional_url(&mut errors, "image_link", &self.image_link, IMAGE_INVALID),
            facebook_link: optional_url(
                &mut errors,
                "facebook_link",
                &self.facebook_link,
                FACEBOOK_INVALID,
            ),
            website: optional_url(&mut errors, "website", &self.website, WEBSITE_INVALID),
            seeking_venue: seeking(&mut errors, "seeking_venue", &self.seeking_venue),
            seeking_description: optional_text(&self.seeking_description),
        };
        errors.finish(record)
    }

    /// Prefill an edit form from a stored artist.
    pub fn from_model(model: &artist::Model, genres: Vec<String>) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            phone: format_phone(&model.phone),
            genres,
            facebook_link: model.facebook_link.clone().unwrap_or_default(),
            website: model.website.clone().unwrap_or_default(),
            image_link: model.image_link.clone().unwrap_or_default(),
            seeking_venue: yes_no(model.seeking_venue),
            seeking_description: model.seeking_description.clone().unwrap_or_default(),
        }
    }
}

// ─── Show ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

/// A validated show submission. The referenced rows are checked at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowRecord {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

fn store_key(errors: &mut FormErrors, field: &str, value: &str) -> i32 {
    let value = required(errors, field, value);
    if value.is_empty() {
        return 0;
    }
    value.parse().unwrap_or_else(|_| {
        errors.add(field, INVALID_INTEGER);
        0
    })
}

impl ShowForm {
    /// The blank form offered to the user, starting now.
    pub fn with_default_start(now: NaiveDateTime) -> Self {
        Self {
            start_time: datetime::to_canonical(now),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<ShowRecord, FormErrors> {
        let mut errors = FormErrors::new();
        let artist_id = store_key(&mut errors, "artist_id", &self.artist_id);
        let venue_id = store_key(&mut errors, "venue_id", &self.venue_id);
        let start_time = required(&mut errors, "start_time", &self.start_time);
        let start_time = if start_time.is_empty() {
            None
        } else {
            datetime::parse(&start_time)
                .map_err(|_| errors.add("start_time", INVALID_DATETIME))
                .ok()
        };

        match start_time {
            Some(start_time) => errors.finish(ShowRecord {
                artist_id,
                venue_id,
                start_time,
            }),
            None => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn musical_hop() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: "123-123-1234".into(),
            genres: vec!["Jazz".into(), "Folk".into()],
            seeking_talent: "Yes".into(),
            ..VenueForm::default()
        }
    }

    fn guns_n_petals() -> ArtistForm {
        ArtistForm {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "326-123-5000".into(),
            genres: vec!["Rock n Roll".into()],
            seeking_venue: "No".into(),
            ..ArtistForm::default()
        }
    }

    #[test]
    fn test_vocabularies() {
        assert_eq!(STATES.len(), 51);
        assert!(STATES.contains(&"DC"));
        assert!(GENRES.contains(&"Other"));
        let mut unique = STATES.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), STATES.len());
    }

    #[test]
    fn test_valid_venue_is_cleaned() {
        let mut form = musical_hop();
        form.name = "  The Musical Hop  ".into();
        form.website = " https://www.themusicalhop.com ".into();
        form.seeking_description = "   ".into();

        let record = form.validate().unwrap();
        assert_eq!(record.name, "The Musical Hop");
        assert_eq!(record.phone, "1231231234");
        assert!(record.seeking_talent);
        assert_eq!(record.genres, vec!["Jazz", "Folk"]);
        assert_eq!(record.website.as_deref(), Some("https://www.themusicalhop.com"));
        assert!(record.facebook_link.is_none());
        assert!(record.seeking_description.is_none());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let errors = VenueForm::default().validate().unwrap_err();
        for field in [
            "name",
            "city",
            "state",
            "address",
            "phone",
            "genres",
            "seeking_talent",
        ] {
            assert_eq!(errors.get(field), Some(&[REQUIRED.to_string()][..]), "{field}");
        }
        assert_eq!(errors.len(), 7);
        assert!(errors.get("website").is_none());
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let mut form = musical_hop();
        form.city = "   ".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("city"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn test_phone_without_dashes_is_rejected() {
        let mut form = musical_hop();
        form.phone = "123456789".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("phone"), Some(&[PHONE_FORMAT.to_string()][..]));

        form.phone = "1231231234".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("123-456-7890"), "1234567890");
        assert_eq!(normalize_phone("1234567890"), "1234567890");
        let once = normalize_phone("(415) 000-1234");
        assert_eq!(normalize_phone(&once), once);
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("1231231234"), "123-123-1234");
        assert_eq!(format_phone("12345"), "12345");
    }

    #[test]
    fn test_invalid_facebook_link() {
        let mut form = musical_hop();
        form.facebook_link = "not-a-url".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("facebook_link"),
            Some(&["Facebook link is invalid!".to_string()][..])
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_url_requires_host() {
        let mut form = musical_hop();
        form.image_link = "mailto:booking@musicalhop.com".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("image_link"),
            Some(&["Image link is invalid!".to_string()][..])
        );
    }

    #[test]
    fn test_unknown_state_and_seeking_value() {
        let mut form = musical_hop();
        form.state = "XX".into();
        form.seeking_talent = "Maybe".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("state"), Some(&[INVALID_CHOICE.to_string()][..]));
        assert_eq!(
            errors.get("seeking_talent"),
            Some(&[INVALID_CHOICE.to_string()][..])
        );
    }

    #[test]
    fn test_unknown_genre_and_duplicates() {
        let mut form = musical_hop();
        form.genres = vec!["Jazz".into(), "Jazz".into(), "Polka".into()];
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("genres"),
            Some(&["'Polka' is not a valid choice for this field.".to_string()][..])
        );

        form.genres = vec!["Jazz".into(), "Jazz".into()];
        assert_eq!(form.validate().unwrap().genres, vec!["Jazz"]);
    }

    #[test]
    fn test_first_messages() {
        let mut form = musical_hop();
        form.name.clear();
        form.phone = "555".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.first_messages(), vec![REQUIRED, PHONE_FORMAT]);
    }

    #[test]
    fn test_valid_artist() {
        let record = guns_n_petals().validate().unwrap();
        assert_eq!(record.phone, "3261235000");
        assert!(!record.seeking_venue);
        assert_eq!(record.genres, vec!["Rock n Roll"]);
    }

    #[test]
    fn test_artist_does_not_need_address() {
        let errors = ArtistForm::default().validate().unwrap_err();
        assert!(errors.get("address").is_none());
        assert!(errors.get("seeking_venue").is_some());
    }

    #[test]
    fn test_venue_form_round_trips_through_model() {
        let record = musical_hop().validate().unwrap();
        let model = venue::Model {
            id: 1,
            name: record.name,
            city: record.city,
            state: record.state,
            address: record.address,
            phone: record.phone,
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_talent: record.seeking_talent,
            seeking_description: None,
        };
        let form = VenueForm::from_model(&model, record.genres);
        assert_eq!(form, musical_hop());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_show_form_validation() {
        let form = ShowForm {
            artist_id: "4".into(),
            venue_id: " 1 ".into(),
            start_time: "2019-05-21 21:30:00".into(),
        };
        let record = form.validate().unwrap();
        assert_eq!(record.artist_id, 4);
        assert_eq!(record.venue_id, 1);
        assert_eq!(datetime::to_canonical(record.start_time), "2019-05-21 21:30:00");
    }

    #[test]
    fn test_show_form_errors() {
        let errors = ShowForm {
            artist_id: "four".into(),
            venue_id: String::new(),
            start_time: "tomorrow".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("artist_id"), Some(&[INVALID_INTEGER.to_string()][..]));
        assert_eq!(errors.get("venue_id"), Some(&[REQUIRED.to_string()][..]));
        assert_eq!(errors.get("start_time"), Some(&[INVALID_DATETIME.to_string()][..]));
    }

    #[test]
    fn test_show_form_default_start() {
        let now = datetime::parse("2024-01-02 03:04:05").unwrap();
        let form = ShowForm::with_default_start(now);
        assert_eq!(form.start_time, "2024-01-02 03:04:05");
        assert!(form.artist_id.is_empty());
    }

    #[test]
    fn test_form_errors_serialize_as_map() {
        let mut errors = FormErrors::new();
        errors.add("phone", PHONE_FORMAT);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["phone"][0], PHONE_FORMAT);
    }
}
