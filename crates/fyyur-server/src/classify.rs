//! Past/upcoming classification of shows.
//!
//! A show is upcoming only when it starts strictly after `now`; a show
//! starting exactly at `now` is already past.

use chrono::NaiveDateTime;
use serde::Serialize;

use fyyur_db::entities::show;

/// Anything with a start time.
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

impl Scheduled for show::Model {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

pub fn is_upcoming(start_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    start_time > now
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShowCounts {
    pub upcoming: usize,
    pub past: usize,
}

/// Count past and upcoming shows without materialising the partitions.
pub fn count_shows<'a, S, I>(shows: I, now: NaiveDateTime) -> ShowCounts
where
    S: Scheduled + 'a,
    I: IntoIterator<Item = &'a S>,
{
    shows
        .into_iter()
        .fold(ShowCounts::default(), |mut counts, s| {
            if is_upcoming(s.start_time(), now) {
                counts.upcoming += 1;
            } else {
                counts.past += 1;
            }
            counts
        })
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedShows<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Split shows into past and upcoming, keeping input order in each half.
pub fn classify_shows<S, I>(shows: I, now: NaiveDateTime) -> ClassifiedShows<S>
where
    S: Scheduled,
    I: IntoIterator<Item = S>,
{
    let (upcoming_shows, past_shows): (Vec<S>, Vec<S>) = shows
        .into_iter()
        .partition(|s| is_upcoming(s.start_time(), now));

    ClassifiedShows {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[derive(Debug, Clone, PartialEq)]
    struct Gig(&'static str, NaiveDateTime);

    impl Scheduled for Gig {
        fn start_time(&self) -> NaiveDateTime {
            self.1
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_show_at_now_is_past() {
        let now = noon();
        let gigs = vec![Gig("boundary", now)];

        let counts = count_shows(&gigs, now);
        assert_eq!(counts, ShowCounts { upcoming: 0, past: 1 });

        let classified = classify_shows(gigs, now);
        assert_eq!(classified.past_shows_count, 1);
        assert_eq!(classified.upcoming_shows_count, 0);
        assert!(classified.upcoming_shows.is_empty());
    }

    #[test]
    fn test_one_second_later_is_upcoming() {
        let now = noon();
        let gigs = [Gig("soon", now + Duration::seconds(1))];
        assert_eq!(count_shows(&gigs, now), ShowCounts { upcoming: 1, past: 0 });
    }

    #[test]
    fn test_empty_collection() {
        let gigs: Vec<Gig> = vec![];
        assert_eq!(count_shows(&gigs, noon()), ShowCounts::default());

        let classified = classify_shows(gigs, noon());
        assert!(classified.past_shows.is_empty());
        assert!(classified.upcoming_shows.is_empty());
        assert_eq!(classified.past_shows_count, 0);
        assert_eq!(classified.upcoming_shows_count, 0);
    }

    #[test]
    fn test_partitions_are_disjoint_and_exhaustive() {
        let now = noon();
        let gigs: Vec<Gig> = (-5i64..=5)
            .map(|d| Gig("gig", now + Duration::days(d)))
            .collect();
        let total = gigs.len();

        let counts = count_shows(&gigs, now);
        let classified = classify_shows(gigs.clone(), now);

        assert_eq!(counts.past + counts.upcoming, total);
        assert_eq!(classified.past_shows_count, counts.past);
        assert_eq!(classified.upcoming_shows_count, counts.upcoming);
        assert_eq!(
            classified.past_shows.len() + classified.upcoming_shows.len(),
            total
        );
        assert!(classified.past_shows.iter().all(|g| g.1 <= now));
        assert!(classified.upcoming_shows.iter().all(|g| g.1 > now));
    }

    #[test]
    fn test_classify_keeps_input_order() {
        let now = noon();
        let gigs = vec![
            Gig("b", now + Duration::days(2)),
            Gig("x", now - Duration::days(1)),
            Gig("a", now + Duration::days(1)),
            Gig("y", now - Duration::days(3)),
        ];
        let classified = classify_shows(gigs, now);
        let upcoming: Vec<_> = classified.upcoming_shows.iter().map(|g| g.0).collect();
        let past: Vec<_> = classified.past_shows.iter().map(|g| g.0).collect();
        assert_eq!(upcoming, vec!["b", "a"]);
        assert_eq!(past, vec!["x", "y"]);
    }

    #[test]
    fn test_show_model_counts() {
        let now = noon();
        let shows = vec![
            show::Model {
                id: 1,
                venue_id: 1,
                artist_id: 1,
                start_time: now - Duration::hours(2),
            },
            show::Model {
                id: 2,
                venue_id: 1,
                artist_id: 2,
                start_time: now + Duration::hours(2),
            },
        ];
        assert_eq!(count_shows(&shows, now), ShowCounts { upcoming: 1, past: 1 });
    }
}
