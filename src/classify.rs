//! Urgency classification for follow-ups.
//!
//! Every label, day count and aggregate is derived from [`day_difference`],
//! measured in whole calendar days in the classifier's reference zone. The
//! time of day of "now" never affects the result.

use crate::errors::FollowUpError;
use crate::models::{Dashboard, FollowUp, FollowUpView, Stats, Status, Urgency};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::cmp::Ordering;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` follow-up date.
pub fn parse_followup_date(value: &str) -> Result<NaiveDate, FollowUpError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| FollowUpError::validation("Invalid date format. Use YYYY-MM-DD"))
}

/// Signed number of calendar days from `today` to `date`.
pub fn day_difference(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Classifies a record against an already resolved calendar day.
pub fn classify_on(record: &FollowUp, today: NaiveDate) -> Urgency {
    if record.status == Status::Completed {
        return Urgency::Completed;
    }

    match day_difference(record.followup_date, today).cmp(&0) {
        Ordering::Equal => Urgency::DueToday,
        Ordering::Less => Urgency::Overdue,
        Ordering::Greater => Urgency::Upcoming,
    }
}

pub fn aggregate_on<'a, I>(records: I, today: NaiveDate) -> Stats
where
    I: IntoIterator<Item = &'a FollowUp>,
{
    records
        .into_iter()
        .fold(Stats::default(), |mut stats, record| {
            match classify_on(record, today) {
                Urgency::DueToday => stats.due_today += 1,
                Urgency::Upcoming => stats.upcoming += 1,
                Urgency::Overdue => stats.overdue += 1,
                Urgency::Completed => stats.completed += 1,
            }
            stats
        })
}

/// Resolves instants to calendar days in a fixed reference zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    zone: Tz,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Classifier {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.zone).date_naive()
    }

    pub fn classify(&self, record: &FollowUp, now: DateTime<Utc>) -> Urgency {
        classify_on(record, self.today(now))
    }

    /// Zero when due today, negative when overdue, positive when upcoming.
    pub fn days_remaining(&self, record: &FollowUp, now: DateTime<Utc>) -> i64 {
        day_difference(record.followup_date, self.today(now))
    }

    pub fn aggregate<'a, I>(&self, records: I, now: DateTime<Utc>) -> Stats
    where
        I: IntoIterator<Item = &'a FollowUp>,
    {
        aggregate_on(records, self.today(now))
    }

    pub fn view(&self, record: &FollowUp, now: DateTime<Utc>) -> FollowUpView {
        view_on(record, self.today(now))
    }

    /// Stats and per-row labels for one snapshot, all resolved against the same day.
    pub fn dashboard(&self, records: &[FollowUp], now: DateTime<Utc>) -> Dashboard {
        let today = self.today(now);
        Dashboard {
            today,
            time_zone: self.zone.name().to_string(),
            stats: aggregate_on(records, today),
            followups: records.iter().map(|record| view_on(record, today)).collect(),
        }
    }
}

fn view_on(record: &FollowUp, today: NaiveDate) -> FollowUpView {
    FollowUpView {
        followup: record.clone(),
        urgency: classify_on(record, today),
        days_remaining: day_difference(record.followup_date, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn record(id: u64, followup_date: NaiveDate, status: Status) -> FollowUp {
        FollowUp {
            id,
            person_name: format!("Person {id}"),
            context: "Networking".to_string(),
            followup_date,
            notes: None,
            status,
            created_at: at(2024, 1, 1, 0),
        }
    }

    #[test]
    fn due_today_late_in_the_day() {
        let classifier = Classifier::default();
        let item = record(1, date(2024, 3, 10), Status::Pending);
        let now = at(2024, 3, 10, 23);

        assert_eq!(classifier.classify(&item, now), Urgency::DueToday);
        assert_eq!(classifier.days_remaining(&item, now), 0);
    }

    #[test]
    fn overdue_counts_back_whole_days() {
        let classifier = Classifier::default();
        let item = record(1, date(2024, 3, 5), Status::Pending);
        let now = at(2024, 3, 10, 9);

        assert_eq!(classifier.classify(&item, now), Urgency::Overdue);
        assert_eq!(classifier.days_remaining(&item, now), -5);
    }

    #[test]
    fn upcoming_counts_forward_whole_days() {
        let classifier = Classifier::default();
        let item = record(1, date(2024, 3, 20), Status::Pending);
        let now = at(2024, 3, 10, 0);

        assert_eq!(classifier.classify(&item, now), Urgency::Upcoming);
        assert_eq!(classifier.days_remaining(&item, now), 10);
    }

    #[test]
    fn completed_ignores_the_date() {
        let classifier = Classifier::default();
        let old = record(1, date(2020, 1, 1), Status::Completed);
        let future = record(2, date(2030, 6, 1), Status::Completed);

        for now in [at(2019, 1, 1, 0), at(2020, 1, 1, 12), at(2024, 3, 10, 23)] {
            assert_eq!(classifier.classify(&old, now), Urgency::Completed);
            assert_eq!(classifier.classify(&future, now), Urgency::Completed);
        }
    }

    #[test]
    fn hour_of_now_never_changes_the_label() {
        let classifier = Classifier::default();
        let today = date(2024, 3, 10);

        for offset in -400..=400 {
            let item = record(1, today + Duration::days(offset), Status::Pending);
            let expected = classifier.classify(&item, at(2024, 3, 10, 0));
            for hour in 0..24 {
                let now = at(2024, 3, 10, hour);
                assert_eq!(classifier.classify(&item, now), expected);
                assert_eq!(classifier.days_remaining(&item, now), offset);
            }
        }
    }

    #[test]
    fn label_agrees_with_sign_of_days_remaining() {
        let classifier = Classifier::default();
        let now = at(2024, 2, 29, 15);

        for offset in -3000..=3000 {
            let item = record(1, date(2024, 2, 29) + Duration::days(offset), Status::Pending);
            let days = classifier.days_remaining(&item, now);
            let expected = match days.cmp(&0) {
                Ordering::Equal => Urgency::DueToday,
                Ordering::Less => Urgency::Overdue,
                Ordering::Greater => Urgency::Upcoming,
            };
            assert_eq!(classifier.classify(&item, now), expected);
        }
    }

    #[test]
    fn classify_is_repeatable() {
        let classifier = Classifier::default();
        let item = record(1, date(2024, 3, 9), Status::Pending);
        let now = at(2024, 3, 10, 8);

        let first = classifier.classify(&item, now);
        let second = classifier.classify(&item, now);
        assert_eq!(first, second);
        assert_eq!(item.status, Status::Pending);
    }

    #[test]
    fn reference_zone_decides_today() {
        let new_york: Tz = "America/New_York".parse().unwrap();
        let classifier = Classifier::new(new_york);
        let item = record(1, date(2024, 3, 10), Status::Pending);
        // 03:00 UTC on the 11th is still the evening of the 10th in New York.
        let now = at(2024, 3, 11, 3);

        assert_eq!(classifier.today(now), date(2024, 3, 10));
        assert_eq!(classifier.classify(&item, now), Urgency::DueToday);
        assert_eq!(Classifier::default().classify(&item, now), Urgency::Overdue);
    }

    #[test]
    fn aggregate_one_of_each() {
        let classifier = Classifier::default();
        let now = at(2024, 3, 10, 12);
        let records = vec![
            record(1, date(2024, 3, 10), Status::Pending),
            record(2, date(2024, 3, 5), Status::Pending),
            record(3, date(2024, 3, 20), Status::Pending),
            record(4, date(2020, 1, 1), Status::Completed),
        ];

        let stats = classifier.aggregate(&records, now);
        assert_eq!(
            stats,
            Stats {
                due_today: 1,
                upcoming: 1,
                overdue: 1,
                completed: 1,
            }
        );
    }

    #[test]
    fn aggregate_partitions_the_collection() {
        let classifier = Classifier::default();
        let now = at(2024, 3, 10, 6);
        let records: Vec<FollowUp> = (0..97u64)
            .map(|id| {
                let status = if id % 5 == 0 {
                    Status::Completed
                } else {
                    Status::Pending
                };
                record(id, date(2024, 3, 10) + Duration::days(id as i64 % 7 - 3), status)
            })
            .collect();

        let stats = classifier.aggregate(&records, now);
        assert_eq!(stats.total(), records.len() as u64);
        assert_eq!(classifier.aggregate(&Vec::new(), now), Stats::default());
    }

    #[test]
    fn dashboard_rows_match_stats() {
        let classifier = Classifier::default();
        let now = at(2024, 3, 10, 18);
        let records = vec![
            record(1, date(2024, 3, 10), Status::Pending),
            record(2, date(2024, 3, 11), Status::Pending),
            record(3, date(2024, 3, 1), Status::Completed),
        ];

        let dashboard = classifier.dashboard(&records, now);
        assert_eq!(dashboard.today, date(2024, 3, 10));
        assert_eq!(dashboard.time_zone, "UTC");
        assert_eq!(dashboard.followups.len(), 3);
        assert_eq!(dashboard.stats, classifier.aggregate(&records, now));
        assert_eq!(dashboard.followups[0].urgency, Urgency::DueToday);
        assert_eq!(dashboard.followups[1].days_remaining, 1);
        assert_eq!(dashboard.followups[2].urgency, Urgency::Completed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_followup_date("2024-03-10").unwrap(), date(2024, 3, 10));
        assert!(parse_followup_date("").is_err());
        assert!(parse_followup_date("2024-02-30").is_err());
        assert!(parse_followup_date("tomorrow").is_err());
    }
}
