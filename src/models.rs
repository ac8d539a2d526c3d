use crate::classify::parse_followup_date;
use crate::errors::FollowUpError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Contexts offered by the dashboard form. Any other non-empty text is accepted.
pub const CONTEXTS: [&str; 5] = [
    "Job Application",
    "Client Project",
    "Sales Lead",
    "Networking",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = FollowUpError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "pending" => Ok(Status::Pending),
            "completed" => Ok(Status::Completed),
            _ => Err(FollowUpError::validation(
                "Invalid status. Must be 'pending' or 'completed'",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: u64,
    pub person_name: String,
    pub context: String,
    pub followup_date: NaiveDate,
    pub notes: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpBook {
    pub next_id: u64,
    pub followups: BTreeMap<u64, FollowUp>,
}

impl Default for FollowUpBook {
    fn default() -> Self {
        Self {
            next_id: 1,
            followups: BTreeMap::new(),
        }
    }
}

/// Create payload as it arrives over JSON or a form post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewFollowUp {
    pub person_name: Option<String>,
    pub context: Option<String>,
    pub followup_date: Option<String>,
    pub notes: Option<String>,
}

/// A create payload that passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFollowUp {
    pub person_name: String,
    pub context: String,
    pub followup_date: NaiveDate,
    pub notes: Option<String>,
}

impl NewFollowUp {
    pub fn validate(&self) -> Result<ValidFollowUp, FollowUpError> {
        let (Some(person_name), Some(context), Some(followup_date)) =
            (&self.person_name, &self.context, &self.followup_date)
        else {
            return Err(FollowUpError::validation(
                "Missing required fields: person_name, context, followup_date",
            ));
        };

        let person_name = person_name.trim();
        if person_name.is_empty() {
            return Err(FollowUpError::validation("Person name is required"));
        }
        let context = context.trim();
        if context.is_empty() {
            return Err(FollowUpError::validation("Context is required"));
        }
        if followup_date.trim().is_empty() {
            return Err(FollowUpError::validation("Follow-up date is required"));
        }
        let followup_date = parse_followup_date(followup_date)?;

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        Ok(ValidFollowUp {
            person_name: person_name.to_string(),
            context: context.to_string(),
            followup_date,
            notes,
        })
    }
}

/// Update payload. Only `status` is honoured; other fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFollowUp {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Upcoming,
    DueToday,
    Overdue,
    Completed,
}

impl Urgency {
    pub fn label(self) -> &'static str {
        match self {
            Urgency::Upcoming => "Upcoming",
            Urgency::DueToday => "Due today",
            Urgency::Overdue => "Overdue",
            Urgency::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub due_today: u64,
    pub upcoming: u64,
    pub overdue: u64,
    pub completed: u64,
}

impl Stats {
    pub fn total(&self) -> u64 {
        self.due_today + self.upcoming + self.overdue + self.completed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpView {
    #[serde(flatten)]
    pub followup: FollowUp,
    pub urgency: Urgency,
    pub days_remaining: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub time_zone: String,
    pub stats: Stats,
    pub followups: Vec<FollowUpView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, context: &str, date: &str) -> NewFollowUp {
        NewFollowUp {
            person_name: Some(name.to_string()),
            context: Some(context.to_string()),
            followup_date: Some(date.to_string()),
            notes: None,
        }
    }

    #[test]
    fn validate_trims_and_parses() {
        let mut input = payload("  Ada Lovelace ", " Networking ", "2024-03-10");
        input.notes = Some("   ".to_string());

        let valid = input.validate().expect("valid payload");
        assert_eq!(valid.person_name, "Ada Lovelace");
        assert_eq!(valid.context, "Networking");
        assert_eq!(
            valid.followup_date,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(valid.notes, None);
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let input = NewFollowUp {
            person_name: Some("Ada".to_string()),
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: person_name, context, followup_date"
        );
    }

    #[test]
    fn validate_rejects_blank_name() {
        let err = payload("   ", "Other", "2024-03-10").validate().unwrap_err();
        assert!(matches!(err, FollowUpError::Validation(_)));
        assert_eq!(err.to_string(), "Person name is required");
    }

    #[test]
    fn validate_rejects_unparseable_date() {
        let err = payload("Ada", "Other", "03/10/2024").validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format. Use YYYY-MM-DD");
    }

    #[test]
    fn validate_accepts_past_dates_and_free_text_context() {
        let valid = payload("Ada", "Conference", "1999-12-31")
            .validate()
            .expect("past date allowed");
        assert_eq!(valid.context, "Conference");
        assert!(!CONTEXTS.contains(&valid.context.as_str()));
    }

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!("completed".parse::<Status>().unwrap(), Status::Completed);
        assert_eq!(" pending ".parse::<Status>().unwrap(), Status::Pending);
        assert!("done".parse::<Status>().is_err());
    }
}
