use crate::errors::FollowUpError;
use crate::models::{FollowUp, FollowUpBook, Status, UpdateFollowUp, ValidFollowUp};
use chrono::{DateTime, Utc};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

impl FollowUpBook {
    /// All records ordered by follow-up date, oldest first.
    pub fn list(&self) -> Vec<FollowUp> {
        let mut items: Vec<FollowUp> = self.followups.values().cloned().collect();
        items.sort_by(|a, b| {
            a.followup_date
                .cmp(&b.followup_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        items
    }

    pub fn get(&self, id: u64) -> Result<&FollowUp, FollowUpError> {
        self.followups.get(&id).ok_or(FollowUpError::NotFound { id })
    }

    pub fn create(
        &mut self,
        input: ValidFollowUp,
        created_at: DateTime<Utc>,
    ) -> Result<FollowUp, FollowUpError> {
        let id = self.next_id;
        if self.followups.contains_key(&id) {
            return Err(FollowUpError::Storage(format!("id {id} is already taken")));
        }
        self.next_id = id.checked_add(1).ok_or_else(id_space_exhausted)?;

        let followup = FollowUp {
            id,
            person_name: input.person_name,
            context: input.context,
            followup_date: input.followup_date,
            notes: input.notes,
            status: Status::Pending,
            created_at,
        };
        self.followups.insert(id, followup.clone());
        Ok(followup)
    }

    /// Applies the single permitted transition, pending to completed.
    pub fn set_status(&mut self, id: u64, status: Status) -> Result<FollowUp, FollowUpError> {
        let entry = self
            .followups
            .get_mut(&id)
            .ok_or(FollowUpError::NotFound { id })?;

        if entry.status == Status::Completed && status == Status::Pending {
            return Err(FollowUpError::InvalidTransition {
                id,
                from: entry.status.as_str(),
                to: status.as_str(),
            });
        }
        entry.status = status;
        Ok(entry.clone())
    }

    pub fn complete(&mut self, id: u64) -> Result<FollowUp, FollowUpError> {
        self.set_status(id, Status::Completed)
    }

    pub fn update(&mut self, id: u64, changes: &UpdateFollowUp) -> Result<FollowUp, FollowUpError> {
        self.get(id)?;
        match changes.status.as_deref() {
            Some(status) => {
                let status: Status = status.parse()?;
                self.set_status(id, status)
            }
            None => Ok(self.get(id)?.clone()),
        }
    }

    pub fn delete(&mut self, id: u64) -> Result<FollowUp, FollowUpError> {
        self.followups
            .remove(&id)
            .ok_or(FollowUpError::NotFound { id })
    }
}

fn id_space_exhausted() -> FollowUpError {
    FollowUpError::Storage("follow-up id space exhausted".to_string())
}

/// Reads the book from disk. A missing file is an empty book; anything
/// unreadable is an error so stored follow-ups are never silently dropped.
pub async fn load_book(path: &Path) -> Result<FollowUpBook, FollowUpError> {
    match fs::read(path).await {
        Ok(bytes) => {
            let mut book: FollowUpBook = serde_json::from_slice(&bytes)?;
            let max_id = book.followups.keys().next_back().copied().unwrap_or(0);
            if book.next_id <= max_id {
                warn!(next_id = book.next_id, max_id, "repairing id counter");
                book.next_id = max_id.checked_add(1).ok_or_else(id_space_exhausted)?;
            }
            debug!(count = book.followups.len(), "loaded follow-ups");
            Ok(book)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(FollowUpBook::default()),
        Err(err) => Err(err.into()),
    }
}

pub async fn persist_book(path: &Path, book: &FollowUpBook) -> Result<(), FollowUpError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let payload = serde_json::to_vec_pretty(book)?;
    fs::write(path, payload).await?;
    Ok(())
}
