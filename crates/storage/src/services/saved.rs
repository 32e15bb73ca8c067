use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    Saved,
    Removed,
}

/// A recruiter's bookmarked athletes, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedSet {
    athletes: Vec<Uuid>,
}

impl SavedSet {
    pub fn new(athletes: Vec<Uuid>) -> Self {
        let mut set = Self::default();
        for id in athletes {
            if !set.contains(id) {
                set.athletes.push(id);
            }
        }
        set
    }

    pub fn contains(&self, athlete_id: Uuid) -> bool {
        self.athletes.contains(&athlete_id)
    }

    /// Removes the athlete if present, adds it otherwise. Two calls cancel out.
    pub fn toggle(&mut self, athlete_id: Uuid) -> Membership {
        if let Some(pos) = self.athletes.iter().position(|id| *id == athlete_id) {
            self.athletes.remove(pos);
            Membership::Removed
        } else {
            self.athletes.push(athlete_id);
            Membership::Saved
        }
    }

    pub fn as_slice(&self) -> &[Uuid] {
        &self.athletes
    }

    pub fn into_vec(self) -> Vec<Uuid> {
        self.athletes
    }
}

/// Only existing athletes can be saved. `role` is `None` when no such user exists.
pub fn check_target(role: Option<Role>) -> Result<()> {
    match role {
        Some(Role::Athlete) => Ok(()),
        _ => Err(StorageError::NotFound),
    }
}
