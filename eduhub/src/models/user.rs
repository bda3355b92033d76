//! Participant and roster models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::UserId;

/// A platform participant as seen in the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// User ID.
    pub id: UserId,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

impl Participant {
    /// Full display name.
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_owned()
        }
    }
}

/// Lookup table of participants visible to the current user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: HashMap<UserId, Participant>,
}

impl Roster {
    /// Build a roster from participants.
    pub fn new(participants: impl IntoIterator<Item = Participant>) -> Self {
        Self {
            participants: participants
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
        }
    }

    /// Look up a participant by ID.
    pub fn get(&self, id: &UserId) -> Option<&Participant> {
        self.participants.get(id)
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterate over participants.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }
}
