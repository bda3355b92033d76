//! Roster API.

use std::sync::Arc;

use crate::{
    client::ClientInner,
    error::{Error, Result},
    models::{Participant, Roster},
};

use super::list_items;

/// API for roster lookups.
pub struct RosterApi {
    client: Arc<ClientInner>,
}

impl RosterApi {
    pub(crate) fn new(client: Arc<ClientInner>) -> Self {
        Self { client }
    }

    /// Fetch the participants visible to the current user.
    pub async fn list(&self) -> Result<Roster> {
        let value = self.client.get_authed("users/", &[]).await?;

        let mut participants: Vec<Participant> = Vec::new();
        for item in list_items(value)? {
            participants.push(serde_json::from_value(item).map_err(Error::Json)?);
        }
        Ok(Roster::new(participants))
    }
}
