use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregate::sort_chronological;
use crate::model::ticket::{derive_title, Ticket, TicketType};
use crate::repository::TicketRepository;

pub struct TicketService<R: TicketRepository> {
    repo: R,
}

impl<R: TicketRepository> TicketService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a ticket for `url`. A blank URL records nothing and yields
    /// `None`.
    pub fn add_ticket(&self, url: &str, kind: TicketType, date: NaiveDateTime) -> Result<Option<Ticket>> {
        let Some(title) = derive_title(url) else {
            warn!("ignoring ticket without a usable URL");
            return Ok(None);
        };
        let created = self.repo.create(Ticket::new(title, kind, date))?;
        info!(id = %created.id, title = %created.title, kind = %created.kind, "ticket added");
        Ok(Some(created))
    }

    pub fn list_tickets(&self) -> Result<Vec<Ticket>> {
        self.repo.list()
    }

    /// Tickets recorded on `date`, earliest first.
    pub fn tickets_on(&self, date: NaiveDate) -> Result<Vec<Ticket>> {
        let tickets: Vec<Ticket> = self
            .repo
            .list()?
            .into_iter()
            .filter(|t| t.date.date() == date)
            .collect();
        Ok(sort_chronological(&tickets))
    }

    /// Deleting an unknown id is a no-op and returns false.
    pub fn delete_ticket(&self, id: &Uuid) -> Result<bool> {
        let removed = self.repo.delete(id)?;
        if removed {
            info!(%id, "ticket deleted");
        }
        Ok(removed)
    }

    /// Finds the ticket whose id starts with `prefix`.
    pub fn resolve_id(&self, prefix: &str) -> Result<Option<Uuid>> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Ok(None);
        }
        let matches: Vec<Uuid> = self
            .repo
            .list()?
            .into_iter()
            .map(|t| t.id)
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            n => Err(anyhow!("Ambiguous id '{}' matches {} tickets", prefix, n)),
        }
    }
}
