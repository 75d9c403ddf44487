use std::cell::RefCell;

use anyhow::Result;
use uuid::Uuid;

use crate::model::goal::GoalProfile;
use crate::model::ticket::Ticket;
use crate::repository::traits::{GoalProfileRepository, TicketRepository};

/// Tickets kept for the lifetime of the process only.
#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: RefCell<Vec<Ticket>>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets: RefCell::new(tickets),
        }
    }
}

impl TicketRepository for InMemoryTicketRepository {
    fn create(&self, ticket: Ticket) -> Result<Ticket> {
        self.tickets.borrow_mut().push(ticket.clone());
        Ok(ticket)
    }

    fn list(&self) -> Result<Vec<Ticket>> {
        Ok(self.tickets.borrow().clone())
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut tickets = self.tickets.borrow_mut();
        let initial_len = tickets.len();
        tickets.retain(|t| t.id != *id);
        Ok(tickets.len() != initial_len)
    }
}

#[derive(Default)]
pub struct InMemoryGoalProfileRepository {
    profile: RefCell<GoalProfile>,
}

impl InMemoryGoalProfileRepository {
    pub fn new(profile: GoalProfile) -> Self {
        Self {
            profile: RefCell::new(profile),
        }
    }
}

impl GoalProfileRepository for InMemoryGoalProfileRepository {
    fn get(&self) -> Result<GoalProfile> {
        Ok(self.profile.borrow().clone())
    }

    fn set(&self, profile: &GoalProfile) -> Result<()> {
        *self.profile.borrow_mut() = profile.clone();
        Ok(())
    }
}
