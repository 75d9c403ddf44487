use anyhow::Result;
use uuid::Uuid;

use crate::model::goal::GoalProfile;
use crate::model::ticket::Ticket;

pub trait TicketRepository {
    fn create(&self, ticket: Ticket) -> Result<Ticket>;
    fn list(&self) -> Result<Vec<Ticket>>;
    /// Returns false when no ticket had this id.
    fn delete(&self, id: &Uuid) -> Result<bool>;
}

pub trait GoalProfileRepository {
    /// The saved profile, or the default one when nothing was saved yet.
    fn get(&self) -> Result<GoalProfile>;
    fn set(&self, profile: &GoalProfile) -> Result<()>;
}

impl<R: TicketRepository + ?Sized> TicketRepository for Box<R> {
    fn create(&self, ticket: Ticket) -> Result<Ticket> {
        (**self).create(ticket)
    }

    fn list(&self) -> Result<Vec<Ticket>> {
        (**self).list()
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        (**self).delete(id)
    }
}

impl<R: GoalProfileRepository + ?Sized> GoalProfileRepository for Box<R> {
    fn get(&self) -> Result<GoalProfile> {
        (**self).get()
    }

    fn set(&self, profile: &GoalProfile) -> Result<()> {
        (**self).set(profile)
    }
}
