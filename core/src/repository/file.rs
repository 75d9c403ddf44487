use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{data_dir, TICKETS_FILE_NAME};
use crate::model::ticket::Ticket;
use crate::repository::traits::TicketRepository;

#[derive(Clone)]
pub struct FileTicketRepository {
    file_path: PathBuf,
}

impl FileTicketRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(TICKETS_FILE_NAME);

        // Start with an empty JSON array
        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<Ticket>::new())?;
            writer.flush()?;
            info!(path = %path.display(), "created ticket store");
        }

        Ok(FileTicketRepository { file_path: path })
    }

    fn read_tickets(&self) -> Result<Vec<Ticket>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let tickets: Vec<Ticket> = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse {}", self.file_path.display()))?;
        debug!(count = tickets.len(), "read tickets");
        Ok(tickets)
    }

    fn write_tickets(&self, tickets: &[Ticket]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tickets)?;
        writer.flush()?;
        debug!(count = tickets.len(), "wrote tickets");
        Ok(())
    }
}

impl TicketRepository for FileTicketRepository {
    fn create(&self, ticket: Ticket) -> Result<Ticket> {
        let mut tickets = self.read_tickets()?;
        tickets.push(ticket.clone());
        self.write_tickets(&tickets)?;
        Ok(ticket)
    }

    fn list(&self) -> Result<Vec<Ticket>> {
        self.read_tickets()
    }

    fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut tickets = self.read_tickets()?;
        let initial_len = tickets.len();
        tickets.retain(|t| t.id != *id);

        if tickets.len() == initial_len {
            return Ok(false);
        }

        self.write_tickets(&tickets)?;
        Ok(true)
    }
}
