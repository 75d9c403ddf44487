pub mod file;
pub mod memory;
pub mod profile;
pub mod traits;

// Re-export
pub use file::FileTicketRepository;
pub use memory::{InMemoryGoalProfileRepository, InMemoryTicketRepository};
pub use profile::FileGoalProfileRepository;
pub use traits::{GoalProfileRepository, TicketRepository};
