pub mod dto;
pub mod profile_service;
pub mod ticket_service;
