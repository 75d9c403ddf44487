pub mod goal;
pub mod ticket;
pub mod workweek;
