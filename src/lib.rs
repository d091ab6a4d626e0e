pub mod cli;
pub mod foyer;
