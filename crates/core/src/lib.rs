//! Domain logic shared by the scrumboard crates.
//!
//! Nothing in here talks to the network or the database: error taxonomy,
//! ticket rules, validation of assistant inputs and the dashboard's board
//! document (including its on-disk migration and file store).

pub mod assistant;
pub mod board;
pub mod error;
pub mod ticket;
pub mod types;
