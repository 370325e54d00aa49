//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers validate input at the boundary, delegate to the ticket
//! repository, the board store or the AI mediator, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod ai;
pub mod boards;
pub mod tickets;
