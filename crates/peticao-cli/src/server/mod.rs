//! Local JSON API over one workflow session.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
