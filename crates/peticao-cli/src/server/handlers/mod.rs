//! API request handlers.

mod download;
mod session;
mod workflow;

pub use download::*;
pub use session::*;
pub use workflow::*;
