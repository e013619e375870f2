//! Web layer for the departure dashboard.
//!
//! Thin presentation over the board snapshots and analytics records:
//! server-rendered pages plus a small JSON API. No business logic lives
//! here.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
