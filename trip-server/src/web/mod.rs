//! Web layer for the trip planner.
//!
//! JSON endpoints for saved trips and provider lookups, plus the static
//! browser client.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LiveTripService};
