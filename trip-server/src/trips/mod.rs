//! Trip lifecycle and synchronisation.
//!
//! Saved trips live in a process-wide [`TripStore`]. On session start the
//! client sends its cached copy; the [`Reconciler`] picks whichever set is
//! authoritative (the server's, once it has any trips), refreshes every trip
//! through the [`RefreshPipeline`] in parallel, and writes the result back.
//!
//! Refreshing never fails a trip: an expired thumbnail that cannot be
//! replaced, or a forecast that cannot be fetched, simply becomes absent.

mod config;
mod error;
mod ordering;
mod reconcile;
mod refresh;
mod service;
mod sources;
mod store;


pub use config::ReconcileConfig;
pub use error::TripError;
pub use ordering::order_for_display;
pub use reconcile::{Reconciler, TripSource, choose_authoritative};
pub use refresh::{ForecastSource, RefreshPipeline, ThumbnailSource, ThumbnailValidator, UrlProbe};
pub use service::TripService;
pub use store::TripStore;
