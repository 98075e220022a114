//! Food-safety audit scoring and store-manager notification rules.
//!
//! The [`audit`] and [`notify`] modules hold the pure rule sets; [`report`]
//! composes them behind injected collaborators and exposes an HTTP router.

pub mod audit;
pub mod config;
pub mod error;
pub mod notify;
pub mod report;
pub mod telemetry;
