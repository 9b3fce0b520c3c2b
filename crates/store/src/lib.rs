//! # RETC Store
//!
//! Cached data access for the emissions reporting pipeline.
//!
//! Two repositories, each wrapping a pure loader in an explicit
//! time-to-live cache:
//!
//! ```text
//! PostgreSQL (air_ps.emissions_hist)
//!     │  one query per cache window (1 h)
//!     └──> EmissionsRepository ──> Arc<Vec<EmissionRecord>>
//!
//! Regional GeoJSON file
//!     │  one read per cache window (24 h)
//!     └──> BoundaryRepository ──> Arc<Vec<RegionGeometry>>
//! ```
//!
//! Cache expiry is evaluated lazily on access; there is no timer thread.
//! A failed refresh propagates to the caller and is never cached, so the
//! next access retries the source.

mod boundary;
mod cache;
mod config;
mod emissions;
mod error;

pub use boundary::{BoundaryRepository, BOUNDARIES_TTL};
pub use cache::TtlCache;
pub use config::DbConfig;
pub use emissions::{EmissionsRepository, EMISSIONS_TTL};
pub use error::{Result, StoreError};
