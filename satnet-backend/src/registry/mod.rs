//! Satellite registry backed by a height-balanced binary search tree.
//!
//! ## Main Components
//! - `SatNet`: the registry (insert / remove / lookup / counting / purge)
//! - `Iter`: ascending-id iterator over stored records
//! - `InvariantViolation`: what `SatNet::validate` reports

mod node;

mod net;
pub use net::{SatNet, SatelliteListing};

mod iter;
pub use iter::Iter;

mod error;
pub use error::InvariantViolation;
