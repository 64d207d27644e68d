//! Record types shared by the SatNet crates.

mod types;
pub use types::*;
