//! Distance estimation: haversine distance and base transit duration.

pub mod distance;

pub use distance::*;
