//! # Meridian Core Types
//!
//! The shared, Layer 0 data structures of the system. Every other crate
//! depends on these; this crate depends on nothing but serde and chrono.

pub mod structs;

// Re-export the core types to provide a clean public API.
pub use structs::{Allocation, IndexPoint, PricePoint, ReturnMap};
