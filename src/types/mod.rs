//! Core type definitions using newtype patterns for type safety.
//!
//! A scan can only be constructed from a validated `PortRange`, so a
//! malformed range never reaches the network.

mod port;

pub use port::{Port, PortError, PortRange};
