//! Host application boundary.

pub mod activation;

pub use activation::{HostActivator, ImportCheckActivator, NullActivator};
