//! Workspace facade crate.
//!
//! Re-exports the transport crates so a host application can depend on
//! `transport-workspace` alone. The `driver` feature (on by default) pulls in
//! `core-transport`; hosts that only implement the bridge traits can turn it
//! off.

pub use bridge_traits;
pub use core_runtime;

#[cfg(feature = "driver")]
pub use core_transport;
