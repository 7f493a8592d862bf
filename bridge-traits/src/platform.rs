//! Threading bounds shared by every bridge trait.
//!
//! The coordinator itself runs on a single event turn, but native hosts hand
//! their engine bindings to a tokio task (see `core_transport::driver`), so
//! bridge implementations must be movable and shareable across threads there.
//! WebAssembly hosts run on one thread and hold objects that are not `Send`,
//! which is why the bound collapses to nothing on `wasm32`.

/// Marker trait that applies `Send + Sync` on native targets while becoming a
/// no-op on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSendSync for T {}
