//! Debug observation channel
//!
//! A side-channel for tooling that wants to watch pipeline lifecycle
//! events. Observers receive read-only data and never influence control
//! flow or collected results.

pub mod handler;
pub mod logging;
pub mod registry;

pub use handler::{BuildEvent, BuildObserver, NoOpObserver};
pub use logging::LoggingObserver;
pub use registry::DebugObserverRegistry;
