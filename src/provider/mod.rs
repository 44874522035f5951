//! Hardware provider abstraction.
//!
//! The crate consumes a hardware monitoring session through the three traits
//! in this module rather than binding to one library. A provider exposes a
//! tree: top-level hardware nodes, each with its own sensors and optional
//! nested sub-hardware. All handles are shared (`Arc`) and read-only from
//! this crate's point of view; refreshing a node updates readings in place
//! and never restructures the tree.
//!
//! # Thread Safety
//!
//! Trait objects are `Send + Sync` so handles can be held across threads,
//! but the crate itself never refreshes concurrently: one update cycle runs
//! on one thread at a time.

use std::sync::Arc;

use crate::Result;

#[cfg(test)]
use mockall::automock;

#[cfg(target_os = "linux")]
pub mod hwmon;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

/// A single reading point in the hardware tree.
#[cfg_attr(test, automock)]
pub trait Sensor: Send + Sync + std::fmt::Debug {
    /// Identifier of this sensor, unique within the provider's tree and
    /// stable for the lifetime of the session.
    fn identifier(&self) -> &str;

    /// The value captured by the last refresh of the hosting hardware, or
    /// `None` when no reading is available.
    fn value(&self) -> Option<f64>;
}

/// A node in the hardware tree: a device hosting sensors and, possibly,
/// nested sub-devices.
pub trait Hardware: Send + Sync + std::fmt::Debug {
    /// Identifier of this node, stable for the lifetime of the session.
    fn identifier(&self) -> &str;

    /// Pull fresh readings for this node's own sensors. Whether the refresh
    /// cascades into sub-hardware is provider-defined; callers that need the
    /// whole tree refreshed walk it themselves.
    fn refresh(&self);

    /// Nested hardware, in the order the provider exposes it.
    fn sub_hardware(&self) -> Vec<Arc<dyn Hardware>>;

    /// Sensors hosted directly on this node, in the order the provider
    /// exposes them.
    fn sensors(&self) -> Vec<Arc<dyn Sensor>>;
}

/// An openable hardware monitoring session exposing the root of the tree.
pub trait HardwareProvider: Send + Sync + std::fmt::Debug {
    /// Start the session. Called once before the tree is first read.
    fn open(&self) -> Result<()>;

    /// End the session, releasing whatever the provider holds. Further
    /// reads return empty or stale data; calling it again is harmless.
    fn close(&self);

    /// Top-level hardware nodes, in the order the provider exposes them.
    fn hardware(&self) -> Vec<Arc<dyn Hardware>>;
}
