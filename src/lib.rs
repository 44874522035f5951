//! Sensor Limit - threshold-triggered named events for hardware sensors
//!
//! This crate watches hardware sensor values and mirrors "value is below its
//! configured limit" onto named, cross-process manual-reset events. Other
//! processes on the machine open the events by name and react to threshold
//! crossings without talking to the hardware themselves.
//!
//! # Features
//!
//! - **Sensor catalog**: one-pass discovery of every sensor a provider
//!   exposes, keyed by identifier
//! - **Threshold events**: one named manual-reset event per configured
//!   sensor limit, asserted while the value is strictly below the limit
//! - **Registry**: resolves a JSON configuration against the sensor tree
//!   and drives all events in strict refresh-then-update cycles
//! - **Session handling**: deterministic open/close of the underlying
//!   provider
//! - **Providers**: Linux hwmon out of the box, a simulated tree for tests
//!   and demos, and a trait seam for anything else
//! - **Async polling**: optional tokio loop keeping the events current
//!
//! # Examples
//!
//! ```rust,no_run
//! use sensor_limit::prelude::*;
//! use sensor_limit::provider::sim::{SimHardware, SimProvider, SimSensor};
//!
//! fn main() -> Result<()> {
//!     let provider = SimProvider::new();
//!     let cpu = SimHardware::new("/cpu/0");
//!     let temp = SimSensor::with_value("/cpu/0/temperature/0", 48.5);
//!     cpu.add_sensor(temp.clone());
//!     provider.add_hardware(cpu);
//!
//!     let configs = vec![LimitConfig::new("/cpu/0/temperature/0", "CpuCool", Some(60.0))?];
//!     let registry = LimitRegistry::new(provider.as_ref(), configs)?;
//!
//!     registry.update_all()?;
//!     assert!(registry.limits()[0].is_signaled()?);
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Configuration problems surface during construction: an invalid event
//! name fragment when the entry is built, a duplicate event name or an
//! unknown sensor when the registry resolves the list. Update cycles only
//! fail on disposed objects and real I/O problems; a sensor without a
//! current reading is normal and leaves its event untouched.
//!
//! ```rust
//! use sensor_limit::{Error, LimitConfig};
//!
//! match LimitConfig::new("/cpu/0/temperature/0", "not valid", Some(60.0)) {
//!     Err(Error::InvalidEventName(name)) => println!("rejected: {name}"),
//!     other => panic!("expected a rejected fragment, got {other:?}"),
//! }
//! ```
//!
//! # Thread Safety
//!
//! All public types are `Send` and `Sync`, so a registry can live in shared
//! state. Update cycles themselves are synchronous and meant to run from
//! one place at a time; nothing in the crate locks or coordinates callers.

// Public modules
pub mod config;
pub mod event;
pub mod index;
pub mod limit;
#[cfg(feature = "async")]
pub mod poll;
pub mod provider;
pub mod registry;
pub mod session;

// Private modules
mod error;

pub use config::{LimitConfig, EVENT_NAME_PREFIX};
pub use error::{Error, Result};
pub use index::{refresh_all, IndexedSensor, SensorIndex};
pub use limit::SensorLimit;
pub use registry::LimitRegistry;
pub use session::HardwareSession;

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::config::{LimitConfig, EVENT_NAME_PREFIX};
    pub use crate::event::ManualResetEvent;
    pub use crate::index::{refresh_all, IndexedSensor, SensorIndex};
    pub use crate::limit::SensorLimit;
    pub use crate::provider::{Hardware, HardwareProvider, Sensor};
    pub use crate::registry::LimitRegistry;
    pub use crate::session::HardwareSession;
    pub use crate::Error;
    pub use crate::Result;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::sim::{SimHardware, SimProvider, SimSensor};

    #[test]
    fn test_session_to_registry_round_trip() -> Result<()> {
        let provider = SimProvider::new();
        let gpu = SimHardware::new("/gpu/0");
        let temp = SimSensor::with_value("/gpu/0/temperature/0", 70.0);
        gpu.add_sensor(temp.clone());
        provider.add_hardware(gpu);

        let session = HardwareSession::open(provider.clone())?;
        let fragment = format!("LibSmokeP{}", std::process::id());
        let configs = vec![LimitConfig::new("/gpu/0/temperature/0", fragment, Some(80.0))?];

        let mut registry = LimitRegistry::new(session.provider()?.as_ref(), configs)?;
        registry.update_all()?;
        assert!(registry.limits()[0].is_signaled()?);

        temp.set_value(85.0);
        registry.update_all()?;
        assert!(!registry.limits()[0].is_signaled()?);

        registry.dispose();
        assert!(matches!(registry.update_all(), Err(Error::Disposed(_))));
        Ok(())
    }
}
