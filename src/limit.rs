//! Binding one sensor to one named event.

use std::sync::Arc;

use crate::config::LimitConfig;
use crate::event::ManualResetEvent;
use crate::provider::Sensor;
use crate::{Error, Result};

/// One configured threshold: a sensor bound to a named manual-reset event.
///
/// While the binding is live, [`update`](Self::update) mirrors the
/// comparison "current value strictly below the limit" onto the event:
/// strictly below asserts it, at or above de-asserts it. A missing reading
/// or a missing limit leaves the event in whatever state it already held,
/// so a sensor that goes quiet keeps its last verdict visible.
#[derive(Debug)]
pub struct SensorLimit {
    config: LimitConfig,
    sensor: Arc<dyn Sensor>,
    event: ManualResetEvent,
    disposed: bool,
}

impl SensorLimit {
    /// Bind `sensor` to the event named by `config`.
    ///
    /// The sensor's identifier must match the configured one; that check
    /// runs before the event is created, so a mismatch leaves no OS
    /// resource behind.
    pub(crate) fn bind(config: LimitConfig, sensor: Arc<dyn Sensor>) -> Result<Self> {
        if sensor.identifier() != config.sensor() {
            return Err(Error::sensor_mismatch(config.sensor(), sensor.identifier()));
        }
        let event = ManualResetEvent::create(&config.event_name())?;
        Ok(Self { config, sensor, event, disposed: false })
    }

    /// The configuration entry this binding was built from.
    pub fn config(&self) -> &LimitConfig {
        &self.config
    }

    /// Full name of the underlying event.
    pub fn event_name(&self) -> String {
        self.config.event_name()
    }

    /// Whether the event is currently asserted.
    pub fn is_signaled(&self) -> Result<bool> {
        if self.disposed {
            return Err(Error::disposed("sensor limit"));
        }
        self.event.is_set()
    }

    /// Recompute the event state from the sensor's current value.
    pub fn update(&self) -> Result<()> {
        if self.disposed {
            return Err(Error::disposed("sensor limit"));
        }
        let (Some(limit), Some(value)) = (self.config.limit(), self.sensor.value()) else {
            return Ok(());
        };
        if value < limit {
            self.event.set()
        } else {
            self.event.reset()
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Release the event. The first call closes it; later calls do nothing.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.event.close();
        }
    }
}
