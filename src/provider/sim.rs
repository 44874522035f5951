//! Simulated hardware provider.
//!
//! Builds arbitrary hardware trees in memory with scriptable sensor values.
//! The test suite runs on it, and with the `sim` feature enabled it doubles
//! as a demo provider on machines without readable hardware.
//!
//! # Examples
//!
//! ```rust
//! use sensor_limit::provider::sim::{SimHardware, SimProvider, SimSensor};
//!
//! let provider = SimProvider::new();
//! let cpu = SimHardware::new("/cpu/0");
//! let temp = SimSensor::with_value("/cpu/0/temperature/0", 48.0);
//! cpu.add_sensor(temp.clone());
//! provider.add_hardware(cpu);
//!
//! temp.set_value(91.5);
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Hardware, HardwareProvider, Sensor};
use crate::Result;

/// A sensor whose readings are scripted by the test or demo driving it.
#[derive(Debug)]
pub struct SimSensor {
    identifier: String,
    value: RwLock<Option<f64>>,
}

impl SimSensor {
    /// Create a sensor with no reading yet.
    pub fn new(identifier: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { identifier: identifier.into(), value: RwLock::new(None) })
    }

    /// Create a sensor with an initial reading.
    pub fn with_value(identifier: impl Into<String>, value: f64) -> Arc<Self> {
        let sensor = Self::new(identifier);
        sensor.set_value(value);
        sensor
    }

    /// Script the current reading. Visible to readers immediately.
    pub fn set_value(&self, value: f64) {
        *self.value.write() = Some(value);
    }

    /// Drop the current reading, as a real sensor does when a read fails.
    pub fn clear_value(&self) {
        *self.value.write() = None;
    }
}

impl Sensor for SimSensor {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn value(&self) -> Option<f64> {
        *self.value.read()
    }
}

/// A hardware node assembled from scripted sensors and nested nodes.
///
/// `refresh` touches only this node and counts its invocations, so tests can
/// assert how often (and whether) a node was refreshed.
#[derive(Debug)]
pub struct SimHardware {
    identifier: String,
    sensors: RwLock<Vec<Arc<dyn Sensor>>>,
    sub_hardware: RwLock<Vec<Arc<dyn Hardware>>>,
    refresh_count: AtomicUsize,
}

impl SimHardware {
    pub fn new(identifier: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            identifier: identifier.into(),
            sensors: RwLock::new(Vec::new()),
            sub_hardware: RwLock::new(Vec::new()),
            refresh_count: AtomicUsize::new(0),
        })
    }

    /// Attach a sensor to this node. Order of attachment is the order the
    /// node exposes its sensors in.
    pub fn add_sensor(&self, sensor: Arc<SimSensor>) {
        self.sensors.write().push(sensor);
    }

    /// Nest a child node under this one.
    pub fn add_sub_hardware(&self, hardware: Arc<SimHardware>) {
        self.sub_hardware.write().push(hardware);
    }

    /// How many times `refresh` has run on this node.
    pub fn refresh_count(&self) -> usize {
        self.refresh_count.load(Ordering::SeqCst)
    }
}

impl Hardware for SimHardware {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn refresh(&self) {
        self.refresh_count.fetch_add(1, Ordering::SeqCst);
    }

    fn sub_hardware(&self) -> Vec<Arc<dyn Hardware>> {
        self.sub_hardware.read().clone()
    }

    fn sensors(&self) -> Vec<Arc<dyn Sensor>> {
        self.sensors.read().clone()
    }
}

/// The provider root: an openable session over the assembled tree.
#[derive(Debug, Default)]
pub struct SimProvider {
    hardware: RwLock<Vec<Arc<dyn Hardware>>>,
    open: AtomicBool,
}

impl SimProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Attach a top-level node. Order of attachment is the traversal order.
    pub fn add_hardware(&self, hardware: Arc<SimHardware>) {
        self.hardware.write().push(hardware);
    }

    /// Whether `open` has run without a matching `close`.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

impl HardwareProvider for SimProvider {
    fn open(&self) -> Result<()> {
        self.open.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    fn hardware(&self) -> Vec<Arc<dyn Hardware>> {
        self.hardware.read().clone()
    }
}
