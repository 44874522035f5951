//! One-pass discovery of a provider's sensor tree.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::provider::{Hardware, HardwareProvider, Sensor};
use crate::{Error, Result};

/// A sensor together with the hardware node hosting it, as found during a
/// scan. Keeping the pair avoids any back-reference from sensors to their
/// hardware.
#[derive(Debug, Clone)]
pub struct IndexedSensor {
    sensor: Arc<dyn Sensor>,
    hardware: Arc<dyn Hardware>,
}

impl IndexedSensor {
    pub fn identifier(&self) -> &str {
        self.sensor.identifier()
    }

    pub fn sensor(&self) -> &Arc<dyn Sensor> {
        &self.sensor
    }

    /// The node whose refresh produces this sensor's readings.
    pub fn hardware(&self) -> &Arc<dyn Hardware> {
        &self.hardware
    }
}

/// Identifier-keyed catalog of every sensor reachable from a provider,
/// built by one depth-first walk of the hardware tree.
///
/// The walk visits each node's own sensors before descending into its
/// sub-hardware and keeps the provider's ordering throughout. It reads the
/// tree without modifying it. Identifiers must be unique across the whole
/// tree; a collision fails the scan.
///
/// # Examples
///
/// ```rust
/// use sensor_limit::provider::sim::{SimHardware, SimProvider, SimSensor};
/// use sensor_limit::SensorIndex;
///
/// let provider = SimProvider::new();
/// let cpu = SimHardware::new("/cpu/0");
/// cpu.add_sensor(SimSensor::with_value("/cpu/0/temperature/0", 55.0));
/// provider.add_hardware(cpu);
///
/// let index = SensorIndex::scan(provider.as_ref())?;
/// assert!(index.get("/cpu/0/temperature/0").is_some());
/// # Ok::<(), sensor_limit::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct SensorIndex {
    sensors: HashMap<String, IndexedSensor>,
    hardware: HashMap<String, Arc<dyn Hardware>>,
}

impl SensorIndex {
    /// Walk the provider's tree and build the catalog.
    ///
    /// Fails with [`Error::DuplicateSensorId`] when two sensors anywhere in
    /// the tree carry the same identifier. An empty tree yields an empty,
    /// valid index.
    pub fn scan(provider: &dyn HardwareProvider) -> Result<Self> {
        let mut index = Self::default();
        for hardware in provider.hardware() {
            index.visit(&hardware)?;
        }
        debug!(
            "Indexed {} sensors across {} hardware nodes",
            index.sensors.len(),
            index.hardware.len()
        );
        Ok(index)
    }

    fn visit(&mut self, hardware: &Arc<dyn Hardware>) -> Result<()> {
        for sensor in hardware.sensors() {
            let id = sensor.identifier().to_string();
            if self.sensors.contains_key(&id) {
                return Err(Error::duplicate_sensor_id(id));
            }
            self.hardware
                .entry(hardware.identifier().to_string())
                .or_insert_with(|| hardware.clone());
            self.sensors.insert(id, IndexedSensor { sensor, hardware: hardware.clone() });
        }
        for sub in hardware.sub_hardware() {
            self.visit(&sub)?;
        }
        Ok(())
    }

    /// Look up a sensor by identifier.
    pub fn get(&self, identifier: &str) -> Option<&IndexedSensor> {
        self.sensors.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.sensors.contains_key(identifier)
    }

    /// All indexed sensors, ordered by identifier.
    pub fn sensors(&self) -> Vec<&IndexedSensor> {
        let mut sensors: Vec<&IndexedSensor> = self.sensors.values().collect();
        sensors.sort_by_key(|entry| entry.identifier());
        sensors
    }

    /// The distinct hardware nodes hosting at least one indexed sensor,
    /// ordered by identifier.
    pub fn hardware(&self) -> Vec<&Arc<dyn Hardware>> {
        let mut hardware: Vec<&Arc<dyn Hardware>> = self.hardware.values().collect();
        hardware.sort_by_key(|node| node.identifier());
        hardware
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

/// Refresh every hardware node reachable from the provider, depth-first,
/// each node before its children.
pub fn refresh_all(provider: &dyn HardwareProvider) {
    fn visit(hardware: &Arc<dyn Hardware>) {
        hardware.refresh();
        for sub in hardware.sub_hardware() {
            visit(&sub);
        }
    }

    for hardware in provider.hardware() {
        visit(&hardware);
    }
}
