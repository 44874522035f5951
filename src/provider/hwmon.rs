//! Linux hwmon provider.
//!
//! Exposes the kernel's `/sys/class/hwmon` tree as a flat set of hardware
//! nodes, one per chip directory, with a sensor per `*_input` channel.
//! Raw channel values are scaled to base units (milli-degrees to degrees,
//! micro-watts to watts, fan RPM passed through). A channel that cannot be
//! read reports no value rather than failing the refresh.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{Hardware, HardwareProvider, Sensor};
use crate::Result;

const HWMON_ROOT: &str = "/sys/class/hwmon";

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

/// Divisor turning a raw channel reading into base units.
fn channel_scale(channel: &str) -> f64 {
    if channel.starts_with("temp") || channel.starts_with("in") || channel.starts_with("curr") {
        1000.0
    } else if channel.starts_with("power") || channel.starts_with("energy") {
        1_000_000.0
    } else {
        1.0
    }
}

/// One `*_input` channel of a hwmon chip.
#[derive(Debug)]
pub struct HwmonSensor {
    identifier: String,
    path: PathBuf,
    scale: f64,
    value: RwLock<Option<f64>>,
}

impl HwmonSensor {
    fn new(identifier: String, path: PathBuf, scale: f64) -> Arc<Self> {
        Arc::new(Self { identifier, path, scale, value: RwLock::new(None) })
    }

    fn read(&self) {
        let value = read_trimmed(&self.path)
            .and_then(|s| s.parse::<f64>().ok())
            .map(|raw| raw / self.scale);
        *self.value.write() = value;
    }
}

impl Sensor for HwmonSensor {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn value(&self) -> Option<f64> {
        *self.value.read()
    }
}

/// One hwmon chip directory. Chips do not nest, so the tree is flat.
#[derive(Debug)]
pub struct HwmonChip {
    identifier: String,
    sensors: Vec<Arc<HwmonSensor>>,
}

impl HwmonChip {
    /// Build a chip node from one `hwmonN` directory. The identifier is
    /// `/<dir>/<chip name>`, unique because the directory name is.
    fn scan(dir: &Path) -> Option<Arc<Self>> {
        let dir_name = dir.file_name()?.to_str()?.to_string();
        let chip_name = read_trimmed(&dir.join("name")).unwrap_or_else(|| dir_name.clone());
        let identifier = format!("/{}/{}", dir_name, chip_name);

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Skipping unreadable hwmon directory {}: {}", dir.display(), err);
                return None;
            },
        };

        let mut channels: Vec<String> = entries
            .flatten()
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.ends_with("_input"))
            .collect();
        channels.sort();

        let sensors = channels
            .into_iter()
            .map(|channel| {
                let stem = channel.trim_end_matches("_input").to_string();
                HwmonSensor::new(
                    format!("{}/{}", identifier, stem),
                    dir.join(&channel),
                    channel_scale(&stem),
                )
            })
            .collect();

        Some(Arc::new(Self { identifier, sensors }))
    }
}

impl Hardware for HwmonChip {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn refresh(&self) {
        for sensor in &self.sensors {
            sensor.read();
        }
    }

    fn sub_hardware(&self) -> Vec<Arc<dyn Hardware>> {
        Vec::new()
    }

    fn sensors(&self) -> Vec<Arc<dyn Sensor>> {
        self.sensors.iter().map(|s| s.clone() as Arc<dyn Sensor>).collect()
    }
}

/// Provider over `/sys/class/hwmon`.
///
/// `open` enumerates the chip directories present at that moment; values
/// appear once the chips are refreshed. A machine without hwmon support
/// yields an empty tree rather than an error.
#[derive(Debug)]
pub struct HwmonProvider {
    root: PathBuf,
    hardware: RwLock<Vec<Arc<dyn Hardware>>>,
}

impl HwmonProvider {
    pub fn new() -> Self {
        Self::with_root(HWMON_ROOT)
    }

    /// Use a different root directory. Tests point this at a fabricated
    /// tree to exercise the provider without real hardware.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), hardware: RwLock::new(Vec::new()) }
    }
}

impl Default for HwmonProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareProvider for HwmonProvider {
    fn open(&self) -> Result<()> {
        let mut dirs: Vec<PathBuf> = match fs::read_dir(&self.root) {
            Ok(entries) => entries.flatten().map(|e| e.path()).filter(|p| p.is_dir()).collect(),
            Err(err) => {
                warn!("No hwmon tree at {}: {}", self.root.display(), err);
                Vec::new()
            },
        };
        dirs.sort();

        let chips: Vec<Arc<dyn Hardware>> = dirs
            .iter()
            .filter_map(|dir| HwmonChip::scan(dir))
            .map(|chip| chip as Arc<dyn Hardware>)
            .collect();
        debug!("Opened hwmon tree with {} chips", chips.len());
        *self.hardware.write() = chips;
        Ok(())
    }

    fn close(&self) {
        self.hardware.write().clear();
    }

    fn hardware(&self) -> Vec<Arc<dyn Hardware>> {
        self.hardware.read().clone()
    }
}
