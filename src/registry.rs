//! The set of configured limits over one hardware session.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::LimitConfig;
use crate::index::SensorIndex;
use crate::limit::SensorLimit;
use crate::provider::{Hardware, HardwareProvider};
use crate::{Error, Result};

/// All configured sensor limits of one provider session, plus the distinct
/// hardware nodes that have to be refreshed to serve them.
///
/// Built once from a configuration list, then driven by repeated
/// [`update_all`](Self::update_all) calls. Construction is all-or-nothing:
/// the first bad entry fails it, and limits bound before the failure are
/// released again, so no events linger.
#[derive(Debug)]
pub struct LimitRegistry {
    limits: HashMap<String, SensorLimit>,
    hardware: HashMap<String, Arc<dyn Hardware>>,
    disposed: bool,
}

impl LimitRegistry {
    /// Resolve `configs`, in order, against the provider's current tree.
    ///
    /// One scan of the tree serves all entries. Each entry must use an
    /// event name fragment no earlier entry used and must name a sensor
    /// present in the tree; the offending entry otherwise fails the whole
    /// construction with [`Error::DuplicateEventName`] or
    /// [`Error::SensorNotFound`]. An empty configuration list is valid and
    /// yields a registry whose update cycle does nothing.
    pub fn new(
        provider: &dyn HardwareProvider,
        configs: impl IntoIterator<Item = LimitConfig>,
    ) -> Result<Self> {
        let index = SensorIndex::scan(provider)?;
        let mut limits: HashMap<String, SensorLimit> = HashMap::new();
        let mut hardware: HashMap<String, Arc<dyn Hardware>> = HashMap::new();

        for config in configs {
            let fragment = config.eventname().to_string();
            if limits.contains_key(&fragment) {
                return Err(Error::duplicate_event_name(fragment));
            }
            let Some(entry) = index.get(config.sensor()) else {
                return Err(Error::sensor_not_found(config.sensor(), fragment));
            };
            let host = entry.hardware().clone();
            let limit = SensorLimit::bind(config, entry.sensor().clone())?;
            limits.insert(fragment, limit);
            // Sensors sharing a node collapse onto one entry here.
            hardware.entry(host.identifier().to_string()).or_insert(host);
        }

        debug!(
            "Built limit registry: {} limits over {} hardware nodes",
            limits.len(),
            hardware.len()
        );
        Ok(Self { limits, hardware, disposed: false })
    }

    /// Refresh every hardware node hosting a configured sensor, then
    /// recompute every limit. The two passes never interleave, so all
    /// limits judge values from the same refresh sweep.
    pub fn update_all(&self) -> Result<()> {
        if self.disposed {
            return Err(Error::disposed("limit registry"));
        }
        for hardware in self.hardware.values() {
            hardware.refresh();
        }
        for limit in self.limits.values() {
            limit.update()?;
        }
        Ok(())
    }

    /// Look up a limit by its event name fragment.
    pub fn get(&self, fragment: &str) -> Option<&SensorLimit> {
        self.limits.get(fragment)
    }

    /// All limits, ordered by event name fragment.
    pub fn limits(&self) -> Vec<&SensorLimit> {
        let mut limits: Vec<&SensorLimit> = self.limits.values().collect();
        limits.sort_by_key(|limit| limit.config().eventname());
        limits
    }

    /// The distinct hardware nodes refreshed by each update cycle, ordered
    /// by identifier.
    pub fn hardware(&self) -> Vec<&Arc<dyn Hardware>> {
        let mut hardware: Vec<&Arc<dyn Hardware>> = self.hardware.values().collect();
        hardware.sort_by_key(|node| node.identifier());
        hardware
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Dispose every limit (releasing its event) and forget the hardware
    /// set. The first call does the work; later calls do nothing.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.hardware.clear();
            for (_, mut limit) in self.limits.drain() {
                limit.dispose();
            }
            debug!("Disposed limit registry");
        }
    }
}
